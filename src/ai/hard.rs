use alloc::vec::Vec;

use log::{debug, warn};

use crate::common::{AttackOutcome, Coord, Direction, Grid};
use crate::config::{PlacementPolicy, Rules};
use crate::player::{AttackStrategy, Difficulty, PlayerError, PlayerKind};
use crate::random::Randomness;

use super::hunt::{HuntState, HuntTracker, SunkShip};
use super::pick_fresh;

/// Hunt and target that also rules out cells which cannot hold a ship.
///
/// Cells of sunk ships and, under the buffered placement policy, their buffer
/// zones are provably empty. A fresh search cell must also leave room along
/// some axis for the smallest ship still afloat.
#[derive(Debug, Clone)]
pub struct HardBot {
    attacked: Grid,
    hunt: HuntTracker,
    sunk_ships: Vec<SunkShip>,
    /// Unattacked cells known to be free of ships.
    no_ship_zone: Grid,
    fleet: Vec<usize>,
    remaining: Vec<usize>,
    placement: PlacementPolicy,
}

impl HardBot {
    pub fn new(rules: &Rules) -> Self {
        Self {
            attacked: Grid::new(),
            hunt: HuntTracker::new(),
            sunk_ships: Vec::new(),
            no_ship_zone: Grid::new(),
            fleet: rules.fleet().to_vec(),
            remaining: rules.fleet().to_vec(),
            placement: rules.placement(),
        }
    }

    pub fn attacked(&self) -> Grid {
        self.attacked
    }

    pub fn hunt(&self) -> &HuntTracker {
        &self.hunt
    }

    pub fn state(&self) -> HuntState {
        self.hunt.state()
    }

    pub fn sunk_ships(&self) -> &[SunkShip] {
        &self.sunk_ships
    }

    /// Sizes of enemy ships not yet seen sinking.
    pub fn remaining_fleet(&self) -> &[usize] {
        &self.remaining
    }

    pub fn smallest_remaining(&self) -> usize {
        self.remaining.iter().copied().min().unwrap_or(1)
    }

    /// Cells the bot will never fire at: attacked or provably empty.
    pub fn blocked(&self) -> Grid {
        self.attacked | self.no_ship_zone
    }

    /// Whether `cell` leaves room for the smallest remaining ship along
    /// either axis, counting only unblocked cells.
    pub fn has_room(&self, cell: Coord, blocked: &Grid) -> bool {
        let need = self.smallest_remaining();
        if need <= 1 {
            return true;
        }
        let run = |direction: Direction, forward: bool| {
            let mut cursor = cell;
            let mut free = 0;
            while free + 1 < need {
                match direction.step(cursor, forward) {
                    Some(next) if !blocked.contains(next.0, next.1) => {
                        free += 1;
                        cursor = next;
                    }
                    _ => break,
                }
            }
            free
        };
        [Direction::Horizontal, Direction::Vertical]
            .into_iter()
            .any(|d| 1 + run(d, false) + run(d, true) >= need)
    }

    fn register_sunk(&mut self, sunk: SunkShip) {
        let footprint = sunk.footprint();
        self.no_ship_zone |= match self.placement {
            PlacementPolicy::Buffered => footprint.dilate(),
            PlacementPolicy::Touching => footprint,
        };
        match self.remaining.iter().position(|&s| s == sunk.size()) {
            Some(i) => {
                self.remaining.swap_remove(i);
            }
            None => warn!(
                "sunk ship of size {} does not match any remaining ship {:?}",
                sunk.size(),
                self.remaining
            ),
        }
        debug!("remaining enemy fleet {:?}", self.remaining);
        self.sunk_ships.push(sunk);
    }
}

impl AttackStrategy for HardBot {
    fn kind(&self) -> PlayerKind {
        PlayerKind::Bot(Difficulty::Hard)
    }

    fn select_target(
        &mut self,
        rng: &mut dyn Randomness,
        _supplied: Option<Coord>,
    ) -> Result<Coord, PlayerError> {
        let blocked = self.blocked();
        if let Some(probe) = self.hunt.next_probe(&blocked, rng) {
            return Ok(probe);
        }
        let this = &*self;
        pick_fresh(rng, &blocked, |cell| this.has_room(cell, &blocked))
            .ok_or(PlayerError::NoTargetsLeft)
    }

    fn handle_attack_result(&mut self, coord: Coord, outcome: AttackOutcome) {
        if !outcome.is_valid() {
            warn!("hard bot shot at {:?} was {}", coord, outcome);
        }
        self.attacked.insert(coord.0, coord.1);
        if let Some(sunk) = self.hunt.record(coord, outcome) {
            self.register_sunk(sunk);
        }
    }

    fn reset_history(&mut self) {
        self.attacked.clear_all();
        self.hunt.reset();
        self.sunk_ships.clear();
        self.no_ship_zone.clear_all();
        self.remaining = self.fleet.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxed_in_cell_has_no_room() {
        let bot = HardBot::new(&Rules::standard());
        let blocked = Grid::from_cells([(1, 7), (3, 7), (2, 6), (2, 8)]).unwrap();
        assert!(!bot.has_room((2, 7), &blocked));
    }

    #[test]
    fn corner_with_one_open_side_has_room() {
        let bot = HardBot::new(&Rules::standard());
        let blocked = Grid::from_cells([(3, 0), (4, 1)]).unwrap();
        assert!(bot.has_room((4, 0), &blocked));
    }

    #[test]
    fn span_through_cell_counts_both_sides() {
        let bot = HardBot::new(&Rules::standard().with_fleet(alloc::vec![3]));
        // horizontal gap of width 3 centred on (5, 5), blocked above and below
        let blocked = Grid::from_cells([(5, 3), (5, 7), (4, 5), (6, 5)]).unwrap();
        assert!(bot.has_room((5, 5), &blocked));
        let tighter = Grid::from_cells([(5, 4), (5, 7), (4, 5), (6, 5)]).unwrap();
        assert!(!bot.has_room((5, 5), &tighter));
    }
}
