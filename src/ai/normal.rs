use log::warn;

use crate::common::{AttackOutcome, Coord, Grid};
use crate::player::{AttackStrategy, Difficulty, PlayerError, PlayerKind};
use crate::random::Randomness;

use super::hunt::{HuntState, HuntTracker};
use super::pick_fresh;

/// Hunt and target: random search until a hit, then work along the ship.
#[derive(Debug, Clone, Default)]
pub struct NormalBot {
    attacked: Grid,
    hunt: HuntTracker,
}

impl NormalBot {
    pub fn new() -> Self {
        Self::default()
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
}

impl AttackStrategy for NormalBot {
    fn kind(&self) -> PlayerKind {
        PlayerKind::Bot(Difficulty::Normal)
    }

    fn select_target(
        &mut self,
        rng: &mut dyn Randomness,
        _supplied: Option<Coord>,
    ) -> Result<Coord, PlayerError> {
        if let Some(probe) = self.hunt.next_probe(&self.attacked, rng) {
            return Ok(probe);
        }
        pick_fresh(rng, &self.attacked, |_| true).ok_or(PlayerError::NoTargetsLeft)
    }

    fn handle_attack_result(&mut self, coord: Coord, outcome: AttackOutcome) {
        if !outcome.is_valid() {
            warn!("normal bot shot at {:?} was {}", coord, outcome);
        }
        self.attacked.insert(coord.0, coord.1);
        self.hunt.record(coord, outcome);
    }

    fn reset_history(&mut self) {
        self.attacked.clear_all();
        self.hunt.reset();
    }
}
