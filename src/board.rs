//! Gameboard: the cell grid, placed ships and the placement and attack rules.

use alloc::vec::Vec;
use core::fmt;
use core::ops::RangeInclusive;

use log::debug;

use crate::common::{
    on_board, AttackOutcome, BoardError, Coord, Direction, Grid, PlacementError, RejectReason,
};
use crate::config::{PlacementPolicy, Rules, BOARD_SIZE, MAX_FLEET_ROLLS, MAX_PLACEMENT_ATTEMPTS};
use crate::random::Randomness;
use crate::ship::Ship;

/// Attack state of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum CellState {
    #[default]
    Empty,
    Hit,
    Miss,
}

/// One board cell. Moves from `Empty` to `Hit` or `Miss` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    state: CellState,
}

impl Cell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_attacked(&self) -> bool {
        self.state != CellState::Empty
    }

    /// Resolve an attack on this cell. Returns `false`, leaving the cell
    /// untouched, if it was already resolved or `state` is `Empty`.
    fn resolve(&mut self, state: CellState) -> bool {
        if self.is_attacked() || state == CellState::Empty {
            return false;
        }
        self.state = state;
        true
    }
}

/// A ship together with the cells it occupies, ordered from its start cell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct PlacedShip {
    ship: Ship,
    direction: Direction,
    positions: Vec<Coord>,
    #[cfg_attr(feature = "std", serde(skip))]
    footprint: Grid,
}

impl PlacedShip {
    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn size(&self) -> usize {
        self.ship.size()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn positions(&self) -> &[Coord] {
        &self.positions
    }

    pub fn start(&self) -> Coord {
        self.positions[0]
    }

    pub fn is_sunk(&self) -> bool {
        self.ship.is_sunk()
    }

    pub fn occupies(&self, row: usize, col: usize) -> bool {
        self.footprint.contains(row, col)
    }

    /// Occupied cells as a mask.
    pub fn footprint(&self) -> Grid {
        self.footprint
    }
}

/// Damage summary for one ship, as shown in a fleet status panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipStatus {
    pub size: usize,
    pub hits: usize,
    pub sunk: bool,
}

/// A player's square grid of cells and the ships placed on it.
#[derive(Clone)]
pub struct Gameboard {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    ships: Vec<PlacedShip>,
    attacked: Grid,
    size_bounds: RangeInclusive<usize>,
    placement: PlacementPolicy,
}

impl Gameboard {
    /// An empty board under the standard rules.
    pub fn new() -> Self {
        Self::with_rules(&Rules::standard())
    }

    /// An empty board using the ship size bounds and placement policy of `rules`.
    pub fn with_rules(rules: &Rules) -> Self {
        Gameboard {
            cells: [[Cell::new(); BOARD_SIZE]; BOARD_SIZE],
            ships: Vec::new(),
            attacked: Grid::new(),
            size_bounds: rules.size_bounds(),
            placement: rules.placement(),
        }
    }

    pub fn placement_policy(&self) -> PlacementPolicy {
        self.placement
    }

    /// Cells around a ship at `(row, col)` where no other ship may be placed
    /// under the buffered policy: its footprint grown by one cell on every
    /// side, clipped to the board.
    pub fn buffer_zone(row: usize, col: usize, size: usize, direction: Direction) -> Vec<Coord> {
        let (height, width) = match direction {
            Direction::Horizontal => (1, size),
            Direction::Vertical => (size, 1),
        };
        let end_row = (row + height).min(BOARD_SIZE - 1);
        let end_col = (col + width).min(BOARD_SIZE - 1);
        let mut zone = Vec::new();
        for r in row.saturating_sub(1)..=end_row {
            for c in col.saturating_sub(1)..=end_col {
                zone.push((r, c));
            }
        }
        zone
    }

    /// Place a ship of `size` starting at `(row, col)` and extending along
    /// `direction`. Returns the new ship's index in the ship list.
    pub fn place_ship(
        &mut self,
        size: usize,
        row: usize,
        col: usize,
        direction: Direction,
    ) -> Result<usize, PlacementError> {
        if !self.attacked.is_empty() {
            return Err(PlacementError::BoardUnderAttack);
        }
        let placed = self.check_placement(size, row, col, direction, None)?;
        self.ships.push(placed);
        Ok(self.ships.len() - 1)
    }

    /// Validate a prospective placement, ignoring the ship at `skip` when moving it.
    fn check_placement(
        &self,
        size: usize,
        row: usize,
        col: usize,
        direction: Direction,
        skip: Option<usize>,
    ) -> Result<PlacedShip, PlacementError> {
        if !on_board(row, col) {
            return Err(PlacementError::StartOffBoard { row, col });
        }
        let ship = Ship::within(size, self.size_bounds.clone())?;

        let mut positions = Vec::with_capacity(size);
        for i in 0..size {
            let cell = direction
                .offset((row, col), i)
                .ok_or(PlacementError::ExceedsBoard)?;
            positions.push(cell);
        }
        let footprint = Grid::from_cells(positions.iter().copied())
            .map_err(|_| PlacementError::ExceedsBoard)?;

        let blocked = self
            .ships
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != skip)
            .fold(Grid::new(), |acc, (_, placed)| {
                acc | self.exclusion_zone(placed)
            });
        if !(blocked & footprint).is_empty() {
            return Err(PlacementError::Overlap);
        }

        Ok(PlacedShip {
            ship,
            direction,
            positions,
            footprint,
        })
    }

    /// Cells a placed ship keeps other ships out of under this board's policy.
    fn exclusion_zone(&self, placed: &PlacedShip) -> Grid {
        match self.placement {
            PlacementPolicy::Buffered => placed.footprint.dilate(),
            PlacementPolicy::Touching => placed.footprint,
        }
    }

    /// Take a ship off the board during setup.
    pub fn remove_ship(&mut self, index: usize) -> Result<PlacedShip, PlacementError> {
        if !self.attacked.is_empty() {
            return Err(PlacementError::BoardUnderAttack);
        }
        if index >= self.ships.len() {
            return Err(PlacementError::UnknownShip { index });
        }
        Ok(self.ships.remove(index))
    }

    /// Move a ship to a new start and direction, keeping its index. The ship
    /// stays where it was if the new placement is refused.
    pub fn relocate_ship(
        &mut self,
        index: usize,
        row: usize,
        col: usize,
        direction: Direction,
    ) -> Result<(), PlacementError> {
        if !self.attacked.is_empty() {
            return Err(PlacementError::BoardUnderAttack);
        }
        let size = self
            .ships
            .get(index)
            .map(PlacedShip::size)
            .ok_or(PlacementError::UnknownShip { index })?;
        let moved = self.check_placement(size, row, col, direction, Some(index))?;
        self.ships[index] = moved;
        Ok(())
    }

    /// Turn a ship about its start cell.
    pub fn rotate_ship(&mut self, index: usize) -> Result<(), PlacementError> {
        let (start, direction) = self
            .ships
            .get(index)
            .map(|s| (s.start(), s.direction()))
            .ok_or(PlacementError::UnknownShip { index })?;
        self.relocate_ship(index, start.0, start.1, direction.rotated())
    }

    /// Remove every ship, leaving the cells alone.
    pub fn clear_ships(&mut self) -> Result<(), PlacementError> {
        if !self.attacked.is_empty() {
            return Err(PlacementError::BoardUnderAttack);
        }
        self.ships.clear();
        Ok(())
    }

    /// Clear every cell and ship for a new round.
    pub fn reset(&mut self) {
        self.cells = [[Cell::new(); BOARD_SIZE]; BOARD_SIZE];
        self.ships.clear();
        self.attacked.clear_all();
    }

    /// Reset the board, then place every ship of `fleet` at a uniformly random
    /// start and direction, retrying until each placement succeeds.
    pub fn place_fleet_randomly(
        &mut self,
        rng: &mut dyn Randomness,
        fleet: &[usize],
    ) -> Result<(), PlacementError> {
        for roll in 0..MAX_FLEET_ROLLS {
            self.reset();
            if self.try_place_fleet(rng, fleet)? {
                debug!("placed fleet of {} ships after {} re-rolls", fleet.len(), roll);
                return Ok(());
            }
        }
        self.reset();
        Err(PlacementError::FleetDoesNotFit)
    }

    /// One pass over the fleet. `Ok(false)` means some ship found no spot.
    fn try_place_fleet(
        &mut self,
        rng: &mut dyn Randomness,
        fleet: &[usize],
    ) -> Result<bool, PlacementError> {
        for &size in fleet {
            let mut placed = false;
            for _ in 0..MAX_PLACEMENT_ATTEMPTS {
                let row = rng.index(BOARD_SIZE);
                let col = rng.index(BOARD_SIZE);
                let direction = if rng.flip() {
                    Direction::Horizontal
                } else {
                    Direction::Vertical
                };
                match self.place_ship(size, row, col, direction) {
                    Ok(_) => {
                        placed = true;
                        break;
                    }
                    Err(PlacementError::InvalidShip(e)) => return Err(e.into()),
                    Err(_) => continue,
                }
            }
            if !placed {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Fire at `(row, col)`. Off-board and repeated attacks are refused
    /// without changing anything.
    pub fn receive_attack(&mut self, row: usize, col: usize) -> AttackOutcome {
        if !on_board(row, col) {
            return AttackOutcome::Rejected(RejectReason::OutOfBounds);
        }
        if self.cells[row][col].is_attacked() {
            return AttackOutcome::Rejected(RejectReason::AlreadyAttacked);
        }
        self.attacked.insert(row, col);

        if let Some(placed) = self.ships.iter_mut().find(|s| s.occupies(row, col)) {
            placed.ship.hit();
            self.cells[row][col].resolve(CellState::Hit);
            if placed.ship.is_sunk() {
                debug!("ship of size {} at {:?} sunk", placed.size(), placed.start());
                return AttackOutcome::Sink;
            }
            return AttackOutcome::Hit;
        }
        self.cells[row][col].resolve(CellState::Miss);
        AttackOutcome::Miss
    }

    /// `true` once at least one ship is placed and every ship is sunk. An
    /// empty board is an unfinished setup, not a defeat.
    pub fn all_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(PlacedShip::is_sunk)
    }

    pub fn cell_state(&self, row: usize, col: usize) -> Result<CellState, BoardError> {
        if !on_board(row, col) {
            return Err(BoardError::OutOfBounds { row, col });
        }
        Ok(self.cells[row][col].state())
    }

    pub fn is_cell_attacked(&self, row: usize, col: usize) -> Result<bool, BoardError> {
        Ok(self.cell_state(row, col)? != CellState::Empty)
    }

    /// Copy of the grid's cell states, indexed `[row][col]`.
    pub fn cells(&self) -> Vec<Vec<CellState>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(Cell::state).collect())
            .collect()
    }

    /// Copy of the placed ships in placement order.
    pub fn ships(&self) -> Vec<PlacedShip> {
        self.ships.clone()
    }

    pub fn ship(&self, index: usize) -> Option<&PlacedShip> {
        self.ships.get(index)
    }

    pub fn ship_count(&self) -> usize {
        self.ships.len()
    }

    /// Index of the ship occupying `(row, col)`, if any.
    pub fn ship_at(&self, row: usize, col: usize) -> Option<usize> {
        self.ships.iter().position(|s| s.occupies(row, col))
    }

    pub fn fleet_status(&self) -> Vec<ShipStatus> {
        self.ships
            .iter()
            .map(|s| ShipStatus {
                size: s.size(),
                hits: s.ship.hits(),
                sunk: s.is_sunk(),
            })
            .collect()
    }

    pub fn ships_remaining(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }

    /// Mask of every attacked cell.
    pub fn attacked(&self) -> Grid {
        self.attacked
    }

    /// Mask of every cell occupied by a ship.
    pub fn occupied(&self) -> Grid {
        self.ships
            .iter()
            .fold(Grid::new(), |acc, s| acc | s.footprint)
    }
}

impl Default for Gameboard {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Gameboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gameboard")
            .field("placement", &self.placement)
            .field("ships", &self.ships)
            .field("attacked", &self.attacked.count_ones())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_resolves_once() {
        let mut cell = Cell::new();
        assert!(!cell.resolve(CellState::Empty));
        assert!(cell.resolve(CellState::Miss));
        assert!(!cell.resolve(CellState::Hit));
        assert_eq!(cell.state(), CellState::Miss);
    }

    #[test]
    fn buffer_zone_matches_dilated_footprint() {
        let zone = Gameboard::buffer_zone(5, 5, 4, Direction::Horizontal);
        let footprint = Grid::from_cells([(5, 5), (5, 6), (5, 7), (5, 8)]).unwrap();
        assert_eq!(Grid::from_cells(zone).unwrap(), footprint.dilate());
    }
}
