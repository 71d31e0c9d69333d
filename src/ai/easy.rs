use log::warn;

use crate::common::{AttackOutcome, Coord, Grid};
use crate::player::{AttackStrategy, Difficulty, PlayerError, PlayerKind};
use crate::random::Randomness;

use super::pick_fresh;

/// Fires at uniformly random cells it has not fired at before.
#[derive(Debug, Clone, Default)]
pub struct EasyBot {
    attacked: Grid,
}

impl EasyBot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells this bot has fired at, from its own bookkeeping.
    pub fn attacked(&self) -> Grid {
        self.attacked
    }

    pub fn has_attacked(&self, row: usize, col: usize) -> bool {
        self.attacked.contains(row, col)
    }
}

impl AttackStrategy for EasyBot {
    fn kind(&self) -> PlayerKind {
        PlayerKind::Bot(Difficulty::Easy)
    }

    fn select_target(
        &mut self,
        rng: &mut dyn Randomness,
        _supplied: Option<Coord>,
    ) -> Result<Coord, PlayerError> {
        pick_fresh(rng, &self.attacked, |_| true).ok_or(PlayerError::NoTargetsLeft)
    }

    fn handle_attack_result(&mut self, (row, col): Coord, outcome: AttackOutcome) {
        if !outcome.is_valid() {
            warn!("easy bot shot at ({}, {}) was {}", row, col, outcome);
        }
        self.attacked.insert(row, col);
    }

    fn reset_history(&mut self) {
        self.attacked.clear_all();
    }
}
