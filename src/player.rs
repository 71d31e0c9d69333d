//! Players and the attack strategies that drive them.
//!
//! A [`Player`] owns a name, a [`Gameboard`] and a boxed [`AttackStrategy`].
//! The human strategy fires wherever it is told to; the bot strategies in
//! [`crate::ai`] pick their own targets.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::ai::{EasyBot, HardBot, NormalBot};
use crate::board::Gameboard;
use crate::common::{AttackOutcome, Coord, PlacementError};
use crate::config::Rules;
use crate::random::Randomness;

/// Bot strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown difficulty name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDifficultyError;

impl fmt::Display for ParseDifficultyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "difficulty must be easy, normal or hard")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseDifficultyError {}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| s.trim().eq_ignore_ascii_case(d.name()))
            .ok_or(ParseDifficultyError)
    }
}

/// Who is behind a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerKind {
    Human,
    Bot(Difficulty),
}

/// Where a player fired and what happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackReport {
    pub row: usize,
    pub col: usize,
    pub outcome: AttackOutcome,
}

/// Errors raised while choosing a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    /// A human attack needs externally supplied coordinates.
    MissingCoordinates,
    /// Every cell of the enemy board has already been attacked.
    NoTargetsLeft,
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerError::MissingCoordinates => write!(f, "human attacks require coordinates"),
            PlayerError::NoTargetsLeft => write!(f, "no unattacked cells left"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlayerError {}

/// Chooses where to fire and learns from the outcome.
pub trait AttackStrategy: Send {
    fn kind(&self) -> PlayerKind;

    /// Choose the next target. `supplied` carries externally chosen
    /// coordinates; bots ignore it.
    fn select_target(
        &mut self,
        rng: &mut dyn Randomness,
        supplied: Option<Coord>,
    ) -> Result<Coord, PlayerError>;

    /// Inform the strategy of the outcome of its last target.
    fn handle_attack_result(&mut self, _coord: Coord, _outcome: AttackOutcome) {}

    /// Forget everything learned about the current enemy board.
    fn reset_history(&mut self) {}

    /// Select a target, fire at `enemy` and learn from the outcome.
    fn attack(
        &mut self,
        enemy: &mut Gameboard,
        rng: &mut dyn Randomness,
        supplied: Option<Coord>,
    ) -> Result<AttackReport, PlayerError> {
        let (row, col) = self.select_target(rng, supplied)?;
        let outcome = enemy.receive_attack(row, col);
        self.handle_attack_result((row, col), outcome);
        Ok(AttackReport { row, col, outcome })
    }
}

/// Fires at externally supplied coordinates.
#[derive(Debug, Default, Clone, Copy)]
pub struct HumanStrategy;

impl AttackStrategy for HumanStrategy {
    fn kind(&self) -> PlayerKind {
        PlayerKind::Human
    }

    fn select_target(
        &mut self,
        _rng: &mut dyn Randomness,
        supplied: Option<Coord>,
    ) -> Result<Coord, PlayerError> {
        supplied.ok_or(PlayerError::MissingCoordinates)
    }
}

/// Build the bot strategy for `difficulty` under `rules`.
pub fn bot_strategy(difficulty: Difficulty, rules: &Rules) -> Box<dyn AttackStrategy> {
    match difficulty {
        Difficulty::Easy => Box::new(EasyBot::new()),
        Difficulty::Normal => Box::new(NormalBot::new()),
        Difficulty::Hard => Box::new(HardBot::new(rules)),
    }
}

/// A named participant with a board and a way of picking targets.
pub struct Player {
    name: String,
    board: Gameboard,
    strategy: Box<dyn AttackStrategy>,
}

impl Player {
    pub fn new(name: impl Into<String>, rules: &Rules, strategy: Box<dyn AttackStrategy>) -> Self {
        Self {
            name: name.into(),
            board: Gameboard::with_rules(rules),
            strategy,
        }
    }

    pub fn human(name: impl Into<String>, rules: &Rules) -> Self {
        Self::new(name, rules, Box::new(HumanStrategy))
    }

    pub fn bot(difficulty: Difficulty, rules: &Rules) -> Self {
        Self::new("Bot", rules, bot_strategy(difficulty, rules))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn kind(&self) -> PlayerKind {
        self.strategy.kind()
    }

    pub fn is_human(&self) -> bool {
        self.kind() == PlayerKind::Human
    }

    pub fn board(&self) -> &Gameboard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Gameboard {
        &mut self.board
    }

    /// Swap in a different strategy, e.g. a new bot difficulty.
    pub fn set_strategy(&mut self, strategy: Box<dyn AttackStrategy>) {
        self.strategy = strategy;
    }

    /// Replace the fleet with `fleet` placed at random. The current board is
    /// kept if the new fleet does not fit.
    pub fn place_ships(
        &mut self,
        rng: &mut dyn Randomness,
        fleet: &[usize],
    ) -> Result<(), PlacementError> {
        let mut board = self.board.clone();
        board.place_fleet_randomly(rng, fleet)?;
        self.board = board;
        Ok(())
    }

    /// Fire at the opponent's board.
    pub fn attack(
        &mut self,
        enemy: &mut Gameboard,
        rng: &mut dyn Randomness,
        target: Option<Coord>,
    ) -> Result<AttackReport, PlayerError> {
        self.strategy.attack(enemy, rng, target)
    }

    pub fn reset_history(&mut self) {
        self.strategy.reset_history();
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("board", &self.board)
            .finish()
    }
}
