//! Turn orchestration between a human and a bot.

use core::fmt;

use log::{debug, info, warn};

use crate::common::{on_board, AttackOutcome, Coord, Direction, PlacementError, RejectReason};
use crate::config::{ConfigError, Rules};
use crate::player::{bot_strategy, AttackReport, Difficulty, Player, PlayerError};
use crate::random::{DefaultRandomness, Randomness};

/// One side of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Side {
    Human,
    Bot,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Human => Side::Bot,
            Side::Bot => Side::Human,
        }
    }
}

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    /// Created but not yet initialised.
    Setup,
    InProgress,
    /// `winner` is `None` only when both fleets went down together.
    Finished { winner: Option<Side> },
}

/// A resolved turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub side: Side,
    pub row: usize,
    pub col: usize,
    pub outcome: AttackOutcome,
    pub status: GameStatus,
}

/// Errors returned by game operations. None of them change game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    NotRunning,
    OutOfTurn { current: Side },
    MissingCoordinates,
    InvalidCoordinate { row: usize, col: usize },
    AttackRejected(RejectReason),
    /// Ships can only be rearranged before the first shot of a round.
    SetupClosed,
    Placement(PlacementError),
    Player(PlayerError),
}

impl From<PlacementError> for GameError {
    fn from(err: PlacementError) -> Self {
        GameError::Placement(err)
    }
}

impl From<PlayerError> for GameError {
    fn from(err: PlayerError) -> Self {
        match err {
            PlayerError::MissingCoordinates => GameError::MissingCoordinates,
            other => GameError::Player(other),
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NotRunning => write!(f, "game is not running"),
            GameError::OutOfTurn { current } => write!(f, "it is the {:?} player's turn", current),
            GameError::MissingCoordinates => write!(f, "human turns require coordinates"),
            GameError::InvalidCoordinate { row, col } => {
                write!(f, "coordinate ({}, {}) is not on the board", row, col)
            }
            GameError::AttackRejected(reason) => write!(f, "attack rejected: {}", reason),
            GameError::SetupClosed => write!(f, "ships cannot be rearranged after the first shot"),
            GameError::Placement(e) => write!(f, "{}", e),
            GameError::Player(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

/// A human versus bot game session. Each session owns its players, boards
/// and random source outright; independent sessions share nothing.
pub struct Game<R: Randomness = DefaultRandomness> {
    rules: Rules,
    human: Player,
    bot: Player,
    current: Side,
    status: GameStatus,
    shots_fired: usize,
    rng: R,
}

impl<R: Randomness> Game<R> {
    pub fn new(rules: Rules, difficulty: Difficulty, rng: R) -> Result<Self, ConfigError> {
        rules.validate()?;
        Ok(Self {
            human: Player::human("Unnamed", &rules),
            bot: Player::bot(difficulty, &rules),
            rules,
            current: Side::Human,
            status: GameStatus::Setup,
            shots_fired: 0,
            rng,
        })
    }

    /// Reset both boards, place both fleets at random, clear bot history and
    /// hand the first turn to the human. If either fleet cannot be placed the
    /// game is left exactly as it was.
    pub fn initialize_game(&mut self) -> Result<(), GameError> {
        let fleet = self.rules.fleet();
        let mut human_board = self.human.board().clone();
        human_board.place_fleet_randomly(&mut self.rng, fleet)?;
        let mut bot_board = self.bot.board().clone();
        bot_board.place_fleet_randomly(&mut self.rng, fleet)?;
        *self.human.board_mut() = human_board;
        *self.bot.board_mut() = bot_board;
        self.human.reset_history();
        self.bot.reset_history();
        self.current = Side::Human;
        self.status = GameStatus::InProgress;
        self.shots_fired = 0;
        info!(
            "new game: {} ships each, bot {:?}",
            fleet.len(),
            self.bot.kind()
        );
        Ok(())
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn human(&self) -> &Player {
        &self.human
    }

    pub fn bot(&self) -> &Player {
        &self.bot
    }

    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::Human => &self.human,
            Side::Bot => &self.bot,
        }
    }

    pub fn current_side(&self) -> Side {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_running(&self) -> bool {
        self.status == GameStatus::InProgress
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }

    pub fn winner_side(&self) -> Option<Side> {
        match self.status {
            GameStatus::Finished { winner } => winner,
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner_side().map(|side| self.player(side))
    }

    /// Shots fired by both sides this round.
    pub fn shots_fired(&self) -> usize {
        self.shots_fired
    }

    pub fn set_human_name(&mut self, name: &str) {
        self.human.set_name(name);
    }

    /// Swap the bot's strategy. Not allowed mid-round.
    pub fn set_bot_difficulty(&mut self, difficulty: Difficulty) -> Result<(), GameError> {
        if self.is_game_running() {
            return Err(GameError::SetupClosed);
        }
        self.bot.set_strategy(bot_strategy(difficulty, &self.rules));
        Ok(())
    }

    fn ensure_setup_open(&self) -> Result<(), GameError> {
        if self.is_game_over() || self.shots_fired > 0 {
            return Err(GameError::SetupClosed);
        }
        Ok(())
    }

    /// Re-roll the human fleet before the first shot.
    pub fn reroll_human_fleet(&mut self) -> Result<(), GameError> {
        self.ensure_setup_open()?;
        self.human.place_ships(&mut self.rng, self.rules.fleet())?;
        Ok(())
    }

    /// Drag one of the human's ships somewhere else before the first shot.
    pub fn relocate_human_ship(
        &mut self,
        index: usize,
        row: usize,
        col: usize,
        direction: Direction,
    ) -> Result<(), GameError> {
        self.ensure_setup_open()?;
        self.human
            .board_mut()
            .relocate_ship(index, row, col, direction)?;
        Ok(())
    }

    pub fn rotate_human_ship(&mut self, index: usize) -> Result<(), GameError> {
        self.ensure_setup_open()?;
        self.human.board_mut().rotate_ship(index)?;
        Ok(())
    }

    /// Advance one turn for whoever is current. The human needs `target`;
    /// the bot picks its own and ignores it.
    pub fn play_turn(&mut self, target: Option<Coord>) -> Result<TurnReport, GameError> {
        match self.current {
            Side::Human => {
                let (row, col) = target.ok_or(GameError::MissingCoordinates)?;
                self.play_human_turn(row, col)
            }
            Side::Bot => self.play_bot_turn(),
        }
    }

    pub fn play_human_turn(&mut self, row: usize, col: usize) -> Result<TurnReport, GameError> {
        self.ensure_turn(Side::Human)?;
        if !on_board(row, col) {
            return Err(GameError::InvalidCoordinate { row, col });
        }
        if self.bot.board().is_cell_attacked(row, col).unwrap_or(true) {
            return Err(GameError::AttackRejected(RejectReason::AlreadyAttacked));
        }
        let report = self
            .human
            .attack(self.bot.board_mut(), &mut self.rng, Some((row, col)))?;
        Ok(self.finish_turn(Side::Human, report))
    }

    pub fn play_bot_turn(&mut self) -> Result<TurnReport, GameError> {
        self.ensure_turn(Side::Bot)?;
        let report = self.bot.attack(self.human.board_mut(), &mut self.rng, None)?;
        if let Some(reason) = report.outcome.reason() {
            warn!("bot fired at ({}, {}) and was refused: {}", report.row, report.col, reason);
            return Err(GameError::AttackRejected(reason));
        }
        Ok(self.finish_turn(Side::Bot, report))
    }

    fn ensure_turn(&self, side: Side) -> Result<(), GameError> {
        if !self.is_game_running() {
            return Err(GameError::NotRunning);
        }
        if self.current != side {
            return Err(GameError::OutOfTurn {
                current: self.current,
            });
        }
        Ok(())
    }

    fn finish_turn(&mut self, side: Side, report: AttackReport) -> TurnReport {
        self.shots_fired += 1;
        debug!(
            "{:?} fired at ({}, {}): {}",
            side, report.row, report.col, report.outcome
        );
        let status = self.check_winner();
        if status == GameStatus::InProgress {
            self.current = side.opponent();
        }
        TurnReport {
            side,
            row: report.row,
            col: report.col,
            outcome: report.outcome,
            status,
        }
    }

    /// Inspect both fleets and end the game if one is fully sunk. Both fleets
    /// sunk at once ends the game with no winner.
    pub fn check_winner(&mut self) -> GameStatus {
        if self.status != GameStatus::InProgress {
            return self.status;
        }
        let winner = match (self.bot.board().all_sunk(), self.human.board().all_sunk()) {
            (false, false) => return self.status,
            (true, false) => Some(Side::Human),
            (false, true) => Some(Side::Bot),
            (true, true) => None,
        };
        self.status = GameStatus::Finished { winner };
        info!(
            "game over after {} shots, winner {:?}",
            self.shots_fired,
            winner.map(|side| self.player(side).name())
        );
        self.status
    }
}

impl<R: Randomness> fmt::Debug for Game<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("status", &self.status)
            .field("current", &self.current)
            .field("shots_fired", &self.shots_fired)
            .field("human", &self.human)
            .field("bot", &self.bot)
            .finish()
    }
}
