//! Shared vocabulary: coordinates, directions, attack outcomes and board errors.

use core::fmt;
use core::str::FromStr;

use crate::bitboard::{BitBoard, BitBoardError};
use crate::config::BOARD_SIZE;
use crate::ship::ShipError;

/// `(row, col)` on the board.
pub type Coord = (usize, usize);

/// Cell mask sized for the game board.
pub type Grid = BitBoard<u128, BOARD_SIZE>;

/// Returns `true` when `(row, col)` lies on the board.
#[inline]
pub fn on_board(row: usize, col: usize) -> bool {
    row < BOARD_SIZE && col < BOARD_SIZE
}

/// Axis a ship extends along from its start cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Extends along increasing columns.
    Horizontal,
    /// Extends along increasing rows.
    Vertical,
}

impl Direction {
    pub fn rotated(self) -> Self {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }

    /// Cell `offset` steps from `start` along this axis, if it is on the board.
    pub fn offset(self, start: Coord, offset: usize) -> Option<Coord> {
        let (row, col) = match self {
            Direction::Horizontal => (start.0, start.1 + offset),
            Direction::Vertical => (start.0 + offset, start.1),
        };
        on_board(row, col).then_some((row, col))
    }

    /// One step along this axis, forward (increasing) or backward.
    pub fn step(self, from: Coord, forward: bool) -> Option<Coord> {
        if forward {
            return self.offset(from, 1);
        }
        match self {
            Direction::Horizontal => from.1.checked_sub(1).map(|c| (from.0, c)),
            Direction::Vertical => from.0.checked_sub(1).map(|r| (r, from.1)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Horizontal => write!(f, "horizontal"),
            Direction::Vertical => write!(f, "vertical"),
        }
    }
}

/// Error returned when a direction name is neither horizontal nor vertical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError;

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "direction must be \"horizontal\" or \"vertical\"")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            h if h.eq_ignore_ascii_case("horizontal") || h.eq_ignore_ascii_case("h") => {
                Ok(Direction::Horizontal)
            }
            v if v.eq_ignore_ascii_case("vertical") || v.eq_ignore_ascii_case("v") => {
                Ok(Direction::Vertical)
            }
            _ => Err(ParseDirectionError),
        }
    }
}

/// Why an attack was refused without touching the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum RejectReason {
    OutOfBounds,
    AlreadyAttacked,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::OutOfBounds => write!(f, "invalid coordinate"),
            RejectReason::AlreadyAttacked => write!(f, "attacked"),
        }
    }
}

/// Result of an attack on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// Struck a ship that is still afloat.
    Hit,
    Miss,
    /// Struck the last intact cell of a ship.
    Sink,
    /// Nothing changed on the board.
    Rejected(RejectReason),
}

impl AttackOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, AttackOutcome::Hit | AttackOutcome::Sink)
    }

    pub fn is_sunk(&self) -> bool {
        matches!(self, AttackOutcome::Sink)
    }

    /// `false` when the attack was refused.
    pub fn is_valid(&self) -> bool {
        !matches!(self, AttackOutcome::Rejected(_))
    }

    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            AttackOutcome::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl fmt::Display for AttackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackOutcome::Hit => write!(f, "hit"),
            AttackOutcome::Miss => write!(f, "miss"),
            AttackOutcome::Sink => write!(f, "hit and sunk"),
            AttackOutcome::Rejected(reason) => write!(f, "rejected: {}", reason),
        }
    }
}

/// Reasons a ship could not be placed. Placement is a routine, retried
/// operation, so these are ordinary values rather than panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// Start coordinate is not on the board.
    StartOffBoard { row: usize, col: usize },
    /// The ship would extend past the board edge.
    ExceedsBoard,
    /// The ship would share a cell with, or enter the buffer zone of, another ship.
    Overlap,
    InvalidShip(ShipError),
    /// Ships cannot be moved once the board has been fired upon.
    BoardUnderAttack,
    UnknownShip { index: usize },
    /// Random placement could not fit the whole fleet.
    FleetDoesNotFit,
}

impl From<ShipError> for PlacementError {
    fn from(err: ShipError) -> Self {
        PlacementError::InvalidShip(err)
    }
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::StartOffBoard { row, col } => write!(
                f,
                "start ({}, {}) is out of board boundaries 0..{}",
                row, col, BOARD_SIZE
            ),
            PlacementError::ExceedsBoard => write!(f, "ship placement exceeds board boundaries"),
            PlacementError::Overlap => write!(f, "ship placement overlaps with another ship"),
            PlacementError::InvalidShip(e) => write!(f, "{}", e),
            PlacementError::BoardUnderAttack => {
                write!(f, "ships cannot be moved after the board has been attacked")
            }
            PlacementError::UnknownShip { index } => write!(f, "no ship with index {}", index),
            PlacementError::FleetDoesNotFit => write!(f, "unable to fit the fleet on the board"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}

/// Errors returned by board read accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    OutOfBounds { row: usize, col: usize },
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        match err {
            BitBoardError::IndexOutOfBounds { row, col } => BoardError::OutOfBounds { row, col },
            BitBoardError::SizeTooLarge { .. } => BoardError::OutOfBounds {
                row: BOARD_SIZE,
                col: BOARD_SIZE,
            },
        }
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds { row, col } => write!(
                f,
                "coordinates ({}, {}) must be integers between 0 and {}",
                row,
                col,
                BOARD_SIZE - 1
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_stops_at_edges() {
        assert_eq!(Direction::Horizontal.step((0, 0), false), None);
        assert_eq!(Direction::Vertical.step((9, 4), true), None);
        assert_eq!(Direction::Vertical.step((3, 4), false), Some((2, 4)));
    }

    #[test]
    fn parse_direction() {
        assert_eq!("Horizontal".parse::<Direction>(), Ok(Direction::Horizontal));
        assert_eq!(" v ".parse::<Direction>(), Ok(Direction::Vertical));
        assert_eq!("diagonal".parse::<Direction>(), Err(ParseDirectionError));
    }

    #[test]
    fn outcome_flags() {
        assert!(AttackOutcome::Sink.is_hit() && AttackOutcome::Sink.is_sunk());
        assert!(!AttackOutcome::Miss.is_hit());
        let rejected = AttackOutcome::Rejected(RejectReason::AlreadyAttacked);
        assert!(!rejected.is_hit() && !rejected.is_sunk() && !rejected.is_valid());
        assert_eq!(rejected.reason(), Some(RejectReason::AlreadyAttacked));
    }

    #[test]
    fn overlap_reason_mentions_overlap() {
        assert!(PlacementError::Overlap.to_string().contains("overlap"));
    }
}
