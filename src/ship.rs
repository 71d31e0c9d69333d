//! Ship damage tracking.

use core::fmt;
use core::ops::RangeInclusive;

use crate::config::{MAX_SHIP_SIZE, MIN_SHIP_SIZE};

/// Error returned when a ship is built with a size outside the active bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShipError {
    InvalidSize {
        size: usize,
        min: usize,
        max: usize,
    },
}

impl fmt::Display for ShipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShipError::InvalidSize { size, min, max } => write!(
                f,
                "ship size {} must be between {} and {}, inclusive",
                size, min, max
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ShipError {}

/// A vessel of fixed size and its damage counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    size: usize,
    hits: usize,
}

impl Ship {
    /// Build a ship under the default size bounds.
    pub fn new(size: usize) -> Result<Self, ShipError> {
        Self::within(size, MIN_SHIP_SIZE..=MAX_SHIP_SIZE)
    }

    /// Build a ship whose size must fall within `bounds`. Zero is never a size.
    pub fn within(size: usize, bounds: RangeInclusive<usize>) -> Result<Self, ShipError> {
        if size == 0 || !bounds.contains(&size) {
            return Err(ShipError::InvalidSize {
                size,
                min: (*bounds.start()).max(1),
                max: *bounds.end(),
            });
        }
        Ok(Ship { size, hits: 0 })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Record one more point of damage. The counter stops at the ship's size.
    pub fn hit(&mut self) {
        if self.hits < self.size {
            self.hits += 1;
        }
    }

    pub fn is_sunk(&self) -> bool {
        self.hits >= self.size
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ship of size {} ({} hits)", self.size, self.hits)
    }
}
