//! Board dimensions, the standard fleet and the per-game rule set.

use alloc::vec::Vec;
use core::fmt;
use core::ops::RangeInclusive;

pub const BOARD_SIZE: usize = 10;
pub const MIN_SHIP_SIZE: usize = 1;
pub const MAX_SHIP_SIZE: usize = 5;
pub const SHIP_SIZES: [usize; 5] = [5, 4, 3, 3, 2];

/// Random placement tries per ship before the whole fleet is re-rolled.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1_000;
/// Whole-fleet re-rolls before random placement gives up.
pub const MAX_FLEET_ROLLS: usize = 100;

/// How close two ships may be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum PlacementPolicy {
    /// Ships may not overlap, nor touch one another, diagonals included.
    #[default]
    Buffered,
    /// Ships may not overlap but may touch.
    Touching,
}

/// Errors detected while validating a [`Rules`] value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyFleet,
    /// The allowed ship size range is empty or does not fit the board.
    InvalidSizeBounds { min: usize, max: usize },
    /// A fleet entry lies outside the allowed ship size range.
    ShipSizeOutOfBounds { size: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyFleet => write!(f, "fleet must contain at least one ship"),
            ConfigError::InvalidSizeBounds { min, max } => write!(
                f,
                "ship size bounds {}..={} must lie within 1..={}",
                min, max, BOARD_SIZE
            ),
            ConfigError::ShipSizeOutOfBounds { size } => {
                write!(f, "fleet ship of size {} is outside the allowed bounds", size)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Rules of a single game: what gets placed and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    fleet: Vec<usize>,
    size_bounds: RangeInclusive<usize>,
    placement: PlacementPolicy,
}

impl Rules {
    /// The standard fleet under the buffered placement policy.
    pub fn standard() -> Self {
        Self {
            fleet: SHIP_SIZES.to_vec(),
            size_bounds: MIN_SHIP_SIZE..=MAX_SHIP_SIZE,
            placement: PlacementPolicy::Buffered,
        }
    }

    pub fn with_fleet(mut self, fleet: Vec<usize>) -> Self {
        self.fleet = fleet;
        self
    }

    pub fn with_size_bounds(mut self, bounds: RangeInclusive<usize>) -> Self {
        self.size_bounds = bounds;
        self
    }

    pub fn with_placement(mut self, placement: PlacementPolicy) -> Self {
        self.placement = placement;
        self
    }

    pub fn fleet(&self) -> &[usize] {
        &self.fleet
    }

    pub fn size_bounds(&self) -> RangeInclusive<usize> {
        self.size_bounds.clone()
    }

    pub fn placement(&self) -> PlacementPolicy {
        self.placement
    }

    /// Check that the fleet can be expressed under the size bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (*self.size_bounds.start(), *self.size_bounds.end());
        if min == 0 || min > max || max > BOARD_SIZE {
            return Err(ConfigError::InvalidSizeBounds { min, max });
        }
        if self.fleet.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }
        if let Some(&size) = self.fleet.iter().find(|s| !self.size_bounds.contains(s)) {
            return Err(ConfigError::ShipSizeOutOfBounds { size });
        }
        Ok(())
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn standard_rules_are_valid() {
        assert_eq!(Rules::standard().validate(), Ok(()));
    }

    #[test]
    fn fleet_outside_bounds_rejected() {
        let rules = Rules::standard().with_size_bounds(2..=5).with_fleet(vec![1, 3]);
        assert_eq!(
            rules.validate(),
            Err(ConfigError::ShipSizeOutOfBounds { size: 1 })
        );
    }

    #[test]
    fn bounds_larger_than_board_rejected() {
        let rules = Rules::standard().with_size_bounds(1..=11);
        assert!(matches!(
            rules.validate(),
            Err(ConfigError::InvalidSizeBounds { .. })
        ));
        assert_eq!(
            Rules::standard().with_fleet(vec![]).validate(),
            Err(ConfigError::EmptyFleet)
        );
    }
}
