//! Bot targeting strategies.
//!
//! - [`EasyBot`]: uniform random fire, never repeating a cell.
//! - [`NormalBot`]: hunt and target, locking onto a ship's axis after two hits.
//! - [`HardBot`]: hunt and target that also skips cells which provably hold
//!   no ship, using sunk ships' buffer zones and the smallest ship still afloat.

mod easy;
mod hard;
pub mod hunt;
mod normal;

pub use easy::EasyBot;
pub use hard::HardBot;
pub use hunt::{HuntState, HuntTracker, SunkShip};
pub use normal::NormalBot;

use alloc::vec::Vec;

use crate::common::{Coord, Grid};
use crate::config::BOARD_SIZE;
use crate::random::Randomness;

/// Rejection-sampling draws before falling back to an exhaustive scan.
const FRESH_PICK_ATTEMPTS: usize = BOARD_SIZE * BOARD_SIZE * 4;

/// Draw random cells until one is unblocked and `admissible`.
///
/// Sampling is bounded; past the bound one of the remaining admissible cells
/// is chosen uniformly, then any unblocked cell. `None` once every cell is
/// blocked.
pub(crate) fn pick_fresh<F>(rng: &mut dyn Randomness, blocked: &Grid, admissible: F) -> Option<Coord>
where
    F: Fn(Coord) -> bool,
{
    for _ in 0..FRESH_PICK_ATTEMPTS {
        let row = rng.index(BOARD_SIZE);
        let col = rng.index(BOARD_SIZE);
        if !blocked.contains(row, col) && admissible((row, col)) {
            return Some((row, col));
        }
    }

    let open: Vec<Coord> = (!*blocked).iter_set_bits().collect();
    let preferred: Vec<Coord> = open.iter().copied().filter(|&c| admissible(c)).collect();
    let pool = if preferred.is_empty() { open } else { preferred };
    if pool.is_empty() {
        return None;
    }
    Some(pool[rng.index(pool.len())])
}
