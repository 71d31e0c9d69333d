#![cfg_attr(not(feature = "std"), no_std)]

//! Rules engine and bot opponents for a human versus bot game of battleship.

extern crate alloc;

pub mod ai;
mod bitboard;
mod board;
mod common;
mod config;
mod game;
mod player;
mod random;
mod ship;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod render;

pub use ai::{EasyBot, HardBot, HuntState, HuntTracker, NormalBot, SunkShip};
pub use bitboard::{BitBoard, BitBoardError};
pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use player::*;
pub use random::*;
pub use ship::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, level_from_env};
