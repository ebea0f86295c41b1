//! Game-state engine for a memory-matching ("concentration") card game.
//!
//! Everything here is a pure value transition: a [`Board`] or [`Session`] snapshot plus an
//! event yields the next snapshot. Timers, rendering and storage live with the caller.

#![no_std]

extern crate alloc;

pub use board::*;
pub use card::*;
pub use error::*;
pub use generator::*;
pub use rng::*;
pub use session::*;
pub use stage::*;
pub use types::*;

mod board;
mod card;
mod error;
mod generator;
mod rng;
mod session;
mod stage;
mod types;
