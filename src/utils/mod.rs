//! # Utilities Module
//!
//! Small helpers shared by the game and presentation layers.

pub mod time;

pub use time::*;
