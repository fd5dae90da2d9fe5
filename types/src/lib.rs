//! Common types for the Kaprekar roulette tracker.

pub mod roulette;

mod error;

pub use error::Error;
pub use roulette::*;
