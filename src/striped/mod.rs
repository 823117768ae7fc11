//! Striped engine internals and public API.

mod engine;
mod key;
mod table;
mod worker;

pub use engine::{Error, InvalidDimensions, StripedLife, StripedLifeConfig, game_of_life};
