//! Stripe-parallel Conway's Game of Life (B3/S23) on a toroidal board.

pub mod sequential;
pub mod striped;

pub use sequential::{is_alive, sequential_game_of_life};
pub use striped::{Error, InvalidDimensions, StripedLife, StripedLifeConfig, game_of_life};
