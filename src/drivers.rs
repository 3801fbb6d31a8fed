//! Peripheral Drivers
//!
//! Drivers for the external ICs on the board.

pub mod rda5807;

pub use rda5807::Rda5807;
