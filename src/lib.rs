//! FM Radio Firmware Library
//!
//! Core of an STM32G474-based FM receiver built around an `RDA5807M`
//! tuner. The tuner demodulates the RDS subcarrier and hands over
//! 4-block groups; this crate decodes them into station name, RadioText,
//! clock time and RadioText-Plus metadata and keeps that state in step
//! with the tuned frequency.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │  Radio Control (tune / seek / scan)  │  RDS status report    │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      RDS LAYER                               │
//! │  Group dispatch │ PS │ RadioText │ Clock │ RT+ │ ODA         │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     DRIVER LAYER                             │
//! │  RDA5807M over async I2C (embedded-hal-async)                │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                          │
//! │           embassy-rs (async/await executor)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Fixed-size state**: every buffer is bounded, nothing allocates
//! - **Commit on completion**: partial data never reaches a reader
//! - **Type-driven design**: custom types enforce invariants at compile time
//! - **Explicit error handling**: all fallible operations return `Result`

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[macro_use]
mod fmt;

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Peripheral Drivers
///
/// The `RDA5807M` tuner.
pub mod drivers;

/// Radio Data System
///
/// Group decoding and the per-station RDS state.
pub mod rds;

/// Radio Control Logic
///
/// Tuner abstraction, tuning, seek and scan.
pub mod radio;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    pub use crate::radio::{RadioCommand, RadioControl, RadioEvent, Tuner};
    pub use crate::rds::{RdsParser, RdsSnapshot};

    // Common traits
    pub use embedded_hal_async::i2c::I2c;

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
