//! Radio Control Logic
//!
//! Tuner abstraction and the control loop that keeps the RDS parser in
//! step with the tuned frequency.

pub mod control;
pub mod tuner;

pub use control::{RadioCommand, RadioControl, RadioError, RadioEvent, RadioResult};
pub use tuner::{TuneStatus, Tuner};
