//! Parser behind a blocking mutex
//!
//! For deployments where the radio task and a reporting task can preempt
//! each other. Each call holds the lock only while one group is applied,
//! the state is reset, or a snapshot is copied out; no I/O happens under
//! the lock.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use super::group::{Group, GroupKind};
use super::parser::{RdsParser, RdsSnapshot};

/// `RdsParser` shared between execution contexts
pub struct SharedRdsParser<M: RawMutex> {
    inner: Mutex<M, RefCell<RdsParser>>,
}

impl<M: RawMutex> SharedRdsParser<M> {
    /// Create a shared parser with nothing received
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(RdsParser::new())),
        }
    }

    /// Consume one group
    pub fn apply(&self, group: &Group) -> GroupKind {
        self.inner.lock(|parser| parser.borrow_mut().update(group))
    }

    /// Forget everything
    pub fn reset(&self) {
        self.inner.lock(|parser| parser.borrow_mut().reset());
    }

    /// Copy out the committed fields
    #[must_use]
    pub fn snapshot(&self) -> RdsSnapshot {
        self.inner.lock(|parser| parser.borrow().snapshot())
    }

    /// Read from the parser without copying
    pub fn with<R>(&self, f: impl FnOnce(&RdsParser) -> R) -> R {
        self.inner.lock(|parser| f(&parser.borrow()))
    }
}

impl<M: RawMutex> Default for SharedRdsParser<M> {
    fn default() -> Self {
        Self::new()
    }
}
