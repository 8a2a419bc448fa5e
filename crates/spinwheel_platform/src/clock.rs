//! Time sources
//!
//! The scroller reads time when a touch goes down and whenever it samples
//! a motion curve. Production hosts use [`SystemClock`]; tests and trace
//! replay use [`ManualClock`] so every frame lands on a known timestamp.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Millisecond time source
pub trait Clock {
    /// Current time in milliseconds since an arbitrary, fixed origin
    fn now_millis(&self) -> u64;
}

/// Monotonic clock backed by [`Instant`]
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        // Never report the origin itself; 0 is the scroller's "no touch" sentinel
        self.origin.elapsed().as_millis() as u64 + 1
    }
}

/// Clock that only moves when told to
///
/// Clones share the same time, so a test can keep one handle while the
/// scroller owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock starting at `millis`
    pub fn starting_at(millis: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(millis)),
        }
    }

    /// Jump to an absolute time
    pub fn set(&self, millis: u64) {
        self.now.set(millis);
    }

    /// Move forward by `millis`
    pub fn advance(&self, millis: u64) {
        self.now.set(self.now.get() + millis);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}
