//! Frame scheduler
//!
//! A single-threaded message queue for animation ticks. Components post a
//! tagged tick when they want to be called back on the next frame; the host
//! event loop drains one tick per frame and hands it back to the component.
//!
//! Cancellation removes ticks from the queue instead of flagging them, so a
//! cancelled tick can never be delivered late.
//!
//! ```
//! use spinwheel_animation::FrameScheduler;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq)]
//! enum Tick {
//!     Scroll,
//!     Justify,
//! }
//!
//! let mut scheduler = FrameScheduler::new();
//! scheduler.post(Tick::Scroll);
//! scheduler.set_next(Tick::Justify);
//!
//! assert_eq!(scheduler.len(), 1);
//! assert_eq!(scheduler.next_tick(), Some(Tick::Justify));
//! assert!(scheduler.is_empty());
//! ```

use smallvec::SmallVec;

/// Queue of pending animation ticks, delivered in posting order
#[derive(Clone, Debug)]
pub struct FrameScheduler<M> {
    pending: SmallVec<[M; 2]>,
}

impl<M: Copy + PartialEq + std::fmt::Debug> FrameScheduler<M> {
    pub fn new() -> Self {
        Self {
            pending: SmallVec::new(),
        }
    }

    /// Queue a tick for the next frame
    pub fn post(&mut self, message: M) {
        tracing::trace!("FrameScheduler: post {:?}", message);
        self.pending.push(message);
    }

    /// Drop every queued tick, then queue `message`
    ///
    /// Keeps at most one tick outstanding.
    pub fn set_next(&mut self, message: M) {
        self.clear();
        self.post(message);
    }

    /// Remove all queued ticks with this tag
    pub fn remove(&mut self, message: M) {
        self.pending.retain(|pending| *pending != message);
    }

    /// Remove all queued ticks
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Take the oldest queued tick
    pub fn next_tick(&mut self) -> Option<M> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    pub fn contains(&self, message: M) -> bool {
        self.pending.contains(&message)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

impl<M: Copy + PartialEq + std::fmt::Debug> Default for FrameScheduler<M> {
    fn default() -> Self {
        Self::new()
    }
}
