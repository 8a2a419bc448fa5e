//! Spinwheel Platform Layer
//!
//! Platform-agnostic types the wheel scroller consumes from its host:
//!
//! - [`PointerEvent`] - a single pointer sample (down, move, up, cancel)
//!   carrying both axes, the tool that produced it and its timestamp
//! - [`Clock`] - the time source used for stylus delays and motion curves
//!
//! Hosts convert their native touch/mouse events into [`PointerEvent`]s and
//! hand them to the scroller. Timestamps are milliseconds on the same time
//! base as the [`Clock`] given to the scroller.
//!
//! # Example
//!
//! ```
//! use spinwheel_platform::{Clock, ManualClock, PointerEvent, ToolType};
//!
//! let clock = ManualClock::new();
//! let down = PointerEvent::down(0.0, 120.0, clock.now_millis());
//! clock.advance(16);
//! let moved = PointerEvent::moved(0.0, 96.0, clock.now_millis()).with_tool(ToolType::Stylus);
//!
//! assert!(down.action.is_down());
//! assert_eq!(moved.time_ms, 16);
//! ```

mod clock;
mod input;

pub use clock::{Clock, ManualClock, SystemClock};
pub use input::{PointerAction, PointerEvent, ToolType};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::input::{PointerAction, PointerEvent, ToolType};
}
