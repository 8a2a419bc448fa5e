//! Spinwheel Scroll Engine
//!
//! Touch handling and scroll animation for picker wheels: a single-axis,
//! item-snapping scroller that turns raw pointer events into incremental
//! scroll distances and then animates flings and justification.
//!
//! # Features
//!
//! - **WheelScroller**: the gesture translator and animator state machine
//!   (`Idle` → `Scrolling` → `Justifying` → `Idle`)
//! - **Orientations**: [`Vertical`] and [`Horizontal`] strategies, or [`Axis`]
//!   when the choice is made at runtime
//! - **GestureDetector**: fling recognition with touch slop and an impulse
//!   velocity tracker
//! - **WheelSelection**: current item and offset tracking with clamping or
//!   wrap-around
//! - **ScrollerConfig**: TOML-loadable tuning
//!
//! # Example
//!
//! ```
//! use spinwheel_platform::{Clock, ManualClock, PointerEvent};
//! use spinwheel_scroll::{ScrollerConfig, Vertical, WheelScroller, WheelSelection};
//!
//! let clock = ManualClock::new();
//! let mut scroller = WheelScroller::with_clock(
//!     Vertical,
//!     WheelSelection::new(12, 48),
//!     ScrollerConfig::default(),
//!     clock.clone(),
//! );
//!
//! scroller.on_touch_event(&PointerEvent::down(0.0, 200.0, clock.now_millis()));
//! clock.advance(40);
//! scroller.on_touch_event(&PointerEvent::moved(0.0, 104.0, clock.now_millis()));
//! clock.advance(300);
//! scroller.on_touch_event(&PointerEvent::up(0.0, 104.0, clock.now_millis()));
//!
//! while scroller.has_pending_frame() {
//!     clock.advance(16);
//!     scroller.on_frame();
//! }
//!
//! assert_eq!(scroller.listener().current_item(), 2);
//! assert_eq!(scroller.listener().offset(), 0);
//! ```

pub mod config;
pub mod error;
pub mod gesture;
pub mod listener;
pub mod orientation;
pub mod scroller;
pub mod selection;
pub mod velocity;

pub use config::ScrollerConfig;
pub use error::{ConfigError, Result};
pub use gesture::{Fling, GestureConfig, GestureDetector};
pub use listener::{EventLog, ScrollEvent, ScrollingListener};
pub use orientation::{Axis, Horizontal, Orientation, Vertical};
pub use scroller::{ScrollPhase, WheelScroller};
pub use selection::WheelSelection;
pub use velocity::{AxisVelocityTracker, VelocityTracker};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::ScrollerConfig;
    pub use crate::listener::{ScrollEvent, ScrollingListener};
    pub use crate::orientation::{Axis, Horizontal, Orientation, Vertical};
    pub use crate::scroller::{ScrollPhase, WheelScroller};
    pub use crate::selection::WheelSelection;
}
