//! Spinwheel Animation System
//!
//! The decaying-motion model behind the picker wheel and the queue that
//! drives it frame by frame.
//!
//! # Features
//!
//! - **MotionCurve**: fixed-distance eased scrolls and spline-decelerated flings,
//!   sampled against an explicit timestamp
//! - **Interpolators**: viscous fluid (default), linear, decelerate,
//!   accelerate-decelerate, or any `fn(f32) -> f32`
//! - **FrameScheduler**: single-threaded queue of tagged animation ticks with
//!   explicit removal, so cancelled ticks can never fire late

pub mod interpolator;
pub mod motion;
pub mod scheduler;

pub use interpolator::Interpolator;
pub use motion::{FlingConfig, MotionCurve, MotionMode};
pub use scheduler::FrameScheduler;
