//! Axis strategies
//!
//! The scroller itself is axis-agnostic. An [`Orientation`] decides which
//! coordinate of a pointer event matters and how single-axis scroll and
//! fling requests map onto the 2D motion curve.

use serde::{Deserialize, Serialize};
use spinwheel_animation::MotionCurve;
use spinwheel_platform::PointerEvent;

/// Fling bounds: effectively unbounded in both directions
const MAX_POSITION: i32 = i32::MAX;
const MIN_POSITION: i32 = -MAX_POSITION;

/// Maps single-axis wheel motion onto a 2D motion curve
pub trait Orientation {
    /// Position of the curve along this axis at its last sample
    fn current_position(&self, curve: &MotionCurve) -> i32;

    /// Where the curve will come to rest along this axis
    fn final_position(&self, curve: &MotionCurve) -> i32;

    /// The coordinate of `event` along this axis
    fn extract_event_position(&self, event: &PointerEvent) -> f32;

    /// Start a fixed-distance scroll from 0 along this axis
    fn start_scroll(&self, curve: &mut MotionCurve, distance: i32, duration_ms: u32, now: u64);

    /// Start a fling from `position`; the curve moves against the finger velocity
    fn start_fling(
        &self,
        curve: &mut MotionCurve,
        position: i32,
        velocity_x: i32,
        velocity_y: i32,
        now: u64,
    );
}

/// Wheel that spins up and down
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Vertical;

impl Orientation for Vertical {
    fn current_position(&self, curve: &MotionCurve) -> i32 {
        curve.curr_y()
    }

    fn final_position(&self, curve: &MotionCurve) -> i32 {
        curve.final_y()
    }

    fn extract_event_position(&self, event: &PointerEvent) -> f32 {
        event.y
    }

    fn start_scroll(&self, curve: &mut MotionCurve, distance: i32, duration_ms: u32, now: u64) {
        curve.start_scroll(0, 0, 0, distance, duration_ms, now);
    }

    fn start_fling(
        &self,
        curve: &mut MotionCurve,
        position: i32,
        _velocity_x: i32,
        velocity_y: i32,
        now: u64,
    ) {
        curve.fling(
            0,
            position,
            0,
            velocity_y.saturating_neg(),
            0,
            0,
            MIN_POSITION,
            MAX_POSITION,
            now,
        );
    }
}

/// Wheel that spins left and right
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Horizontal;

impl Orientation for Horizontal {
    fn current_position(&self, curve: &MotionCurve) -> i32 {
        curve.curr_x()
    }

    fn final_position(&self, curve: &MotionCurve) -> i32 {
        curve.final_x()
    }

    fn extract_event_position(&self, event: &PointerEvent) -> f32 {
        event.x
    }

    fn start_scroll(&self, curve: &mut MotionCurve, distance: i32, duration_ms: u32, now: u64) {
        curve.start_scroll(0, 0, distance, 0, duration_ms, now);
    }

    fn start_fling(
        &self,
        curve: &mut MotionCurve,
        position: i32,
        velocity_x: i32,
        _velocity_y: i32,
        now: u64,
    ) {
        curve.fling(
            position,
            0,
            velocity_x.saturating_neg(),
            0,
            MIN_POSITION,
            MAX_POSITION,
            0,
            0,
            now,
        );
    }
}

/// Orientation chosen at runtime (e.g. from a config file)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation for Axis {
    fn current_position(&self, curve: &MotionCurve) -> i32 {
        match self {
            Axis::Vertical => Vertical.current_position(curve),
            Axis::Horizontal => Horizontal.current_position(curve),
        }
    }

    fn final_position(&self, curve: &MotionCurve) -> i32 {
        match self {
            Axis::Vertical => Vertical.final_position(curve),
            Axis::Horizontal => Horizontal.final_position(curve),
        }
    }

    fn extract_event_position(&self, event: &PointerEvent) -> f32 {
        match self {
            Axis::Vertical => Vertical.extract_event_position(event),
            Axis::Horizontal => Horizontal.extract_event_position(event),
        }
    }

    fn start_scroll(&self, curve: &mut MotionCurve, distance: i32, duration_ms: u32, now: u64) {
        match self {
            Axis::Vertical => Vertical.start_scroll(curve, distance, duration_ms, now),
            Axis::Horizontal => Horizontal.start_scroll(curve, distance, duration_ms, now),
        }
    }

    fn start_fling(
        &self,
        curve: &mut MotionCurve,
        position: i32,
        velocity_x: i32,
        velocity_y: i32,
        now: u64,
    ) {
        match self {
            Axis::Vertical => Vertical.start_fling(curve, position, velocity_x, velocity_y, now),
            Axis::Horizontal => {
                Horizontal.start_fling(curve, position, velocity_x, velocity_y, now)
            }
        }
    }
}
