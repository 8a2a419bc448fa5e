//! Fling recognition
//!
//! The detector watches one touch stream at a time. It only answers one
//! question, on pointer-up: was this a fling, and how fast? Drag distances
//! are handled by the scroller directly from the raw events.
//!
//! There is no long-press recognition. A held touch that starts moving is a
//! drag like any other.

use spinwheel_platform::{PointerAction, PointerEvent};

use crate::config::ScrollerConfig;
use crate::velocity::VelocityTracker;

/// Velocity of a recognized fling in px/s
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fling {
    pub velocity_x: f32,
    pub velocity_y: f32,
}

/// Thresholds used to tell taps, drags and flings apart
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Travel (px) after which a touch is no longer a tap
    pub touch_slop: f32,
    /// Slowest release speed (px/s) that counts as a fling
    pub min_fling_velocity: f32,
    /// Release speeds are clamped to this (px/s)
    pub max_fling_velocity: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::from(&ScrollerConfig::default())
    }
}

impl From<&ScrollerConfig> for GestureConfig {
    fn from(config: &ScrollerConfig) -> Self {
        Self {
            touch_slop: config.touch_slop,
            min_fling_velocity: config.min_fling_velocity,
            max_fling_velocity: config.max_fling_velocity,
        }
    }
}

/// Recognizes flings in a stream of pointer events
#[derive(Clone, Debug)]
pub struct GestureDetector {
    config: GestureConfig,
    tracker: VelocityTracker,
    down_position: Option<(f32, f32)>,
    always_in_tap_region: bool,
}

impl GestureDetector {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            tracker: VelocityTracker::new(),
            down_position: None,
            always_in_tap_region: false,
        }
    }

    pub fn config(&self) -> GestureConfig {
        self.config
    }

    /// Feed one event
    ///
    /// Returns the fling on a pointer-up that qualifies as one, `None` for
    /// every other event (the event was not handled as a fling).
    pub fn on_touch_event(&mut self, event: &PointerEvent) -> Option<Fling> {
        if event.action != PointerAction::Cancel {
            self.tracker.add(event.time_ms, event.x, event.y);
        }

        match event.action {
            PointerAction::Down => {
                self.down_position = Some(event.position());
                self.always_in_tap_region = true;
                None
            }
            PointerAction::Move => {
                if self.always_in_tap_region {
                    if let Some((down_x, down_y)) = self.down_position {
                        let dx = event.x - down_x;
                        let dy = event.y - down_y;
                        let slop = self.config.touch_slop;
                        if dx * dx + dy * dy > slop * slop {
                            self.always_in_tap_region = false;
                        }
                    }
                }
                None
            }
            PointerAction::Up => {
                let fling = if self.always_in_tap_region || self.down_position.is_none() {
                    None
                } else {
                    let (velocity_x, velocity_y) =
                        self.tracker.velocity(self.config.max_fling_velocity);
                    let min = self.config.min_fling_velocity;
                    if velocity_x.abs() > min || velocity_y.abs() > min {
                        tracing::trace!(
                            "GestureDetector: fling at ({:.0}, {:.0}) px/s",
                            velocity_x,
                            velocity_y
                        );
                        Some(Fling {
                            velocity_x,
                            velocity_y,
                        })
                    } else {
                        None
                    }
                };
                self.reset();
                fling
            }
            PointerAction::Cancel => {
                self.reset();
                None
            }
        }
    }

    fn reset(&mut self) {
        self.tracker.clear();
        self.down_position = None;
        self.always_in_tap_region = false;
    }
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(
        detector: &mut GestureDetector,
        step_px: f32,
        step_ms: u64,
        steps: u64,
    ) -> Option<Fling> {
        assert!(detector.on_touch_event(&PointerEvent::down(0.0, 0.0, 0)).is_none());
        for i in 1..=steps {
            let y = step_px * i as f32;
            assert!(detector
                .on_touch_event(&PointerEvent::moved(0.0, y, i * step_ms))
                .is_none());
        }
        let end = step_px * steps as f32;
        detector.on_touch_event(&PointerEvent::up(0.0, end, steps * step_ms))
    }

    #[test]
    fn test_tap_is_not_a_fling() {
        let mut detector = GestureDetector::default();
        detector.on_touch_event(&PointerEvent::down(10.0, 10.0, 0));
        detector.on_touch_event(&PointerEvent::moved(12.0, 13.0, 5));
        assert!(detector
            .on_touch_event(&PointerEvent::up(12.0, 13.0, 10))
            .is_none());
    }

    #[test]
    fn test_fast_swipe_is_a_fling() {
        let mut detector = GestureDetector::default();
        // 30px every 10ms = 3000 px/s downward
        let fling = swipe(&mut detector, 30.0, 10, 5).expect("fling");
        assert!(fling.velocity_y > 2000.0, "{fling:?}");
        assert!(fling.velocity_x.abs() < 1.0);
    }

    #[test]
    fn test_slow_drag_is_not_a_fling() {
        let mut detector = GestureDetector::default();
        // 10px every 40ms = 250 px/s, then a pause before release
        detector.on_touch_event(&PointerEvent::down(0.0, 0.0, 0));
        detector.on_touch_event(&PointerEvent::moved(0.0, 20.0, 40));
        detector.on_touch_event(&PointerEvent::moved(0.0, 30.0, 80));
        assert!(detector
            .on_touch_event(&PointerEvent::up(0.0, 30.0, 400))
            .is_none());
    }

    #[test]
    fn test_velocity_is_clamped() {
        let mut detector = GestureDetector::default();
        let fling = swipe(&mut detector, 200.0, 5, 4).expect("fling");
        assert_eq!(fling.velocity_y, detector.config().max_fling_velocity);
    }

    #[test]
    fn test_cancel_resets_gesture() {
        let mut detector = GestureDetector::default();
        detector.on_touch_event(&PointerEvent::down(0.0, 0.0, 0));
        detector.on_touch_event(&PointerEvent::moved(0.0, 60.0, 10));
        detector.on_touch_event(&PointerEvent::moved(0.0, 120.0, 20));
        assert!(detector.on_touch_event(&PointerEvent::cancel(25)).is_none());
        // An up without a fresh down is never a fling
        assert!(detector
            .on_touch_event(&PointerEvent::up(0.0, 180.0, 30))
            .is_none());
    }
}
