//! Wheel scroller state machine
//!
//! Turns a touch stream into incremental wheel motion and drives the
//! resulting scroll, fling and justify animations one frame at a time.
//!
//! # Phases
//!
//! ```text
//!         scroll() / fling        curve done         curve done
//!   Idle -----------------> Scrolling --------> Justifying --------> Idle
//!                                    on_justify            on_finished
//! ```
//!
//! A pointer-down drops every pending tick wherever the scroller is.
//!
//! The scroller never spawns timers. After any call that may have queued
//! motion the host checks [`WheelScroller::has_pending_frame`] and calls
//! [`WheelScroller::on_frame`] once per display frame until it returns false.

use spinwheel_animation::{FrameScheduler, Interpolator, MotionCurve};
use spinwheel_platform::{Clock, PointerAction, PointerEvent, SystemClock};

use crate::config::{ScrollerConfig, MIN_DELTA_FOR_SCROLLING};
use crate::gesture::{Fling, GestureConfig, GestureDetector};
use crate::listener::ScrollingListener;
use crate::orientation::Orientation;

/// Tag of a queued animation tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TickMessage {
    Scroll,
    Justify,
}

/// Where the scroller is in its episode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollPhase {
    /// Nothing is moving
    #[default]
    Idle,
    /// A drag, programmatic scroll or fling is in progress
    Scrolling,
    /// Motion ended and the wheel is settling on an item
    Justifying,
}

/// Per-touch bookkeeping
#[derive(Clone, Copy, Debug, Default)]
struct ScrollSession {
    /// Curve position at the last tick
    last_scroll_position: i32,
    /// Pointer coordinate along the axis at the last accepted move
    last_touched_position: f32,
    /// Clock time of the last pointer-down, 0 when no pointer is down
    last_touched_timestamp: u64,
    is_scrolling_performed: bool,
}

/// Single-axis scroller behind a picker wheel
pub struct WheelScroller<O, L, C = SystemClock> {
    orientation: O,
    listener: L,
    clock: C,
    config: ScrollerConfig,
    gesture: GestureDetector,
    curve: MotionCurve,
    scheduler: FrameScheduler<TickMessage>,
    session: ScrollSession,
    velocity_factor: f32,
}

impl<O: Orientation, L: ScrollingListener> WheelScroller<O, L, SystemClock> {
    /// Create a scroller with default tuning, driven by the system clock
    pub fn new(orientation: O, listener: L) -> Self {
        Self::with_config(orientation, listener, ScrollerConfig::default())
    }

    pub fn with_config(orientation: O, listener: L, config: ScrollerConfig) -> Self {
        Self::with_clock(orientation, listener, config, SystemClock::new())
    }
}

impl<O: Orientation, L: ScrollingListener, C: Clock> WheelScroller<O, L, C> {
    /// Create a scroller reading time from `clock`
    ///
    /// Pointer event timestamps and `clock` must share a time base.
    pub fn with_clock(orientation: O, listener: L, config: ScrollerConfig, clock: C) -> Self {
        Self {
            orientation,
            listener,
            clock,
            gesture: GestureDetector::new(GestureConfig::from(&config)),
            curve: MotionCurve::new(config.interpolator, config.fling()),
            scheduler: FrameScheduler::new(),
            session: ScrollSession::default(),
            velocity_factor: config.velocity_factor,
            config,
        }
    }

    pub fn orientation(&self) -> &O {
        &self.orientation
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn into_listener(self) -> L {
        self.listener
    }

    pub fn config(&self) -> &ScrollerConfig {
        &self.config
    }

    /// The motion curve currently (or last) driving the wheel
    pub fn curve(&self) -> &MotionCurve {
        &self.curve
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Scale applied to fling velocities from now on
    pub fn set_velocity_factor(&mut self, velocity_factor: f32) {
        self.velocity_factor = velocity_factor;
    }

    pub fn velocity_factor(&self) -> f32 {
        self.velocity_factor
    }

    /// Replace the curve shape; any running motion stops where it is
    pub fn set_interpolator(&mut self, interpolator: Interpolator) {
        self.curve.force_finished(true);
        self.curve = MotionCurve::new(interpolator, self.config.fling());
    }

    /// Whether an episode has started and not yet finished
    pub fn is_scrolling_performed(&self) -> bool {
        self.session.is_scrolling_performed
    }

    /// Whether the host should schedule another [`on_frame`](Self::on_frame)
    pub fn has_pending_frame(&self) -> bool {
        !self.scheduler.is_empty()
    }

    pub fn phase(&self) -> ScrollPhase {
        let moving = self.scheduler.contains(TickMessage::Scroll);
        if self.scheduler.contains(TickMessage::Justify) {
            ScrollPhase::Justifying
        } else if moving || self.session.is_scrolling_performed {
            ScrollPhase::Scrolling
        } else {
            ScrollPhase::Idle
        }
    }

    /// Scroll the wheel by `distance` pixels
    ///
    /// A `duration_ms` of 0 uses the configured default. Any motion in
    /// progress is replaced.
    pub fn scroll(&mut self, distance: i32, duration_ms: u32) {
        self.curve.force_finished(true);
        self.session.last_scroll_position = 0;

        let duration_ms = if duration_ms != 0 {
            duration_ms
        } else {
            self.config.scrolling_duration_ms
        };
        let now = self.clock.now_millis();
        self.orientation
            .start_scroll(&mut self.curve, distance, duration_ms, now);

        tracing::debug!("WheelScroller: scroll by {} over {}ms", distance, duration_ms);

        self.scheduler.set_next(TickMessage::Scroll);
        self.start_scrolling();
    }

    /// Stop the motion where it is
    ///
    /// Queued ticks still run and settle the wheel through the justify pass.
    pub fn stop_scrolling(&mut self) {
        self.curve.force_finished(true);
    }

    /// Feed one pointer event
    ///
    /// Always returns true: the wheel consumes every event it is given.
    pub fn on_touch_event(&mut self, event: &PointerEvent) -> bool {
        match event.action {
            PointerAction::Down => {
                self.session.last_touched_timestamp = self.clock.now_millis();
                self.session.last_touched_position = self.orientation.extract_event_position(event);
                self.curve.force_finished(true);
                self.scheduler.clear();
                self.listener.on_touch();
            }
            PointerAction::Up => {
                if self.curve.is_finished() {
                    self.listener.on_touch_up();
                }
                self.session.last_touched_timestamp = 0;
            }
            PointerAction::Move => self.on_pointer_move(event),
            PointerAction::Cancel => {}
        }

        match self.gesture.on_touch_event(event) {
            Some(fling) => self.fling(fling),
            None if event.action.is_up() => self.justify(),
            None => {}
        }
        true
    }

    /// Service one queued animation tick
    ///
    /// Returns whether another frame is needed.
    pub fn on_frame(&mut self) -> bool {
        if let Some(message) = self.scheduler.next_tick() {
            self.tick(message);
        }
        self.has_pending_frame()
    }

    fn on_pointer_move(&mut self, event: &PointerEvent) {
        let position = self.orientation.extract_event_position(event);
        let distance = (position - self.session.last_touched_position) as i32;

        let elapsed = self
            .clock
            .now_millis()
            .saturating_sub(self.session.last_touched_timestamp);
        let allowed = !event.tool.is_stylus() || elapsed > self.config.stylus_scroll_delay_ms;

        if allowed && distance != 0 {
            self.start_scrolling();
            self.listener.on_scroll(distance);
            self.session.last_touched_position = position;
        }
    }

    fn fling(&mut self, fling: Fling) {
        self.session.last_scroll_position = 0;

        let velocity_x = (fling.velocity_x * self.velocity_factor) as i32;
        let velocity_y = (fling.velocity_y * self.velocity_factor) as i32;
        let now = self.clock.now_millis();
        self.orientation.start_fling(
            &mut self.curve,
            self.session.last_scroll_position,
            velocity_x,
            velocity_y,
            now,
        );

        tracing::debug!(
            "WheelScroller: fling at ({}, {}) px/s, {}ms",
            velocity_x,
            velocity_y,
            self.curve.duration()
        );

        self.scheduler.set_next(TickMessage::Scroll);
        // Moves suppressed by the stylus delay never started the episode
        self.start_scrolling();
    }

    fn tick(&mut self, message: TickMessage) {
        let now = self.clock.now_millis();
        self.curve.compute_offset(now);

        let current = self.orientation.current_position(&self.curve);
        let delta = self.session.last_scroll_position.saturating_sub(current);
        self.session.last_scroll_position = current;
        if delta != 0 {
            self.listener.on_scroll(delta);
        }

        let target = self.orientation.final_position(&self.curve);
        let remaining = (current as i64 - target as i64).abs();
        if remaining < MIN_DELTA_FOR_SCROLLING as i64 {
            self.curve.force_finished(true);
        }

        tracing::trace!(
            "WheelScroller: {:?} tick at {} (delta {}, {} left)",
            message,
            current,
            delta,
            remaining
        );

        if !self.curve.is_finished() {
            self.scheduler.post(message);
        } else if message == TickMessage::Scroll {
            self.justify();
        } else {
            self.finish_scrolling();
        }
    }

    fn justify(&mut self) {
        tracing::debug!("WheelScroller: justify");
        if let Some(distance) = self.listener.on_justify() {
            self.scroll(distance, 0);
        }
        self.scheduler.set_next(TickMessage::Justify);
    }

    fn start_scrolling(&mut self) {
        if !self.session.is_scrolling_performed {
            self.session.is_scrolling_performed = true;
            tracing::debug!("WheelScroller: started");
            self.listener.on_started();
        }
    }

    fn finish_scrolling(&mut self) {
        if self.session.is_scrolling_performed {
            self.listener.on_finished();
            self.session.is_scrolling_performed = false;
            tracing::debug!("WheelScroller: finished");
        }
    }
}

impl<O: std::fmt::Debug, L, C> std::fmt::Debug for WheelScroller<O, L, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WheelScroller")
            .field("orientation", &self.orientation)
            .field("session", &self.session)
            .field("pending", &self.scheduler.len())
            .field("velocity_factor", &self.velocity_factor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::{EventLog, ScrollEvent};
    use crate::orientation::{Horizontal, Vertical};
    use crate::selection::WheelSelection;
    use spinwheel_platform::{ManualClock, ToolType};

    const FRAME_MS: u64 = 16;

    fn scroller<L: ScrollingListener>(listener: L) -> WheelScroller<Vertical, L, ManualClock> {
        WheelScroller::with_clock(
            Vertical,
            listener,
            ScrollerConfig::default(),
            ManualClock::starting_at(1_000),
        )
    }

    /// Run frames until the scroller goes idle, returning the frame count
    fn run_frames<O: Orientation, L: ScrollingListener>(
        scroller: &mut WheelScroller<O, L, ManualClock>,
    ) -> usize {
        let mut frames = 0;
        while scroller.has_pending_frame() {
            scroller.clock().advance(FRAME_MS);
            scroller.on_frame();
            frames += 1;
            assert!(frames < 1_000, "scroller never settled");
        }
        frames
    }

    /// Event at the scroller's current clock time
    fn at<O: Orientation, L: ScrollingListener>(
        scroller: &WheelScroller<O, L, ManualClock>,
        action: PointerAction,
        y: f32,
    ) -> PointerEvent {
        PointerEvent::new(action, 0.0, y, scroller.clock().now_millis())
    }

    /// Down at y=0 then fast moves of `step` px every 10ms, then release
    fn flick<O: Orientation, L: ScrollingListener>(
        scroller: &mut WheelScroller<O, L, ManualClock>,
        step: f32,
    ) {
        let down = at(scroller, PointerAction::Down, 0.0);
        scroller.on_touch_event(&down);
        for i in 1..=5 {
            scroller.clock().advance(10);
            let moved = at(scroller, PointerAction::Move, step * i as f32);
            scroller.on_touch_event(&moved);
        }
        let up = at(scroller, PointerAction::Up, step * 5.0);
        scroller.on_touch_event(&up);
    }

    #[test]
    fn test_scroll_uses_default_duration() {
        let mut scroller = scroller(EventLog::new());
        scroller.scroll(50, 0);
        assert_eq!(scroller.curve().duration(), 400);

        scroller.scroll(50, 250);
        assert_eq!(scroller.curve().duration(), 250);
    }

    #[test]
    fn test_scroll_starts_episode_once() {
        let mut scroller = scroller(EventLog::new());
        scroller.scroll(100, 0);
        scroller.scroll(100, 0);

        assert_eq!(scroller.listener().count(ScrollEvent::Started), 1);
        assert_eq!(scroller.phase(), ScrollPhase::Scrolling);
        assert!(scroller.is_scrolling_performed());
    }

    #[test]
    fn test_programmatic_scroll_full_episode() {
        let mut scroller = scroller(EventLog::new());
        scroller.scroll(100, 0);
        run_frames(&mut scroller);

        let log = scroller.listener();
        assert_eq!(log.total_scroll(), -100);
        assert_eq!(log.count(ScrollEvent::Justify), 1);
        assert_eq!(log.count(ScrollEvent::Finished), 1);
        assert!(log.position(ScrollEvent::Justify) < log.position(ScrollEvent::Finished));
        assert_eq!(log.events().last(), Some(&ScrollEvent::Finished));
        assert_eq!(log.events().first(), Some(&ScrollEvent::Started));

        assert_eq!(scroller.phase(), ScrollPhase::Idle);
        assert!(!scroller.is_scrolling_performed());
        assert!(!scroller.on_frame());
    }

    #[test]
    fn test_curve_is_finished_once_within_one_pixel() {
        let mut scroller = scroller(EventLog::new());
        scroller.scroll(100, 400);

        // The eased curve rounds onto its target before the duration elapses
        scroller.clock().advance(380);
        scroller.on_frame();

        assert!(scroller.curve().is_finished());
        assert_eq!(scroller.listener().total_scroll(), -100);
        assert_eq!(scroller.listener().count(ScrollEvent::Justify), 1);
        assert_eq!(scroller.phase(), ScrollPhase::Justifying);

        run_frames(&mut scroller);
        assert_eq!(scroller.listener().count(ScrollEvent::Finished), 1);
        assert_eq!(scroller.listener().total_scroll(), -100);
    }

    #[test]
    fn test_new_scroll_replaces_running_one() {
        let mut scroller = scroller(EventLog::new());
        scroller.scroll(100, 400);
        scroller.clock().advance(100);
        scroller.on_frame();
        let partial = scroller.listener().total_scroll();
        assert!(partial < 0 && partial > -100, "{partial}");

        scroller.scroll(-50, 400);
        run_frames(&mut scroller);

        let log = scroller.listener();
        assert_eq!(log.total_scroll(), partial + 50);
        assert_eq!(log.count(ScrollEvent::Started), 1);
        assert_eq!(log.count(ScrollEvent::Justify), 1);
        assert_eq!(log.count(ScrollEvent::Finished), 1);
    }

    #[test]
    fn test_drag_reports_truncated_distance() {
        let mut scroller = scroller(EventLog::new());
        scroller.on_touch_event(&at(&scroller, PointerAction::Down, 100.0));
        scroller.on_touch_event(&at(&scroller, PointerAction::Move, 80.0));
        // Less than a pixel: ignored, last position kept at 80
        scroller.on_touch_event(&at(&scroller, PointerAction::Move, 79.5));
        scroller.on_touch_event(&at(&scroller, PointerAction::Move, 78.9));

        assert_eq!(
            scroller.listener().events(),
            &[
                ScrollEvent::Touch,
                ScrollEvent::Started,
                ScrollEvent::Scroll(-20),
                ScrollEvent::Scroll(-1),
            ]
        );
        assert!(!scroller.has_pending_frame());
    }

    #[test]
    fn test_stylus_moves_wait_for_delay() {
        let mut scroller = scroller(EventLog::new());
        let stylus = |scroller: &WheelScroller<Vertical, EventLog, ManualClock>, action, y| {
            at(scroller, action, y).with_tool(ToolType::Stylus)
        };

        scroller.on_touch_event(&stylus(&scroller, PointerAction::Down, 0.0));
        scroller.clock().advance(30);
        scroller.on_touch_event(&stylus(&scroller, PointerAction::Move, 20.0));
        scroller.clock().advance(20);
        scroller.on_touch_event(&stylus(&scroller, PointerAction::Move, 25.0));
        assert_eq!(scroller.listener().total_scroll(), 0);
        assert_eq!(scroller.listener().count(ScrollEvent::Started), 0);

        scroller.clock().advance(1);
        scroller.on_touch_event(&stylus(&scroller, PointerAction::Move, 30.0));
        // Suppressed moves never updated the last position
        assert_eq!(scroller.listener().total_scroll(), 30);
    }

    #[test]
    fn test_finger_moves_have_no_delay() {
        let mut scroller = scroller(EventLog::new());
        scroller.on_touch_event(&at(&scroller, PointerAction::Down, 0.0));
        scroller.on_touch_event(&at(&scroller, PointerAction::Move, 12.0));
        assert_eq!(scroller.listener().total_scroll(), 12);
    }

    #[test]
    fn test_touch_down_cancels_motion() {
        let mut scroller = scroller(EventLog::new());
        scroller.scroll(100, 0);
        scroller.clock().advance(FRAME_MS);
        scroller.on_frame();

        scroller.on_touch_event(&at(&scroller, PointerAction::Down, 0.0));
        assert!(!scroller.has_pending_frame());
        assert!(scroller.curve().is_finished());
        assert_eq!(scroller.listener().events().last(), Some(&ScrollEvent::Touch));
        assert!(!scroller.on_frame());
    }

    #[test]
    fn test_release_without_fling_justifies() {
        let mut scroller = scroller(EventLog::new());
        scroller.on_touch_event(&at(&scroller, PointerAction::Down, 0.0));
        scroller.clock().advance(40);
        scroller.on_touch_event(&at(&scroller, PointerAction::Move, 20.0));
        scroller.clock().advance(300);
        scroller.on_touch_event(&at(&scroller, PointerAction::Up, 20.0));

        let log = scroller.listener();
        assert_eq!(log.count(ScrollEvent::TouchUp), 1);
        assert_eq!(log.count(ScrollEvent::Justify), 1);
        assert!(log.position(ScrollEvent::TouchUp) < log.position(ScrollEvent::Justify));
        assert_eq!(scroller.phase(), ScrollPhase::Justifying);

        run_frames(&mut scroller);
        assert_eq!(scroller.listener().count(ScrollEvent::Finished), 1);
        assert_eq!(scroller.phase(), ScrollPhase::Idle);
    }

    #[test]
    fn test_slow_drag_callback_counts() {
        let mut scroller = scroller(EventLog::new());
        scroller.on_touch_event(&at(&scroller, PointerAction::Down, 300.0));
        for y in [290.0, 270.0, 262.5, 240.0, 238.0] {
            scroller.clock().advance(45);
            scroller.on_touch_event(&at(&scroller, PointerAction::Move, y));
        }
        scroller.clock().advance(200);
        scroller.on_touch_event(&at(&scroller, PointerAction::Up, 238.0));
        run_frames(&mut scroller);

        let log = scroller.listener();
        assert_eq!(log.count(ScrollEvent::Touch), 1);
        assert_eq!(log.count(ScrollEvent::Started), 1);
        assert_eq!(log.count(ScrollEvent::Justify), 1);
        assert_eq!(log.count(ScrollEvent::Finished), 1);
        // Fractions are truncated per move but the position keeps them
        assert_eq!(log.total_scroll(), -61);

        let first_scroll = log
            .events()
            .iter()
            .position(|event| matches!(event, ScrollEvent::Scroll(_)));
        assert!(log.position(ScrollEvent::Started) < first_scroll);
        assert!(log.position(ScrollEvent::Justify) < log.position(ScrollEvent::Finished));
    }

    #[test]
    fn test_tap_finishes_without_episode() {
        let mut scroller = scroller(EventLog::new());
        scroller.on_touch_event(&at(&scroller, PointerAction::Down, 10.0));
        scroller.on_touch_event(&at(&scroller, PointerAction::Up, 10.0));
        run_frames(&mut scroller);

        assert_eq!(
            scroller.listener().events(),
            &[ScrollEvent::Touch, ScrollEvent::TouchUp, ScrollEvent::Justify]
        );
    }

    #[test]
    fn test_touch_up_skipped_while_moving() {
        let mut scroller = scroller(EventLog::new());
        scroller.on_touch_event(&at(&scroller, PointerAction::Down, 0.0));
        scroller.scroll(100, 0);
        scroller.on_touch_event(&at(&scroller, PointerAction::Up, 0.0));

        assert_eq!(scroller.listener().count(ScrollEvent::TouchUp), 0);
        assert_eq!(scroller.listener().count(ScrollEvent::Justify), 1);
    }

    #[test]
    fn test_fling_keeps_moving_after_release() {
        let mut scroller = scroller(EventLog::new());
        flick(&mut scroller, 30.0);

        assert_eq!(scroller.listener().total_scroll(), 150);
        assert_eq!(scroller.listener().count(ScrollEvent::Justify), 0);
        assert_eq!(scroller.phase(), ScrollPhase::Scrolling);
        assert!(scroller.curve().final_y() < 0);

        let dragged = scroller.listener().events().len();
        run_frames(&mut scroller);

        let log = scroller.listener();
        let coasting: Vec<i32> = log.events()[dragged..]
            .iter()
            .filter_map(|event| match event {
                ScrollEvent::Scroll(distance) => Some(*distance),
                _ => None,
            })
            .collect();
        assert!(!coasting.is_empty());
        assert!(coasting.iter().all(|distance| *distance > 0));
        assert_eq!(log.count(ScrollEvent::Started), 1);
        assert_eq!(log.count(ScrollEvent::Justify), 1);
        assert_eq!(log.events().last(), Some(&ScrollEvent::Finished));
    }

    #[test]
    fn test_velocity_factor_scales_fling() {
        let mut full = scroller(EventLog::new());
        flick(&mut full, 30.0);

        let mut half = scroller(EventLog::new());
        half.set_velocity_factor(0.5);
        flick(&mut half, 30.0);

        let full_travel = full.curve().final_y().abs();
        let half_travel = half.curve().final_y().abs();
        assert!(half_travel > 0);
        assert!(half_travel < full_travel, "{half_travel} vs {full_travel}");
        assert_eq!(half.velocity_factor(), 0.5);
    }

    #[test]
    fn test_cancel_does_not_justify() {
        let mut scroller = scroller(EventLog::new());
        scroller.on_touch_event(&at(&scroller, PointerAction::Down, 0.0));
        scroller.clock().advance(10);
        scroller.on_touch_event(&at(&scroller, PointerAction::Move, 60.0));
        assert!(scroller.on_touch_event(&PointerEvent::cancel(scroller.clock().now_millis())));

        assert_eq!(scroller.listener().count(ScrollEvent::Justify), 0);
        assert!(!scroller.has_pending_frame());
        assert!(scroller.is_scrolling_performed());
    }

    #[test]
    fn test_stop_scrolling_settles_through_justify() {
        let mut scroller = scroller(EventLog::new());
        scroller.scroll(100, 0);
        scroller.clock().advance(FRAME_MS);
        scroller.on_frame();
        scroller.stop_scrolling();
        run_frames(&mut scroller);

        let log = scroller.listener();
        assert!(log.total_scroll() > -100);
        assert_eq!(log.count(ScrollEvent::Justify), 1);
        assert_eq!(log.count(ScrollEvent::Finished), 1);
    }

    #[test]
    fn test_set_interpolator_stops_motion() {
        let mut scroller = scroller(EventLog::new());
        scroller.scroll(100, 0);
        scroller.set_interpolator(Interpolator::Linear);

        assert!(scroller.curve().is_finished());
        assert!(matches!(scroller.curve().interpolator(), Interpolator::Linear));

        // Later scrolls use the new shape: halfway in time is halfway in space
        scroller.scroll(100, 400);
        scroller.clock().advance(200);
        scroller.on_frame();
        assert_eq!(scroller.curve().curr_y(), 50);
    }

    #[test]
    fn test_justify_snaps_selection_to_item() {
        let selection = WheelSelection::new(10, 50);
        let mut scroller = scroller(selection);
        scroller.on_touch_event(&at(&scroller, PointerAction::Down, 0.0));
        scroller.clock().advance(40);
        scroller.on_touch_event(&at(&scroller, PointerAction::Move, -30.0));
        scroller.clock().advance(300);
        scroller.on_touch_event(&at(&scroller, PointerAction::Up, -30.0));
        run_frames(&mut scroller);

        // 30px of a 50px item rounds to the next item
        let selection = scroller.into_listener();
        assert_eq!(selection.current_item(), 1);
        assert_eq!(selection.offset(), 0);
    }

    #[test]
    fn test_horizontal_reads_x() {
        let mut scroller = WheelScroller::with_clock(
            Horizontal,
            EventLog::new(),
            ScrollerConfig::default(),
            ManualClock::new(),
        );
        scroller.on_touch_event(&PointerEvent::down(10.0, 0.0, 0));
        scroller.on_touch_event(&PointerEvent::moved(25.0, 90.0, 5));
        assert_eq!(scroller.listener().total_scroll(), 15);

        scroller.scroll(40, 0);
        assert_eq!(scroller.curve().final_x(), 40);
        assert_eq!(scroller.curve().final_y(), 0);
    }

    #[test]
    fn test_stylus_flick_inside_delay_starts_episode() {
        let mut scroller = scroller(EventLog::new());
        let stylus = |scroller: &WheelScroller<Vertical, EventLog, ManualClock>, action, y| {
            at(scroller, action, y).with_tool(ToolType::Stylus)
        };

        // Every move lands inside the stylus delay, yet the release is fast
        scroller.on_touch_event(&stylus(&scroller, PointerAction::Down, 0.0));
        for i in 1..=4 {
            scroller.clock().advance(10);
            scroller.on_touch_event(&stylus(&scroller, PointerAction::Move, 30.0 * i as f32));
        }
        scroller.on_touch_event(&stylus(&scroller, PointerAction::Up, 120.0));

        assert!(scroller.is_scrolling_performed());
        assert_eq!(scroller.phase(), ScrollPhase::Scrolling);
        run_frames(&mut scroller);

        let log = scroller.listener();
        let first_scroll = log
            .events()
            .iter()
            .position(|event| matches!(event, ScrollEvent::Scroll(_)));
        assert!(first_scroll.is_some());
        assert!(log.position(ScrollEvent::Started) < first_scroll);
        assert_eq!(log.count(ScrollEvent::Started), 1);
        assert_eq!(log.count(ScrollEvent::Finished), 1);
        assert_eq!(log.events().last(), Some(&ScrollEvent::Finished));
    }

    /// Small deterministic generator for gesture sequences
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self) -> u32 {
            self.0 = self
                .0
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (self.0 >> 33) as u32
        }

        fn range(&mut self, low: i32, high: i32) -> i32 {
            low + (self.next() % (high - low + 1) as u32) as i32
        }

        /// Uniform in `[-1, 1)`
        fn signed_unit(&mut self) -> f32 {
            self.next() as f32 / (1u64 << 30) as f32 - 1.0
        }
    }

    /// Records callbacks while tracking items
    struct RecordingWheel {
        log: EventLog,
        selection: WheelSelection,
    }

    impl ScrollingListener for RecordingWheel {
        fn on_scroll(&mut self, distance: i32) {
            self.log.on_scroll(distance);
            self.selection.on_scroll(distance);
        }

        fn on_touch(&mut self) {
            self.log.on_touch();
        }

        fn on_touch_up(&mut self) {
            self.log.on_touch_up();
        }

        fn on_started(&mut self) {
            self.log.on_started();
        }

        fn on_finished(&mut self) {
            self.log.on_finished();
            self.selection.on_finished();
        }

        fn on_justify(&mut self) -> Option<i32> {
            self.log.on_justify();
            self.selection.on_justify()
        }
    }

    #[test]
    fn test_generated_gestures_keep_callback_order() {
        let mut rng = Lcg(0x5eed);

        for round in 0..400 {
            let tool = if rng.next() % 2 == 0 {
                ToolType::Stylus
            } else {
                ToolType::Finger
            };
            let selection = WheelSelection::new(12, 48).cyclic(rng.next() % 2 == 0);
            let mut scroller = scroller(RecordingWheel {
                log: EventLog::new(),
                selection,
            });

            let mut y = 300.0_f32;
            let down = at(&scroller, PointerAction::Down, y).with_tool(tool);
            scroller.on_touch_event(&down);

            let moves = rng.range(0, 8);
            for _ in 0..moves {
                scroller.clock().advance(rng.range(5, 60) as u64);
                // Mix sub-pixel jitter with real steps
                y += if rng.next() % 3 == 0 {
                    rng.signed_unit() * 0.9
                } else {
                    rng.range(-60, 60) as f32
                };
                let moved = at(&scroller, PointerAction::Move, y).with_tool(tool);
                scroller.on_touch_event(&moved);
            }

            scroller.clock().advance(rng.range(0, 300) as u64);
            let up = at(&scroller, PointerAction::Up, y).with_tool(tool);
            scroller.on_touch_event(&up);
            run_frames(&mut scroller);

            let wheel = scroller.listener();
            let log = &wheel.log;
            let context = format!("round {round} ({tool:?}): {:?}", log.events());

            assert_eq!(log.events().first(), Some(&ScrollEvent::Touch), "{context}");
            assert_eq!(log.count(ScrollEvent::Touch), 1, "{context}");
            assert_eq!(log.count(ScrollEvent::Justify), 1, "{context}");

            let started = log.count(ScrollEvent::Started);
            assert!(started <= 1, "{context}");
            assert_eq!(started, log.count(ScrollEvent::Finished), "{context}");

            let first_scroll = log
                .events()
                .iter()
                .position(|event| matches!(event, ScrollEvent::Scroll(_)));
            if first_scroll.is_some() {
                assert_eq!(started, 1, "{context}");
                assert!(log.position(ScrollEvent::Started) < first_scroll, "{context}");
            }
            if started == 1 {
                assert!(
                    log.position(ScrollEvent::Justify) < log.position(ScrollEvent::Finished),
                    "{context}"
                );
                assert_eq!(log.events().last(), Some(&ScrollEvent::Finished), "{context}");
            }

            assert_eq!(wheel.selection.offset(), 0, "{context}");
            assert_eq!(scroller.phase(), ScrollPhase::Idle, "{context}");
            assert!(!scroller.is_scrolling_performed(), "{context}");
        }
    }
}
