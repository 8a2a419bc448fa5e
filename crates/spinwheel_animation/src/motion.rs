//! Motion curves
//!
//! A [`MotionCurve`] predicts a 2D integer position over time. It runs in one
//! of two modes:
//!
//! - **Scroll**: travel a fixed distance over a fixed duration, shaped by an
//!   [`Interpolator`]
//! - **Fling**: decelerate from an initial velocity along a precomputed
//!   spline until the motion dies out, optionally clamped to bounds
//!
//! The curve never reads a clock itself. Callers pass the current time in
//! milliseconds to [`MotionCurve::compute_offset`], which keeps replay and
//! tests deterministic.
//!
//! # Example
//!
//! ```
//! use spinwheel_animation::MotionCurve;
//!
//! let mut curve = MotionCurve::default();
//! curve.start_scroll(0, 0, 0, 120, 400, 1_000);
//!
//! curve.compute_offset(1_200);
//! assert!(curve.curr_y() > 0 && curve.curr_y() < 120);
//!
//! curve.compute_offset(1_400);
//! assert_eq!(curve.curr_y(), 120);
//! assert!(curve.is_finished());
//! ```

use std::sync::OnceLock;

use crate::interpolator::Interpolator;

/// Standard gravity, used to scale fling physics to screen density
const GRAVITY_EARTH: f64 = 9.806_65;
/// Inches per meter
const INCHES_PER_METER: f64 = 39.37;
/// Empirical tuning factor for perceived fling distance
const FLING_TUNING: f64 = 0.84;
/// Where the fling spline changes from acceleration to deceleration
const INFLEXION: f64 = 0.35;
const START_TENSION: f64 = 0.5;
const END_TENSION: f64 = 1.0;
const P1: f64 = START_TENSION * INFLEXION;
const P2: f64 = 1.0 - END_TENSION * (1.0 - INFLEXION);
const SPLINE_SAMPLES: usize = 100;

/// ln(0.78) / ln(0.9)
fn deceleration_rate() -> f64 {
    0.78_f64.ln() / 0.9_f64.ln()
}

/// Normalized distance travelled at each of `SPLINE_SAMPLES` time steps
fn spline_positions() -> &'static [f64; SPLINE_SAMPLES + 1] {
    static SPLINE: OnceLock<[f64; SPLINE_SAMPLES + 1]> = OnceLock::new();
    SPLINE.get_or_init(|| {
        let mut positions = [0.0; SPLINE_SAMPLES + 1];
        let mut x_min = 0.0_f64;
        for (i, slot) in positions.iter_mut().take(SPLINE_SAMPLES).enumerate() {
            let alpha = i as f64 / SPLINE_SAMPLES as f64;
            let mut x_max = 1.0_f64;
            let (x, coef) = loop {
                let x = x_min + (x_max - x_min) / 2.0;
                let coef = 3.0 * x * (1.0 - x);
                let tx = coef * ((1.0 - x) * P1 + x * P2) + x * x * x;
                if (tx - alpha).abs() < 1e-5 {
                    break (x, coef);
                }
                if tx > alpha {
                    x_max = x;
                } else {
                    x_min = x;
                }
            };
            *slot = coef * ((1.0 - x) * START_TENSION + x) + x * x * x;
        }
        positions[SPLINE_SAMPLES] = 1.0;
        positions
    })
}

/// Round half up, matching the platform scrollers wheels were tuned against
fn round_half_up(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}

/// Clamp without panicking on inverted bounds (max wins, then min)
fn clamp_position(value: i64, min: i32, max: i32) -> i32 {
    value.min(max as i64).max(min as i64) as i32
}

/// Physical parameters for fling deceleration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlingConfig {
    /// Friction applied to flings (platform default 0.015)
    pub friction: f32,
    /// Display density; 1.0 means 160 pixels per inch
    pub density: f32,
}

impl FlingConfig {
    pub fn new(friction: f32, density: f32) -> Self {
        Self { friction, density }
    }

    fn physical_coeff(&self) -> f64 {
        let ppi = self.density as f64 * 160.0;
        GRAVITY_EARTH * INCHES_PER_METER * ppi * FLING_TUNING
    }

    fn spline_deceleration(&self, velocity: f32) -> f64 {
        (INFLEXION * velocity.abs() as f64 / (self.friction as f64 * self.physical_coeff())).ln()
    }

    /// Duration in milliseconds of a fling started at `velocity` px/s
    pub fn fling_duration(&self, velocity: f32) -> u32 {
        let l = self.spline_deceleration(velocity);
        (1000.0 * (l / (deceleration_rate() - 1.0)).exp()) as u32
    }

    /// Distance in pixels covered by a fling started at `velocity` px/s
    pub fn fling_distance(&self, velocity: f32) -> f64 {
        let l = self.spline_deceleration(velocity);
        let rate = deceleration_rate();
        self.friction as f64 * self.physical_coeff() * (rate / (rate - 1.0) * l).exp()
    }
}

impl Default for FlingConfig {
    fn default() -> Self {
        Self {
            friction: 0.015,
            density: 1.0,
        }
    }
}

/// Which motion the curve is currently describing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MotionMode {
    /// Fixed distance over a fixed duration
    #[default]
    Scroll,
    /// Velocity-driven deceleration
    Fling,
}

/// Decaying-position model sampled once per animation frame
#[derive(Clone, Debug)]
pub struct MotionCurve {
    interpolator: Interpolator,
    fling: FlingConfig,
    mode: MotionMode,
    finished: bool,

    start_time: u64,
    duration: u32,
    duration_reciprocal: f32,

    start_x: i32,
    start_y: i32,
    final_x: i32,
    final_y: i32,
    min_x: i32,
    max_x: i32,
    min_y: i32,
    max_y: i32,
    curr_x: i32,
    curr_y: i32,
    delta_x: f32,
    delta_y: f32,

    /// Initial fling speed (px/s)
    velocity: f32,
    /// Speed at the last sample (px/s)
    curr_velocity: f32,
    /// Signed fling distance along the velocity vector
    distance: f32,
}

impl Default for MotionCurve {
    fn default() -> Self {
        Self::new(Interpolator::default(), FlingConfig::default())
    }
}

impl MotionCurve {
    /// Create an idle (finished) curve
    pub fn new(interpolator: Interpolator, fling: FlingConfig) -> Self {
        Self {
            interpolator,
            fling,
            mode: MotionMode::Scroll,
            finished: true,
            start_time: 0,
            duration: 0,
            duration_reciprocal: 0.0,
            start_x: 0,
            start_y: 0,
            final_x: 0,
            final_y: 0,
            min_x: 0,
            max_x: 0,
            min_y: 0,
            max_y: 0,
            curr_x: 0,
            curr_y: 0,
            delta_x: 0.0,
            delta_y: 0.0,
            velocity: 0.0,
            curr_velocity: 0.0,
            distance: 0.0,
        }
    }

    pub fn with_interpolator(interpolator: Interpolator) -> Self {
        Self::new(interpolator, FlingConfig::default())
    }

    pub fn interpolator(&self) -> Interpolator {
        self.interpolator
    }

    pub fn fling_config(&self) -> FlingConfig {
        self.fling
    }

    pub fn mode(&self) -> MotionMode {
        self.mode
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Stop (or resume reporting) the motion where it is
    pub fn force_finished(&mut self, finished: bool) {
        self.finished = finished;
    }

    /// Jump to the final position and stop
    pub fn abort_animation(&mut self) {
        self.curr_x = self.final_x;
        self.curr_y = self.final_y;
        self.finished = true;
    }

    pub fn curr_x(&self) -> i32 {
        self.curr_x
    }

    pub fn curr_y(&self) -> i32 {
        self.curr_y
    }

    pub fn start_x(&self) -> i32 {
        self.start_x
    }

    pub fn start_y(&self) -> i32 {
        self.start_y
    }

    pub fn final_x(&self) -> i32 {
        self.final_x
    }

    pub fn final_y(&self) -> i32 {
        self.final_y
    }

    /// Duration of the current motion in milliseconds
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Milliseconds since the motion started
    pub fn time_passed(&self, now: u64) -> u64 {
        now.saturating_sub(self.start_time)
    }

    /// Speed at the last sample in px/s (flings only; scrolls report 0)
    pub fn current_velocity(&self) -> f32 {
        match self.mode {
            MotionMode::Fling => self.curr_velocity,
            MotionMode::Scroll => 0.0,
        }
    }

    /// Speed the last fling started with in px/s
    pub fn initial_velocity(&self) -> f32 {
        self.velocity
    }

    /// Start a fixed-distance motion
    pub fn start_scroll(
        &mut self,
        start_x: i32,
        start_y: i32,
        dx: i32,
        dy: i32,
        duration: u32,
        now: u64,
    ) {
        self.mode = MotionMode::Scroll;
        self.finished = false;
        self.duration = duration;
        self.start_time = now;
        self.start_x = start_x;
        self.start_y = start_y;
        self.curr_x = start_x;
        self.curr_y = start_y;
        self.final_x = start_x.saturating_add(dx);
        self.final_y = start_y.saturating_add(dy);
        self.delta_x = dx as f32;
        self.delta_y = dy as f32;
        self.duration_reciprocal = if duration > 0 {
            1.0 / duration as f32
        } else {
            0.0
        };

        tracing::trace!(
            "MotionCurve: scroll ({}, {}) by ({}, {}) over {}ms",
            start_x,
            start_y,
            dx,
            dy,
            duration
        );
    }

    /// Start a velocity-driven motion bounded to `[min, max]` on each axis
    #[allow(clippy::too_many_arguments)]
    pub fn fling(
        &mut self,
        start_x: i32,
        start_y: i32,
        velocity_x: i32,
        velocity_y: i32,
        min_x: i32,
        max_x: i32,
        min_y: i32,
        max_y: i32,
        now: u64,
    ) {
        self.mode = MotionMode::Fling;
        self.finished = false;

        let vx = velocity_x as f32;
        let vy = velocity_y as f32;
        let velocity = vx.hypot(vy);

        self.velocity = velocity;
        self.curr_velocity = velocity;
        self.duration = self.fling.fling_duration(velocity);
        self.start_time = now;
        self.start_x = start_x;
        self.start_y = start_y;
        self.curr_x = start_x;
        self.curr_y = start_y;

        let coeff_x = if velocity == 0.0 { 1.0 } else { vx / velocity };
        let coeff_y = if velocity == 0.0 { 1.0 } else { vy / velocity };

        let total_distance = self.fling.fling_distance(velocity);
        self.distance = (total_distance * velocity.signum() as f64) as f32;

        self.min_x = min_x;
        self.max_x = max_x;
        self.min_y = min_y;
        self.max_y = max_y;

        let dx = (total_distance * coeff_x as f64).round() as i64;
        let dy = (total_distance * coeff_y as f64).round() as i64;
        self.final_x = clamp_position(start_x as i64 + dx, min_x, max_x);
        self.final_y = clamp_position(start_y as i64 + dy, min_y, max_y);

        tracing::trace!(
            "MotionCurve: fling from ({}, {}) at ({}, {}) px/s -> ({}, {}) over {}ms",
            start_x,
            start_y,
            velocity_x,
            velocity_y,
            self.final_x,
            self.final_y,
            self.duration
        );
    }

    /// Advance to `now`
    ///
    /// Returns false if the motion had already finished before this call.
    pub fn compute_offset(&mut self, now: u64) -> bool {
        if self.finished {
            return false;
        }

        let time_passed = self.time_passed(now);
        if time_passed < self.duration as u64 {
            match self.mode {
                MotionMode::Scroll => {
                    let x = self
                        .interpolator
                        .interpolate(time_passed as f32 * self.duration_reciprocal);
                    self.curr_x = self.start_x + round_half_up(x * self.delta_x);
                    self.curr_y = self.start_y + round_half_up(x * self.delta_y);
                }
                MotionMode::Fling => {
                    let t = time_passed as f32 / self.duration as f32;
                    let index = (SPLINE_SAMPLES as f32 * t) as usize;
                    let mut distance_coef = 1.0_f32;
                    let mut velocity_coef = 0.0_f32;
                    if index < SPLINE_SAMPLES {
                        let spline = spline_positions();
                        let t_inf = index as f32 / SPLINE_SAMPLES as f32;
                        let t_sup = (index + 1) as f32 / SPLINE_SAMPLES as f32;
                        let d_inf = spline[index] as f32;
                        let d_sup = spline[index + 1] as f32;
                        velocity_coef = (d_sup - d_inf) / (t_sup - t_inf);
                        distance_coef = d_inf + (t - t_inf) * velocity_coef;
                    }

                    self.curr_velocity =
                        velocity_coef * self.distance / self.duration as f32 * 1000.0;

                    let span_x = (self.final_x as i64 - self.start_x as i64) as f32;
                    let span_y = (self.final_y as i64 - self.start_y as i64) as f32;
                    let travel_x = round_half_up(distance_coef * span_x) as i64;
                    let travel_y = round_half_up(distance_coef * span_y) as i64;
                    self.curr_x =
                        clamp_position(self.start_x as i64 + travel_x, self.min_x, self.max_x);
                    self.curr_y =
                        clamp_position(self.start_y as i64 + travel_y, self.min_y, self.max_y);

                    if self.curr_x == self.final_x && self.curr_y == self.final_y {
                        self.finished = true;
                    }
                }
            }
        } else {
            self.curr_x = self.final_x;
            self.curr_y = self.final_y;
            self.finished = true;
        }
        true
    }
}
