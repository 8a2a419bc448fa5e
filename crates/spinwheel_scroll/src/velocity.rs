//! Pointer velocity estimation
//!
//! Impulse-strategy tracker: each pair of consecutive samples contributes the
//! kinetic energy it would impart to a unit mass, and the accumulated energy
//! is converted back into a velocity. Only the last 100ms of motion count,
//! and a gap of more than 40ms between samples means the pointer stopped.

/// Ring buffer size
const HISTORY_SIZE: usize = 20;

/// Samples older than this (relative to the newest) are ignored
const HORIZON_MS: u64 = 100;

/// A gap this long between two samples means the pointer came to rest
const ASSUME_STOPPED_MS: u64 = 40;

#[derive(Clone, Copy, Debug)]
struct Sample {
    time_ms: u64,
    position: f32,
}

/// Single-axis velocity tracker over absolute positions
#[derive(Clone, Debug, Default)]
pub struct AxisVelocityTracker {
    samples: [Option<Sample>; HISTORY_SIZE],
    /// Index of the newest sample
    head: usize,
}

impl AxisVelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the position at `time_ms`
    pub fn add(&mut self, time_ms: u64, position: f32) {
        self.head = (self.head + 1) % HISTORY_SIZE;
        self.samples[self.head] = Some(Sample { time_ms, position });
    }

    pub fn clear(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.head = 0;
    }

    /// Velocity in units per second, 0 without two usable samples
    pub fn velocity(&self) -> f32 {
        let Some(newest) = self.samples[self.head] else {
            return 0.0;
        };

        // Newest first: positions and times relative to the newest sample
        let mut positions = [0.0_f32; HISTORY_SIZE];
        let mut times = [0.0_f32; HISTORY_SIZE];
        let mut count = 0;
        let mut index = self.head;
        let mut previous = newest;

        while let Some(sample) = self.samples[index] {
            let age = newest.time_ms.saturating_sub(sample.time_ms);
            let gap = previous.time_ms.saturating_sub(sample.time_ms);
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }

            positions[count] = sample.position;
            times[count] = -(age as f32);
            previous = sample;
            count += 1;
            if count == HISTORY_SIZE {
                break;
            }
            index = (index + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }

        if count < 2 {
            return 0.0;
        }

        impulse_velocity(&positions[..count], &times[..count]) * 1000.0
    }

    /// Velocity clamped to `±max`
    pub fn velocity_with_max(&self, max: f32) -> f32 {
        let velocity = self.velocity();
        if !velocity.is_finite() || !max.is_finite() || max <= 0.0 {
            return 0.0;
        }
        velocity.clamp(-max, max)
    }
}

/// Units per millisecond from newest-first samples
fn impulse_velocity(positions: &[f32], times: &[f32]) -> f32 {
    let oldest = positions.len() - 1;
    let mut work = 0.0_f32;

    // Walk from the oldest sample towards the newest
    for i in (1..=oldest).rev() {
        let dt = times[i] - times[i - 1];
        if dt == 0.0 {
            continue;
        }
        let v_curr = (positions[i] - positions[i - 1]) / dt;
        let v_prev = energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == oldest {
            work *= 0.5;
        }
    }

    energy_to_velocity(work)
}

/// E = v² / 2 for a unit mass
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}

/// Two-axis tracker fed with pointer positions
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    x: AxisVelocityTracker,
    y: AxisVelocityTracker,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, time_ms: u64, x: f32, y: f32) {
        self.x.add(time_ms, x);
        self.y.add(time_ms, y);
    }

    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
    }

    /// `(vx, vy)` in px/s, each clamped to `±max`
    pub fn velocity(&self, max: f32) -> (f32, f32) {
        (self.x.velocity_with_max(max), self.y.velocity_with_max(max))
    }
}
