//! Scroller configuration
//!
//! Tuning values for the wheel scroller. Every field has a named default
//! constant, and a config can be loaded from TOML where all keys are
//! optional:
//!
//! ```toml
//! scrolling_duration_ms = 300
//! velocity_factor = 0.6
//! interpolator = { decelerate = 1.5 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use spinwheel_animation::{FlingConfig, Interpolator};

use crate::error::{ConfigError, Result};

/// Duration of a programmatic scroll when the caller passes 0
pub const SCROLLING_DURATION_MS: u32 = 400;

/// Stylus moves are ignored for this long after the pointer goes down
pub const STYLUS_SCROLL_DELAY_MS: u64 = 50;

/// Motion closer than this to its target is treated as arrived
pub const MIN_DELTA_FOR_SCROLLING: i32 = 1;

/// Multiplier applied to fling velocities
pub const VELOCITY_FACTOR: f32 = 1.0;

/// Travel (px) before a touch stops being a tap
pub const TOUCH_SLOP: f32 = 8.0;

/// Slowest release (px/s) recognized as a fling
pub const MIN_FLING_VELOCITY: f32 = 50.0;

/// Fastest release (px/s) a fling is allowed to start with
pub const MAX_FLING_VELOCITY: f32 = 8000.0;

/// Friction applied to flings
pub const SCROLL_FRICTION: f32 = 0.015;

/// Wheel scroller tuning
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct ScrollerConfig {
    /// Duration used by `scroll(distance, 0)`
    #[serde(default = "default_scrolling_duration")]
    pub scrolling_duration_ms: u32,

    /// Delay before stylus drags start scrolling
    #[serde(default = "default_stylus_delay")]
    pub stylus_scroll_delay_ms: u64,

    /// Multiplier applied to fling velocities
    #[serde(default = "default_velocity_factor")]
    pub velocity_factor: f32,

    /// Shape of programmatic and justify scrolls
    #[serde(default)]
    pub interpolator: Interpolator,

    #[serde(default = "default_touch_slop")]
    pub touch_slop: f32,

    #[serde(default = "default_min_fling_velocity")]
    pub min_fling_velocity: f32,

    #[serde(default = "default_max_fling_velocity")]
    pub max_fling_velocity: f32,

    #[serde(default = "default_scroll_friction")]
    pub scroll_friction: f32,

    /// Display density, 1.0 = 160dpi
    #[serde(default = "default_density")]
    pub density: f32,
}

fn default_scrolling_duration() -> u32 {
    SCROLLING_DURATION_MS
}

fn default_stylus_delay() -> u64 {
    STYLUS_SCROLL_DELAY_MS
}

fn default_velocity_factor() -> f32 {
    VELOCITY_FACTOR
}

fn default_touch_slop() -> f32 {
    TOUCH_SLOP
}

fn default_min_fling_velocity() -> f32 {
    MIN_FLING_VELOCITY
}

fn default_max_fling_velocity() -> f32 {
    MAX_FLING_VELOCITY
}

fn default_scroll_friction() -> f32 {
    SCROLL_FRICTION
}

fn default_density() -> f32 {
    1.0
}

impl Default for ScrollerConfig {
    fn default() -> Self {
        Self {
            scrolling_duration_ms: SCROLLING_DURATION_MS,
            stylus_scroll_delay_ms: STYLUS_SCROLL_DELAY_MS,
            velocity_factor: VELOCITY_FACTOR,
            interpolator: Interpolator::default(),
            touch_slop: TOUCH_SLOP,
            min_fling_velocity: MIN_FLING_VELOCITY,
            max_fling_velocity: MAX_FLING_VELOCITY,
            scroll_friction: SCROLL_FRICTION,
            density: default_density(),
        }
    }
}

impl ScrollerConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Serialize to pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|err| ConfigError::Invalid(err.to_string()))
    }

    /// Reject values the scroller cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.scrolling_duration_ms == 0 {
            return Err(ConfigError::Invalid(
                "scrolling_duration_ms must be greater than 0".to_string(),
            ));
        }
        if !self.velocity_factor.is_finite() || self.velocity_factor < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "velocity_factor must be a finite, non-negative number (got {})",
                self.velocity_factor
            )));
        }
        for (name, value) in [
            ("touch_slop", self.touch_slop),
            ("min_fling_velocity", self.min_fling_velocity),
            ("max_fling_velocity", self.max_fling_velocity),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }
        if self.min_fling_velocity > self.max_fling_velocity {
            return Err(ConfigError::Invalid(format!(
                "min_fling_velocity ({}) exceeds max_fling_velocity ({})",
                self.min_fling_velocity, self.max_fling_velocity
            )));
        }
        for (name, value) in [
            ("scroll_friction", self.scroll_friction),
            ("density", self.density),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number (got {value})"
                )));
            }
        }
        Ok(())
    }

    /// Fling physics for motion curves built from this config
    pub fn fling(&self) -> FlingConfig {
        FlingConfig::new(self.scroll_friction, self.density)
    }
}
