//! Interpolation shapes for fixed-distance scrolls
//!
//! An interpolator maps elapsed fraction `t` in `[0, 1]` to travelled
//! fraction. Flings ignore the interpolator and follow their own spline.

use std::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const VISCOUS_FLUID_SCALE: f32 = 8.0;

/// Curve shape used by scroll-mode motion
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Interpolator {
    /// Quick start that settles like a viscous fluid
    #[default]
    ViscousFluid,
    /// Constant speed
    Linear,
    /// Starts fast and slows down; the factor sharpens the ease-out
    Decelerate(f32),
    /// Slow start and end, fast middle (cosine)
    AccelerateDecelerate,
    /// Caller-provided shape
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(fn(f32) -> f32),
}

impl Interpolator {
    /// Map elapsed fraction to travelled fraction
    pub fn interpolate(&self, t: f32) -> f32 {
        match self {
            Interpolator::ViscousFluid => viscous_fluid_normalized(t),
            Interpolator::Linear => t,
            Interpolator::Decelerate(factor) => {
                if *factor == 1.0 {
                    1.0 - (1.0 - t) * (1.0 - t)
                } else {
                    1.0 - (1.0 - t).powf(2.0 * factor)
                }
            }
            Interpolator::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
            Interpolator::Custom(f) => f(t),
        }
    }
}

fn viscous_fluid(x: f32) -> f32 {
    let x = x * VISCOUS_FLUID_SCALE;
    if x < 1.0 {
        x - (1.0 - (-x).exp())
    } else {
        // 1/e: where the first segment ends
        let start = 0.367_879_44;
        let x = 1.0 - (1.0 - x).exp();
        start + x * (1.0 - start)
    }
}

fn viscous_fluid_normalized(t: f32) -> f32 {
    let normalize = 1.0 / viscous_fluid(1.0);
    let offset = 1.0 - normalize * viscous_fluid(1.0);
    let interpolated = normalize * viscous_fluid(t);
    if interpolated > 0.0 {
        interpolated + offset
    } else {
        interpolated
    }
}
