// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation parameters handed to the host's animation runner.
//!
//! This crate does not interpolate anything itself. [`AnimationOptions`] only
//! describes the animation block the host should run: how long, after what
//! delay, and with which [`Timing`].
//!
//! Durations are [`Duration`]s. The `*_secs_f64` constructors accept the
//! floating-point seconds most toolkits use and reject values that are
//! negative or not finite.

use core::time::Duration;

/// Timing curve of a basic or spring animation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Curve {
    /// Constant speed.
    Linear,
    /// Slow start.
    EaseIn,
    /// Slow end.
    EaseOut,
    /// Slow start and end.
    #[default]
    EaseInOut,
}

/// How a keyframe animation interpolates between keyframes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CalculationMode {
    /// Linear interpolation between keyframes.
    #[default]
    Linear,
    /// Jump from keyframe to keyframe without interpolation.
    Discrete,
    /// Even pacing across the whole animation, ignoring keyframe timing.
    Paced,
    /// Smooth cubic spline through the keyframes.
    Cubic,
    /// Cubic spline with even pacing.
    CubicPaced,
}

/// The kind of animation block to run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Timing {
    /// A plain animation along a timing curve.
    Curve(Curve),
    /// A spring animation.
    Spring {
        /// Damping ratio; `1.0` is critically damped, lower values oscillate.
        damping_ratio: f64,
        /// Initial velocity, in units of the total animation distance per second.
        initial_velocity: f64,
        /// Additional timing curve applied to the spring.
        curve: Curve,
    },
    /// A keyframe animation.
    Keyframes(CalculationMode),
}

impl Default for Timing {
    fn default() -> Self {
        Self::Curve(Curve::default())
    }
}

/// Errors from validating [`AnimationOptions`].
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum OptionsError {
    /// A seconds value was negative, NaN, infinite, or too large for a [`Duration`].
    #[error("{name} must be a finite, non-negative number of seconds, got {value}")]
    InvalidSeconds {
        /// Which parameter was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The spring damping ratio was not a finite positive number.
    #[error("spring damping ratio must be finite and positive, got {0}")]
    InvalidDampingRatio(f64),
    /// The spring initial velocity was not finite.
    #[error("spring initial velocity must be finite, got {0}")]
    InvalidInitialVelocity(f64),
}

fn seconds(name: &'static str, value: f64) -> Result<Duration, OptionsError> {
    Duration::try_from_secs_f64(value).map_err(|_| OptionsError::InvalidSeconds { name, value })
}

/// Duration, delay and timing of a transition's animation block.
///
/// Defaults to no delay and [`Curve::EaseInOut`].
///
/// ```
/// use core::time::Duration;
/// use understory_transition::timing::{AnimationOptions, Curve, Timing};
///
/// let options = AnimationOptions::from_secs_f64(0.35)
///     .unwrap()
///     .with_spring(0.8, 0.0, Curve::EaseOut)
///     .unwrap();
/// assert_eq!(options.duration(), Duration::from_millis(350));
/// assert!(matches!(options.timing(), Timing::Spring { .. }));
///
/// assert!(AnimationOptions::from_secs_f64(-1.0).is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnimationOptions {
    duration: Duration,
    delay: Duration,
    timing: Timing,
}

impl AnimationOptions {
    /// Creates options with the given duration, no delay and the default timing.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            duration,
            delay: Duration::ZERO,
            timing: Timing::Curve(Curve::EaseInOut),
        }
    }

    /// Creates options from a duration in seconds.
    pub fn from_secs_f64(duration: f64) -> Result<Self, OptionsError> {
        Ok(Self::new(seconds("duration", duration)?))
    }

    /// Sets the delay before the animation starts.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the delay in seconds.
    pub fn with_delay_secs_f64(self, delay: f64) -> Result<Self, OptionsError> {
        Ok(self.with_delay(seconds("delay", delay)?))
    }

    /// Uses a plain animation along `curve`.
    #[must_use]
    pub const fn with_curve(mut self, curve: Curve) -> Self {
        self.timing = Timing::Curve(curve);
        self
    }

    /// Uses a spring animation.
    pub fn with_spring(
        mut self,
        damping_ratio: f64,
        initial_velocity: f64,
        curve: Curve,
    ) -> Result<Self, OptionsError> {
        if !(damping_ratio.is_finite() && damping_ratio > 0.0) {
            return Err(OptionsError::InvalidDampingRatio(damping_ratio));
        }
        if !initial_velocity.is_finite() {
            return Err(OptionsError::InvalidInitialVelocity(initial_velocity));
        }
        self.timing = Timing::Spring {
            damping_ratio,
            initial_velocity,
            curve,
        };
        Ok(self)
    }

    /// Uses a keyframe animation.
    #[must_use]
    pub const fn with_keyframes(mut self, mode: CalculationMode) -> Self {
        self.timing = Timing::Keyframes(mode);
        self
    }

    /// How long the animation block runs.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Delay before the animation block starts.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// The kind of animation block.
    #[must_use]
    pub const fn timing(&self) -> Timing {
        self.timing
    }
}
