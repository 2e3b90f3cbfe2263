// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture-driven transitions: turn edge-pan samples into progress, finish or cancel.
//!
//! ## Usage
//!
//! 1) Implement [`PercentDrivenTransition`] for the host's scrubbable transition
//!    handle and [`InteractionHost`] for whatever starts the transition.
//! 2) Forward every pan sample to [`InteractiveDriver::handle_gesture`].
//! 3) On [`GestureState::Began`] the driver asks the host for a handle and starts
//!    tracking. On [`GestureState::Changed`] it feeds the handle the displacement
//!    along the tracked edge divided by the sample's extent.
//! 4) On [`GestureState::Ended`] it finishes if progress is strictly past the
//!    threshold *or* the gesture is still moving forward, and cancels otherwise.
//!    [`GestureState::Cancelled`] always cancels. Either way the handle is
//!    dropped and the driver is idle again right away.
//!
//! Samples that do not fit the current state (an update while idle, a second
//! `Began` while tracking) are ignored.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Vec2;
//! use understory_transition::interactive::{
//!     GestureOutcome, GestureSample, GestureState, InteractionHost, InteractiveDriver,
//!     PercentDrivenTransition,
//! };
//!
//! #[derive(Default)]
//! struct Scrub(f64);
//!
//! impl PercentDrivenTransition for Scrub {
//!     fn update(&mut self, progress: f64) { self.0 = progress; }
//!     fn finish(&mut self) {}
//!     fn cancel(&mut self) {}
//! }
//!
//! struct Nav;
//!
//! impl InteractionHost for Nav {
//!     type Handle = Scrub;
//!     fn begin_interactive_transition(&mut self) -> Option<Scrub> {
//!         Some(Scrub::default())
//!     }
//! }
//!
//! let mut driver = InteractiveDriver::default();
//! let sample = |state, x: f64, vx: f64| GestureSample {
//!     state,
//!     translation: Vec2::new(x, 0.0),
//!     velocity: Vec2::new(vx, 0.0),
//!     extent: 400.0,
//! };
//!
//! driver.handle_gesture(&sample(GestureState::Began, 0.0, 0.0), &mut Nav);
//! let outcome = driver.handle_gesture(&sample(GestureState::Changed, 100.0, 0.0), &mut Nav);
//! assert_eq!(outcome, GestureOutcome::Updated { progress: 0.25 });
//! assert_eq!(driver.interaction().map(|s| s.0), Some(0.25));
//!
//! // A quick forward flick finishes even below the threshold.
//! let outcome = driver.handle_gesture(&sample(GestureState::Ended, 120.0, 800.0), &mut Nav);
//! assert_eq!(outcome, GestureOutcome::Finished);
//! assert!(!driver.is_tracking());
//! ```

use kurbo::Vec2;

/// Phase of a continuous gesture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GestureState {
    /// The gesture was recognized.
    Began,
    /// The gesture moved.
    Changed,
    /// The user lifted off.
    Ended,
    /// The system took the gesture away.
    Cancelled,
}

/// One sample from a pan gesture.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureSample {
    /// Gesture phase.
    pub state: GestureState,
    /// Displacement since the gesture began.
    pub translation: Vec2,
    /// Current velocity.
    pub velocity: Vec2,
    /// Reference length a full transition spans, usually the width of the
    /// view the gesture is attached to.
    pub extent: f64,
}

/// A transition whose progress is set externally.
pub trait PercentDrivenTransition {
    /// Move the transition to `progress` in `0.0..=1.0`.
    fn update(&mut self, progress: f64);
    /// Let the transition run to its end state.
    fn finish(&mut self);
    /// Let the transition run back to its start state.
    fn cancel(&mut self);
}

/// Starts interactive transitions on behalf of an [`InteractiveDriver`].
///
/// Passed into each call instead of being owned by the driver.
pub trait InteractionHost {
    /// The handle the host's transition is driven through.
    type Handle: PercentDrivenTransition;

    /// Start a transition driven by the returned handle, or `None` if no
    /// transition can start right now.
    fn begin_interactive_transition(&mut self) -> Option<Self::Handle>;
}

/// Screen edge the gesture pulls from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Pulling from the left edge; rightward motion is forward.
    #[default]
    Left,
    /// Pulling from the right edge; leftward motion is forward.
    Right,
}

impl Edge {
    /// Component of `v` in the forward direction of this edge.
    #[must_use]
    pub fn forward(self, v: Vec2) -> f64 {
        match self {
            Self::Left => v.x,
            Self::Right => -v.x,
        }
    }
}

/// Tunables for an [`InteractiveDriver`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DriverConfig {
    /// Tracked edge.
    pub edge: Edge,
    /// Progress strictly above which an ended gesture finishes.
    pub threshold: f64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            edge: Edge::Left,
            threshold: 0.5,
        }
    }
}

/// Whether the driver currently owns a handle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DriverState {
    /// No interactive transition.
    #[default]
    Idle,
    /// Feeding progress to a handle.
    Tracking,
}

/// What [`InteractiveDriver::handle_gesture`] did with a sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GestureOutcome {
    /// The sample did not apply to the current state, or the host refused to
    /// start a transition.
    Ignored,
    /// A new interactive transition started.
    Began,
    /// Progress was fed to the handle.
    Updated {
        /// The value passed to [`PercentDrivenTransition::update`].
        progress: f64,
    },
    /// The handle was told to finish.
    Finished,
    /// The handle was told to cancel.
    Cancelled,
}

/// Translates gesture samples into calls on a [`PercentDrivenTransition`].
#[derive(Debug)]
pub struct InteractiveDriver<P> {
    config: DriverConfig,
    handle: Option<P>,
    progress: f64,
}

impl<P> Default for InteractiveDriver<P> {
    fn default() -> Self {
        Self::new(DriverConfig::default())
    }
}

impl<P> InteractiveDriver<P> {
    /// Creates an idle driver.
    #[must_use]
    pub fn new(config: DriverConfig) -> Self {
        Self {
            config,
            handle: None,
            progress: 0.0,
        }
    }

    /// The driver's configuration.
    #[must_use]
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// The handle of the active session, if any.
    #[must_use]
    pub fn interaction(&self) -> Option<&P> {
        self.handle.as_ref()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> DriverState {
        if self.handle.is_some() {
            DriverState::Tracking
        } else {
            DriverState::Idle
        }
    }

    /// Returns `true` while a session is active.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.handle.is_some()
    }

    /// Last progress computed in the active session, `0.0` when idle.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    fn progress_of(&self, sample: &GestureSample) -> f64 {
        if !(sample.extent.is_finite() && sample.extent > 0.0) {
            return 0.0;
        }
        let raw = self.config.edge.forward(sample.translation) / sample.extent;
        if raw.is_finite() { raw } else { 0.0 }
    }
}

impl<P: PercentDrivenTransition> InteractiveDriver<P> {
    /// Apply one gesture sample.
    pub fn handle_gesture<H>(&mut self, sample: &GestureSample, host: &mut H) -> GestureOutcome
    where
        H: InteractionHost<Handle = P> + ?Sized,
    {
        match sample.state {
            GestureState::Began => self.begin(host),
            GestureState::Changed => self.update(sample),
            GestureState::Ended => self.end(sample),
            GestureState::Cancelled => self.cancel(),
        }
    }

    fn begin<H>(&mut self, host: &mut H) -> GestureOutcome
    where
        H: InteractionHost<Handle = P> + ?Sized,
    {
        if self.handle.is_some() {
            return GestureOutcome::Ignored;
        }
        let Some(handle) = host.begin_interactive_transition() else {
            tracing::debug!("host refused to start an interactive transition");
            return GestureOutcome::Ignored;
        };
        tracing::debug!(edge = ?self.config.edge, "interactive transition began");
        self.handle = Some(handle);
        self.progress = 0.0;
        GestureOutcome::Began
    }

    fn update(&mut self, sample: &GestureSample) -> GestureOutcome {
        let progress = self.progress_of(sample);
        let Some(handle) = self.handle.as_mut() else {
            return GestureOutcome::Ignored;
        };
        let clamped = progress.clamp(0.0, 1.0);
        tracing::trace!(progress = clamped, "interactive transition progress");
        handle.update(clamped);
        self.progress = clamped;
        GestureOutcome::Updated { progress: clamped }
    }

    fn end(&mut self, sample: &GestureSample) -> GestureOutcome {
        let progress = self.progress_of(sample);
        let Some(mut handle) = self.handle.take() else {
            return GestureOutcome::Ignored;
        };
        self.progress = 0.0;
        let moving_forward = self.config.edge.forward(sample.velocity) > 0.0;
        if progress > self.config.threshold || moving_forward {
            tracing::debug!(progress, moving_forward, "interactive transition finished");
            handle.finish();
            GestureOutcome::Finished
        } else {
            tracing::debug!(progress, "interactive transition cancelled");
            handle.cancel();
            GestureOutcome::Cancelled
        }
    }

    fn cancel(&mut self) -> GestureOutcome {
        let Some(mut handle) = self.handle.take() else {
            return GestureOutcome::Ignored;
        };
        self.progress = 0.0;
        tracing::debug!("interactive gesture cancelled by the system");
        handle.cancel();
        GestureOutcome::Cancelled
    }
}
