// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The transition state machine: populate, install, animate, uninstall, complete.
//!
//! A [`Transition`] owns the top-level units of one transition and drives them
//! through a forward-only sequence of [`Phase`]s:
//!
//! ```text
//! Idle ─start─▶ Populated ─▶ Installed ─▶ Animating ─animation_completed─▶ Uninstalled ─▶ Completed
//!                   │                                                                      ▲
//!                   └──────────────────────── not animated ───────────────────────────────┘
//! ```
//!
//! 1. **Populate**: the from/to surfaces are inserted into the container in
//!    [`ViewOrder`]; this fixes their z-order before anything animates.
//! 2. **Install**: if the context is not animated, the transition completes
//!    right away and no unit is touched. Otherwise every unit is installed, in
//!    registration order.
//! 3. **Animate**: a single request goes to the [`AnimationRunner`]. The runner
//!    calls the provided callback once, inside its animation block, and the
//!    callback animates every unit in registration order.
//! 4. **Uninstall**: when the runner reports completion, finished or not, every
//!    unit is uninstalled in registration order.
//! 5. **Complete**: the host is told `success = !cx.was_cancelled()`. The runner's
//!    own finished flag never decides success.
//!
//! Runners that finish synchronously return [`RunStatus::Completed`] from
//! [`AnimationRunner::run`] and the transition proceeds to completion inside
//! [`Transition::start`]. Asynchronous runners return [`RunStatus::Pending`]; the
//! host then calls [`Transition::animation_completed`] from its completion
//! callback.

use alloc::boxed::Box;
use core::fmt;
use core::time::Duration;

use smallvec::SmallVec;

use crate::context::{Role, TransitionContext};
use crate::timing::AnimationOptions;
use crate::unit::{BoxedUnit, INLINE_UNITS, TransitionUnit};

/// Order in which the participants are inserted into the container.
///
/// The later insertion ends up on top.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewOrder {
    /// From first, to on top.
    #[default]
    FromFirst,
    /// To first, from on top.
    ToFirst,
}

impl ViewOrder {
    fn roles(self) -> [Role; 2] {
        match self {
            Self::FromFirst => [Role::From, Role::To],
            Self::ToFirst => [Role::To, Role::From],
        }
    }
}

/// Where a [`Transition`] is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Created, not started.
    Idle,
    /// Participants are in the container.
    Populated,
    /// Every unit has been installed.
    Installed,
    /// The animation block has been submitted to the runner.
    Animating,
    /// Every unit has been uninstalled.
    Uninstalled,
    /// The host has been told the outcome.
    Completed {
        /// `false` if the host cancelled the transition.
        success: bool,
    },
}

impl Phase {
    /// Returns `true` once the host has been notified.
    #[must_use]
    pub fn is_completed(self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Populated => f.write_str("populated"),
            Self::Installed => f.write_str("installed"),
            Self::Animating => f.write_str("animating"),
            Self::Uninstalled => f.write_str("uninstalled"),
            Self::Completed { success: true } => f.write_str("completed"),
            Self::Completed { success: false } => f.write_str("cancelled"),
        }
    }
}

/// Errors from driving a [`Transition`] out of order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// An operation was called in a phase that does not allow it.
    #[error("transition is {actual}, expected {expected}")]
    InvalidPhase {
        /// The phase the operation requires.
        expected: Phase,
        /// The phase the transition was in.
        actual: Phase,
    },
}

/// What an [`AnimationRunner`] reports back from [`AnimationRunner::run`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RunStatus {
    /// The animation is in flight; the host will call
    /// [`Transition::animation_completed`] later.
    Pending,
    /// The animation already ended.
    Completed {
        /// `false` if the animation was interrupted.
        finished: bool,
    },
}

/// The host's animation engine.
pub trait AnimationRunner {
    /// Run one animation block described by `options`.
    ///
    /// `animations` must be called once, inside the block, so that the values
    /// it sets become the animation targets. Extra calls are ignored.
    fn run(&mut self, options: &AnimationOptions, animations: &mut dyn FnMut()) -> RunStatus;
}

/// One transition: its animation parameters, container order, and units.
///
/// Transitions are single-use. Build a fresh one per transition, typically from a
/// factory registered with a [`Dispatcher`](crate::dispatch::Dispatcher).
pub struct Transition<C: ?Sized> {
    options: AnimationOptions,
    order: ViewOrder,
    units: SmallVec<[BoxedUnit<C>; INLINE_UNITS]>,
    phase: Phase,
}

impl<C: TransitionContext + ?Sized> Transition<C> {
    /// Creates an idle transition with no units and [`ViewOrder::FromFirst`].
    #[must_use]
    pub fn new(options: AnimationOptions) -> Self {
        Self {
            options,
            order: ViewOrder::default(),
            units: SmallVec::new(),
            phase: Phase::Idle,
        }
    }

    /// Sets the container insertion order.
    #[must_use]
    pub fn with_view_order(mut self, order: ViewOrder) -> Self {
        self.order = order;
        self
    }

    /// Appends a top-level unit and returns the transition.
    #[must_use]
    pub fn with_unit(mut self, unit: impl TransitionUnit<C> + 'static) -> Self {
        self.push_unit(unit);
        self
    }

    /// Appends a top-level unit after the existing ones.
    pub fn push_unit(&mut self, unit: impl TransitionUnit<C> + 'static) {
        self.units.push(Box::new(unit));
    }

    /// Appends an already boxed top-level unit.
    pub fn push_boxed(&mut self, unit: BoxedUnit<C>) {
        self.units.push(unit);
    }

    /// The animation parameters.
    #[must_use]
    pub fn options(&self) -> &AnimationOptions {
        &self.options
    }

    /// How long the animation block runs.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.options.duration()
    }

    /// The container insertion order.
    #[must_use]
    pub fn view_order(&self) -> ViewOrder {
        self.order
    }

    /// Number of top-level units.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run the transition up to the animation block, or to completion.
    ///
    /// Returns the phase reached: [`Phase::Animating`] while an asynchronous
    /// runner is busy, otherwise [`Phase::Completed`].
    pub fn start<R>(&mut self, cx: &C, runner: &mut R) -> Result<Phase, TransitionError>
    where
        R: AnimationRunner + ?Sized,
    {
        self.expect_phase(Phase::Idle)?;

        for role in self.order.roles() {
            if let Some(surface) = cx.surface(role) {
                cx.add_to_container(&surface);
            }
        }
        self.set_phase(Phase::Populated);

        if !cx.is_animated() {
            return Ok(self.complete(cx));
        }

        for unit in &mut self.units {
            unit.install(cx);
        }
        self.set_phase(Phase::Installed);

        self.set_phase(Phase::Animating);
        let units = &mut self.units;
        let mut animated = false;
        let status = runner.run(&self.options, &mut || {
            if core::mem::replace(&mut animated, true) {
                tracing::warn!("animation runner invoked the animations callback twice");
                return;
            }
            for unit in units.iter_mut() {
                unit.animate(cx);
            }
        });

        match status {
            RunStatus::Pending => Ok(self.phase),
            RunStatus::Completed { finished } => self.animation_completed(cx, finished),
        }
    }

    /// Finish a transition whose animation block has ended.
    ///
    /// `finished` is `false` when the runner was interrupted. Uninstall runs either
    /// way and success is taken from [`TransitionContext::was_cancelled`].
    pub fn animation_completed(&mut self, cx: &C, finished: bool) -> Result<Phase, TransitionError> {
        self.expect_phase(Phase::Animating)?;
        if !finished {
            tracing::debug!("animation interrupted; tearing down anyway");
        }

        for unit in &mut self.units {
            unit.uninstall(cx);
        }
        self.set_phase(Phase::Uninstalled);

        Ok(self.complete(cx))
    }

    fn complete(&mut self, cx: &C) -> Phase {
        let success = !cx.was_cancelled();
        cx.complete_transition(success);
        self.set_phase(Phase::Completed { success });
        self.phase
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), TransitionError> {
        if self.phase == expected {
            Ok(())
        } else {
            tracing::warn!(%expected, actual = %self.phase, "transition driven out of order");
            Err(TransitionError::InvalidPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        tracing::debug!(from = %self.phase, to = %phase, "transition phase");
        self.phase = phase;
    }
}

impl<C: ?Sized> fmt::Debug for Transition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("options", &self.options)
            .field("order", &self.order)
            .field("units", &self.units.len())
            .field("phase", &self.phase)
            .finish()
    }
}
