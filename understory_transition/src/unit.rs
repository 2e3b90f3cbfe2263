// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The three-phase unit contract and its basic implementations.
//!
//! Every visual effect in a transition is a [`TransitionUnit`]: something that can
//! be installed, animated, and uninstalled against a [`TransitionContext`](crate::context::TransitionContext).
//!
//! - **install** runs before the animation block and sets up the starting state.
//! - **animate** runs inside the animation block and applies target values.
//! - **uninstall** runs after the animation completes and tears everything down.
//!
//! Each phase is called at most once per transition, and a phase that finds
//! nothing to do is a no-op rather than an error. Units never see each other;
//! ordering across units is the job of [`Group`] and
//! [`Transition`](crate::lifecycle::Transition).
//!
//! ## Building units
//!
//! - [`AnimationUnit`]: a bundle of closures, any of which may be omitted.
//! - [`Empty`]: does nothing; useful as a placeholder in conditional compositions.
//! - [`Group`]: forwards each phase to its children in registration order.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_transition::unit::{AnimationUnit, Group, TransitionUnit};
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let unit = |name: &'static str| {
//!     let (a, b, c) = (log.clone(), log.clone(), log.clone());
//!     AnimationUnit::<()>::new()
//!         .on_install(move |_| a.borrow_mut().push(("install", name)))
//!         .on_animate(move |_| b.borrow_mut().push(("animate", name)))
//!         .on_uninstall(move |_| c.borrow_mut().push(("uninstall", name)))
//! };
//!
//! let mut group = Group::new().with(unit("a")).with(unit("b"));
//! group.install(&());
//! group.animate(&());
//!
//! assert_eq!(
//!     *log.borrow(),
//!     [("install", "a"), ("install", "b"), ("animate", "a"), ("animate", "b")]
//! );
//! ```

use alloc::boxed::Box;
use core::fmt;

use smallvec::SmallVec;

/// Inline capacity for unit lists.
///
/// Transitions rarely combine more than a handful of effects at one level.
pub(crate) const INLINE_UNITS: usize = 4;

/// A visual effect driven through install → animate → uninstall.
///
/// `C` is the context type the unit runs against, usually a
/// [`TransitionContext`](crate::context::TransitionContext) implementation.
/// Implementations may keep private state between phases (for example a value
/// captured in `install` and restored in `uninstall`) but must reset it so that a
/// repeated `uninstall` has no effect.
pub trait TransitionUnit<C: ?Sized> {
    /// Set up the starting state. Runs before the animation block.
    fn install(&mut self, cx: &C);

    /// Apply target values. Runs inside the animation block.
    fn animate(&mut self, cx: &C);

    /// Tear down and restore. Runs after the animation completes.
    fn uninstall(&mut self, cx: &C);
}

/// A type-erased unit.
pub type BoxedUnit<C> = Box<dyn TransitionUnit<C>>;

impl<C: ?Sized, U: TransitionUnit<C> + ?Sized> TransitionUnit<C> for Box<U> {
    fn install(&mut self, cx: &C) {
        (**self).install(cx);
    }

    fn animate(&mut self, cx: &C) {
        (**self).animate(cx);
    }

    fn uninstall(&mut self, cx: &C) {
        (**self).uninstall(cx);
    }
}

/// A unit that does nothing in every phase.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Empty;

impl<C: ?Sized> TransitionUnit<C> for Empty {
    fn install(&mut self, _cx: &C) {}
    fn animate(&mut self, _cx: &C) {}
    fn uninstall(&mut self, _cx: &C) {}
}

type Hook<C> = Box<dyn FnMut(&C)>;

/// A unit assembled from up to three closures.
///
/// Phases without a closure are no-ops.
pub struct AnimationUnit<C: ?Sized> {
    install: Option<Hook<C>>,
    animate: Option<Hook<C>>,
    uninstall: Option<Hook<C>>,
}

impl<C: ?Sized> AnimationUnit<C> {
    /// Creates a unit with no-op phases.
    #[must_use]
    pub fn new() -> Self {
        Self {
            install: None,
            animate: None,
            uninstall: None,
        }
    }

    /// Sets the install phase.
    #[must_use]
    pub fn on_install(mut self, f: impl FnMut(&C) + 'static) -> Self {
        self.install = Some(Box::new(f));
        self
    }

    /// Sets the animate phase.
    #[must_use]
    pub fn on_animate(mut self, f: impl FnMut(&C) + 'static) -> Self {
        self.animate = Some(Box::new(f));
        self
    }

    /// Sets the uninstall phase.
    #[must_use]
    pub fn on_uninstall(mut self, f: impl FnMut(&C) + 'static) -> Self {
        self.uninstall = Some(Box::new(f));
        self
    }
}

impl<C: ?Sized> Default for AnimationUnit<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized> fmt::Debug for AnimationUnit<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationUnit")
            .field("install", &self.install.is_some())
            .field("animate", &self.animate.is_some())
            .field("uninstall", &self.uninstall.is_some())
            .finish()
    }
}

impl<C: ?Sized> TransitionUnit<C> for AnimationUnit<C> {
    fn install(&mut self, cx: &C) {
        if let Some(f) = self.install.as_mut() {
            f(cx);
        }
    }

    fn animate(&mut self, cx: &C) {
        if let Some(f) = self.animate.as_mut() {
            f(cx);
        }
    }

    fn uninstall(&mut self, cx: &C) {
        if let Some(f) = self.uninstall.as_mut() {
            f(cx);
        }
    }
}

/// An ordered group of units that behaves as one unit.
///
/// Each phase is forwarded to every child, in registration order, before the
/// group returns. Because the caller drives phases one at a time, no child's
/// `animate` can run before every sibling has been installed. Groups nest to any
/// depth.
pub struct Group<C: ?Sized> {
    units: SmallVec<[BoxedUnit<C>; INLINE_UNITS]>,
}

impl<C: ?Sized> Group<C> {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self {
            units: SmallVec::new(),
        }
    }

    /// Appends a unit and returns the group, for chained construction.
    #[must_use]
    pub fn with(mut self, unit: impl TransitionUnit<C> + 'static) -> Self {
        self.push(unit);
        self
    }

    /// Appends a unit after all existing children.
    pub fn push(&mut self, unit: impl TransitionUnit<C> + 'static) {
        self.units.push(Box::new(unit));
    }

    /// Appends an already boxed unit.
    pub fn push_boxed(&mut self, unit: BoxedUnit<C>) {
        self.units.push(unit);
    }

    /// Number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` if the group has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl<C: ?Sized> Default for Group<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized> FromIterator<BoxedUnit<C>> for Group<C> {
    fn from_iter<I: IntoIterator<Item = BoxedUnit<C>>>(iter: I) -> Self {
        Self {
            units: iter.into_iter().collect(),
        }
    }
}

impl<C: ?Sized> fmt::Debug for Group<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("len", &self.units.len())
            .finish_non_exhaustive()
    }
}

impl<C: ?Sized> TransitionUnit<C> for Group<C> {
    fn install(&mut self, cx: &C) {
        for unit in &mut self.units {
            unit.install(cx);
        }
    }

    fn animate(&mut self, cx: &C) {
        for unit in &mut self.units {
            unit.animate(cx);
        }
    }

    fn uninstall(&mut self, cx: &C) {
        for unit in &mut self.units {
            unit.uninstall(cx);
        }
    }
}
