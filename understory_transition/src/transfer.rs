// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hand a transient value from the outgoing screen to the incoming one.
//!
//! A [`Transfer`] pairs a [`TransferSource`] (owned by the "from" participant) with
//! a [`TransferDestination`] (owned by the "to" participant). The source builds
//! a transferable (typically a proxy surface cloned from one of its elements)
//! and both sides then animate and tear it down:
//!
//! | phase     | source                  | destination          |
//! |-----------|-------------------------|----------------------|
//! | install   | `install(cx) -> Some(T)` | `install(&mut T)`    |
//! | animate   | `animate(&mut T)`       | `animate(&mut T)`    |
//! | uninstall | `uninstall(&mut T)`     | `uninstall(&mut T)`  |
//!
//! The pair is all-or-nothing. If the participants cannot be resolved (wrong
//! controller types, missing role) or the source produces no transferable, none
//! of the six closures run for that transition.
//!
//! ## Typed setup
//!
//! [`Transfer::between`] resolves the from/to controllers with
//! [`Any::downcast_ref`] and only calls the setup closure when both match:
//!
//! ```
//! # use understory_transition::context::TransitionContext;
//! use understory_transition::transfer::{Transfer, TransferDestination, TransferSource};
//!
//! struct Gallery { thumbnail: u32 }
//! struct Detail { hero: u32 }
//!
//! fn hero_transfer<C: TransitionContext + 'static>() -> Transfer<C, u32> {
//!     Transfer::between(|from: &Gallery, to: &Detail| {
//!         let thumbnail = from.thumbnail;
//!         let hero = to.hero;
//!         (
//!             TransferSource::new(move |_cx: &C| Some(thumbnail)),
//!             TransferDestination::new().on_animate(move |proxy: &mut u32| *proxy = hero),
//!         )
//!     })
//! }
//! ```

use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use crate::context::{Role, TransitionContext};
use crate::unit::TransitionUnit;

type Produce<C, T> = Box<dyn FnMut(&C) -> Option<T>>;
type Consume<T> = Box<dyn FnMut(&mut T)>;

/// The producing half of a transfer.
pub struct TransferSource<C: ?Sized, T> {
    install: Produce<C, T>,
    animate: Option<Consume<T>>,
    uninstall: Option<Consume<T>>,
}

impl<C: ?Sized, T> TransferSource<C, T> {
    /// Creates a source from the closure that builds the transferable.
    ///
    /// The closure may mutate the source's own surfaces (for example hide the
    /// element being cloned). Returning `None` turns the whole pair into a no-op.
    pub fn new(install: impl FnMut(&C) -> Option<T> + 'static) -> Self {
        Self {
            install: Box::new(install),
            animate: None,
            uninstall: None,
        }
    }

    /// Sets the source's animate phase.
    #[must_use]
    pub fn on_animate(mut self, f: impl FnMut(&mut T) + 'static) -> Self {
        self.animate = Some(Box::new(f));
        self
    }

    /// Sets the source's uninstall phase.
    #[must_use]
    pub fn on_uninstall(mut self, f: impl FnMut(&mut T) + 'static) -> Self {
        self.uninstall = Some(Box::new(f));
        self
    }
}

impl<C: ?Sized, T> fmt::Debug for TransferSource<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferSource")
            .field("animate", &self.animate.is_some())
            .field("uninstall", &self.uninstall.is_some())
            .finish_non_exhaustive()
    }
}

/// The consuming half of a transfer.
pub struct TransferDestination<T> {
    install: Option<Consume<T>>,
    animate: Option<Consume<T>>,
    uninstall: Option<Consume<T>>,
}

impl<T> TransferDestination<T> {
    /// Creates a destination with no-op phases.
    #[must_use]
    pub fn new() -> Self {
        Self {
            install: None,
            animate: None,
            uninstall: None,
        }
    }

    /// Sets the destination's install phase, run right after the source produced the value.
    #[must_use]
    pub fn on_install(mut self, f: impl FnMut(&mut T) + 'static) -> Self {
        self.install = Some(Box::new(f));
        self
    }

    /// Sets the destination's animate phase.
    #[must_use]
    pub fn on_animate(mut self, f: impl FnMut(&mut T) + 'static) -> Self {
        self.animate = Some(Box::new(f));
        self
    }

    /// Sets the destination's uninstall phase.
    #[must_use]
    pub fn on_uninstall(mut self, f: impl FnMut(&mut T) + 'static) -> Self {
        self.uninstall = Some(Box::new(f));
        self
    }
}

impl<T> Default for TransferDestination<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TransferDestination<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferDestination")
            .field("install", &self.install.is_some())
            .field("animate", &self.animate.is_some())
            .field("uninstall", &self.uninstall.is_some())
            .finish()
    }
}

fn call<T>(hook: &mut Option<Consume<T>>, value: &mut T) {
    if let Some(f) = hook.as_mut() {
        f(value);
    }
}

type Setup<C, T> = Box<dyn FnMut(&C) -> Option<(TransferSource<C, T>, TransferDestination<T>)>>;

/// Both halves plus the value in flight, alive between install and uninstall.
struct Active<C: ?Sized, T> {
    source: TransferSource<C, T>,
    destination: TransferDestination<T>,
    transferable: T,
}

/// A unit that moves a transferable of type `T` across the transition.
pub struct Transfer<C: ?Sized, T> {
    setup: Setup<C, T>,
    active: Option<Active<C, T>>,
}

impl<C: ?Sized, T> Transfer<C, T> {
    /// Creates a transfer whose participants are resolved from the context at install time.
    ///
    /// Returning `None` from `setup` makes the transfer a no-op for this transition.
    pub fn new(
        setup: impl FnMut(&C) -> Option<(TransferSource<C, T>, TransferDestination<T>)> + 'static,
    ) -> Self {
        Self {
            setup: Box::new(setup),
            active: None,
        }
    }

    /// Returns `true` between a successful install and the matching uninstall.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

impl<C: TransitionContext + ?Sized + 'static, T: 'static> Transfer<C, T> {
    /// Creates a transfer between controllers of type `From` and `To`.
    ///
    /// If either role's controller is missing or of another type, `setup` is not
    /// called and the transfer is a no-op.
    pub fn between<From: Any, To: Any>(
        mut setup: impl FnMut(&From, &To) -> (TransferSource<C, T>, TransferDestination<T>) + 'static,
    ) -> Self {
        Self::new(move |cx: &C| {
            let from = cx.controller(Role::From)?.downcast_ref::<From>()?;
            let to = cx.controller(Role::To)?.downcast_ref::<To>()?;
            Some(setup(from, to))
        })
    }
}

impl<C: ?Sized, T> fmt::Debug for Transfer<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transfer")
            .field("active", &self.active.is_some())
            .finish_non_exhaustive()
    }
}

impl<C: ?Sized, T> TransitionUnit<C> for Transfer<C, T> {
    fn install(&mut self, cx: &C) {
        if self.active.is_some() {
            tracing::warn!("transfer installed twice without uninstall; ignoring");
            return;
        }
        let Some((mut source, mut destination)) = (self.setup)(cx) else {
            tracing::debug!("transfer participants not resolved; skipping");
            return;
        };
        let Some(mut transferable) = (source.install)(cx) else {
            tracing::debug!("transfer source produced nothing; skipping");
            return;
        };
        call(&mut destination.install, &mut transferable);
        self.active = Some(Active {
            source,
            destination,
            transferable,
        });
    }

    fn animate(&mut self, _cx: &C) {
        if let Some(Active {
            source,
            destination,
            transferable,
        }) = self.active.as_mut()
        {
            call(&mut source.animate, transferable);
            call(&mut destination.animate, transferable);
        }
    }

    fn uninstall(&mut self, _cx: &C) {
        if let Some(Active {
            mut source,
            mut destination,
            mut transferable,
        }) = self.active.take()
        {
            call(&mut source.uninstall, &mut transferable);
            call(&mut destination.uninstall, &mut transferable);
        }
    }
}
