// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Transition: composable install/animate/uninstall transitions.
//!
//! This crate models a transition between two presentation states (a "from"
//! screen and a "to" screen) as a set of small, independent effects. Each effect
//! is a [`TransitionUnit`] with three phases:
//!
//! - **install**: prepare the starting state before anything animates;
//! - **animate**: apply target values inside the host's animation block;
//! - **uninstall**: restore and tear down once the animation is over.
//!
//! A [`Transition`] owns the top-level units, inserts the participants into the
//! container, and drives every unit through the phases in registration order.
//! The crate never interpolates anything itself: the host supplies an
//! [`AnimationRunner`] that records the target values set during `animate` and
//! animates towards them.
//!
//! ## Modules
//!
//! - [`context`]: the [`TransitionContext`] facade over the host's transition.
//! - [`unit`]: the unit trait, closure units, [`Empty`] and [`Group`].
//! - [`property`]: save, mutate and restore one attribute of a role's surface.
//! - [`transfer`]: hand a value from a source to a destination across the phases.
//! - [`snapshot`]: geometry snapshots and the proxy [`Morph`] unit.
//! - [`timing`]: duration, delay, curves, springs and keyframe modes.
//! - [`lifecycle`]: the [`Transition`] state machine.
//! - [`interactive`]: gesture-driven progress, finish and cancel.
//! - [`dispatch`]: choose a transition per push/pop and controller pair.
//!
//! The crate assumes no particular UI toolkit. Surfaces are whatever handle type
//! the host exposes; geometry is expressed with [`kurbo`] types.
//!
//! ## Example
//!
//! A cross-fade: the incoming screen fades in while the outgoing one fades out,
//! and both opacities are restored afterwards.
//!
//! ```rust
//! use std::any::Any;
//! use std::cell::{Cell, RefCell};
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! use kurbo::{Affine, Point, Rect};
//! use understory_transition::{
//!     AnimationOptions, AnimationRunner, Phase, PropertyUnit, Role, RunStatus,
//!     SurfaceProperties, Transition, TransitionContext,
//! };
//!
//! struct View {
//!     alpha: Cell<f64>,
//! }
//!
//! #[derive(Clone)]
//! struct Handle(Rc<View>);
//!
//! impl SurfaceProperties for Handle {
//!     fn alpha(&self) -> f64 { self.0.alpha.get() }
//!     fn set_alpha(&self, alpha: f64) { self.0.alpha.set(alpha) }
//!     fn transform(&self) -> Affine { Affine::IDENTITY }
//!     fn set_transform(&self, _: Affine) {}
//!     fn bounds(&self) -> Rect { Rect::ZERO }
//!     fn set_bounds(&self, _: Rect) {}
//!     fn center(&self) -> Point { Point::ZERO }
//!     fn set_center(&self, _: Point) {}
//! }
//!
//! struct Host {
//!     from: Handle,
//!     to: Handle,
//!     container: Handle,
//!     outcome: RefCell<Option<bool>>,
//! }
//!
//! impl TransitionContext for Host {
//!     type Surface = Handle;
//!     fn surface(&self, role: Role) -> Option<Handle> {
//!         Some(match role {
//!             Role::From => self.from.clone(),
//!             Role::To => self.to.clone(),
//!         })
//!     }
//!     fn controller(&self, _: Role) -> Option<&dyn Any> { None }
//!     fn container(&self) -> Handle { self.container.clone() }
//!     fn add_to_container(&self, _: &Handle) {}
//!     fn remove_from_container(&self, _: &Handle) {}
//!     fn is_animated(&self) -> bool { true }
//!     fn was_cancelled(&self) -> bool { false }
//!     fn complete_transition(&self, success: bool) {
//!         *self.outcome.borrow_mut() = Some(success);
//!     }
//! }
//!
//! /// Jumps straight to the end values.
//! struct Instant;
//!
//! impl AnimationRunner for Instant {
//!     fn run(&mut self, _: &AnimationOptions, animations: &mut dyn FnMut()) -> RunStatus {
//!         animations();
//!         RunStatus::Completed { finished: true }
//!     }
//! }
//!
//! let view = || Handle(Rc::new(View { alpha: Cell::new(1.0) }));
//! let host = Host {
//!     from: view(),
//!     to: view(),
//!     container: view(),
//!     outcome: RefCell::new(None),
//! };
//!
//! let mut transition = Transition::<Host>::new(AnimationOptions::new(Duration::from_millis(300)))
//!     .with_unit(PropertyUnit::<Handle, f64>::alpha(Role::To, 0.0, 1.0))
//!     .with_unit(PropertyUnit::<Handle, f64>::alpha(Role::From, 1.0, 0.0));
//!
//! let phase = transition.start(&host, &mut Instant).unwrap();
//!
//! assert_eq!(phase, Phase::Completed { success: true });
//! assert_eq!(*host.outcome.borrow(), Some(true));
//! // Captured opacities are back in place.
//! assert_eq!(host.from.alpha(), 1.0);
//! assert_eq!(host.to.alpha(), 1.0);
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): build with the standard library.
//! - `libm`: use `libm` float math in `kurbo` for `no_std` builds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod context;
pub mod dispatch;
pub mod interactive;
pub mod lifecycle;
pub mod property;
pub mod snapshot;
pub mod timing;
pub mod transfer;
pub mod unit;

#[cfg(test)]
mod test_support;

pub use context::{Role, TransitionContext};
pub use dispatch::{Dispatcher, Operation};
pub use interactive::{
    DriverConfig, DriverState, Edge, GestureOutcome, GestureSample, GestureState,
    InteractionHost, InteractiveDriver, PercentDrivenTransition,
};
pub use lifecycle::{
    AnimationRunner, Phase, RunStatus, Transition, TransitionError, ViewOrder,
};
pub use property::{PropertyUnit, SurfaceProperties};
pub use snapshot::{Morph, MorphSurface, Snapshot, mimic_geometry};
pub use timing::{AnimationOptions, CalculationMode, Curve, OptionsError, Timing};
pub use transfer::{Transfer, TransferDestination, TransferSource};
pub use unit::{AnimationUnit, BoxedUnit, Empty, Group, TransitionUnit};
