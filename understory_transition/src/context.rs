// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ambient transition context: role lookups, the container, and completion signalling.
//!
//! A [`TransitionContext`] is the only view units have of the host toolkit. It is
//! a read-only facade for the lifetime of one transition: it resolves the
//! participating surfaces and controllers for each [`Role`], exposes the shared
//! container surface, and reports whether the transition is animated or was
//! cancelled.
//!
//! Surfaces are handles. The context hands out clones, and mutation happens
//! through the handle (for example an `Rc` around toolkit state, or an id into a
//! scene the host owns), so every method here takes `&self`.

use core::any::Any;
use core::fmt;

/// The side of a transition a participant belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// The outgoing presentation state.
    From,
    /// The incoming presentation state.
    To,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From => f.write_str("from"),
            Self::To => f.write_str("to"),
        }
    }
}

/// Host-provided facade over a single running transition.
///
/// ## Contract
///
/// - [`surface`](Self::surface) and [`controller`](Self::controller) may return
///   `None`; units treat that as "participant absent" and degrade to no-ops.
/// - [`was_cancelled`](Self::was_cancelled) is read once, when the transition
///   completes. Hosts with interactive transitions flip it when the user backs out.
/// - [`complete_transition`](Self::complete_transition) is called exactly once
///   per transition by [`Transition`](crate::lifecycle::Transition).
pub trait TransitionContext {
    /// Handle to a renderable node.
    type Surface: Clone;

    /// The root surface of the participant playing `role`, if any.
    fn surface(&self, role: Role) -> Option<Self::Surface>;

    /// The controller playing `role`, for typed lookups via [`Any::downcast_ref`].
    fn controller(&self, role: Role) -> Option<&dyn Any>;

    /// The shared parent that hosts both participants during the transition.
    fn container(&self) -> Self::Surface;

    /// Insert `surface` into the container, on top of its current children.
    ///
    /// Inserting a surface that is already a child moves it to the top.
    fn add_to_container(&self, surface: &Self::Surface);

    /// Remove `surface` from the container if it is a child of it.
    fn remove_from_container(&self, surface: &Self::Surface);

    /// Whether the host asked for an animated transition.
    fn is_animated(&self) -> bool;

    /// Whether the host cancelled the transition (for example an abandoned gesture).
    fn was_cancelled(&self) -> bool;

    /// Tell the host the transition is over.
    fn complete_transition(&self, success: bool);
}
