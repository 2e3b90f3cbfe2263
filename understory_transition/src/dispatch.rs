// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Choosing a transition for a navigation step.
//!
//! A [`Dispatcher`] keeps, per navigation [`Operation`], an ordered list of
//! strategies. Each strategy is a predicate over the outgoing and incoming
//! controllers plus a factory that builds a fresh [`Transition`]. Lookup walks the
//! list in registration order and the first predicate that accepts wins.
//!
//! Controllers are passed as `&dyn Any`; [`Dispatcher::register_typed`] covers
//! the common "this controller type to that controller type" case.
//!
//! ```
//! use core::any::Any;
//! use core::time::Duration;
//! use understory_transition::dispatch::{Dispatcher, Operation};
//! use understory_transition::lifecycle::Transition;
//! use understory_transition::timing::AnimationOptions;
//! # use understory_transition::context::{Role, TransitionContext};
//! # struct Host;
//! # impl TransitionContext for Host {
//! #     type Surface = ();
//! #     fn surface(&self, _: Role) -> Option<()> { None }
//! #     fn controller(&self, _: Role) -> Option<&dyn Any> { None }
//! #     fn container(&self) {}
//! #     fn add_to_container(&self, _: &()) {}
//! #     fn remove_from_container(&self, _: &()) {}
//! #     fn is_animated(&self) -> bool { true }
//! #     fn was_cancelled(&self) -> bool { false }
//! #     fn complete_transition(&self, _: bool) {}
//! # }
//!
//! struct Gallery;
//! struct Photo;
//!
//! let mut dispatcher = Dispatcher::<Host>::new();
//! dispatcher.register_typed::<Gallery, Photo>(Operation::Push, || {
//!     Transition::new(AnimationOptions::new(Duration::from_millis(350)))
//! });
//!
//! assert!(dispatcher.transition_for(Operation::Push, &Gallery, &Photo).is_some());
//! assert!(dispatcher.transition_for(Operation::Push, &Photo, &Gallery).is_none());
//! assert!(dispatcher.transition_for(Operation::Pop, &Photo, &Gallery).is_none());
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::context::TransitionContext;
use crate::lifecycle::Transition;

/// A navigation step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// A new screen is pushed on top.
    Push,
    /// The top screen is popped.
    Pop,
}

type Predicate = Box<dyn Fn(&dyn Any, &dyn Any) -> bool>;
type Factory<C> = Box<dyn Fn() -> Transition<C>>;

struct Entry<C: ?Sized> {
    predicate: Predicate,
    factory: Factory<C>,
}

/// Ordered (predicate, factory) strategies per [`Operation`].
pub struct Dispatcher<C: ?Sized> {
    push: Vec<Entry<C>>,
    pop: Vec<Entry<C>>,
}

impl<C: ?Sized> Default for Dispatcher<C> {
    fn default() -> Self {
        Self {
            push: Vec::new(),
            pop: Vec::new(),
        }
    }
}

impl<C: TransitionContext + ?Sized> Dispatcher<C> {
    /// Creates a dispatcher with no strategies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self, op: Operation) -> &[Entry<C>] {
        match op {
            Operation::Push => &self.push,
            Operation::Pop => &self.pop,
        }
    }

    /// Appends a strategy for `op`.
    pub fn register(
        &mut self,
        op: Operation,
        predicate: impl Fn(&dyn Any, &dyn Any) -> bool + 'static,
        factory: impl Fn() -> Transition<C> + 'static,
    ) {
        let entry = Entry {
            predicate: Box::new(predicate),
            factory: Box::new(factory),
        };
        match op {
            Operation::Push => self.push.push(entry),
            Operation::Pop => self.pop.push(entry),
        }
    }

    /// Appends a strategy for `op` that matches when the outgoing controller is a
    /// `From` and the incoming one is a `To`.
    pub fn register_typed<From: Any, To: Any>(
        &mut self,
        op: Operation,
        factory: impl Fn() -> Transition<C> + 'static,
    ) {
        self.register(
            op,
            |from, to| from.is::<From>() && to.is::<To>(),
            factory,
        );
    }

    /// Builds the transition of the first strategy for `op` that accepts the pair.
    pub fn transition_for(
        &self,
        op: Operation,
        from: &dyn Any,
        to: &dyn Any,
    ) -> Option<Transition<C>> {
        let entries = self.entries(op);
        let found = entries
            .iter()
            .position(|entry| (entry.predicate)(from, to));
        match found {
            Some(index) => {
                tracing::debug!(?op, index, "transition strategy matched");
                Some((entries[index].factory)())
            }
            None => {
                if !entries.is_empty() {
                    tracing::warn!(?op, "no registered transition strategy matched");
                }
                None
            }
        }
    }

    /// Number of strategies registered for `op`.
    #[must_use]
    pub fn len(&self, op: Operation) -> usize {
        self.entries(op).len()
    }

    /// Returns `true` if no strategy is registered for any operation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.push.is_empty() && self.pop.is_empty()
    }
}

impl<C: ?Sized> fmt::Debug for Dispatcher<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("push", &self.push.len())
            .field("pop", &self.pop.len())
            .finish()
    }
}
