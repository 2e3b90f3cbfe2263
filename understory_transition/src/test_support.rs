// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-crate mock host used by the unit tests.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::any::Any;
use core::cell::{Cell, RefCell};

use kurbo::{Affine, Point, Rect, Vec2};

use crate::context::{Role, TransitionContext};
use crate::property::SurfaceProperties;
use crate::snapshot::MorphSurface;
use crate::unit::TransitionUnit;

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) name: &'static str,
    pub(crate) alpha: Cell<f64>,
    pub(crate) transform: Cell<Affine>,
    pub(crate) bounds: Cell<Rect>,
    pub(crate) center: Cell<Point>,
    pub(crate) hidden: Cell<bool>,
    /// Origin of this node's parent in container coordinates.
    pub(crate) offset: Cell<Vec2>,
    pub(crate) alpha_writes: Cell<u32>,
}

pub(crate) type Surface = Rc<Node>;

pub(crate) fn node(name: &'static str) -> Surface {
    Rc::new(Node {
        name,
        alpha: Cell::new(1.0),
        transform: Cell::new(Affine::IDENTITY),
        bounds: Cell::new(Rect::new(0.0, 0.0, 100.0, 100.0)),
        center: Cell::new(Point::new(50.0, 50.0)),
        hidden: Cell::new(false),
        offset: Cell::new(Vec2::ZERO),
        alpha_writes: Cell::new(0),
    })
}

impl SurfaceProperties for Surface {
    fn alpha(&self) -> f64 {
        self.alpha.get()
    }
    fn set_alpha(&self, alpha: f64) {
        self.alpha_writes.set(self.alpha_writes.get() + 1);
        self.alpha.set(alpha);
    }
    fn transform(&self) -> Affine {
        self.transform.get()
    }
    fn set_transform(&self, transform: Affine) {
        self.transform.set(transform);
    }
    fn bounds(&self) -> Rect {
        self.bounds.get()
    }
    fn set_bounds(&self, bounds: Rect) {
        self.bounds.set(bounds);
    }
    fn center(&self) -> Point {
        self.center.get()
    }
    fn set_center(&self, center: Point) {
        self.center.set(center);
    }
}

impl MorphSurface for Surface {
    fn center_in(&self, _container: &Self) -> Point {
        self.center.get() + self.offset.get()
    }
    fn set_hidden(&self, hidden: bool) {
        self.hidden.set(hidden);
    }
}

pub(crate) struct MockContext {
    pub(crate) from: Option<Surface>,
    pub(crate) to: Option<Surface>,
    pub(crate) container: Surface,
    pub(crate) from_controller: Option<Box<dyn Any>>,
    pub(crate) to_controller: Option<Box<dyn Any>>,
    pub(crate) animated: bool,
    pub(crate) cancelled: Cell<bool>,
    pub(crate) children: RefCell<Vec<&'static str>>,
    pub(crate) completions: RefCell<Vec<bool>>,
}

impl MockContext {
    pub(crate) fn new() -> Self {
        Self {
            from: Some(node("from")),
            to: Some(node("to")),
            container: node("container"),
            from_controller: None,
            to_controller: None,
            animated: true,
            cancelled: Cell::new(false),
            children: RefCell::new(Vec::new()),
            completions: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn outgoing(&self) -> &Surface {
        self.from.as_ref().expect("mock has a from surface")
    }

    pub(crate) fn incoming(&self) -> &Surface {
        self.to.as_ref().expect("mock has a to surface")
    }
}

impl TransitionContext for MockContext {
    type Surface = Surface;

    fn surface(&self, role: Role) -> Option<Surface> {
        match role {
            Role::From => self.from.clone(),
            Role::To => self.to.clone(),
        }
    }

    fn controller(&self, role: Role) -> Option<&dyn Any> {
        match role {
            Role::From => self.from_controller.as_deref(),
            Role::To => self.to_controller.as_deref(),
        }
    }

    fn container(&self) -> Surface {
        self.container.clone()
    }

    fn add_to_container(&self, surface: &Surface) {
        let mut children = self.children.borrow_mut();
        children.retain(|name| *name != surface.name);
        children.push(surface.name);
    }

    fn remove_from_container(&self, surface: &Surface) {
        self.children
            .borrow_mut()
            .retain(|name| *name != surface.name);
    }

    fn is_animated(&self) -> bool {
        self.animated
    }

    fn was_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    fn complete_transition(&self, success: bool) {
        self.completions.borrow_mut().push(success);
    }
}

/// Which phase a [`Probe`] saw.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Stage {
    Install,
    Animate,
    Uninstall,
}

pub(crate) type Journal = Rc<RefCell<Vec<(Stage, &'static str)>>>;

/// A unit that records every phase call into a shared journal.
#[derive(Debug)]
pub(crate) struct Probe {
    pub(crate) name: &'static str,
    pub(crate) journal: Journal,
}

impl Probe {
    pub(crate) fn new(name: &'static str, journal: &Journal) -> Self {
        Self {
            name,
            journal: journal.clone(),
        }
    }
}

impl<C: ?Sized> TransitionUnit<C> for Probe {
    fn install(&mut self, _cx: &C) {
        self.journal.borrow_mut().push((Stage::Install, self.name));
    }
    fn animate(&mut self, _cx: &C) {
        self.journal.borrow_mut().push((Stage::Animate, self.name));
    }
    fn uninstall(&mut self, _cx: &C) {
        self.journal.borrow_mut().push((Stage::Uninstall, self.name));
    }
}
