// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Save → mutate → restore units over any surface attribute.
//!
//! A [`PropertyUnit`] targets the surface of one [`Role`] and is parametrised by a
//! getter/setter pair:
//!
//! - `install` captures the current value with the getter, then applies `from`.
//! - `animate` applies `to`.
//! - `uninstall` re-applies the captured value, exactly once.
//!
//! When the role has no surface, `install` captures nothing and `uninstall` has
//! nothing to restore. A second `install` before `uninstall` is ignored so the
//! original capture survives. The capture is consumed by `uninstall`, so calling it a
//! second time is a no-op until a fresh `install`.
//!
//! The common attributes of [`SurfaceProperties`] (opacity, transform, bounds,
//! center) have dedicated constructors; anything else goes through
//! [`PropertyUnit::new`].

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Affine, Point, Rect};

use crate::context::{Role, TransitionContext};
use crate::unit::TransitionUnit;

/// Geometry and opacity attributes a host surface exposes.
///
/// Setters take `&self`: surfaces are handles into host-owned state.
pub trait SurfaceProperties {
    /// Opacity in `0.0..=1.0`.
    fn alpha(&self) -> f64;
    /// Sets the opacity.
    fn set_alpha(&self, alpha: f64);
    /// Affine transform applied around the surface's center.
    fn transform(&self) -> Affine;
    /// Sets the transform.
    fn set_transform(&self, transform: Affine);
    /// Bounds in the surface's own coordinate space.
    fn bounds(&self) -> Rect;
    /// Sets the bounds.
    fn set_bounds(&self, bounds: Rect);
    /// Center in the parent's coordinate space.
    fn center(&self) -> Point;
    /// Sets the center.
    fn set_center(&self, center: Point);
}

type Getter<S, T> = Box<dyn Fn(&S) -> T>;
type Setter<S, T> = Box<dyn Fn(&S, T)>;

/// A unit that swaps one attribute of a role's surface for the duration of a transition.
pub struct PropertyUnit<S, T> {
    role: Role,
    from: T,
    to: T,
    getter: Getter<S, T>,
    setter: Setter<S, T>,
    previous: Option<T>,
}

impl<S, T: Clone> PropertyUnit<S, T> {
    /// Creates a unit over an arbitrary attribute.
    pub fn new(
        role: Role,
        from: T,
        to: T,
        getter: impl Fn(&S) -> T + 'static,
        setter: impl Fn(&S, T) + 'static,
    ) -> Self {
        Self {
            role,
            from,
            to,
            getter: Box::new(getter),
            setter: Box::new(setter),
            previous: None,
        }
    }

    /// The role whose surface this unit mutates.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// The value captured by the last `install`, if it has not been restored yet.
    #[must_use]
    pub fn captured(&self) -> Option<&T> {
        self.previous.as_ref()
    }
}

impl<S: SurfaceProperties + 'static> PropertyUnit<S, f64> {
    /// Opacity from `from` to `to`.
    pub fn alpha(role: Role, from: f64, to: f64) -> Self {
        Self::new(role, from, to, |s: &S| s.alpha(), |s: &S, v| s.set_alpha(v))
    }
}

impl<S: SurfaceProperties + 'static> PropertyUnit<S, Affine> {
    /// Transform from `from` to `to`.
    pub fn transform(role: Role, from: Affine, to: Affine) -> Self {
        Self::new(
            role,
            from,
            to,
            |s: &S| s.transform(),
            |s: &S, v| s.set_transform(v),
        )
    }
}

impl<S: SurfaceProperties + 'static> PropertyUnit<S, Rect> {
    /// Bounds from `from` to `to`.
    pub fn bounds(role: Role, from: Rect, to: Rect) -> Self {
        Self::new(role, from, to, |s: &S| s.bounds(), |s: &S, v| s.set_bounds(v))
    }
}

impl<S: SurfaceProperties + 'static> PropertyUnit<S, Point> {
    /// Center from `from` to `to`.
    pub fn center(role: Role, from: Point, to: Point) -> Self {
        Self::new(role, from, to, |s: &S| s.center(), |s: &S, v| s.set_center(v))
    }
}

impl<S, T: fmt::Debug> fmt::Debug for PropertyUnit<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyUnit")
            .field("role", &self.role)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("previous", &self.previous)
            .finish_non_exhaustive()
    }
}

impl<C, T> TransitionUnit<C> for PropertyUnit<C::Surface, T>
where
    C: TransitionContext + ?Sized,
    T: Clone,
{
    fn install(&mut self, cx: &C) {
        if self.previous.is_some() {
            tracing::warn!(
                role = %self.role,
                "property unit installed twice without uninstall; ignoring"
            );
            return;
        }
        let Some(surface) = cx.surface(self.role) else {
            tracing::debug!(role = %self.role, "no surface for property unit; skipping");
            return;
        };
        self.previous = Some((self.getter)(&surface));
        (self.setter)(&surface, self.from.clone());
    }

    fn animate(&mut self, cx: &C) {
        if let Some(surface) = cx.surface(self.role) {
            (self.setter)(&surface, self.to.clone());
        }
    }

    fn uninstall(&mut self, cx: &C) {
        let Some(previous) = self.previous.take() else {
            return;
        };
        if let Some(surface) = cx.surface(self.role) {
            (self.setter)(&surface, previous);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockContext, Surface};

    type Unit<T> = PropertyUnit<Surface, T>;

    #[test]
    fn install_captures_then_applies_from() {
        let cx = MockContext::new();
        cx.incoming().set_alpha(0.7);
        let mut unit = Unit::<f64>::alpha(Role::To, 0.0, 1.0);

        unit.install(&cx);

        assert_eq!(unit.captured(), Some(&0.7));
        assert_eq!(cx.incoming().alpha(), 0.0);
    }

    #[test]
    fn uninstall_restores_captured_value_regardless_of_animate() {
        let cx = MockContext::new();
        cx.outgoing().set_alpha(0.4);
        let mut unit = Unit::<f64>::alpha(Role::From, 1.0, 0.0);

        unit.install(&cx);
        unit.animate(&cx);
        assert_eq!(cx.outgoing().alpha(), 0.0);
        // Something else touches the surface mid-flight.
        cx.outgoing().set_alpha(0.9);
        unit.uninstall(&cx);

        assert_eq!(cx.outgoing().alpha(), 0.4);
    }

    #[test]
    fn second_uninstall_does_not_restore_again() {
        let cx = MockContext::new();
        let mut unit = Unit::<f64>::alpha(Role::To, 0.0, 1.0);

        unit.install(&cx);
        unit.animate(&cx);
        unit.uninstall(&cx);
        let writes = cx.incoming().alpha_writes.get();
        cx.incoming().set_alpha(0.25);
        unit.uninstall(&cx);

        assert_eq!(cx.incoming().alpha(), 0.25);
        assert_eq!(cx.incoming().alpha_writes.get(), writes + 1);
        assert_eq!(unit.captured(), None);
    }

    #[test]
    fn absent_surface_makes_every_phase_a_no_op() {
        let mut cx = MockContext::new();
        cx.to = None;
        let mut unit = Unit::<f64>::alpha(Role::To, 0.0, 1.0);

        unit.install(&cx);
        assert_eq!(unit.captured(), None);
        unit.animate(&cx);
        unit.uninstall(&cx);

        // The other role is untouched.
        assert_eq!(cx.outgoing().alpha_writes.get(), 0);
    }

    #[test]
    fn repeated_install_keeps_the_first_capture() {
        let cx = MockContext::new();
        cx.incoming().set_alpha(0.7);
        let mut unit = Unit::<f64>::alpha(Role::To, 0.0, 1.0);
        assert_eq!(unit.role(), Role::To);

        unit.install(&cx);
        unit.install(&cx);
        assert_eq!(unit.captured(), Some(&0.7));
        unit.animate(&cx);
        unit.uninstall(&cx);

        assert_eq!(cx.incoming().alpha(), 0.7);
    }

    #[test]
    fn uninstall_without_install_is_a_no_op() {
        let cx = MockContext::new();
        let mut unit = Unit::<f64>::alpha(Role::To, 0.0, 1.0);

        unit.uninstall(&cx);

        assert_eq!(cx.incoming().alpha_writes.get(), 0);
    }

    #[test]
    fn geometry_specialisations_share_the_same_restore_logic() {
        let cx = MockContext::new();
        let original_center = cx.outgoing().center();
        let original_bounds = cx.outgoing().bounds();
        let shifted = Affine::translate((40.0, 0.0));

        let mut transform = Unit::<Affine>::transform(Role::From, Affine::IDENTITY, shifted);
        let mut bounds = Unit::<Rect>::bounds(
            Role::From,
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(0.0, 0.0, 20.0, 20.0),
        );
        let mut center = Unit::<Point>::center(Role::From, Point::new(1.0, 1.0), Point::new(2.0, 2.0));

        transform.install(&cx);
        bounds.install(&cx);
        center.install(&cx);
        transform.animate(&cx);
        bounds.animate(&cx);
        center.animate(&cx);
        assert_eq!(cx.outgoing().transform(), shifted);
        assert_eq!(cx.outgoing().bounds(), Rect::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(cx.outgoing().center(), Point::new(2.0, 2.0));

        transform.uninstall(&cx);
        bounds.uninstall(&cx);
        center.uninstall(&cx);
        assert_eq!(cx.outgoing().transform(), Affine::IDENTITY);
        assert_eq!(cx.outgoing().bounds(), original_bounds);
        assert_eq!(cx.outgoing().center(), original_center);
    }

    #[test]
    fn custom_accessors_cover_arbitrary_attributes() {
        let cx = MockContext::new();
        let mut unit = Unit::new(
            Role::To,
            true,
            false,
            |s: &Surface| s.hidden.get(),
            |s: &Surface, v| s.hidden.set(v),
        );

        unit.install(&cx);
        assert!(cx.incoming().hidden.get());
        unit.animate(&cx);
        assert!(!cx.incoming().hidden.get());
        unit.uninstall(&cx);
        assert!(!cx.incoming().hidden.get());
    }
}
