// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry snapshots and the proxy morph unit.
//!
//! A [`Snapshot`] records where a surface is and how it looks, with its center
//! expressed in the container's coordinate space so that a proxy living in the
//! container can be placed exactly over it.
//!
//! [`Morph`] uses two snapshots to fly a proxy from an element of the outgoing
//! screen onto an element of the incoming one:
//!
//! - install: add the proxy to the container, hide both originals, apply the
//!   "from" snapshot to the proxy;
//! - animate: apply the "to" snapshot;
//! - uninstall: show both originals again and remove the proxy.
//!
//! Either snapshot can be adjusted on the way with
//! [`Morph::map_from`]/[`Morph::map_to`], for example to fade the proxy out as it
//! lands.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Affine, Point, Rect};

use crate::context::TransitionContext;
use crate::property::SurfaceProperties;
use crate::unit::TransitionUnit;

/// Host operations a proxy-based unit needs beyond [`SurfaceProperties`].
pub trait MorphSurface: SurfaceProperties {
    /// This surface's center converted into `container`'s coordinate space.
    fn center_in(&self, container: &Self) -> Point;

    /// Show or hide the surface without touching its opacity.
    fn set_hidden(&self, hidden: bool);
}

/// The visual state of a surface at one instant.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Bounds in the surface's own space.
    pub bounds: Rect,
    /// Center in the container's space.
    pub center: Point,
    /// Transform around the center.
    pub transform: Affine,
    /// Opacity.
    pub alpha: f64,
}

impl Snapshot {
    /// Capture `surface` relative to `container`.
    pub fn capture<S: MorphSurface>(surface: &S, container: &S) -> Self {
        Self {
            bounds: surface.bounds(),
            center: surface.center_in(container),
            transform: surface.transform(),
            alpha: surface.alpha(),
        }
    }

    /// Apply every recorded attribute to `surface`.
    pub fn apply_to<S: SurfaceProperties>(&self, surface: &S) {
        surface.set_bounds(self.bounds);
        surface.set_center(self.center);
        surface.set_transform(self.transform);
        surface.set_alpha(self.alpha);
    }
}

/// Place `proxy` exactly over `original`, leaving the proxy's opacity alone.
///
/// `proxy` is expected to be a child of `container`.
pub fn mimic_geometry<S: MorphSurface>(proxy: &S, original: &S, container: &S) {
    proxy.set_bounds(original.bounds());
    proxy.set_center(original.center_in(container));
    proxy.set_transform(original.transform());
}

type MapSnapshot<S> = Box<dyn Fn(&S, Snapshot) -> Snapshot>;

/// A unit that moves a proxy surface from one element's snapshot to another's.
pub struct Morph<S> {
    proxy: S,
    from: S,
    to: S,
    map_from: Option<MapSnapshot<S>>,
    map_to: Option<MapSnapshot<S>>,
    installed: bool,
}

impl<S> Morph<S> {
    /// Creates a morph of `proxy` from `from`'s geometry to `to`'s.
    pub fn new(proxy: S, from: S, to: S) -> Self {
        Self {
            proxy,
            from,
            to,
            map_from: None,
            map_to: None,
            installed: false,
        }
    }

    /// Adjust the starting snapshot before it is applied to the proxy.
    #[must_use]
    pub fn map_from(mut self, f: impl Fn(&S, Snapshot) -> Snapshot + 'static) -> Self {
        self.map_from = Some(Box::new(f));
        self
    }

    /// Adjust the target snapshot before it is applied to the proxy.
    #[must_use]
    pub fn map_to(mut self, f: impl Fn(&S, Snapshot) -> Snapshot + 'static) -> Self {
        self.map_to = Some(Box::new(f));
        self
    }

    /// The proxy surface.
    #[must_use]
    pub fn proxy(&self) -> &S {
        &self.proxy
    }
}

impl<S: MorphSurface> Morph<S> {
    fn snapshot(&self, element: &S, container: &S, map: Option<&MapSnapshot<S>>) -> Snapshot {
        let snapshot = Snapshot::capture(element, container);
        match map {
            Some(map) => map(element, snapshot),
            None => snapshot,
        }
    }
}

impl<S> fmt::Debug for Morph<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Morph")
            .field("installed", &self.installed)
            .finish_non_exhaustive()
    }
}

impl<C> TransitionUnit<C> for Morph<C::Surface>
where
    C: TransitionContext + ?Sized,
    C::Surface: MorphSurface,
{
    fn install(&mut self, cx: &C) {
        if self.installed {
            return;
        }
        let container = cx.container();
        cx.add_to_container(&self.proxy);
        self.from.set_hidden(true);
        self.to.set_hidden(true);
        let start = self.snapshot(&self.from, &container, self.map_from.as_ref());
        start.apply_to(&self.proxy);
        self.installed = true;
    }

    fn animate(&mut self, cx: &C) {
        if !self.installed {
            return;
        }
        let container = cx.container();
        let end = self.snapshot(&self.to, &container, self.map_to.as_ref());
        end.apply_to(&self.proxy);
    }

    fn uninstall(&mut self, cx: &C) {
        if !core::mem::take(&mut self.installed) {
            return;
        }
        self.from.set_hidden(false);
        self.to.set_hidden(false);
        cx.remove_from_container(&self.proxy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockContext, node};
    use alloc::rc::Rc;
    use alloc::vec;
    use kurbo::Vec2;

    #[test]
    fn capture_converts_center_into_container_space() {
        let cx = MockContext::new();
        let label = node("label");
        label.offset.set(Vec2::new(10.0, 20.0));
        label.set_alpha(0.5);

        let snapshot = Snapshot::capture(&label, &cx.container);

        assert_eq!(snapshot.center, Point::new(60.0, 70.0));
        assert_eq!(snapshot.bounds, label.bounds());
        assert_eq!(snapshot.alpha, 0.5);
    }

    #[test]
    fn mimic_geometry_keeps_proxy_alpha() {
        let cx = MockContext::new();
        let proxy = node("proxy");
        proxy.set_alpha(0.3);
        let original = node("original");
        original.set_bounds(Rect::new(0.0, 0.0, 8.0, 4.0));
        original.set_transform(Affine::scale(2.0));

        mimic_geometry(&proxy, &original, &cx.container);

        assert_eq!(proxy.bounds(), Rect::new(0.0, 0.0, 8.0, 4.0));
        assert_eq!(proxy.transform(), Affine::scale(2.0));
        assert_eq!(proxy.alpha(), 0.3);
    }

    #[test]
    fn morph_flies_proxy_and_restores_originals() {
        let cx = MockContext::new();
        let proxy = node("proxy");
        let thumb = node("thumb");
        let hero = node("hero");
        hero.set_center(Point::new(200.0, 300.0));
        hero.set_bounds(Rect::new(0.0, 0.0, 320.0, 240.0));
        let mut morph = Morph::new(proxy.clone(), thumb.clone(), hero.clone())
            .map_to(|_, snapshot| Snapshot {
                alpha: 0.0,
                ..snapshot
            });

        assert!(Rc::ptr_eq(morph.proxy(), &proxy));

        morph.install(&cx);
        assert_eq!(*cx.children.borrow(), vec!["proxy"]);
        assert!(thumb.hidden.get() && hero.hidden.get());
        assert_eq!(proxy.center(), thumb.center());

        morph.animate(&cx);
        assert_eq!(proxy.center(), Point::new(200.0, 300.0));
        assert_eq!(proxy.bounds(), Rect::new(0.0, 0.0, 320.0, 240.0));
        assert_eq!(proxy.alpha(), 0.0);

        morph.uninstall(&cx);
        assert!(cx.children.borrow().is_empty());
        assert!(!thumb.hidden.get() && !hero.hidden.get());

        // Repeated teardown does nothing.
        thumb.hidden.set(true);
        morph.uninstall(&cx);
        assert!(thumb.hidden.get());
    }

    #[test]
    fn morph_animate_before_install_is_a_no_op() {
        let cx = MockContext::new();
        let proxy = node("proxy");
        let mut morph = Morph::new(proxy.clone(), node("a"), node("b"));

        morph.animate(&cx);

        assert_eq!(proxy.alpha_writes.get(), 0);
    }
}
