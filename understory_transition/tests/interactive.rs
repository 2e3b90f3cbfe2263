// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for gesture-driven transitions.
//!
//! The host here backs each percent-driven handle with a real [`Transition`]:
//! beginning a gesture starts the transition, updates scrub it, and the driver's
//! finish/cancel decision completes it with the matching outcome.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use kurbo::Vec2;
use understory_transition::{
    AnimationOptions, AnimationRunner, AnimationUnit, DriverConfig, DriverState, Edge,
    GestureOutcome, GestureSample, GestureState, InteractionHost, InteractiveDriver,
    PercentDrivenTransition, Phase, Role, RunStatus, Transition, TransitionContext,
};

#[derive(Default)]
struct Context {
    cancelled: Cell<bool>,
    outcomes: RefCell<Vec<bool>>,
}

impl TransitionContext for Context {
    type Surface = ();

    fn surface(&self, _role: Role) -> Option<()> {
        Some(())
    }
    fn controller(&self, _role: Role) -> Option<&dyn Any> {
        None
    }
    fn container(&self) {}
    fn add_to_container(&self, _surface: &()) {}
    fn remove_from_container(&self, _surface: &()) {}
    fn is_animated(&self) -> bool {
        true
    }
    fn was_cancelled(&self) -> bool {
        self.cancelled.get()
    }
    fn complete_transition(&self, success: bool) {
        self.outcomes.borrow_mut().push(success);
    }
}

/// Installs and animates, then waits for the handle to settle.
struct Paused;

impl AnimationRunner for Paused {
    fn run(&mut self, _options: &AnimationOptions, animations: &mut dyn FnMut()) -> RunStatus {
        animations();
        RunStatus::Pending
    }
}

struct Scrubber {
    cx: Rc<Context>,
    transition: Transition<Context>,
    progress: Rc<RefCell<Vec<f64>>>,
}

impl Scrubber {
    fn settle(&mut self, cancelled: bool) {
        self.cx.cancelled.set(cancelled);
        let phase = self
            .transition
            .animation_completed(&self.cx, !cancelled)
            .unwrap();
        assert!(phase.is_completed(), "settling must complete the transition");
    }
}

impl PercentDrivenTransition for Scrubber {
    fn update(&mut self, progress: f64) {
        self.progress.borrow_mut().push(progress);
    }
    fn finish(&mut self) {
        self.settle(false);
    }
    fn cancel(&mut self) {
        self.settle(true);
    }
}

#[derive(Default)]
struct Navigator {
    cx: Rc<Context>,
    progress: Rc<RefCell<Vec<f64>>>,
    uninstalls: Rc<Cell<u32>>,
    busy: bool,
}

impl InteractionHost for Navigator {
    type Handle = Scrubber;

    fn begin_interactive_transition(&mut self) -> Option<Scrubber> {
        if self.busy {
            return None;
        }
        let uninstalls = self.uninstalls.clone();
        let mut transition = Transition::<Context>::new(AnimationOptions::new(Duration::from_millis(350)))
            .with_unit(
                AnimationUnit::new().on_uninstall(move |_| uninstalls.set(uninstalls.get() + 1)),
            );
        let phase = transition.start(&self.cx, &mut Paused).ok()?;
        assert_eq!(phase, Phase::Animating, "transition waits for the gesture");
        Some(Scrubber {
            cx: self.cx.clone(),
            transition,
            progress: self.progress.clone(),
        })
    }
}

fn pan(state: GestureState, dx: f64, vx: f64) -> GestureSample {
    GestureSample {
        state,
        translation: Vec2::new(dx, 0.0),
        velocity: Vec2::new(vx, 0.0),
        extent: 320.0,
    }
}

#[test]
fn released_past_halfway_completes_successfully() {
    let mut nav = Navigator::default();
    let mut driver = InteractiveDriver::default();

    assert_eq!(
        driver.handle_gesture(&pan(GestureState::Began, 0.0, 0.0), &mut nav),
        GestureOutcome::Began
    );
    driver.handle_gesture(&pan(GestureState::Changed, 80.0, 0.0), &mut nav);
    driver.handle_gesture(&pan(GestureState::Changed, 240.0, 0.0), &mut nav);
    let outcome = driver.handle_gesture(&pan(GestureState::Ended, 240.0, 0.0), &mut nav);

    assert_eq!(outcome, GestureOutcome::Finished);
    assert_eq!(*nav.progress.borrow(), [0.25, 0.75]);
    assert_eq!(*nav.cx.outcomes.borrow(), [true]);
    assert_eq!(nav.uninstalls.get(), 1);
    assert_eq!(driver.state(), DriverState::Idle);
}

#[test]
fn released_early_with_backward_flick_cancels() {
    let mut nav = Navigator::default();
    let mut driver = InteractiveDriver::default();

    driver.handle_gesture(&pan(GestureState::Began, 0.0, 0.0), &mut nav);
    driver.handle_gesture(&pan(GestureState::Changed, 96.0, 0.0), &mut nav);
    let outcome = driver.handle_gesture(&pan(GestureState::Ended, 96.0, -200.0), &mut nav);

    assert_eq!(outcome, GestureOutcome::Cancelled);
    assert_eq!(*nav.cx.outcomes.borrow(), [false]);
    // Teardown runs on cancel too.
    assert_eq!(nav.uninstalls.get(), 1);
}

#[test]
fn forward_flick_completes_even_when_short() {
    let mut nav = Navigator::default();
    let mut driver = InteractiveDriver::default();

    driver.handle_gesture(&pan(GestureState::Began, 0.0, 0.0), &mut nav);
    let outcome = driver.handle_gesture(&pan(GestureState::Ended, 32.0, 600.0), &mut nav);

    assert_eq!(outcome, GestureOutcome::Finished);
    assert_eq!(*nav.cx.outcomes.borrow(), [true]);
}

#[test]
fn busy_host_leaves_driver_idle() {
    let mut nav = Navigator {
        busy: true,
        ..Navigator::default()
    };
    let mut driver = InteractiveDriver::default();

    let outcome = driver.handle_gesture(&pan(GestureState::Began, 0.0, 0.0), &mut nav);
    assert_eq!(outcome, GestureOutcome::Ignored);
    let outcome = driver.handle_gesture(&pan(GestureState::Changed, 200.0, 0.0), &mut nav);
    assert_eq!(outcome, GestureOutcome::Ignored);

    assert!(nav.cx.outcomes.borrow().is_empty());
    assert!(driver.interaction().is_none());
}

#[test]
fn sessions_run_back_to_back() {
    let mut nav = Navigator::default();
    let mut driver = InteractiveDriver::new(DriverConfig {
        edge: Edge::Right,
        threshold: 0.5,
    });

    for (dx, expected) in [(-200.0, true), (-40.0, false)] {
        driver.handle_gesture(&pan(GestureState::Began, 0.0, 0.0), &mut nav);
        assert!(driver.is_tracking());
        driver.handle_gesture(&pan(GestureState::Ended, dx, 0.0), &mut nav);
        assert_eq!(nav.cx.outcomes.borrow().last(), Some(&expected));
    }
    assert_eq!(nav.uninstalls.get(), 2);
}
