use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tweenline_core::ease::out_cubic;
use tweenline_core::{Config, Tweener, Value};
use tweenline_fixtures::{step, ManualClock, Point};

fn engine() -> (Tweener, ManualClock) {
    let clock = ManualClock::new();
    let tweener = Tweener::new(Config::default(), Box::new(clock.clone()));
    (tweener, clock)
}

fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

/// it should converge monotonically onto the end value for a fixed-end tween
#[test]
fn monotonic_convergence() {
    let (mut tw, clock) = engine();
    let point = Rc::new(RefCell::new(Point::default()));
    let id = tw
        .animate(point.clone(), false)
        .to(&[("x", Value::Number(1.0))], Some(160.0), None)
        .id();

    let mut previous = 0.0;
    for _ in 0..10 {
        step(&mut tw, &clock, 16.0);
        let x = point.borrow().x;
        assert!(x >= previous, "value regressed: {x} < {previous}");
        previous = x;
    }
    approx(point.borrow().x, 1.0, 1e-9);
    assert!(!tw.is_active(id));
}

#[test]
fn default_duration_is_500ms() {
    let (mut tw, clock) = engine();
    let point = Rc::new(RefCell::new(Point::default()));
    let id = tw
        .animate(point.clone(), false)
        .to(&[("x", Value::Number(1.0))], None, None)
        .id();

    for _ in 0..4 {
        step(&mut tw, &clock, 100.0);
    }
    assert!(tw.is_active(id));
    step(&mut tw, &clock, 100.0);
    assert!(!tw.is_active(id));
    approx(point.borrow().x, 1.0, 1e-9);
}

/// it should gate property writes until the before-delay has elapsed
#[test]
fn delay_before_gates_property_writes() {
    let (mut tw, clock) = engine();
    let point = Rc::new(RefCell::new(Point::default()));
    let id = tw
        .animate(point.clone(), false)
        .delay(96.0)
        .to(&[("x", Value::Number(1.0))], Some(100.0), None)
        .id();

    // 5 frames = 80ms of cumulative elapsed: still inside the delay window.
    for _ in 0..5 {
        step(&mut tw, &clock, 16.0);
        approx(point.borrow().x, 0.0, 0.0);
    }
    assert!(tw.is_active(id));

    // Frame 6 crosses the delay boundary; the delay folded into the total
    // duration, so interpolation runs over 196ms.
    step(&mut tw, &clock, 16.0);
    approx(point.borrow().x, out_cubic(96.0, 0.0, 1.0, 196.0), 1e-9);

    // Runs until elapsed >= 196ms.
    for _ in 0..7 {
        step(&mut tw, &clock, 16.0);
    }
    assert!(!tw.is_active(id));
    approx(point.borrow().x, 1.0, 1e-9);
}

/// it should extend the duration by the after-delay exactly once and fire
/// completion callbacks only at the extended boundary
#[test]
fn delay_after_extension_fires_once() {
    let (mut tw, clock) = engine();
    let point = Rc::new(RefCell::new(Point::default()));
    let completions = Rc::new(Cell::new(0u32));
    let seen = completions.clone();
    let id = tw
        .animate(point.clone(), false)
        .to(&[("x", Value::Number(1.0))], Some(96.0), None)
        .delay(48.0)
        .on_complete(move |_: &mut Tweener| seen.set(seen.get() + 1))
        .id();

    // Original boundary: value reaches the end, nothing completes yet.
    for _ in 0..6 {
        step(&mut tw, &clock, 16.0);
    }
    approx(point.borrow().x, 1.0, 1e-9);
    assert!(tw.is_active(id));
    assert_eq!(completions.get(), 0);

    // Drain the after-delay (48ms = 3 frames).
    step(&mut tw, &clock, 16.0);
    step(&mut tw, &clock, 16.0);
    assert_eq!(completions.get(), 0);
    step(&mut tw, &clock, 16.0);
    assert_eq!(completions.get(), 1);
    assert!(!tw.is_active(id));
}

/// it should keep the original start when the end value is redirected
/// mid-flight (no re-baselining)
#[test]
fn mid_flight_redirect_keeps_original_curve() {
    let (mut tw, clock) = engine();
    let point = Rc::new(RefCell::new(Point::default()));
    let id = tw
        .animate(point.clone(), false)
        .to(&[("x", Value::Number(1.0))], Some(1000.0), None)
        .id();

    step(&mut tw, &clock, 500.0);
    approx(point.borrow().x, out_cubic(500.0, 0.0, 1.0, 1000.0), 1e-9);

    tw.set_property(id, "x", Value::Number(2.0));

    // Interpolation continues along the original time parameter with the
    // new end, so the very next frame jumps.
    step(&mut tw, &clock, 100.0);
    approx(point.borrow().x, out_cubic(600.0, 0.0, 2.0, 1000.0), 1e-9);

    step(&mut tw, &clock, 400.0);
    assert!(!tw.is_active(id));
    approx(point.borrow().x, 2.0, 1e-9);
}

/// it should report current values while active and an absence marker after
#[test]
fn get_property_absent_once_inactive() {
    let (mut tw, clock) = engine();
    let point = Rc::new(RefCell::new(Point::default()));
    let id = tw
        .animate(point.clone(), false)
        .to(&[("x", Value::Number(1.0))], Some(100.0), None)
        .id();

    step(&mut tw, &clock, 50.0);
    approx(
        tw.get_property(id, "x").expect("active property"),
        out_cubic(50.0, 0.0, 1.0, 100.0),
        1e-9,
    );
    assert_eq!(tw.get_property(id, "y"), None);

    step(&mut tw, &clock, 50.0);
    assert_eq!(tw.get_property(id, "x"), None);
}

#[test]
fn tick_callbacks_run_in_registration_order() {
    let (mut tw, clock) = engine();
    let point = Rc::new(RefCell::new(Point::default()));
    let order = Rc::new(RefCell::new(Vec::new()));
    let first = order.clone();
    let second = order.clone();
    tw.animate(point, false)
        .to(&[("x", Value::Number(1.0))], Some(32.0), None)
        .on_tick(move || first.borrow_mut().push(1))
        .on_tick(move || second.borrow_mut().push(2));

    step(&mut tw, &clock, 16.0);
    step(&mut tw, &clock, 16.0);
    assert_eq!(*order.borrow(), vec![1, 2, 1, 2]);
}
