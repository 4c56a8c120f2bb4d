//! Integration tests for the tween lifecycle
//!
//! These tests verify that:
//! - Completion timing is exact: a tween finishes precisely one duration
//!   after its effective start, with drift-free final values
//! - Restart and yoyo loop policies pick the documented cycle endpoints
//! - Relative targeting anchors deltas to each cycle's own start
//! - Stopping removes immediately and never fires the completion callback
//! - Cloned templates animate independently after reattaching a target
//! - The scheduler's sweep removes finished tweens in the same tick

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tweener::{AxisBinding, Easing, LoopPolicy, Tween, TweenState, TweenValue, Tweener};

#[derive(Default)]
struct Sprite {
    x: f32,
    opacity: f32,
}

fn x_axis() -> AxisBinding<Sprite> {
    AxisBinding::pixel(|s: &Sprite| s.x, |s: &mut Sprite, v| s.x = v)
}

fn opacity_axis() -> AxisBinding<Sprite> {
    AxisBinding::new(|s: &Sprite| s.opacity, |s: &mut Sprite, v| s.opacity = v)
}

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

/// The §"example scenario": linear 0→100 over ten seconds, half-way value at
/// the half-way tick, exact final value, removed in the completing tick.
#[test]
fn test_scheduler_runs_a_tween_to_completion() {
    let t0 = Instant::now();
    let mut tweener = Tweener::<Sprite>::new();

    let id = tweener.add(
        Tween::value(0.0, 100.0, secs(10)).expect("valid duration"),
        t0,
    );

    tweener.tick(t0 + secs(5));
    let tween = tweener.get(id).expect("still registered");
    assert_eq!(tween.state(), TweenState::Running);
    assert_eq!(tween.value(0), Some(50.0));

    tweener.tick(t0 + secs(10));
    assert!(tweener.get(id).is_none(), "removed in the completing sweep");
    assert!(tweener.is_empty());
}

/// Completion happens exactly `duration` after the effective start
/// (`scheduled_at + delay`), never earlier.
#[test]
fn test_delay_shifts_the_effective_start() {
    let t0 = Instant::now();
    let mut tweener = Tweener::<Sprite>::new();

    let id = tweener.add(
        Tween::value(0.0, 100.0, secs(2))
            .expect("valid duration")
            .delay(secs(1)),
        t0,
    );

    tweener.tick(t0 + Duration::from_millis(500));
    assert_eq!(
        tweener.get(id).expect("registered").state(),
        TweenState::Scheduled
    );

    // One tick shy of delay + duration: still running
    tweener.tick(t0 + Duration::from_millis(2900));
    assert_eq!(
        tweener.get(id).expect("registered").state(),
        TweenState::Running
    );

    tweener.tick(t0 + secs(3));
    assert!(tweener.get(id).is_none());
}

/// Final values equal the configured targets exactly, regardless of easing.
#[test]
fn test_final_values_are_exact() {
    let t0 = Instant::now();
    let sprite = Rc::new(RefCell::new(Sprite::default()));
    let mut tweener = Tweener::new();

    let done = Rc::new(RefCell::new(None::<f32>));
    let done_probe = done.clone();
    tweener.add(
        Tween::property(sprite.clone(), opacity_axis(), 0.73, secs(1))
            .expect("valid duration")
            .ease(Easing::EaseInOutQuint)
            .on_complete(move |tween| *done_probe.borrow_mut() = tween.value(0)),
        t0,
    );

    // Step in uneven increments, overshooting the end
    for ms in [333, 777, 1042] {
        tweener.tick(t0 + Duration::from_millis(ms));
    }

    assert_eq!(*done.borrow(), Some(0.73));
    assert_eq!(sprite.borrow().opacity, 0.73);
}

/// A restart-loop tween revisits the original starting values at the start
/// of every cycle.
#[test]
fn test_restart_loop_resets_to_initial() {
    let t0 = Instant::now();
    let starts = Rc::new(RefCell::new(Vec::new()));
    let starts_probe = starts.clone();

    let mut tweener = Tweener::<Sprite>::new();
    tweener.add(
        Tween::value(0.0, 100.0, secs(1))
            .expect("valid duration")
            .loops(3, LoopPolicy::Restart)
            .on_loop_start(move |tween| {
                starts_probe.borrow_mut().push(tween.start_loop_values()[0])
            }),
        t0,
    );

    for s in 0..=3 {
        tweener.tick(t0 + secs(s));
    }

    assert_eq!(*starts.borrow(), vec![Some(0.0), Some(0.0), Some(0.0)]);
    assert!(tweener.is_empty(), "three cycles then done");
}

/// A yoyo tween alternates its cycle end between the target and the
/// original starting value, by completed-loop parity.
#[test]
fn test_yoyo_loop_alternates_endpoints() {
    let t0 = Instant::now();
    let ends = Rc::new(RefCell::new(Vec::new()));
    let ends_probe = ends.clone();

    let mut tweener = Tweener::<Sprite>::new();
    let id = tweener.add(
        Tween::value(0.0, 100.0, secs(1))
            .expect("valid duration")
            .loops(4, LoopPolicy::Yoyo)
            .on_loop_start(move |tween| {
                ends_probe.borrow_mut().push(tween.end_loop_values()[0])
            }),
        t0,
    );

    for s in 0..=4 {
        tweener.tick(t0 + secs(s));
    }

    assert_eq!(
        *ends.borrow(),
        vec![Some(100.0), Some(0.0), Some(100.0), Some(0.0)],
    );
    // Even loop count: the yoyo lands back where it began
    assert!(tweener.get(id).is_none());
}

/// Relative targets are deltas from the value at the start of each cycle.
#[test]
fn test_relative_target_anchors_to_cycle_start() {
    let t0 = Instant::now();
    let mut tweener = Tweener::<Sprite>::new();

    let done = Rc::new(RefCell::new(None::<f32>));
    let done_probe = done.clone();
    tweener.add(
        Tween::value(50.0, 100.0, secs(1))
            .expect("valid duration")
            .relative()
            .on_complete(move |tween| *done_probe.borrow_mut() = tween.value(0)),
        t0,
    );

    tweener.tick(t0 + secs(1));
    assert_eq!(*done.borrow(), Some(150.0));
}

/// With relative restart loops, each cycle adds the delta again from the
/// cycle's own start.
#[test]
fn test_relative_restart_accumulates_per_cycle() {
    let t0 = Instant::now();
    let ends = Rc::new(RefCell::new(Vec::new()));
    let ends_probe = ends.clone();

    let mut tweener = Tweener::<Sprite>::new();
    tweener.add(
        Tween::value(0.0, 10.0, secs(1))
            .expect("valid duration")
            .relative()
            .loops(2, LoopPolicy::Restart)
            .on_loop_start(move |tween| {
                ends_probe.borrow_mut().push(tween.end_loop_values()[0])
            }),
        t0,
    );

    tweener.tick(t0 + secs(1));
    tweener.tick(t0 + secs(2));

    // Cycle 1: 0 + 10; cycle 2 anchors to the value reached at its start
    assert_eq!(*ends.borrow(), vec![Some(10.0), Some(20.0)]);
}

/// Stop removes the tween immediately and the completion callback never
/// fires; stopping an unregistered id is an error.
#[test]
fn test_stop_is_immediate_and_silent() {
    let t0 = Instant::now();
    let completed = Rc::new(RefCell::new(false));
    let completed_probe = completed.clone();

    let mut tweener = Tweener::<Sprite>::new();
    let id = tweener.add(
        Tween::value(0.0, 100.0, secs(10))
            .expect("valid duration")
            .on_complete(move |_| *completed_probe.borrow_mut() = true),
        t0,
    );

    tweener.tick(t0 + secs(5));
    assert!(tweener.stop(id).is_ok());
    assert!(tweener.get(id).is_none());
    assert!(tweener.is_empty());

    tweener.tick(t0 + secs(20));
    assert!(!*completed.borrow());
    assert!(tweener.stop(id).is_err());
}

/// A pixel-bound axis floors every write while the tween's own value keeps
/// full precision.
#[test]
fn test_pixel_binding_floors_writes() {
    let t0 = Instant::now();
    let sprite = Rc::new(RefCell::new(Sprite::default()));
    let mut tweener = Tweener::new();

    let id = tweener.add(
        Tween::property(sprite.clone(), x_axis(), 10.0, secs(4)).expect("valid duration"),
        t0,
    );

    tweener.tick(t0 + secs(1));
    assert_eq!(sprite.borrow().x, 2.0, "2.5 floored");
    assert_eq!(tweener.get(id).expect("registered").value(0), Some(2.5));
}

/// Cloning a configured tween and reattaching a different target produces
/// two tweens that animate independently.
#[test]
fn test_cloned_template_animates_independently() {
    let t0 = Instant::now();
    let alpha = Rc::new(RefCell::new(Sprite::default()));
    let beta = Rc::new(RefCell::new(Sprite {
        x: 40.0,
        ..Sprite::default()
    }));
    let mut tweener = Tweener::new();

    let template = Tween::new(alpha.clone(), secs(2))
        .expect("valid duration")
        .axis(x_axis(), Some(20.0))
        .relative();

    let a = tweener.add(template.clone(), t0);
    let b = tweener.add(template.with_target(beta.clone()), t0);

    tweener.tick(t0 + secs(1));
    assert_eq!(alpha.borrow().x, 10.0);
    assert_eq!(beta.borrow().x, 50.0);

    // Interrupting one leaves the other untouched
    tweener.stop(a).expect("registered");
    tweener.tick(t0 + secs(2));
    assert_eq!(alpha.borrow().x, 10.0);
    assert_eq!(beta.borrow().x, 60.0);
    assert!(tweener.get(b).is_none(), "second tween completed naturally");
}

/// The update gate freezes value recomputation without affecting
/// loop-completion timing.
#[test]
fn test_update_gate_skips_value_recomputation() {
    let t0 = Instant::now();
    let open = Rc::new(RefCell::new(false));
    let gate = open.clone();

    let mut tweener = Tweener::<Sprite>::new();
    let id = tweener.add(
        Tween::value(0.0, 100.0, secs(4))
            .expect("valid duration")
            .update_when(move |_| *gate.borrow()),
        t0,
    );

    tweener.tick(t0 + secs(1));
    assert_eq!(tweener.get(id).expect("registered").value(0), Some(0.0));

    *open.borrow_mut() = true;
    tweener.tick(t0 + secs(2));
    assert_eq!(tweener.get(id).expect("registered").value(0), Some(50.0));

    // Gate closed at the end: the tween still completes on schedule
    *open.borrow_mut() = false;
    tweener.tick(t0 + secs(4));
    assert!(tweener.get(id).is_none());
}

/// Configuration may continue through `get_mut` after registration, as long
/// as no tick has run yet.
#[test]
fn test_post_registration_configuration() {
    let t0 = Instant::now();
    let mut tweener = Tweener::<Sprite>::new();

    let id = tweener.add(
        Tween::value(0.0, 10.0, secs(1)).expect("valid duration"),
        t0,
    );
    let tween = tweener.get_mut(id).expect("registered");
    tween.set_ease(Easing::EaseInQuad);
    tween.set_loops(2, LoopPolicy::Restart);
    tween.set_relative(true);

    tweener.tick(t0 + Duration::from_millis(500));
    // Quadratic ease-in at half time: 0.25 of the 10-unit delta
    assert_eq!(tweener.get(id).expect("registered").value(0), Some(2.5));

    tweener.tick(t0 + secs(1));
    tweener.tick(t0 + secs(2));
    assert!(tweener.get(id).is_none(), "both loops ran");
}

/// A callback-only tween carries no values but schedules work on time.
#[test]
fn test_callback_tween_fires_on_schedule() {
    let t0 = Instant::now();
    let fired = Rc::new(RefCell::new(false));
    let fired_probe = fired.clone();

    let mut tweener = Tweener::<Sprite>::new();
    tweener.add(
        Tween::callback(secs(2))
            .expect("valid duration")
            .on_complete(move |_| *fired_probe.borrow_mut() = true),
        t0,
    );

    tweener.tick(t0 + secs(1));
    assert!(!*fired.borrow());
    tweener.tick(t0 + secs(2));
    assert!(*fired.borrow());
    assert!(tweener.is_empty());
}

/// An infinite yoyo keeps running; stop_all clears it along with everything
/// else.
#[test]
fn test_infinite_loop_runs_until_stop_all() {
    let t0 = Instant::now();
    let sprite = Rc::new(RefCell::new(Sprite::default()));
    let mut tweener = Tweener::new();

    let id = tweener.add(
        Tween::new(sprite.clone(), secs(1))
            .expect("valid duration")
            .axis(x_axis(), Some(100.0))
            .loop_infinite(LoopPolicy::Yoyo),
        t0,
    );
    tweener.add(
        Tween::value(0.0, 1.0, secs(1)).expect("valid duration"),
        t0,
    );

    for s in 0..10 {
        tweener.tick(t0 + secs(s));
    }
    let looping = tweener.get(id).expect("still registered");
    assert_eq!(looping.state(), TweenState::Running);
    assert!(looping.completed_loops() >= 8);
    assert_eq!(tweener.len(), 1, "the finite tween was swept long ago");

    tweener.stop_all();
    assert!(tweener.is_empty());
}
