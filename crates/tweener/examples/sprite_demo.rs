//! Sprite Tween Demo
//!
//! Drives the scheduler with a synthetic clock and a couple of sprites:
//! - A boy sprite sliding right and back forever (relative yoyo loop)
//! - A mascot sprite gliding to center, then fading out after a delay
//! - A spin with quadratic ease-in alongside the fade
//!
//! Nothing is rendered; frames are stepped at a fixed rate and a few of them
//! are printed so the interpolated values can be inspected.
//!
//! Run with: cargo run -p tweener --example sprite_demo

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tweener::{AxisBinding, Easing, LoopPolicy, Tween, Tweener};

#[derive(Default)]
struct Sprite {
    x: f32,
    y: f32,
    angle: f32,
    opacity: f32,
}

fn main() -> tweener::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let boy = Rc::new(RefCell::new(Sprite {
        x: 16.0,
        y: 384.0,
        opacity: 255.0,
        ..Sprite::default()
    }));
    let mascot = Rc::new(RefCell::new(Sprite {
        x: 64.0,
        y: 48.0,
        opacity: 255.0,
        ..Sprite::default()
    }));

    let mut tweener = Tweener::new();
    let t0 = Instant::now();

    let x_axis = AxisBinding::pixel(|s: &Sprite| s.x, |s: &mut Sprite, v| s.x = v);
    let y_axis = AxisBinding::pixel(|s: &Sprite| s.y, |s: &mut Sprite, v| s.y = v);

    // Slide the boy 360 pixels to the right and back, forever
    tweener.add(
        Tween::new(boy.clone(), Duration::from_millis(1400))?
            .axis(x_axis, Some(360.0))
            .axis(y_axis, None)
            .ease(Easing::EaseInOutQuad)
            .relative()
            .loop_infinite(LoopPolicy::Yoyo),
        t0,
    );

    // Glide the mascot to screen center
    tweener.add(
        Tween::new(mascot.clone(), Duration::from_millis(1500))?
            .axis(x_axis, Some(320.0))
            .axis(y_axis, Some(64.0))
            .ease(Easing::EaseInOutCubic)
            .on_complete(|_| println!("mascot arrived")),
        t0,
    );

    // Fade the mascot out, starting half a second in
    tweener.add(
        Tween::property(
            mascot.clone(),
            AxisBinding::new(|s: &Sprite| s.opacity, |s: &mut Sprite, v| s.opacity = v),
            0.0,
            Duration::from_millis(3500),
        )?
        .ease(Easing::EaseInOutSine)
        .delay(Duration::from_millis(500)),
        t0,
    );

    // Seven counterclockwise turns, slow at the start
    tweener.add(
        Tween::property(
            mascot.clone(),
            AxisBinding::new(|s: &Sprite| s.angle, |s: &mut Sprite, v| s.angle = v),
            -7.0 * 360.0,
            Duration::from_secs(4),
        )?
        .ease(Easing::EaseInQuad),
        t0,
    );

    // 5 seconds at 60 fps
    for frame in 0..300 {
        let now = t0 + Duration::from_secs_f32(frame as f32 / 60.0);
        tweener.tick(now);

        if frame % 30 == 0 {
            let boy = boy.borrow();
            let mascot = mascot.borrow();
            println!(
                "frame {frame:>3}: boy x={:>5.0}  mascot x={:>5.0} y={:>3.0} angle={:>7.1} opacity={:>5.1}",
                boy.x, mascot.x, mascot.y, mascot.angle, mascot.opacity
            );
        }
    }

    println!("{} tween(s) still active, stopping", tweener.len());
    tweener.stop_all();
    Ok(())
}
