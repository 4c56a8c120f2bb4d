//! Tweener — frame-driven tween scheduling
//!
//! Advances many independent, time-based value interpolations per tick,
//! without a dedicated thread: the host calls [`Tweener::tick`] once per
//! frame with the current time and the scheduler does the rest.
//!
//! # Features
//!
//! - **Easing curves**: linear plus sine/quad/cubic/quart/quint families in
//!   ease-in, ease-out, and ease-in-out variants
//! - **Loop policies**: restart, yoyo (ping-pong), finite or infinite counts
//! - **Relative targeting**: axis targets as deltas from each cycle's start
//! - **Property bindings**: up to four axes wired to external properties
//!   through getter/setter pairs, with pixel-snapped writes where needed
//! - **Lifecycle callbacks**: loop-start, per-tick update gate, completion
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::time::{Duration, Instant};
//! use tweener::{AxisBinding, Easing, Tween, Tweener};
//!
//! struct Sprite { x: f32, y: f32 }
//!
//! let sprite = Rc::new(RefCell::new(Sprite { x: 0.0, y: 48.0 }));
//! let mut tweener = Tweener::new();
//!
//! let now = Instant::now();
//! let id = tweener.add(
//!     Tween::new(sprite.clone(), Duration::from_millis(1500))
//!         .expect("non-zero duration")
//!         .axis(AxisBinding::pixel(|s: &Sprite| s.x, |s, v| s.x = v), Some(320.0))
//!         .axis(AxisBinding::pixel(|s: &Sprite| s.y, |s, v| s.y = v), Some(64.0))
//!         .ease(Easing::EaseInOutQuad),
//!     now,
//! );
//!
//! tweener.tick(now + Duration::from_millis(750));
//! assert!(sprite.borrow().x > 0.0);
//! # let _ = id;
//! ```

pub mod binding;
pub mod easing;
pub mod error;
pub mod tween;
pub mod tweener;

pub use binding::{AxisBinding, AxisGetter, AxisSetter, WriteMode};
pub use easing::Easing;
pub use error::{Result, TweenError};
pub use tween::{LoopPolicy, Tween, TweenCallback, TweenState, TweenValue, UpdateGate};
pub use tweener::{TweenId, Tweener};
