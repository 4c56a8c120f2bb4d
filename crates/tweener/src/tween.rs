//! A single timed interpolation task
//!
//! A [`Tween`] owns the per-task state machine: it is `Scheduled` until its
//! start time arrives, `Running` across one or more loop cycles, and ends in
//! `Completed` (natural finish) or `Interrupted` (explicit stop). Each cycle
//! interpolates every bound axis from a snapshot taken at the cycle start
//! toward a per-cycle end value derived from the configured targets and the
//! loop policy.
//!
//! Tweens are configured with chainable calls before the first tick and
//! driven by the [`Tweener`](crate::tweener::Tweener) afterwards.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use smallvec::SmallVec;
use tracing::trace;

use crate::binding::AxisBinding;
use crate::easing::Easing;
use crate::error::{Result, TweenError};

/// Per-axis value sequences, inline up to four axes.
type Axes = SmallVec<[Option<f32>; 4]>;

/// Lifecycle state of a tween
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenState {
    /// Registered, waiting for its start time.
    Scheduled,
    /// Actively interpolating; looping tweens stay here across cycles.
    Running,
    /// Explicitly stopped. Terminal; the completion callback never fires.
    Interrupted,
    /// Finished its final loop cycle. Terminal.
    Completed,
}

/// What happens when a loop cycle ends and more loops remain
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopPolicy {
    /// Every cycle restarts from the original starting values.
    #[default]
    Restart,
    /// Cycles alternate between the target and the original starting values.
    Yoyo,
}

/// Callback invoked at lifecycle points, receiving the tween.
pub type TweenCallback<T> = Rc<dyn Fn(&Tween<T>)>;

/// Gate consulted each tick; value recomputation runs only when it returns
/// true. Loop-completion timing is unaffected.
pub type UpdateGate<T> = Rc<dyn Fn(&Tween<T>) -> bool>;

/// A single animated task: interpolates up to four axes over a duration,
/// with easing, looping, relative targeting, and lifecycle callbacks.
pub struct Tween<T> {
    state: TweenState,
    should_finish: bool,

    target: Option<Rc<RefCell<T>>>,
    bindings: SmallVec<[Option<AxisBinding<T>>; 4]>,

    current: Axes,
    target_val: Axes,
    initial: Option<Axes>,
    start_loop: Axes,
    end_loop: Axes,

    start_time: Option<Instant>,
    end_time: Option<Instant>,
    delay: Duration,
    duration: Duration,

    easing: Easing,
    loop_count: i32,
    loop_policy: LoopPolicy,
    completed_loops: i32,
    relative: bool,

    on_loop_start: Option<TweenCallback<T>>,
    update_gate: Option<UpdateGate<T>>,
    on_complete: Option<TweenCallback<T>>,
}

impl<T> Tween<T> {
    /// Create a tween bound to a shared target, with no axes yet.
    ///
    /// Axes are attached with [`axis`](Self::axis). Fails with
    /// [`TweenError::InvalidDuration`] if `duration` is zero.
    pub fn new(target: Rc<RefCell<T>>, duration: Duration) -> Result<Self> {
        Self::build(Some(target), duration)
    }

    /// Create a target-less tween used purely for scheduling callbacks.
    pub fn callback(duration: Duration) -> Result<Self> {
        let mut tween = Self::build(None, duration)?;
        tween.bindings.push(None);
        tween.current.push(None);
        tween.target_val.push(None);
        Ok(tween)
    }

    /// Create a target-less tween over one explicit value axis.
    ///
    /// The caller polls [`value`](Self::value) each frame instead of binding
    /// a property.
    pub fn value(from: f32, to: f32, duration: Duration) -> Result<Self> {
        let mut tween = Self::build(None, duration)?;
        tween.bindings.push(None);
        tween.current.push(Some(from));
        tween.target_val.push(Some(to));
        Ok(tween)
    }

    /// Single-axis convenience constructor: bind one property and its target
    /// value in one call.
    pub fn property(
        target: Rc<RefCell<T>>,
        binding: AxisBinding<T>,
        to: f32,
        duration: Duration,
    ) -> Result<Self> {
        Ok(Self::new(target, duration)?.axis(binding, Some(to)))
    }

    fn build(target: Option<Rc<RefCell<T>>>, duration: Duration) -> Result<Self> {
        if duration.is_zero() {
            return Err(TweenError::InvalidDuration);
        }
        Ok(Self {
            state: TweenState::Scheduled,
            should_finish: false,
            target,
            bindings: SmallVec::new(),
            current: SmallVec::new(),
            target_val: SmallVec::new(),
            initial: None,
            start_loop: SmallVec::new(),
            end_loop: SmallVec::new(),
            start_time: None,
            end_time: None,
            delay: Duration::ZERO,
            duration,
            easing: Easing::Linear,
            loop_count: 1,
            loop_policy: LoopPolicy::Restart,
            completed_loops: 0,
            relative: false,
            on_loop_start: None,
            update_gate: None,
            on_complete: None,
        })
    }

    // =========================================================================
    // Chainable configuration (pre-first-tick only)
    // =========================================================================

    /// Attach an axis. `to` is the axis target (a delta in relative mode);
    /// `None` means the axis is carried but never interpolated.
    pub fn axis(mut self, binding: AxisBinding<T>, to: Option<f32>) -> Self {
        self.bindings.push(Some(binding));
        self.current.push(None);
        self.target_val.push(to);
        self
    }

    /// Delay the first start by `delay` after registration.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Like [`delay`](Self::delay), but the delay is taken out of the
    /// duration, keeping the total span unchanged. Saturates at zero; a
    /// fully absorbed duration completes on its first running tick.
    pub fn delay_reducing(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self.duration = self.duration.saturating_sub(delay);
        self
    }

    /// Set the easing curve (default: linear).
    pub fn ease(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Interpret axis targets as deltas from the value at the start of each
    /// cycle rather than absolutes.
    pub fn relative(mut self) -> Self {
        self.relative = true;
        self
    }

    /// Set the loop count and policy. Negative counts loop forever; 1 (the
    /// default) means no repetition.
    pub fn loops(mut self, count: i32, policy: LoopPolicy) -> Self {
        self.loop_count = count;
        self.loop_policy = policy;
        self
    }

    /// Loop forever with the given policy.
    pub fn loop_infinite(self, policy: LoopPolicy) -> Self {
        self.loops(-1, policy)
    }

    /// Invoke `f` at the start of every loop cycle, including the first.
    pub fn on_loop_start(mut self, f: impl Fn(&Tween<T>) + 'static) -> Self {
        self.on_loop_start = Some(Rc::new(f));
        self
    }

    /// Gate per-tick value recomputation: when `f` returns false the values
    /// are left untouched that tick. Finish detection still proceeds.
    pub fn update_when(mut self, f: impl Fn(&Tween<T>) -> bool + 'static) -> Self {
        self.update_gate = Some(Rc::new(f));
        self
    }

    /// Invoke `f` once when the tween completes naturally. Never invoked for
    /// an interrupted tween.
    pub fn on_complete(mut self, f: impl Fn(&Tween<T>) + 'static) -> Self {
        self.on_complete = Some(Rc::new(f));
        self
    }

    /// Replace the target handle. Intended for reattaching a clone of a
    /// configured tween to a different target.
    pub fn with_target(mut self, target: Rc<RefCell<T>>) -> Self {
        self.target = Some(target);
        self
    }

    // =========================================================================
    // Mutating setters (for post-registration configuration)
    // =========================================================================

    /// Set the easing curve (mutating). Must happen before the first tick.
    pub fn set_ease(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Set the loop count and policy (mutating). Must happen before the
    /// first tick.
    pub fn set_loops(&mut self, count: i32, policy: LoopPolicy) {
        self.loop_count = count;
        self.loop_policy = policy;
    }

    /// Set the relative flag (mutating). Must happen before the first tick.
    pub fn set_relative(&mut self, relative: bool) {
        self.relative = relative;
    }

    // =========================================================================
    // Runtime queries
    // =========================================================================

    /// Current lifecycle state.
    pub fn state(&self) -> TweenState {
        self.state
    }

    /// Current values of every axis.
    pub fn values(&self) -> &[Option<f32>] {
        &self.current
    }

    /// The shared target handle, if any.
    pub fn target(&self) -> Option<&Rc<RefCell<T>>> {
        self.target.as_ref()
    }

    /// Number of finished loop cycles.
    pub fn completed_loops(&self) -> i32 {
        self.completed_loops
    }

    /// Interpolation start values for the current cycle.
    pub fn start_loop_values(&self) -> &[Option<f32>] {
        &self.start_loop
    }

    /// Interpolation end values for the current cycle.
    pub fn end_loop_values(&self) -> &[Option<f32>] {
        &self.end_loop
    }

    // =========================================================================
    // Driven by the scheduler
    // =========================================================================

    /// First-start bookkeeping, run when the tween is registered.
    pub(crate) fn prepare(&mut self, now: Instant) {
        let start = now + self.delay;
        self.start_time = Some(start);
        self.end_time = Some(start + self.duration);
    }

    pub(crate) fn due(&self, now: Instant) -> bool {
        self.state == TweenState::Scheduled && self.start_time.is_some_and(|start| start <= now)
    }

    /// First start: seed bound axes from their getters, then begin the first
    /// loop cycle.
    pub(crate) fn start(&mut self) {
        if let Some(target) = &self.target {
            let object = target.borrow();
            for (i, binding) in self.bindings.iter().enumerate() {
                if let Some(binding) = binding {
                    self.current[i] = Some(binding.read(&object));
                }
            }
        }
        self.begin_cycle();
    }

    /// Begin a loop cycle: snapshot endpoints, apply the loop policy and
    /// relative retargeting, and fire the loop-start callback.
    fn begin_cycle(&mut self) {
        if self.initial.is_none() {
            self.initial = Some(self.current.clone());
        }
        self.start_loop = self.current.clone();
        self.end_loop = self.target_val.clone();

        if self.loop_count != 1 {
            match self.loop_policy {
                LoopPolicy::Restart => {
                    if let Some(initial) = &self.initial {
                        self.start_loop = initial.clone();
                    }
                }
                LoopPolicy::Yoyo => {
                    // Odd parity means a "return" cycle back toward the start
                    if self.completed_loops % 2 != 0 {
                        if let Some(initial) = &self.initial {
                            self.end_loop = initial.clone();
                        }
                    }
                }
            }
        }

        let yoyo_return = self.loop_policy == LoopPolicy::Yoyo && self.completed_loops % 2 != 0;
        if self.relative && !yoyo_return {
            // Deltas anchor to the cycle's own start, not the task's origin
            for i in 0..self.end_loop.len() {
                if let (Some(end), Some(current)) = (self.end_loop[i].as_mut(), self.current[i]) {
                    *end += current;
                }
            }
        }

        self.state = TweenState::Running;
        if let Some(callback) = self.on_loop_start.clone() {
            callback(self);
        }
    }

    /// Per-tick update while `Running`.
    pub(crate) fn update(&mut self, now: Instant) {
        let gate_open = match self.update_gate.clone() {
            Some(gate) => gate(self),
            None => true,
        };
        if gate_open {
            self.apply_values(now);
        }

        let Some(end) = self.end_time else { return };
        if now < end {
            return;
        }

        self.completed_loops += 1;
        if self.loop_count < 0 || self.completed_loops < self.loop_count {
            trace!(
                "Tween::update: loop {} finished, restarting cycle",
                self.completed_loops
            );
            self.start_time = Some(now);
            self.end_time = Some(now + self.duration);
            self.begin_cycle();
        } else {
            self.state = TweenState::Completed;
            self.should_finish = true;
            if gate_open {
                // Snap to the exact cycle end so the final values carry no
                // floating-point drift
                self.apply_values(now);
            }
        }
    }

    /// Recompute every targeted axis and write bound axes through their
    /// setters.
    fn apply_values(&mut self, now: Instant) {
        let eased = self.easing.apply(self.ratio(now));
        for i in 0..self.current.len() {
            if self.target_val[i].is_none() {
                continue;
            }
            let value = if self.state == TweenState::Completed {
                self.end_loop[i]
            } else {
                match (self.start_loop[i], self.end_loop[i]) {
                    (Some(from), Some(to)) => Some(from + (to - from) * eased),
                    _ => None,
                }
            };
            let Some(value) = value else { continue };
            self.current[i] = Some(value);
            if let (Some(target), Some(Some(binding))) = (&self.target, self.bindings.get(i)) {
                binding.write(&mut target.borrow_mut(), value);
            }
        }
    }

    /// Normalized progress through the current cycle, clamped to 0..=1.
    fn ratio(&self, now: Instant) -> f32 {
        let Some(start) = self.start_time else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Interrupt the tween and mark it for removal.
    pub(crate) fn stop(&mut self) {
        self.state = TweenState::Interrupted;
        self.should_finish = true;
    }

    pub(crate) fn should_finish(&self) -> bool {
        self.should_finish
    }

    /// Fire the completion callback, once, for naturally completed tweens.
    pub(crate) fn finalize(&self) {
        if self.state == TweenState::Completed {
            if let Some(callback) = self.on_complete.clone() {
                callback(self);
            }
        }
    }
}

/// Per-axis value access as a method, `tween.value(axis)`.
///
/// Lives in a trait because `Tween` already has an inherent associated
/// function named `value` (the explicit-value constructor) and Rust forbids
/// two inherent items with one name. Method-call syntax skips the
/// constructor (it has no receiver) and resolves here; path syntax
/// `Tween::value(from, to, duration)` still reaches the constructor.
pub trait TweenValue {
    /// Current value of one axis, if the axis exists and holds a value.
    fn value(&self, axis: usize) -> Option<f32>;
}

impl<T> TweenValue for Tween<T> {
    fn value(&self, axis: usize) -> Option<f32> {
        self.current.get(axis).copied().flatten()
    }
}

/// Field-by-field copy producing a fresh `Scheduled` task.
///
/// Value state is copied; the target handle, easing, and callbacks are
/// carried over as-is (shared, not deep-copied). Lifecycle state is reset so
/// a configured tween can serve as a template: clone, reattach a target with
/// [`Tween::with_target`], register. Derive is avoided deliberately: it
/// would bound `T: Clone` and copy lifecycle state verbatim.
impl<T> Clone for Tween<T> {
    fn clone(&self) -> Self {
        Self {
            state: TweenState::Scheduled,
            should_finish: false,
            target: self.target.clone(),
            bindings: self.bindings.clone(),
            current: self.current.clone(),
            target_val: self.target_val.clone(),
            initial: None,
            start_loop: SmallVec::new(),
            end_loop: SmallVec::new(),
            start_time: None,
            end_time: None,
            delay: self.delay,
            duration: self.duration,
            easing: self.easing,
            loop_count: self.loop_count,
            loop_policy: self.loop_policy,
            completed_loops: 0,
            relative: self.relative,
            on_loop_start: self.on_loop_start.clone(),
            update_gate: self.update_gate.clone(),
            on_complete: self.on_complete.clone(),
        }
    }
}
