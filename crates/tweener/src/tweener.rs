//! Tween scheduler
//!
//! Owns the active-task collection and advances every registered tween once
//! per frame. There is no background thread and no internal clock: all
//! progress happens synchronously inside [`Tweener::tick`], which is told
//! "now" by the caller.
//!
//! Within one tick the phases are strictly ordered: every due tween is
//! started, then every running tween is updated, then finished tweens are
//! finalized and removed in a single sweep. A tween registered during a tick
//! is therefore started (never updated) on its next eligible tick.

use std::time::Instant;

use slotmap::{new_key_type, SlotMap};
use tracing::debug;

use crate::error::{Result, TweenError};
use crate::tween::{Tween, TweenState};

new_key_type! {
    /// Stable handle to a registered tween.
    pub struct TweenId;
}

/// The scheduler that ticks all registered tweens
pub struct Tweener<T> {
    tasks: SlotMap<TweenId, Tween<T>>,
    /// Registration order; fixes callback firing order within one tick.
    order: Vec<TweenId>,
}

impl<T> Tweener<T> {
    pub fn new() -> Self {
        Self {
            tasks: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Register a tween. Computes its start and end times from `now` and the
    /// configured delay, and returns a handle for queries and [`stop`].
    ///
    /// Configuration must not be mutated after the first tick has run.
    ///
    /// [`stop`]: Self::stop
    pub fn add(&mut self, mut tween: Tween<T>, now: Instant) -> TweenId {
        tween.prepare(now);
        let id = self.tasks.insert(tween);
        self.order.push(id);
        debug!("Tweener::add: {} active", self.order.len());
        id
    }

    /// Advance every registered tween to `now`.
    pub fn tick(&mut self, now: Instant) {
        for &id in &self.order {
            if let Some(tween) = self.tasks.get_mut(id) {
                if tween.due(now) {
                    tween.start();
                }
            }
        }
        for &id in &self.order {
            if let Some(tween) = self.tasks.get_mut(id) {
                if tween.state() == TweenState::Running {
                    tween.update(now);
                }
            }
        }
        self.sweep();
    }

    /// Finalize and remove every tween marked as finished.
    ///
    /// The index only advances when nothing was removed at the current
    /// position, so the element shifted into a just-deleted slot is not
    /// skipped.
    fn sweep(&mut self) {
        let mut i = 0;
        while i < self.order.len() {
            let id = self.order[i];
            let finished = self.tasks.get(id).map_or(true, |tween| tween.should_finish());
            if finished {
                self.order.remove(i);
                if let Some(tween) = self.tasks.remove(id) {
                    debug!("Tweener::sweep: tween finished, {} active", self.order.len());
                    tween.finalize();
                }
            } else {
                i += 1;
            }
        }
    }

    /// Query a registered tween.
    pub fn get(&self, id: TweenId) -> Option<&Tween<T>> {
        self.tasks.get(id)
    }

    /// Mutably access a registered tween (pre-first-tick configuration).
    pub fn get_mut(&mut self, id: TweenId) -> Option<&mut Tween<T>> {
        self.tasks.get_mut(id)
    }

    /// Stop a tween and remove it immediately, not deferred to the next
    /// sweep. Its completion callback does not fire.
    ///
    /// Fails with [`TweenError::TweenNotFound`] if the tween is not
    /// currently registered.
    pub fn stop(&mut self, id: TweenId) -> Result<()> {
        let Some(mut tween) = self.tasks.remove(id) else {
            return Err(TweenError::TweenNotFound);
        };
        self.order.retain(|&other| other != id);
        tween.stop();
        tween.finalize();
        debug!("Tweener::stop: {} active", self.order.len());
        Ok(())
    }

    /// Stop every registered tween, in registration order.
    pub fn stop_all(&mut self) {
        while let Some(&id) = self.order.first() {
            // Ids in `order` are always live in `tasks`
            if self.stop(id).is_err() {
                break;
            }
        }
    }

    /// Number of registered tweens.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no tweens are registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<T> Default for Tweener<T> {
    fn default() -> Self {
        Self::new()
    }
}
