//! Navigation guard — single-flight wrapper around transition actions.
//!
//! A user's rapid repeated taps (or duplicate programmatic triggers) must
//! never issue overlapping navigation transitions. The guard holds one
//! in-flight flag: while set, further transition requests are dropped (not
//! queued), and a cooldown timer clears the flag afterwards.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, warn};

use crate::error::NavigationError;

/// What happened to a guarded transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// The action ran (its own failure, if any, was logged).
    Executed,
    /// A transition was already in flight; the request was dropped.
    Suppressed,
}

struct GuardInner {
    navigating: AtomicBool,
    clear_task: Mutex<Option<JoinHandle<()>>>,
}

/// Single-flight navigation guard.
pub struct NavigationGuard {
    inner: Arc<GuardInner>,
}

impl NavigationGuard {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(GuardInner {
                navigating: AtomicBool::new(false),
                clear_task: Mutex::new(None),
            }),
        }
    }

    /// Run `action` unless a transition is already in flight.
    ///
    /// On execution the in-flight flag is set, the action runs
    /// synchronously, and a timer clears the flag after `cooldown`. An
    /// action error is logged and does not retry (retrying a navigation
    /// could double-navigate); the clear timer is still scheduled, so the
    /// guard never sticks open.
    pub fn run(
        &self,
        cooldown: Duration,
        action: impl FnOnce() -> Result<(), NavigationError>,
    ) -> GuardOutcome {
        if self
            .inner
            .navigating
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Navigation already in progress, ignoring duplicate call");
            return GuardOutcome::Suppressed;
        }

        if let Err(e) = action() {
            error!("Navigation action failed: {e}");
        }

        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(cooldown).await;
            inner.navigating.store(false, Ordering::Release);
        });

        let mut slot = self
            .inner
            .clear_task
            .lock()
            .expect("guard timer lock poisoned");
        if let Some(stale) = slot.replace(handle) {
            stale.abort();
        }
        GuardOutcome::Executed
    }

    /// Whether a transition is currently in flight.
    pub fn is_navigating(&self) -> bool {
        self.inner.navigating.load(Ordering::Acquire)
    }

    /// Force-clear the guard: flag and pending timer.
    ///
    /// Escape hatch for recovering from a stuck guard after an error path;
    /// not for routine cancellation.
    pub fn reset(&self) {
        let mut slot = self
            .inner
            .clear_task
            .lock()
            .expect("guard timer lock poisoned");
        if let Some(task) = slot.take() {
            task.abort();
        }
        self.inner.navigating.store(false, Ordering::Release);
    }
}

impl Default for NavigationGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const COOLDOWN: Duration = Duration::from_millis(800);

    #[tokio::test(start_paused = true)]
    async fn two_rapid_calls_execute_once() {
        let guard = NavigationGuard::new();
        let runs = Cell::new(0u32);
        let action = || {
            runs.set(runs.get() + 1);
            Ok(())
        };

        assert_eq!(guard.run(COOLDOWN, action), GuardOutcome::Executed);
        // 10ms later, still inside the cooldown window
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(guard.run(COOLDOWN, action), GuardOutcome::Suppressed);
        assert_eq!(runs.get(), 1);
        assert!(guard.is_navigating());
    }

    #[tokio::test(start_paused = true)]
    async fn cooldown_reopens_the_guard() {
        let guard = NavigationGuard::new();
        let runs = Cell::new(0u32);
        let action = || {
            runs.set(runs.get() + 1);
            Ok(())
        };

        assert_eq!(guard.run(COOLDOWN, action), GuardOutcome::Executed);
        tokio::time::sleep(COOLDOWN + Duration::from_millis(1)).await;
        assert!(!guard.is_navigating());
        assert_eq!(guard.run(COOLDOWN, action), GuardOutcome::Executed);
        assert_eq!(runs.get(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_calls_executes_exactly_one() {
        let guard = NavigationGuard::new();
        let runs = Cell::new(0u32);
        for _ in 0..20 {
            guard.run(COOLDOWN, || {
                runs.set(runs.get() + 1);
                Ok(())
            });
        }
        assert_eq!(runs.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_action_still_schedules_clear() {
        let guard = NavigationGuard::new();
        let outcome = guard.run(COOLDOWN, || {
            Err(NavigationError::Unavailable("router down".to_string()))
        });
        // The failure is logged, not surfaced
        assert_eq!(outcome, GuardOutcome::Executed);
        assert!(guard.is_navigating());

        tokio::time::sleep(COOLDOWN + Duration::from_millis(1)).await;
        assert!(!guard.is_navigating(), "guard must not stick open");
    }

    #[tokio::test(start_paused = true)]
    async fn reset_force_clears() {
        let guard = NavigationGuard::new();
        guard.run(COOLDOWN, || Ok(()));
        assert!(guard.is_navigating());

        guard.reset();
        assert!(!guard.is_navigating());

        // Cleared timer must not clobber a later window
        let runs = Cell::new(0u32);
        guard.run(COOLDOWN, || {
            runs.set(runs.get() + 1);
            Ok(())
        });
        assert_eq!(runs.get(), 1);
        assert!(guard.is_navigating());
    }
}
