use super::lock_slot;
use log::trace;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    /// A deferred invocation is scheduled and has not fired yet.
    Pending,
}

/// Delays a callback until `wait` has passed without another `call`.
///
/// Only the arguments of the last call before the quiet period are delivered.
/// Dropping the wrapper cancels a pending invocation.
pub struct Debounced<A> {
    f: Arc<dyn Fn(A) + Send + Sync>,
    wait: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

/// Wrap `f` so that bursts of calls collapse into one trailing invocation.
///
/// Multiple arguments are passed as a tuple. The callback's return value is
/// discarded.
pub fn debounce<F, A, R>(f: F, wait: Duration) -> Debounced<A>
where
    F: Fn(A) -> R + Send + Sync + 'static,
    A: Send + 'static,
    R: 'static,
{
    Debounced {
        f: Arc::new(move |args| {
            let _ = f(args);
        }),
        wait,
        pending: Mutex::new(None),
    }
}

impl<A: Send + 'static> Debounced<A> {
    /// Cancel any scheduled invocation and schedule a new one with `args`.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime.
    pub fn call(&self, args: A) {
        let deadline = Instant::now() + self.wait;
        let mut slot = lock_slot(&self.pending);
        if let Some(prev) = slot.take() {
            if !prev.is_finished() {
                trace!("debounce: resetting timer");
            }
            prev.abort();
        }
        let f = Arc::clone(&self.f);
        let wait = self.wait;
        *slot = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            trace!("debounce: firing after {:?} quiet", wait);
            f(args);
        }));
    }
}

impl<A> Debounced<A> {
    pub fn wait(&self) -> Duration {
        self.wait
    }

    pub fn state(&self) -> DebounceState {
        match lock_slot(&self.pending).as_ref() {
            Some(handle) if !handle.is_finished() => DebounceState::Pending,
            _ => DebounceState::Idle,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state() == DebounceState::Pending
    }
}

impl<A> Drop for Debounced<A> {
    fn drop(&mut self) {
        if let Some(handle) = lock_slot(&self.pending).take() {
            if !handle.is_finished() {
                trace!("debounce: dropped with a pending invocation");
            }
            handle.abort();
        }
    }
}
