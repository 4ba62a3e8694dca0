use super::lock_slot;
use log::trace;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleState {
    Idle,
    /// The callback fired and the cooldown window is still open.
    Active,
}

/// Runs a callback on the leading edge, then drops calls until `limit` elapses.
///
/// Calls during the cooldown are discarded outright; there is no trailing
/// invocation.
pub struct Throttled<A> {
    f: Box<dyn Fn(A) + Send + Sync>,
    limit: Duration,
    cooling: Arc<AtomicBool>,
    cooldown: Mutex<Option<JoinHandle<()>>>,
}

/// Wrap `f` so that it fires at most once per `limit` window.
pub fn throttle<F, A, R>(f: F, limit: Duration) -> Throttled<A>
where
    F: Fn(A) -> R + Send + Sync + 'static,
    A: 'static,
    R: 'static,
{
    Throttled {
        f: Box::new(move |args| {
            let _ = f(args);
        }),
        limit,
        cooling: Arc::new(AtomicBool::new(false)),
        cooldown: Mutex::new(None),
    }
}

impl<A> Throttled<A> {
    /// Invoke the callback now unless a cooldown is active.
    ///
    /// The callback runs on the caller's task, so a panic in it reaches the
    /// caller. The cooldown is armed before the callback runs.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime.
    pub fn call(&self, args: A) {
        if self.cooling.swap(true, Ordering::AcqRel) {
            trace!("throttle: dropped call during cooldown");
            return;
        }
        let deadline = Instant::now() + self.limit;
        let cooling = Arc::clone(&self.cooling);
        let timer = tokio::spawn(async move {
            sleep_until(deadline).await;
            cooling.store(false, Ordering::Release);
            trace!("throttle: cooldown elapsed");
        });
        if let Some(prev) = lock_slot(&self.cooldown).replace(timer) {
            prev.abort();
        }
        (self.f)(args);
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn state(&self) -> ThrottleState {
        if self.cooling.load(Ordering::Acquire) {
            ThrottleState::Active
        } else {
            ThrottleState::Idle
        }
    }

    pub fn is_cooling_down(&self) -> bool {
        self.state() == ThrottleState::Active
    }
}

impl<A> Drop for Throttled<A> {
    fn drop(&mut self) {
        if let Some(handle) = lock_slot(&self.cooldown).take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn recorder<T: Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl Fn(T) + Send + Sync + 'static) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        (calls, move |v| sink.lock().unwrap().push(v))
    }

    #[tokio::test(start_paused = true)]
    async fn leading_call_fires_immediately_and_rest_of_window_dropped() {
        let (calls, f) = recorder::<u32>();
        let t = throttle(f, Duration::from_millis(100));

        t.call(1);
        assert_eq!(*calls.lock().unwrap(), vec![1]);
        assert_eq!(t.state(), ThrottleState::Active);

        t.call(2);
        sleep(Duration::from_millis(50)).await;
        t.call(3);
        sleep(Duration::from_millis(49)).await;
        t.call(4);
        assert_eq!(*calls.lock().unwrap(), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn next_window_opens_after_limit() {
        let (calls, f) = recorder::<&'static str>();
        let t = throttle(f, Duration::from_millis(100));

        t.call("scroll-1");
        sleep(Duration::from_millis(101)).await;
        assert!(!t.is_cooling_down());

        t.call("scroll-2");
        t.call("scroll-3");
        assert_eq!(*calls.lock().unwrap(), vec!["scroll-1", "scroll-2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn no_trailing_flush_after_window() {
        let (calls, f) = recorder::<u32>();
        let t = throttle(f, Duration::from_millis(10));
        t.call(1);
        t.call(2);
        sleep(Duration::from_millis(100)).await;
        assert_eq!(*calls.lock().unwrap(), vec![1]);
        assert_eq!(t.state(), ThrottleState::Idle);
    }
}
