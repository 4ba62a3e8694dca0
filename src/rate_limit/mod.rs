//! Invocation-frequency wrappers for event handlers (scroll, resize, input).
//!
//! Both wrappers own their timer slot; nothing is shared between instances.
//! Timers run on the ambient Tokio runtime, so `call` must happen inside one.

mod debounce;
mod throttle;

pub use debounce::{debounce, DebounceState, Debounced};
pub use throttle::{throttle, ThrottleState, Throttled};

use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;

// A panicking callback must not wedge the wrapper, so poisoning is ignored.
fn lock_slot(slot: &Mutex<Option<JoinHandle<()>>>) -> MutexGuard<'_, Option<JoinHandle<()>>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
