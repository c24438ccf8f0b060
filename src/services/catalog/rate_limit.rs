use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// Paces outbound catalog requests to a minimum interval between dispatches.
///
/// The catalog enforces a hard requests-per-second cap for the whole process,
/// so a single limiter instance is shared by every call site. A caller that
/// arrives before the interval has elapsed sleeps until its slot opens; slots
/// are handed out strictly one at a time and unused time does not accumulate.
pub struct RateLimiter {
    last_request: Mutex<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            // Backdate the initial timestamp so the first caller never waits
            last_request: Mutex::new(Instant::now() - min_interval),
            min_interval,
        }
    }

    /// Sleeps until a request may be dispatched, then claims the slot.
    ///
    /// The mutex is held across the sleep, which is what serializes waiters:
    /// each one observes the timestamp left by the previous dispatch.
    pub async fn wait_for_slot(&self) {
        let mut last_request = self.last_request.lock().await;
        let elapsed = last_request.elapsed();

        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }

        *last_request = Instant::now();
    }
}
