//! Bounded retry/poll helper for conditions that become true asynchronously
//! from the test's point of view (a control enabling itself, a dialog
//! finishing a load) without subscribing to platform events.

use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::errors::AutomationError;

/// Repeatedly evaluate `produce` until `accept` approves its value or the
/// deadline passes.
///
/// The producer runs at least once, so a deadline already in the past still
/// yields one observation. Producer errors are propagated immediately; an
/// expired deadline yields [`AutomationError::Timeout`].
pub fn wait_until_deadline<T, F, P>(
    deadline: Instant,
    interval: Duration,
    mut produce: F,
    mut accept: P,
) -> Result<T, AutomationError>
where
    F: FnMut() -> Result<T, AutomationError>,
    P: FnMut(&T) -> bool,
{
    loop {
        let value = produce()?;
        if accept(&value) {
            return Ok(value);
        }
        if Instant::now() >= deadline {
            debug!("condition not met before deadline");
            return Err(AutomationError::Timeout(
                "condition was not met before the deadline".to_string(),
            ));
        }
        thread::sleep(interval);
    }
}

/// A reusable timeout/interval pair for [`wait_until_deadline`].
#[derive(Debug, Clone, Copy)]
pub struct Waiter {
    timeout: Duration,
    interval: Duration,
}

impl Waiter {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    /// Poll `produce` until `accept` approves its value or `timeout` elapses.
    pub fn wait_for<T, F, P>(&self, produce: F, accept: P) -> Result<T, AutomationError>
    where
        F: FnMut() -> Result<T, AutomationError>,
        P: FnMut(&T) -> bool,
    {
        wait_until_deadline(Instant::now() + self.timeout, self.interval, produce, accept)
    }
}
