use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// A cancellable repeating timer bound to the lifetime of its owner.
///
/// The callback first fires one `period` after start. Dropping the timer stops
/// it, so a generation session cannot leak ticks into a later one.
/// Must be started from within a tokio runtime.
pub struct RepeatingTimer {
    name: &'static str,
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl RepeatingTimer {
    pub fn start<F>(name: &'static str, period: Duration, mut callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                callback();
            }
        });

        debug!("Timer '{}' started ({:?})", name, period);

        Self {
            name,
            period,
            handle: Some(handle),
        }
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("Timer '{}' stopped", self.name);
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for RepeatingTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
