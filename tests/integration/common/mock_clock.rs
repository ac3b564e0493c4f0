use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use starknet_deployer::poller::Clock;

/// Simulated time: sleeping returns immediately and moves the clock forward.
#[derive(Clone)]
pub struct ManualClock {
    start: Instant,
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self { start: Instant::now(), sleeps: Arc::new(Mutex::new(Vec::new())) }
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }

    pub fn elapsed(&self) -> Duration {
        self.sleeps().iter().sum()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + self.elapsed()
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}
