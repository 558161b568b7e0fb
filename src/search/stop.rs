use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Wall-clock budget for a search.
#[derive(Debug, Clone, Copy)]
pub struct SearchTimer {
    started: Instant,
    budget: Duration,
}

impl SearchTimer {
    pub fn start(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    pub fn exceeded(&self) -> bool {
        self.started.elapsed() >= self.budget
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Cooperative cancellation: an optional external token plus an optional
/// timer. Polled at depth and root-move boundaries, never inside the inner
/// alpha-beta loop.
#[derive(Debug, Clone, Default)]
pub struct StopControl {
    token: Option<Arc<AtomicBool>>,
    timer: Option<SearchTimer>,
}

impl StopControl {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: Arc<AtomicBool>) -> Self {
        self.token = Some(token);
        self
    }

    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.timer = Some(SearchTimer::start(budget));
        self
    }

    pub fn should_stop(&self) -> bool {
        if let Some(token) = &self.token {
            if token.load(Ordering::Relaxed) {
                return true;
            }
        }
        if let Some(timer) = &self.timer {
            if timer.exceeded() {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_stops() {
        let token = Arc::new(AtomicBool::new(false));
        let stop = StopControl::none().with_token(Arc::clone(&token));
        assert!(!stop.should_stop());
        token.store(true, Ordering::Relaxed);
        assert!(stop.should_stop());
    }

    #[test]
    fn test_expired_timer_stops() {
        let stop = StopControl::none().with_budget(Duration::from_millis(0));
        assert!(stop.should_stop());
    }

    #[test]
    fn test_no_controls_never_stops() {
        assert!(!StopControl::none().should_stop());
    }
}
