//! Time source used for issue and expiry timestamps

use chrono::Utc;

#[cfg(test)]
use mockall::automock;

/// Source of the current time in whole seconds since the Unix epoch
#[cfg_attr(test, automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}
