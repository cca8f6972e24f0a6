use std::time::Duration;

/// Timing of the polling loops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollingConfig {
    /// Delay between two status reads of one task.
    pub poll_interval: Duration,
    /// Delay between two full-list refreshes of the dashboard.
    pub refresh_interval: Duration,
    /// Delay between list reads while confirming a deletion.
    pub confirm_interval: Duration,
    /// Upper bound on the deletion confirmation.
    pub confirm_timeout: Duration,
}

impl PollingConfig {
    /// Number of list reads the deletion confirmation may issue. Always at least one.
    pub fn confirm_attempts(&self) -> u32 {
        let interval = self.confirm_interval.as_millis().max(1);
        let attempts = self.confirm_timeout.as_millis().div_ceil(interval);
        attempts.clamp(1, u32::MAX as u128) as u32
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1000),
            refresh_interval: Duration::from_millis(3000),
            confirm_interval: Duration::from_millis(500),
            confirm_timeout: Duration::from_millis(5000),
        }
    }
}
