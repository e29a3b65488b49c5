//! Configuration for the callback timer.

use std::time::Duration;

/// Configuration for a [`CallbackTimer`](crate::CallbackTimer) run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerConfig {
    /// Delay between the end of one callback invocation and the start of the next.
    ///
    /// Default: 1 second
    pub interval: Duration,

    /// Name given to the worker thread, shown in panics and in logs.
    ///
    /// Default: `"callback-timer"`
    pub thread_name: String,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            thread_name: "callback-timer".to_string(),
        }
    }
}

impl TimerConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the interval between invocations.
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the worker thread name.
    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = TimerConfig::default();
        assert_eq!(config.interval, Duration::from_secs(1));
        assert_eq!(config.thread_name, "callback-timer");
    }

    #[test]
    fn builder_methods() {
        let config = TimerConfig::new()
            .with_interval(Duration::from_millis(250))
            .with_thread_name("flush");
        assert_eq!(config.interval, Duration::from_millis(250));
        assert_eq!(config.thread_name, "flush");
    }
}
