//! Periodic callback timer.

use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::config::TimerConfig;

/// Runs a callback repeatedly on a dedicated thread until stopped.
///
/// The callback runs first, then the timer waits `interval` before the next
/// run. The wait is interruptible, so [`stop`](Self::stop) only ever waits for
/// an invocation that is already in progress.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::time::Duration;
///
/// use artanis_util::CallbackTimer;
///
/// let ticks = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&ticks);
///
/// let mut timer = CallbackTimer::new();
/// timer
///     .start(Duration::from_millis(1), move || {
///         counter.fetch_add(1, Ordering::SeqCst);
///     })
///     .unwrap();
/// assert!(timer.is_running());
///
/// timer.stop();
/// assert!(!timer.is_running());
/// assert!(ticks.load(Ordering::SeqCst) >= 1);
/// ```
#[derive(Debug, Default)]
pub struct CallbackTimer {
    worker: Option<Worker>,
}

#[derive(Debug)]
struct Worker {
    name: String,
    stop: StopHandle,
    handle: JoinHandle<()>,
}

/// Signals a running [`CallbackTimer`] to stop, from any thread.
///
/// Stopping through a handle does not wait for the worker; use
/// [`CallbackTimer::join`] or [`CallbackTimer::stop`] for that.
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: Sender<()>,
}

impl StopHandle {
    /// Asks the worker to exit after its current invocation.
    pub fn stop(&self) {
        // The worker may already be gone, in which case there is nothing to stop.
        let _ = self.tx.send(());
    }
}

impl CallbackTimer {
    /// Creates an idle timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts invoking `callback` every `interval`, stopping any previous run first.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker thread cannot be spawned.
    pub fn start<F>(&mut self, interval: Duration, callback: F) -> io::Result<()>
    where
        F: FnMut() + Send + 'static,
    {
        self.start_with(TimerConfig::new().with_interval(interval), callback)
    }

    /// Starts the timer with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker thread cannot be spawned.
    pub fn start_with<F>(&mut self, config: TimerConfig, mut callback: F) -> io::Result<()>
    where
        F: FnMut() + Send + 'static,
    {
        if self.worker.is_some() {
            self.stop();
        }

        let (tx, rx) = mpsc::channel();
        let interval = config.interval;

        let handle = thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || {
                loop {
                    callback();
                    match rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })?;

        tracing::debug!(timer = %config.thread_name, ?interval, "timer started");

        self.worker = Some(Worker {
            name: config.thread_name,
            stop: StopHandle { tx },
            handle,
        });
        Ok(())
    }

    /// Stops the timer and waits for the current invocation to finish.
    ///
    /// Does nothing if the timer is not running.
    pub fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.stop.stop();
            Self::wait(worker);
        }
    }

    /// Waits for the worker to exit without asking it to stop.
    ///
    /// Returns immediately if the timer was never started. Otherwise this
    /// blocks until a [`StopHandle`] is used or the callback panics.
    pub fn join(&mut self) {
        if let Some(worker) = self.worker.take() {
            Self::wait(worker);
        }
    }

    /// Returns a handle that can stop this timer from another thread or from
    /// inside the callback.
    #[must_use]
    pub fn stop_handle(&self) -> Option<StopHandle> {
        self.worker.as_ref().map(|w| w.stop.clone())
    }

    /// Returns true while the worker thread is alive.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|w| !w.handle.is_finished())
    }

    fn wait(worker: Worker) {
        match worker.handle.join() {
            Ok(()) => tracing::debug!(timer = %worker.name, "timer stopped"),
            Err(_) => tracing::error!(timer = %worker.name, "timer callback panicked"),
        }
    }
}

impl Drop for CallbackTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if cond() {
                return true;
            }
            thread::sleep(Duration::from_millis(1));
        }
        false
    }

    fn counting_timer(interval: Duration) -> (CallbackTimer, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let mut timer = CallbackTimer::new();
        timer
            .start(interval, move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        (timer, count)
    }

    #[test]
    fn idle_timer_is_not_running() {
        let mut timer = CallbackTimer::new();
        assert!(!timer.is_running());
        assert!(timer.stop_handle().is_none());
        timer.stop();
        timer.join();
    }

    #[test]
    fn invokes_callback_repeatedly() {
        let (mut timer, count) = counting_timer(Duration::from_millis(1));
        assert!(wait_until(|| count.load(Ordering::SeqCst) >= 3));
        timer.stop();
    }

    #[test]
    fn stop_halts_invocations() {
        let (mut timer, count) = counting_timer(Duration::from_millis(1));
        assert!(wait_until(|| count.load(Ordering::SeqCst) >= 1));

        timer.stop();
        assert!(!timer.is_running());

        let after_stop = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn stop_interrupts_long_interval() {
        let (mut timer, count) = counting_timer(Duration::from_secs(60));
        assert!(wait_until(|| count.load(Ordering::SeqCst) == 1));

        let started = Instant::now();
        timer.stop();
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn restart_replaces_previous_run() {
        let (mut timer, first) = counting_timer(Duration::from_millis(1));
        assert!(wait_until(|| first.load(Ordering::SeqCst) >= 1));

        let second = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&second);
        timer
            .start(Duration::from_millis(1), move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        let first_after_restart = first.load(Ordering::SeqCst);
        assert!(wait_until(|| second.load(Ordering::SeqCst) >= 2));
        assert_eq!(first.load(Ordering::SeqCst), first_after_restart);
        timer.stop();
    }

    #[test]
    fn callback_can_stop_itself() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let handle_slot: Arc<std::sync::Mutex<Option<StopHandle>>> = Arc::default();
        let slot = Arc::clone(&handle_slot);

        let mut timer = CallbackTimer::new();
        timer
            .start(Duration::from_millis(1), move || {
                if counter.fetch_add(1, Ordering::SeqCst) + 1 == 3 {
                    if let Some(handle) = slot.lock().unwrap().as_ref() {
                        handle.stop();
                    }
                }
            })
            .unwrap();
        *handle_slot.lock().unwrap() = timer.stop_handle();

        // The handle may be installed after the third call; stop from here then.
        if !wait_until(|| !timer.is_running()) {
            timer.stop();
        }
        timer.join();
        assert!(count.load(Ordering::SeqCst) >= 3);
        assert!(!timer.is_running());
    }

    #[test]
    fn panicking_callback_ends_worker() {
        let mut timer = CallbackTimer::new();
        timer
            .start(Duration::from_millis(1), || panic!("boom"))
            .unwrap();

        assert!(wait_until(|| !timer.is_running()));
        timer.stop();
    }

    #[test]
    fn drop_stops_worker() {
        let (timer, count) = counting_timer(Duration::from_millis(1));
        assert!(wait_until(|| count.load(Ordering::SeqCst) >= 1));
        drop(timer);

        let after_drop = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::SeqCst), after_drop);
    }

    #[test]
    fn named_thread() {
        let seen = Arc::new(std::sync::Mutex::new(None));
        let slot = Arc::clone(&seen);
        let mut timer = CallbackTimer::new();
        timer
            .start_with(
                TimerConfig::new()
                    .with_interval(Duration::from_millis(1))
                    .with_thread_name("flusher"),
                move || {
                    *slot.lock().unwrap() = thread::current().name().map(str::to_string);
                },
            )
            .unwrap();

        assert!(wait_until(|| seen.lock().unwrap().is_some()));
        timer.stop();
        assert_eq!(seen.lock().unwrap().as_deref(), Some("flusher"));
    }
}
