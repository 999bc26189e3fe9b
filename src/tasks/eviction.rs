//! Periodic Eviction Task
//!
//! Background task that clears an entire store on a fixed period until it is
//! stopped.

use std::future::Future;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tokio::runtime::{self, Handle};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::cache::ConcurrentStore;

/// Name of the OS thread used when no Tokio runtime is available.
const EVICTION_THREAD_NAME: &str = "cache-eviction";

// == Scheduler State ==
/// Lifecycle of a cache's eviction scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No periodic eviction was requested
    Unconfigured,
    /// The background task is clearing the store every period
    Running,
    /// Terminal; no further automatic clears happen
    Stopped,
}

// == Eviction Scheduler ==
/// Handle to a running periodic eviction task.
///
/// The task runs on the current Tokio runtime when the scheduler is created
/// inside one, and on a dedicated thread with its own current-thread runtime
/// otherwise. Stopping is one-way and safe to repeat from any thread; dropping
/// the handle stops the task as well. If the task ends on its own, for example
/// because the runtime it was spawned on shut down, the scheduler reports
/// [`SchedulerState::Stopped`].
#[derive(Debug)]
pub struct EvictionScheduler {
    /// Interval between clears
    period: Duration,
    /// Set once by the first terminator
    stopped: AtomicBool,
    /// Stop signal observed by the background task
    cancel: CancellationToken,
    /// Handle to the background task, None if it never started
    task: Option<EvictionTask>,
}

/// Where the eviction loop is being driven.
#[derive(Debug)]
enum EvictionTask {
    /// Spawned on the caller's Tokio runtime
    Runtime(JoinHandle<()>),
    /// Running on a dedicated OS thread
    Thread(thread::JoinHandle<()>),
}

impl EvictionTask {
    fn is_finished(&self) -> bool {
        match self {
            Self::Runtime(handle) => handle.is_finished(),
            Self::Thread(handle) => handle.is_finished(),
        }
    }
}

impl EvictionScheduler {
    // == Spawn ==
    /// Starts clearing `store` every `period`.
    ///
    /// The first clear happens one full period after this call.
    ///
    /// # Arguments
    /// * `store` - Shared store to clear
    /// * `period` - Interval between clears, must be non-zero
    pub fn spawn<T>(store: Arc<ConcurrentStore<T>>, period: Duration) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        let cancel = CancellationToken::new();
        let future = run_eviction_loop(store, period, cancel.clone());

        let task = match Handle::try_current() {
            Ok(handle) => Some(EvictionTask::Runtime(handle.spawn(future))),
            Err(_) => match spawn_on_dedicated_thread(future) {
                Ok(handle) => Some(EvictionTask::Thread(handle)),
                Err(err) => {
                    error!("Failed to start periodic eviction task: {}", err);
                    cancel.cancel();
                    None
                }
            },
        };

        Self {
            period,
            stopped: AtomicBool::new(task.is_none()),
            cancel,
            task,
        }
    }

    // == Stop ==
    /// Signals the background task to terminate.
    ///
    /// Returns true for the call that actually stopped the task and false for
    /// every later (or concurrently losing) call. A clear already in progress
    /// is allowed to finish.
    pub fn stop(&self) -> bool {
        if self
            .stopped
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        self.cancel.cancel();
        info!("Periodic eviction stopped");
        true
    }

    // == State ==
    /// Returns whether the scheduler is still running.
    ///
    /// A task that ended without being stopped moves the scheduler to
    /// [`SchedulerState::Stopped`] the first time it is observed.
    pub fn state(&self) -> SchedulerState {
        if self.stopped.load(Ordering::Acquire) {
            return SchedulerState::Stopped;
        }

        let finished = self.task.as_ref().is_some_and(EvictionTask::is_finished);
        if finished {
            if self
                .stopped
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                self.cancel.cancel();
                warn!("Periodic eviction task ended unexpectedly; no further clears will run");
            }
            return SchedulerState::Stopped;
        }

        SchedulerState::Running
    }

    // == Period ==
    /// Returns the configured interval between clears.
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for EvictionScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Clears the store on every tick until `cancel` fires.
async fn run_eviction_loop<T>(
    store: Arc<ConcurrentStore<T>>,
    period: Duration,
    cancel: CancellationToken,
) where
    T: Clone,
{
    info!(
        "Starting periodic eviction task with interval of {} ms",
        period.as_millis()
    );

    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            // Prefer the stop signal so no clear starts after Stop returns.
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let removed = store.clear();
                debug!("Periodic eviction: cleared {} entries", removed);
            }
        }
    }

    debug!("Periodic eviction task exited");
}

/// Drives `task` on a new OS thread with its own single-threaded runtime.
fn spawn_on_dedicated_thread<F>(task: F) -> io::Result<thread::JoinHandle<()>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let rt = runtime::Builder::new_current_thread().enable_time().build()?;

    thread::Builder::new()
        .name(EVICTION_THREAD_NAME.to_string())
        .spawn(move || rt.block_on(task))
}
