//! Fixed-interval sync task with a cancellable handle.
//!
//! # Invariants
//! - Ticks are spaced by `interval` regardless of manual triggers.
//! - `stop()` and drop both join the worker; an in-flight fetch completes
//!   first since fetches cannot be aborted.

use super::synchronizer::{SyncOutcome, Synchronizer};
use log::{debug, info, warn};
use std::sync::mpsc::{channel, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(30);

enum Command {
    Trigger,
    Stop,
}

pub struct SyncScheduler;

impl SyncScheduler {
    /// Starts the periodic task on a named background thread.
    ///
    /// `on_outcome` receives every outcome, scheduled or manual; the host
    /// decides whether to log, notify or ignore it.
    pub fn start<F>(
        synchronizer: Arc<Synchronizer>,
        interval: Duration,
        mut on_outcome: F,
    ) -> std::io::Result<SchedulerHandle>
    where
        F: FnMut(SyncOutcome) + Send + 'static,
    {
        let interval = interval.max(Duration::from_millis(1));
        let (commands, inbox) = channel::<Command>();

        let worker = std::thread::Builder::new()
            .name("quotebook-sync".to_string())
            .spawn(move || {
                info!(
                    "event=sync_scheduler module=sync status=start interval_ms={}",
                    interval.as_millis()
                );
                let mut next_tick = Instant::now() + interval;
                loop {
                    let wait = next_tick.saturating_duration_since(Instant::now());
                    match inbox.recv_timeout(wait) {
                        Ok(Command::Trigger) => {
                            debug!("event=sync_tick module=sync source=manual");
                            on_outcome(synchronizer.sync_now());
                        }
                        Err(RecvTimeoutError::Timeout) => {
                            debug!("event=sync_tick module=sync source=timer");
                            on_outcome(synchronizer.sync_now());
                            next_tick += interval;
                            let now = Instant::now();
                            if next_tick <= now {
                                next_tick = now + interval;
                            }
                        }
                        Ok(Command::Stop) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                info!("event=sync_scheduler module=sync status=stopped");
            })?;

        Ok(SchedulerHandle {
            commands,
            worker: Some(worker),
        })
    }
}

/// Owner of a running scheduler thread.
pub struct SchedulerHandle {
    commands: Sender<Command>,
    worker: Option<JoinHandle<()>>,
}

impl SchedulerHandle {
    /// Requests an immediate sync. Returns `false` once the task has stopped.
    pub fn trigger(&self) -> bool {
        self.commands.send(Command::Trigger).is_ok()
    }

    /// Stops the task and waits for the worker thread.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        let _ = self.commands.send(Command::Stop);
        if worker.join().is_err() {
            warn!("event=sync_scheduler module=sync status=error reason=worker_panicked");
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
