// src/poller.rs
//! Keeping the snapshot fresh.
//!
//! `Refresher` runs one ingestion cycle and applies the result to the store.
//! Cycles never overlap: a refresh asked for while another is running is
//! skipped. `Poller` owns the periodic timer: one refresh right away, then one
//! per interval on a background thread, until `stop()` or drop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, error, info};

use crate::config::consts::LOAD_ERROR_MESSAGE;
use crate::ingest::Pipeline;
use crate::progress::{NullProgress, Progress};
use crate::store::SnapshotStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    Updated { generation: u64, records: usize },
    Failed,
    Skipped,
}

pub struct Refresher {
    pipeline: Pipeline,
    store: Arc<SnapshotStore>,
    in_flight: AtomicBool,
    progress: Mutex<Box<dyn Progress>>,
}

/// Clears the in-flight flag even if the cycle unwinds.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Refresher {
    pub fn new(pipeline: Pipeline, store: Arc<SnapshotStore>) -> Self {
        Self {
            pipeline,
            store,
            in_flight: AtomicBool::new(false),
            progress: Mutex::new(Box::new(NullProgress)),
        }
    }

    pub fn with_progress(self, progress: impl Progress + 'static) -> Self {
        Self { progress: Mutex::new(Box::new(progress)), ..self }
    }

    pub fn store(&self) -> &Arc<SnapshotStore> {
        &self.store
    }

    pub fn is_refreshing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn notify(&self, f: impl FnOnce(&mut dyn Progress)) {
        let mut p = self.progress.lock().unwrap_or_else(PoisonError::into_inner);
        f(p.as_mut());
    }

    /// Run one fetch → parse → map → dedup cycle and apply it.
    pub fn refresh(&self) -> RefreshOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("refresh: already in flight, skipping");
            self.notify(|p| p.skipped());
            return RefreshOutcome::Skipped;
        }
        let _guard = InFlight(&self.in_flight);

        let started = Instant::now();
        info!(source = %self.pipeline.source(), "refresh: begin");
        self.notify(|p| p.begin());

        match self.pipeline.run_once() {
            Ok(records) => {
                let n = records.len();
                let generation = self.store.publish(records);
                info!(records = n, generation, elapsed = ?started.elapsed(), "refresh: ok");
                self.notify(|p| p.done(generation, n));
                RefreshOutcome::Updated { generation, records: n }
            }
            Err(e) => {
                error!(error = %e, kind = ?e.kind(), elapsed = ?started.elapsed(), "refresh: failed, keeping previous snapshot");
                self.store.fail(LOAD_ERROR_MESSAGE);
                self.notify(|p| p.failed(&e));
                RefreshOutcome::Failed
            }
        }
    }
}

/* ---------------- Scheduled task ---------------- */

const MIN_PERIOD: Duration = Duration::from_millis(1);

pub struct Poller {
    refresher: Arc<Refresher>,
    interval: Duration,
    stop_tx: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl Poller {
    /// Spawn the polling thread. The first refresh starts immediately, later
    /// ones every `interval` from then on.
    pub fn start(refresher: Arc<Refresher>, interval: Duration) -> std::io::Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let r = Arc::clone(&refresher);

        // Fixed rate: ticks sit on a grid anchored at start, whatever a fetch costs.
        let period = interval.max(MIN_PERIOD);

        let worker = thread::Builder::new()
            .name(s!("propdir-poller"))
            .spawn(move || {
                let mut next = Instant::now();
                loop {
                    r.refresh();

                    next += period;
                    let now = Instant::now();
                    // Ticks that fell inside an overlong cycle are dropped, not replayed.
                    while next <= now {
                        next += period;
                    }

                    match stop_rx.recv_timeout(next - now) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        // Stop signal, or the handle is gone.
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                debug!("poller: stopped");
            })?;

        info!(interval = ?interval, "poller: started");
        Ok(Self { refresher, interval, stop_tx: Some(stop_tx), worker: Some(worker) })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn store(&self) -> &Arc<SnapshotStore> {
        self.refresher.store()
    }

    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }

    /// Refresh on the caller's thread; skipped if the poller is mid-cycle.
    pub fn refresh_now(&self) -> RefreshOutcome {
        self.refresher.refresh()
    }

    /// Cancel the timer and wait for an in-flight cycle to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("poller: worker thread panicked");
            }
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.shutdown();
    }
}
