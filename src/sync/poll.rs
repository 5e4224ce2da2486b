//! Viewer poll loop
//!
//! Each cadence tick issues one snapshot request and does not wait for it.
//! Requests may overlap; responses are applied in arrival order and the last
//! one applied wins. Failures are logged and counted, and the loop keeps going
//! with no retry or backoff.

use std::cell::Cell;
use std::rc::Rc;

use futures::task::{LocalSpawn, LocalSpawnExt};

use super::backend::Backend;
use super::cadence::{Cadence, CancelToken};
use crate::error::TransportError;
use crate::ring::{SharedView, SnapshotCodec};

/// Counters for a poll loop's lifetime
#[derive(Debug, Default)]
pub struct PollStats {
    issued: Cell<u64>,
    applied: Cell<u64>,
    transport_failures: Cell<u64>,
    decode_failures: Cell<u64>,
}

impl PollStats {
    pub fn issued(&self) -> u64 {
        self.issued.get()
    }

    pub fn applied(&self) -> u64 {
        self.applied.get()
    }

    pub fn transport_failures(&self) -> u64 {
        self.transport_failures.get()
    }

    pub fn decode_failures(&self) -> u64 {
        self.decode_failures.get()
    }

    /// Requests that have not resolved yet
    pub fn in_flight(&self) -> u64 {
        self.issued()
            .saturating_sub(self.applied())
            .saturating_sub(self.transport_failures())
            .saturating_sub(self.decode_failures())
    }

    fn bump(counter: &Cell<u64>) {
        counter.set(counter.get() + 1);
    }
}

/// Pulls snapshots from the backend and applies them to a view
pub struct PollLoop<B, S> {
    backend: Rc<B>,
    view: SharedView,
    codec: SnapshotCodec,
    cadence: Cadence,
    spawner: S,
    stats: Rc<PollStats>,
    cancel: CancelToken,
}

impl<B, S> PollLoop<B, S>
where
    B: Backend + 'static,
    S: LocalSpawn,
{
    pub fn new(
        backend: Rc<B>,
        view: SharedView,
        codec: SnapshotCodec,
        cadence: Cadence,
        spawner: S,
    ) -> Self {
        Self {
            backend,
            view,
            codec,
            cadence,
            spawner,
            stats: Rc::new(PollStats::default()),
            cancel: CancelToken::new(),
        }
    }

    pub fn stats(&self) -> Rc<PollStats> {
        Rc::clone(&self.stats)
    }

    pub fn cadence(&self) -> &Cadence {
        &self.cadence
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// Stop issuing requests. Requests already in flight still land.
    pub fn stop(&self) {
        if self.is_running() {
            log::info!("Poll loop stopped after {} requests", self.stats.issued());
        }
        self.cancel.cancel();
    }

    /// Issue one snapshot request without waiting for it.
    /// Returns false if the loop is stopped or the task couldn't be spawned.
    pub fn poll_once(&self) -> bool {
        if !self.is_running() {
            return false;
        }

        let backend = Rc::clone(&self.backend);
        let view = Rc::clone(&self.view);
        let stats = Rc::clone(&self.stats);
        let codec = self.codec;

        let task = async move {
            let response = backend.get_circle().await;
            apply_response(&view, &codec, &stats, response);
        };

        match self.spawner.spawn_local(task) {
            Ok(()) => {
                PollStats::bump(&self.stats.issued);
                true
            }
            Err(e) => {
                log::warn!("Could not spawn poll request: {}", e);
                false
            }
        }
    }

    /// Advance the cadence clock by `dt_ms`, issuing every poll that came due.
    /// Returns the number of requests issued.
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if !self.is_running() {
            return 0;
        }
        let due = self.cadence.advance(dt_ms);
        (0..due).filter(|_| self.poll_once()).count() as u32
    }
}

/// Decode a response and overwrite the view, or log why not
fn apply_response(
    view: &SharedView,
    codec: &SnapshotCodec,
    stats: &PollStats,
    response: Result<String, TransportError>,
) {
    let body = match response {
        Ok(body) => body,
        Err(e) => {
            log::warn!("Error fetching LED data: {}", e);
            PollStats::bump(&stats.transport_failures);
            return;
        }
    };

    let applied = codec
        .decode(&body)
        .and_then(|snapshot| view.borrow_mut().apply_snapshot(&snapshot));
    match applied {
        Ok(repainted) => {
            log::trace!("Snapshot applied, {} slots repainted", repainted);
            PollStats::bump(&stats.applied);
        }
        Err(e) => {
            log::warn!("Discarding snapshot: {}", e);
            PollStats::bump(&stats.decode_failures);
        }
    }
}
