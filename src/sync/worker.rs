use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, unbounded};

use crate::remote::TodoApi;

use super::request::{Outcome, Request, execute};

/// Single-consumer request queue on a background thread.
///
/// Requests run strictly one at a time in submission order, so mutations
/// against the list never interleave. Dropping the worker closes the queue;
/// a request already in flight still runs to completion.
pub struct SyncWorker {
    requests: Sender<Request>,
    outcomes: Receiver<Outcome>,
}

impl SyncWorker {
    pub fn spawn<A: TodoApi + 'static>(api: A) -> std::io::Result<Self> {
        let (req_tx, req_rx) = unbounded::<Request>();
        let (out_tx, out_rx) = unbounded::<Outcome>();

        thread::Builder::new()
            .name("checklist-sync".to_string())
            .spawn(move || {
                for req in req_rx {
                    tracing::debug!(request = req.label(), "running request");
                    let outcome = execute(&api, req);
                    if out_tx.send(outcome).is_err() {
                        break;
                    }
                }
                tracing::debug!("sync worker stopped");
            })?;

        Ok(Self {
            requests: req_tx,
            outcomes: out_rx,
        })
    }

    /// Queues `req`. Hands it back when the worker is gone.
    pub fn submit(&self, req: Request) -> Result<(), Request> {
        self.requests.send(req).map_err(|e| e.into_inner())
    }

    pub fn try_outcome(&self) -> Option<Outcome> {
        match self.outcomes.try_recv() {
            Ok(o) => Some(o),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<Outcome> {
        match self.outcomes.recv_timeout(timeout) {
            Ok(o) => Some(o),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

#[cfg(test)]
#[path = "../tests/sync/worker_tests.rs"]
mod tests;
