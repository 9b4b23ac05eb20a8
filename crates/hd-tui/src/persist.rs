//! Background writer for favorites and hotbar.
//!
//! The event loop never touches storage. It forwards each
//! [`PersistRequest`] over a channel to a writer thread that owns the store,
//! logs failures, and never reports back.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, unbounded};
use tracing::{debug, warn};

use hd_session::{PersistRequest, Store, StoreResult};

/// Handle to the writer thread.
#[derive(Debug)]
pub struct Persister {
    sender: Option<Sender<PersistRequest>>,
    worker: Option<JoinHandle<()>>,
}

impl Persister {
    /// Start a writer thread that owns `store`.
    ///
    /// If the thread cannot be started, requests are dropped with a warning.
    pub fn spawn(store: Box<dyn Store>) -> Self {
        let (sender, receiver) = unbounded();
        let spawned = thread::Builder::new()
            .name("hotdice-persist".to_string())
            .spawn(move || drain(store, &receiver));
        match spawned {
            Ok(worker) => Self {
                sender: Some(sender),
                worker: Some(worker),
            },
            Err(e) => {
                warn!("could not start persistence writer, changes will not be saved: {e}");
                Self {
                    sender: None,
                    worker: None,
                }
            }
        }
    }

    /// Queue a write. Never blocks.
    pub fn send(&self, request: PersistRequest) {
        let Some(sender) = &self.sender else {
            return;
        };
        if sender.send(request).is_err() {
            warn!("persistence writer has stopped, dropping write");
        }
    }

    /// Close the channel and wait for queued writes to land.
    pub fn finish(&mut self) {
        self.sender = None;
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            warn!("persistence writer panicked");
        }
    }
}

impl Drop for Persister {
    fn drop(&mut self) {
        self.finish();
    }
}

fn drain(mut store: Box<dyn Store>, receiver: &Receiver<PersistRequest>) {
    for request in receiver.iter() {
        match write_request(store.as_mut(), &request) {
            Ok(()) => debug!(key = request.key(), "saved"),
            Err(e) => warn!("save failed: {e}"),
        }
    }
}

/// Encode and store one request.
pub fn write_request(store: &mut dyn Store, request: &PersistRequest) -> StoreResult<()> {
    let json = request.to_json()?;
    store.save(request.key(), &json)
}
