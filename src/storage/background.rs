//! Off-thread snapshot writes.
//!
//! `save` hands the snapshot to a writer thread and returns immediately.
//! Snapshots queued while a write is running are coalesced: only the newest
//! one is written.

use crossbeam_channel::{Receiver, Sender, unbounded};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::error::{StorageError, StorageResult};
use super::persistence::ProgressPersistence;
use crate::progress::ProgressState;

enum WriteRequest {
    Save(Box<ProgressState>),
    Flush(Sender<()>),
}

pub struct BackgroundPersistence<P> {
    inner: Arc<P>,
    sender: Option<Sender<WriteRequest>>,
    worker: Option<JoinHandle<()>>,
}

impl<P> BackgroundPersistence<P>
where
    P: ProgressPersistence + Send + Sync + 'static,
{
    pub fn spawn(inner: P) -> StorageResult<Self> {
        let inner = Arc::new(inner);
        let (sender, receiver) = unbounded();
        let writer = Arc::clone(&inner);
        let worker = thread::Builder::new()
            .name("progress-writer".to_string())
            .spawn(move || run_writer(writer.as_ref(), receiver))
            .map_err(|source| StorageError::Io {
                path: "progress-writer".into(),
                source,
            })?;

        Ok(Self {
            inner,
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    /// Block until every snapshot queued so far has been written.
    pub fn flush(&self) -> StorageResult<()> {
        let sender = self.sender.as_ref().ok_or(StorageError::WriterClosed)?;
        let (ack_tx, ack_rx) = crossbeam_channel::bounded(1);
        sender
            .send(WriteRequest::Flush(ack_tx))
            .map_err(|_| StorageError::WriterClosed)?;
        ack_rx.recv().map_err(|_| StorageError::WriterClosed)
    }
}

fn run_writer<P: ProgressPersistence>(inner: &P, receiver: Receiver<WriteRequest>) {
    while let Ok(request) = receiver.recv() {
        match request {
            WriteRequest::Save(state) => {
                let mut latest = state;
                let mut ack = None;
                let mut skipped = 0usize;
                while let Ok(next) = receiver.try_recv() {
                    match next {
                        WriteRequest::Save(newer) => {
                            latest = newer;
                            skipped += 1;
                        }
                        WriteRequest::Flush(reply) => {
                            ack = Some(reply);
                            break;
                        }
                    }
                }
                if skipped > 0 {
                    crate::debug_event!("storage", "coalesced", "{skipped} snapshots");
                }
                inner.save(&latest);
                if let Some(reply) = ack {
                    let _ = reply.send(());
                }
            }
            WriteRequest::Flush(reply) => {
                let _ = reply.send(());
            }
        }
    }
    crate::debug_event!("storage", "writer stopped");
}

impl<P> ProgressPersistence for BackgroundPersistence<P>
where
    P: ProgressPersistence + Send + Sync + 'static,
{
    /// Waits for queued snapshots first, so a load after a save sees it.
    fn load(&self) -> ProgressState {
        if let Err(e) = self.flush() {
            tracing::warn!(target: "storage", "could not drain progress writer before load: {e}");
        }
        self.inner.load()
    }

    fn save(&self, state: &ProgressState) {
        let queued = self
            .sender
            .as_ref()
            .map(|s| s.send(WriteRequest::Save(Box::new(state.clone()))).is_ok())
            .unwrap_or(false);
        if !queued {
            tracing::warn!(target: "storage", "progress writer is gone; snapshot not saved");
        }
    }
}

impl<P> Drop for BackgroundPersistence<P> {
    fn drop(&mut self) {
        // Closing the channel lets the writer drain what is queued and exit.
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!(target: "storage", "progress writer panicked");
            }
        }
    }
}
