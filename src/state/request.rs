// src/state/request.rs
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// The worker went away without reporting back (it panicked).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("analysis worker stopped before reporting a result")]
pub struct WorkerLost;

/// At most one background job per page. The UI thread polls it once per
/// frame; nothing blocks the event loop.
#[derive(Debug)]
pub struct PendingRequest<T> {
    receiver: Option<Receiver<T>>,
}

impl<T> Default for PendingRequest<T> {
    fn default() -> Self {
        Self { receiver: None }
    }
}

impl<T: Send + 'static> PendingRequest<T> {
    pub fn is_in_flight(&self) -> bool {
        self.receiver.is_some()
    }

    /// Starts `job` on a worker thread. Returns false, without running
    /// anything, while a previous job is still outstanding.
    pub fn spawn<F>(&mut self, job: F) -> bool
    where
        F: FnOnce() -> T + Send + 'static,
    {
        if self.is_in_flight() {
            return false;
        }

        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            // The page may have been dropped in the meantime; nobody to tell.
            let _ = sender.send(job());
        });
        self.receiver = Some(receiver);
        true
    }

    /// `None` while idle or still running.
    pub fn poll(&mut self) -> Option<Result<T, WorkerLost>> {
        let outcome = match self.receiver.as_ref()?.try_recv() {
            Ok(value) => Ok(value),
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(WorkerLost),
        };
        self.receiver = None;
        Some(outcome)
    }

    /// Blocks until the outstanding job reports back.
    #[cfg(test)]
    pub fn wait(&mut self) -> Option<Result<T, WorkerLost>> {
        let outcome = self.receiver.take()?.recv().map_err(|_| WorkerLost);
        Some(outcome)
    }
}
