//! Serialized action queue backing every disk store.
//!
//! The queue owns one background worker thread consuming a FIFO channel
//! of named actions. Actions run one at a time, in submission order, so
//! writes for a store are never interleaved. Callers block only as long
//! as it takes to put an action on the channel.

use parking_lot::Mutex;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, error, warn};

use crate::error::DbResult;

/// A unit of work with a human-readable description for log lines.
struct Action {
    description: String,
    task: Box<dyn FnOnce() -> DbResult<()> + Send + 'static>,
}

/// A single-consumer queue of named actions running on an owned worker
/// thread.
///
/// # Failure handling
///
/// An action that returns an error is logged with its description and
/// otherwise swallowed: the caller that enqueued it has long since
/// returned, so there is nobody left to raise to. The worker continues
/// with the next action.
///
/// # Shutdown
///
/// [`stop`](ActionQueue::stop) closes the channel and joins the worker,
/// blocking until every queued action has run. Actions enqueued after
/// stop are dropped with a warning.
pub struct ActionQueue {
    name: String,
    sender: Mutex<Option<Sender<Action>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl ActionQueue {
    /// Creates a queue and starts its worker thread.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let (sender, receiver) = mpsc::channel::<Action>();

        let worker_name = name.clone();
        let worker = thread::spawn(move || {
            while let Ok(action) = receiver.recv() {
                if let Err(err) = (action.task)() {
                    error!(
                        queue = %worker_name,
                        action = %action.description,
                        error = %err,
                        "queued action failed"
                    );
                }
            }
            debug!(queue = %worker_name, "action queue drained");
        });

        Self {
            name,
            sender: Mutex::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Returns the queue name used in worker log lines.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Submits a named action to run on the worker thread.
    ///
    /// Returns as soon as the action is on the channel. If the queue has
    /// already stopped, the action is dropped and a warning is logged.
    pub fn enqueue<F>(&self, description: impl Into<String>, task: F)
    where
        F: FnOnce() -> DbResult<()> + Send + 'static,
    {
        let description = description.into();
        let sender = self.sender.lock();
        match sender.as_ref() {
            Some(tx) => {
                let action = Action {
                    description: description.clone(),
                    task: Box::new(task),
                };
                if tx.send(action).is_err() {
                    warn!(
                        queue = %self.name,
                        action = %description,
                        "worker is gone, dropping action"
                    );
                }
            }
            None => {
                warn!(
                    queue = %self.name,
                    action = %description,
                    "queue stopped, dropping action"
                );
            }
        }
    }

    /// Stops accepting actions and blocks until the queue drains.
    ///
    /// Safe to call more than once; later calls are no-ops.
    pub fn stop(&self) {
        // Dropping the sender lets the worker finish everything already
        // queued and then exit its receive loop.
        self.sender.lock().take();
        if let Some(worker) = self.worker.lock().take() {
            if worker.join().is_err() {
                error!(queue = %self.name, "action queue worker panicked");
            }
        }
    }
}

impl Drop for ActionQueue {
    fn drop(&mut self) {
        self.stop();
    }
}
