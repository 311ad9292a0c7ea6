//! Turns synchronous change notifications into ordered asynchronous storage writes.
//!
//! Listeners call [`WriteBack::enqueue`], which never blocks. A single writer task
//! started by [`WriteBack::start`] drains the queue in order and awaits
//! `set_value` for each entry. Failed writes are logged and dropped.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::events::PreferenceChangedEvent;
use crate::storage::PreferenceStorage;

enum WriteCommand {
    Write { key: String, value: String },
    Flush(oneshot::Sender<()>),
}

pub struct WriteBack {
    storage: Arc<dyn PreferenceStorage>,
    sender: Mutex<Option<mpsc::UnboundedSender<WriteCommand>>>,
    receiver: Mutex<Option<mpsc::UnboundedReceiver<WriteCommand>>>,
    task: Mutex<Option<JoinHandle<()>>>,
    events: broadcast::Sender<PreferenceChangedEvent>,
}

impl WriteBack {
    pub fn new(storage: Arc<dyn PreferenceStorage>, event_capacity: usize) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(event_capacity.max(1));
        Self {
            storage,
            sender: Mutex::new(Some(sender)),
            receiver: Mutex::new(Some(receiver)),
            task: Mutex::new(None),
            events,
        }
    }

    /// Spawns the writer task. Must be called from within a tokio runtime; later
    /// calls do nothing.
    pub fn start(&self) {
        let Some(mut receiver) = self.receiver.lock().take() else {
            return;
        };
        let storage = Arc::clone(&self.storage);
        let handle = tokio::spawn(async move {
            while let Some(command) = receiver.recv().await {
                match command {
                    WriteCommand::Write { key, value } => match storage.set_value(&key, &value).await {
                        Ok(()) => debug!("Persisted preference '{}' = '{}'.", key, value),
                        Err(e) => warn!("Failed to persist preference '{}': {}", key, e),
                    },
                    WriteCommand::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
            debug!("Preference writer stopped.");
        });
        *self.task.lock() = Some(handle);
    }

    pub fn is_running(&self) -> bool {
        self.task.lock().is_some()
    }

    /// `true` once [`shutdown`](Self::shutdown) has been called.
    pub fn is_closed(&self) -> bool {
        self.sender.lock().is_none()
    }

    /// Queues a write of `value` under `key` and broadcasts the change.
    pub fn enqueue(&self, key: &str, value: String) {
        let sender = self.sender.lock();
        let Some(sender) = sender.as_ref() else {
            warn!("Dropping write of '{}' after shutdown.", key);
            return;
        };
        if sender
            .send(WriteCommand::Write { key: key.to_string(), value: value.clone() })
            .is_err()
        {
            error!("Preference writer is gone; dropping write of '{}'.", key);
            return;
        }
        // Sending fails only when nobody is subscribed.
        let _ = self.events.send(PreferenceChangedEvent::new(key, value));
    }

    /// Resolves once every write queued before this call has been attempted.
    pub async fn flush(&self) {
        if !self.is_running() {
            return;
        }
        let (done_tx, done_rx) = oneshot::channel();
        let sent = match self.sender.lock().as_ref() {
            Some(sender) => sender.send(WriteCommand::Flush(done_tx)).is_ok(),
            None => false,
        };
        if sent {
            let _ = done_rx.await;
        }
    }

    /// Stops accepting writes, drains the queue and waits for the writer to exit.
    pub async fn shutdown(&self) {
        self.sender.lock().take();
        let task = self.task.lock().take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                error!("Preference writer task failed: {}", e);
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PreferenceChangedEvent> {
        self.events.subscribe()
    }
}
