//! Keyed async tasks
//!
//! One task per [`TaskKey`]: spawning under a key that is already running
//! aborts the old task first, so at most one request per endpoint is in
//! flight and at most one venue refresh is pending. Aborted tasks send
//! nothing.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::action::Action;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskKey {
    Locate,
    Weather,
    News,
    Venues,
}

impl TaskKey {
    pub fn name(self) -> &'static str {
        match self {
            TaskKey::Locate => "locate",
            TaskKey::Weather => "weather",
            TaskKey::News => "news",
            TaskKey::Venues => "venues",
        }
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub struct TaskManager {
    tasks: HashMap<TaskKey, AbortHandle>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    /// Completed tasks send their action on `action_tx`.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            tasks: HashMap::new(),
            action_tx,
        }
    }

    /// Run `future` now, cancelling any task under `key`.
    pub fn spawn<F>(&mut self, key: TaskKey, future: F) -> &mut Self
    where
        F: Future<Output = Action> + Send + 'static,
    {
        self.start(key, None, future)
    }

    /// Run `future` after `delay`, cancelling any task under `key`.
    ///
    /// Calling again before the delay elapses restarts the wait, so a burst
    /// of calls runs only the last future.
    pub fn debounce<F>(&mut self, key: TaskKey, delay: Duration, future: F) -> &mut Self
    where
        F: Future<Output = Action> + Send + 'static,
    {
        self.start(key, Some(delay), future)
    }

    fn start<F>(&mut self, key: TaskKey, delay: Option<Duration>, future: F) -> &mut Self
    where
        F: Future<Output = Action> + Send + 'static,
    {
        if self.cancel(key) {
            tracing::debug!(task = %key, "replacing running task");
        }

        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            let action = future.await;
            let _ = tx.send(action);
        });

        self.tasks.insert(key, handle.abort_handle());
        self
    }

    /// Abort the task under `key`. Returns `true` if one was registered.
    pub fn cancel(&mut self, key: TaskKey) -> bool {
        match self.tasks.remove(&key) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    /// Whether a task is registered under `key` (it may have completed).
    pub fn is_running(&self, key: TaskKey) -> bool {
        self.tasks.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
