//! Job Status Store: the shared registry of background task records.
//!
//! The main components are:
//! - `TaskStore`: a clonable handle holding the registry and the update channel.
//!   It is injected into the Actix application state in `main.rs`.
//! - `TaskRegistry`: task records keyed by id, plus the `(scope, category)` index
//!   of the task currently running for that pair.
//! - `TaskUpdate`: a progress report sent by an executor.
//! - `start_task_updater`: the single consumer applying `TaskUpdate`s in order.
//!
//! Executors never touch the registry directly; they only send updates. Request
//! handlers read the registry, register new tasks and delete records.

use common::model::task::{normalize_scope, TaskMeta, TaskState, TaskStatus};
use common::requests::ActiveTasks;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

/// A thread-safe, shareable handle to the task registry.
#[derive(Clone)]
pub struct TaskStore {
    /// The single source of truth for every task record and the active index.
    pub registry: Arc<RwLock<TaskRegistry>>,

    /// Executors push their `TaskUpdate`s here; `start_task_updater` applies them.
    pub tx: mpsc::Sender<TaskUpdate>,
}

impl TaskStore {
    pub fn new(tx: mpsc::Sender<TaskUpdate>) -> Self {
        Self {
            registry: Arc::new(RwLock::new(TaskRegistry::default())),
            tx,
        }
    }
}

/// Change reported by an executor.
#[derive(Clone, Debug, PartialEq)]
pub enum TaskChange {
    Progress {
        state: TaskState,
        loaded: Option<u64>,
        total: Option<u64>,
        message: Option<String>,
    },
    Done {
        message: Option<String>,
    },
    Failed {
        error: String,
    },
}

impl TaskChange {
    fn state(&self) -> TaskState {
        match self {
            TaskChange::Progress { state, .. } => *state,
            TaskChange::Done { .. } => TaskState::Done,
            TaskChange::Failed { .. } => TaskState::Error,
        }
    }
}

/// A status update for one task, sent by the executor running it.
#[derive(Debug)]
pub struct TaskUpdate {
    pub(crate) task_id: String,
    pub(crate) change: TaskChange,
}

/// Outcome of asking the registry to start a task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Registration {
    /// A new `pending` record was created; its executor must be started.
    Started(String),
    /// A task is already running for the pair; no record was created.
    Existing(String),
}

/// Outcome of applying an update.
#[derive(Debug, PartialEq, Eq)]
pub enum Applied {
    Updated,
    /// The record was deleted; the write is dropped and nothing is recreated.
    Missing,
    /// The update would move the record backwards or out of a terminal state.
    Rejected,
}

#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: HashMap<String, TaskStatus>,
    /// `(scope, category)` to the id of its non-terminal task.
    active: HashMap<(String, String), String>,
}

impl TaskRegistry {
    /// Creates a `pending` record for `(scope, category)` unless one is running.
    ///
    /// This check-and-insert is what guarantees at most one active task per pair.
    pub fn register(&mut self, scope: &str, category: &str, now: u64) -> Registration {
        let key = (normalize_scope(scope), category.to_string());
        if let Some(existing) = self.active.get(&key) {
            return Registration::Existing(existing.clone());
        }

        let task_id = Uuid::new_v4().to_string();
        let meta = TaskMeta::new(key.0.clone(), key.1.clone());
        let mut status = TaskStatus::pending(task_id.clone(), meta);
        status.updated_at = now;
        self.tasks.insert(task_id.clone(), status);
        self.active.insert(key, task_id.clone());
        Registration::Started(task_id)
    }

    pub fn get(&self, task_id: &str) -> Option<&TaskStatus> {
        self.tasks.get(task_id)
    }

    pub fn list(&self) -> Vec<TaskStatus> {
        self.tasks.values().cloned().collect()
    }

    /// Category to running task id, for one scope.
    pub fn active_for(&self, scope: &str) -> ActiveTasks {
        let scope = normalize_scope(scope);
        self.active
            .iter()
            .filter(|((s, _), _)| *s == scope)
            .map(|((_, category), id)| (category.clone(), id.clone()))
            .collect()
    }

    /// Deletes a record whatever its state. The job itself keeps running.
    pub fn remove(&mut self, task_id: &str) -> bool {
        let removed = self.tasks.remove(task_id).is_some();
        if removed {
            self.active.retain(|_, id| id != task_id);
        }
        removed
    }

    pub fn clear(&mut self) -> usize {
        let count = self.tasks.len();
        self.tasks.clear();
        self.active.clear();
        count
    }

    /// Applies an executor update, keeping transitions and counters monotonic.
    pub fn apply(&mut self, update: TaskUpdate, now: u64) -> Applied {
        let Some(record) = self.tasks.get_mut(&update.task_id) else {
            return Applied::Missing;
        };
        let next = update.change.state();
        if !record.status.can_transition_to(next) {
            return Applied::Rejected;
        }

        match update.change {
            TaskChange::Progress {
                state,
                loaded,
                total,
                message,
            } => {
                record.status = state;
                record.loaded = match (record.loaded, loaded) {
                    (Some(old), Some(new)) => Some(old.max(new)),
                    (old, new) => new.or(old),
                };
                record.total = total.or(record.total);
                if message.is_some() {
                    record.message = message;
                }
            }
            TaskChange::Done { message } => {
                record.status = TaskState::Done;
                if message.is_some() {
                    record.message = message;
                }
            }
            TaskChange::Failed { error } => {
                record.status = TaskState::Error;
                record.error = Some(error);
            }
        }
        record.updated_at = now;

        if record.status.is_terminal() {
            let task_id = record.task_id.clone();
            self.active.retain(|_, id| *id != task_id);
        }
        Applied::Updated
    }
}

pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Starts the central task updater.
///
/// Spawned once as a long-running task in `main.rs`. Updates are applied in the
/// order received, each under a short write lock.
pub async fn start_task_updater(store: TaskStore, mut rx: mpsc::Receiver<TaskUpdate>) {
    while let Some(update) = rx.recv().await {
        let task_id = update.task_id.clone();
        let mut registry = store.registry.write().await;
        match registry.apply(update, now_millis()) {
            Applied::Updated => debug!("task {} updated", task_id),
            Applied::Missing => info!("dropping update for deleted task {}", task_id),
            Applied::Rejected => warn!("rejected out-of-order update for task {}", task_id),
        }
    }
}
