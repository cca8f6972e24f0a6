//! State of the task dashboard: every task record in the store, a selection,
//! and confirmed deletions.
//!
//! The dashboard reads the full list on its own timer and is not tied to any
//! running poll. Deletions go through an explicit confirm step
//! (`request_deletion`, then `take_confirmed`) and, once executed, are followed
//! by list reads until the store no longer reports the deleted ids.

use std::collections::BTreeSet;

use log::{debug, info, warn};

use crate::model::task::{is_global_scope, TaskState, TaskStatus};
use crate::requests::ScopeNames;

use super::api::TaskApi;
use super::config::PollingConfig;
use super::error::TaskError;
use super::timer::Timer;

/// Label shown for the cross-project scope when the directory has no name for it.
pub const GLOBAL_LABEL: &str = "Global";

/// A deletion waiting for, or carrying, operator confirmation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeletionRequest {
    One(String),
    Selected(Vec<String>),
    All,
}

impl DeletionRequest {
    /// Question put to the operator before executing.
    pub fn prompt(&self) -> String {
        match self {
            DeletionRequest::One(id) => format!("¿Eliminar la tarea {}?", id),
            DeletionRequest::Selected(ids) => {
                format!("¿Eliminar las {} tareas seleccionadas?", ids.len())
            }
            DeletionRequest::All => "¿Eliminar todas las tareas?".to_string(),
        }
    }

    fn ids(&self) -> &[String] {
        match self {
            DeletionRequest::One(id) => std::slice::from_ref(id),
            DeletionRequest::Selected(ids) => ids,
            DeletionRequest::All => &[],
        }
    }

    fn is_reflected_in(&self, tasks: &[TaskStatus]) -> bool {
        match self {
            DeletionRequest::All => tasks.is_empty(),
            _ => !tasks.iter().any(|t| self.ids().contains(&t.task_id)),
        }
    }
}

/// Result of an executed deletion.
#[derive(Clone, Debug, PartialEq)]
pub struct DeletionOutcome {
    /// Records removed; `None` for delete-all, where the store does not say.
    pub deleted: Option<usize>,
    /// Last list read during confirmation, if any read succeeded.
    pub tasks: Option<Vec<TaskStatus>>,
    /// Whether that list no longer shows the deleted records.
    pub confirmed: bool,
}

/// One rendered line of the dashboard.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskRow {
    pub task_id: String,
    pub scope_label: String,
    pub category: String,
    pub status: TaskState,
    pub percent: Option<u8>,
    /// Error text for failed tasks, otherwise the status message.
    pub detail: Option<String>,
    pub updated_at: u64,
    pub selected: bool,
}

#[derive(Debug, Default)]
pub struct TaskDashboard {
    tasks: Vec<TaskStatus>,
    selected: BTreeSet<String>,
    scope_names: ScopeNames,
    loaded_once: bool,
    refreshing: bool,
    /// Message of the last failed list read; cleared by the next good one.
    refresh_error: Option<String>,
    pending_deletion: Option<DeletionRequest>,
}

impl TaskDashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[TaskStatus] {
        &self.tasks
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn is_selected(&self, task_id: &str) -> bool {
        self.selected.contains(task_id)
    }

    /// The loading indicator only shows until the first list arrives.
    pub fn show_loading(&self) -> bool {
        !self.loaded_once
    }

    /// Marks a refresh as started. Returns `false` when one is already in flight.
    pub fn begin_refresh(&mut self) -> bool {
        if self.refreshing {
            debug!("dashboard refresh already in flight");
            return false;
        }
        self.refreshing = true;
        true
    }

    /// Ends the refresh started by [`begin_refresh`](Self::begin_refresh).
    ///
    /// A failed read leaves the current list untouched and is remembered in
    /// [`refresh_error`](Self::refresh_error) until a read succeeds.
    pub fn finish_refresh(
        &mut self,
        result: Result<Vec<TaskStatus>, TaskError>,
    ) -> Result<(), TaskError> {
        self.refreshing = false;
        match result {
            Ok(tasks) => {
                self.refresh_error = None;
                self.apply_list(tasks);
                Ok(())
            }
            Err(err) => {
                self.refresh_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn refresh_error(&self) -> Option<&str> {
        self.refresh_error.as_deref()
    }

    /// Replaces the list and drops selected ids that are no longer listed.
    pub fn apply_list(&mut self, mut tasks: Vec<TaskStatus>) {
        tasks.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.task_id.cmp(&b.task_id))
        });
        let before = self.selected.len();
        self.selected
            .retain(|id| tasks.iter().any(|task| &task.task_id == id));
        if self.selected.len() != before {
            debug!(
                "pruned {} vanished task(s) from the selection",
                before - self.selected.len()
            );
        }
        self.prune_pending_deletion(&tasks);
        self.tasks = tasks;
        self.loaded_once = true;
    }

    /// Drops ids a waiting deletion names that the store no longer lists.
    fn prune_pending_deletion(&mut self, tasks: &[TaskStatus]) {
        let listed = |id: &String| tasks.iter().any(|task| &task.task_id == id);
        self.pending_deletion = match self.pending_deletion.take() {
            Some(DeletionRequest::One(id)) if !listed(&id) => None,
            Some(DeletionRequest::Selected(mut ids)) => {
                ids.retain(|id| listed(id));
                (!ids.is_empty()).then_some(DeletionRequest::Selected(ids))
            }
            other => other,
        };
    }

    pub fn toggle(&mut self, task_id: &str) {
        if !self.selected.remove(task_id)
            && self.tasks.iter().any(|task| task.task_id == task_id)
        {
            self.selected.insert(task_id.to_string());
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.tasks.iter().map(|t| t.task_id.clone()).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn set_scope_names(&mut self, names: ScopeNames) {
        self.scope_names = names;
    }

    /// Display name of a scope: directory name, else "Global" for the sentinel,
    /// else the raw identifier.
    pub fn scope_label(&self, scope: &str) -> String {
        if let Some(name) = self.scope_names.get(scope) {
            return name.clone();
        }
        if is_global_scope(scope) {
            return GLOBAL_LABEL.to_string();
        }
        scope.to_string()
    }

    pub fn rows(&self) -> Vec<TaskRow> {
        self.tasks
            .iter()
            .map(|task| TaskRow {
                task_id: task.task_id.clone(),
                scope_label: self.scope_label(&task.meta.scope),
                category: task.meta.category.clone(),
                status: task.status,
                percent: task.percent(),
                detail: if task.status == TaskState::Error {
                    task.error.clone().or_else(|| task.message.clone())
                } else {
                    task.message.clone()
                },
                updated_at: task.updated_at,
                selected: self.is_selected(&task.task_id),
            })
            .collect()
    }

    pub fn pending_deletion(&self) -> Option<&DeletionRequest> {
        self.pending_deletion.as_ref()
    }

    /// Stores `request` until the operator confirms or cancels it.
    ///
    /// A selection request with nothing selected is ignored and returns `None`.
    /// The selection is captured now, not at confirmation time.
    pub fn request_deletion(&mut self, request: DeletionRequest) -> Option<&DeletionRequest> {
        let request = match request {
            DeletionRequest::Selected(ids) if ids.is_empty() => {
                if self.selected.is_empty() {
                    return None;
                }
                DeletionRequest::Selected(self.selected.iter().cloned().collect())
            }
            other => other,
        };
        self.pending_deletion = Some(request);
        self.pending_deletion.as_ref()
    }

    pub fn cancel_deletion(&mut self) {
        self.pending_deletion = None;
    }

    /// Hands the confirmed request over for execution.
    pub fn take_confirmed(&mut self) -> Option<DeletionRequest> {
        self.pending_deletion.take()
    }

    /// Applies the list read while confirming a deletion.
    ///
    /// A failed deletion never reaches here, so the local list is only changed by
    /// what the store reports.
    pub fn finish_deletion(&mut self, outcome: DeletionOutcome) {
        if let Some(tasks) = outcome.tasks {
            self.apply_list(tasks);
        }
    }
}

/// Reads every task record in the store.
pub async fn fetch_tasks<A: TaskApi>(api: &A) -> Result<Vec<TaskStatus>, TaskError> {
    api.list()
        .await
        .map_err(|err| TaskError::transport("task list", err))
}

/// Reads the scope directory used for display labels.
pub async fn fetch_scope_names<A: TaskApi>(api: &A) -> Result<ScopeNames, TaskError> {
    api.scope_names()
        .await
        .map_err(|err| TaskError::transport("scope names", err))
}

/// Deletes what `request` names, then reads the list until the deletion shows.
///
/// Selected ids are deleted one call at a time. The first failing call stops the
/// batch and is reported as [`TaskError::Deletion`] with the number of records
/// already removed; those stay removed. A refused delete of a record the store
/// no longer lists counts as done elsewhere and the batch goes on.
///
/// The confirmation reads every `confirm_interval`, up to `confirm_timeout`. Not
/// seeing the deletion within that bound is logged and is not an error.
pub async fn execute_deletion<A: TaskApi, T: Timer>(
    api: &A,
    timer: &T,
    config: &PollingConfig,
    request: &DeletionRequest,
) -> Result<DeletionOutcome, TaskError> {
    let deleted = match request {
        DeletionRequest::All => {
            let response = api.delete_all().await.map_err(|err| TaskError::Deletion {
                deleted: 0,
                reason: err.to_string(),
            })?;
            if !response.success {
                return Err(TaskError::Deletion {
                    deleted: 0,
                    reason: "the store refused to delete all tasks".to_string(),
                });
            }
            info!("deleted all task records");
            None
        }
        _ => {
            let mut deleted = 0;
            for task_id in request.ids() {
                let response = api.delete(task_id).await.map_err(|err| TaskError::Deletion {
                    deleted,
                    reason: format!("task {}: {}", task_id, err),
                })?;
                if response.success {
                    deleted += 1;
                } else if is_listed(api, task_id).await {
                    return Err(TaskError::Deletion {
                        deleted,
                        reason: format!("task {} was not deleted", task_id),
                    });
                } else {
                    debug!("task {} was already gone", task_id);
                }
            }
            info!("deleted {} task record(s)", deleted);
            Some(deleted)
        }
    };

    let mut last = None;
    for _ in 0..config.confirm_attempts() {
        timer.sleep(config.confirm_interval).await;
        match fetch_tasks(api).await {
            Ok(tasks) => {
                let confirmed = request.is_reflected_in(&tasks);
                last = Some(tasks);
                if confirmed {
                    return Ok(DeletionOutcome {
                        deleted,
                        tasks: last,
                        confirmed: true,
                    });
                }
            }
            Err(err) => debug!("confirmation read failed: {}", err),
        }
    }

    warn!(
        "deletion not visible after {:?}; continuing with the last list",
        config.confirm_timeout
    );
    Ok(DeletionOutcome {
        deleted,
        tasks: last,
        confirmed: false,
    })
}

/// Whether the store still lists `task_id`. An unreadable list counts as listed.
async fn is_listed<A: TaskApi>(api: &A, task_id: &str) -> bool {
    match fetch_tasks(api).await {
        Ok(tasks) => tasks.iter().any(|task| task.task_id == task_id),
        Err(err) => {
            debug!("could not check task {}: {}", task_id, err);
            true
        }
    }
}
