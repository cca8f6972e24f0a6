//! In-memory `TaskApi` and tokio-backed `Timer` for tests.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use crate::model::task::{TaskMeta, TaskState, TaskStatus};
use crate::requests::{ActiveTasks, DeleteResponse, LaunchRequest, LaunchResponse, ScopeNames};

use super::api::TaskApi;
use super::error::ApiError;
use super::timer::Timer;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Call {
    Launch(String),
    Status(String),
    Active(String),
    List,
    Delete(String),
    DeleteAll,
    ScopeNames,
}

#[derive(Default)]
struct MockState {
    tasks: BTreeMap<String, TaskStatus>,
    scripts: HashMap<String, VecDeque<Result<TaskStatus, ApiError>>>,
    active: HashMap<String, ActiveTasks>,
    scope_names: ScopeNames,
    failing_deletes: HashSet<String>,
    launch_error: Option<ApiError>,
    list_error: Option<ApiError>,
    calls: Vec<Call>,
    next_id: u32,
}

#[derive(Default)]
pub(crate) struct MockTaskApi {
    state: Mutex<MockState>,
}

impl MockTaskApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Stores a record returned by `list` and, once scripts run out, by `status`.
    pub(crate) fn insert(&self, status: TaskStatus) {
        let mut state = self.state.lock().unwrap();
        state.tasks.insert(status.task_id.clone(), status);
    }

    /// Queues answers for successive `status` reads of `task_id`.
    pub(crate) fn script(&self, task_id: &str, reads: Vec<Result<TaskStatus, ApiError>>) {
        let mut state = self.state.lock().unwrap();
        state
            .scripts
            .entry(task_id.to_string())
            .or_default()
            .extend(reads);
    }

    pub(crate) fn set_active(&self, scope: &str, category: &str, task_id: &str) {
        let mut state = self.state.lock().unwrap();
        state
            .active
            .entry(scope.to_string())
            .or_default()
            .insert(category.to_string(), task_id.to_string());
    }

    pub(crate) fn set_scope_names(&self, names: ScopeNames) {
        self.state.lock().unwrap().scope_names = names;
    }

    pub(crate) fn fail_delete(&self, task_id: &str) {
        let mut state = self.state.lock().unwrap();
        state.failing_deletes.insert(task_id.to_string());
    }

    pub(crate) fn fail_launch(&self, error: ApiError) {
        self.state.lock().unwrap().launch_error = Some(error);
    }

    pub(crate) fn fail_list(&self, error: Option<ApiError>) {
        self.state.lock().unwrap().list_error = error;
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub(crate) fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| predicate(call)).count()
    }

    pub(crate) fn task_ids(&self) -> Vec<String> {
        self.state.lock().unwrap().tasks.keys().cloned().collect()
    }
}

pub(crate) fn status(
    task_id: &str,
    state: TaskState,
    loaded: Option<u64>,
    total: Option<u64>,
) -> TaskStatus {
    TaskStatus {
        task_id: task_id.to_string(),
        status: state,
        loaded,
        total,
        message: None,
        error: None,
        updated_at: 1,
        meta: TaskMeta::new("proj-42", "refresh-subscribers"),
    }
}

pub(crate) fn failed(task_id: &str, error: &str) -> TaskStatus {
    TaskStatus {
        error: Some(error.to_string()),
        ..status(task_id, TaskState::Error, None, None)
    }
}

impl TaskApi for MockTaskApi {
    async fn launch(
        &self,
        endpoint: &str,
        request: &LaunchRequest,
    ) -> Result<LaunchResponse, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Launch(endpoint.to_string()));
        if let Some(error) = state.launch_error.clone() {
            return Err(error);
        }
        state.next_id += 1;
        let task_id = format!("task-{}", state.next_id);
        let category = endpoint.rsplit('/').next().unwrap_or_default();
        let meta = TaskMeta::new(request.scope.clone(), category);
        state
            .tasks
            .insert(task_id.clone(), TaskStatus::pending(task_id.clone(), meta));
        Ok(LaunchResponse { task_id })
    }

    async fn status(&self, task_id: &str) -> Result<TaskStatus, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Status(task_id.to_string()));
        if let Some(next) = state.scripts.get_mut(task_id).and_then(VecDeque::pop_front) {
            return next;
        }
        state.tasks.get(task_id).cloned().ok_or(ApiError::NotFound)
    }

    async fn active(&self, scope: &str) -> Result<ActiveTasks, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Active(scope.to_string()));
        Ok(state.active.get(scope).cloned().unwrap_or_default())
    }

    async fn list(&self) -> Result<Vec<TaskStatus>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::List);
        if let Some(error) = state.list_error.clone() {
            return Err(error);
        }
        Ok(state.tasks.values().cloned().collect())
    }

    async fn delete(&self, task_id: &str) -> Result<DeleteResponse, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Delete(task_id.to_string()));
        if state.failing_deletes.contains(task_id) {
            return Err(ApiError::Status {
                code: 500,
                body: "boom".to_string(),
            });
        }
        let success = state.tasks.remove(task_id).is_some();
        Ok(DeleteResponse { success })
    }

    async fn delete_all(&self) -> Result<DeleteResponse, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::DeleteAll);
        state.tasks.clear();
        Ok(DeleteResponse { success: true })
    }

    async fn scope_names(&self) -> Result<ScopeNames, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::ScopeNames);
        Ok(state.scope_names.clone())
    }
}

/// Sleeps on the tokio clock; pair with `start_paused = true`.
pub(crate) struct TokioTimer;

impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
