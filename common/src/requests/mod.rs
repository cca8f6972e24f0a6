//! Request and response bodies of the task HTTP API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::task::TaskStatus;

/// Body of `POST /api/jobs/{category}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaunchRequest {
    /// Project identifier or the global sentinel.
    pub scope: String,
    /// Job-specific parameters, passed through to the executor.
    #[serde(default)]
    pub params: Value,
}

impl LaunchRequest {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            params: Value::Null,
        }
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchResponse {
    pub task_id: String,
}

/// Query string of `GET /api/tasks/active`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActiveQuery {
    pub scope: String,
}

/// Answer of `GET /api/tasks/active`: category to running task id.
pub type ActiveTasks = BTreeMap<String, String>;

/// Answer of `GET /api/scopes`: scope id to display name.
pub type ScopeNames = BTreeMap<String, String>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskStatus>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}
