//! Status record of a long-running server-side task.
//!
//! A `TaskStatus` is created by the store when a job is launched, mutated only by
//! the job executor, and read by both the client poller and the task dashboard.
//! The JSON shape is shared verbatim between the backend and the frontend:
//!
//! ```json
//! {
//!   "taskId": "6f0c...",
//!   "status": "processing",
//!   "loaded": 40,
//!   "total": 100,
//!   "message": "Procesando lote 4",
//!   "updatedAt": 1760770000000,
//!   "meta": { "scope": "proj-42", "category": "refresh-subscribers" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Scope used by jobs that are not tied to a single project.
pub const GLOBAL_SCOPE: &str = "GLOBAL";

/// Returns `true` when `scope` names the cross-project sentinel scope.
pub fn is_global_scope(scope: &str) -> bool {
    scope.eq_ignore_ascii_case(GLOBAL_SCOPE)
}

/// Canonical spelling of a scope: the sentinel in upper case, anything else as is.
pub fn normalize_scope(scope: &str) -> String {
    let scope = scope.trim();
    if is_global_scope(scope) {
        GLOBAL_SCOPE.to_string()
    } else {
        scope.to_string()
    }
}

/// Job categories shipped with the console.
pub mod categories {
    pub const REFRESH_SUBSCRIBERS: &str = "refresh-subscribers";
    pub const SYNC_ADMINS_BULK: &str = "sync_admins_bulk";

    /// All categories the backend registers an executor for.
    pub const ALL: [&str; 2] = [REFRESH_SUBSCRIBERS, SYNC_ADMINS_BULK];
}

/// Lifecycle state of a task.
///
/// Transitions run `Pending -> Fetching -> Processing -> Done`, with `Error`
/// reachable from any non-terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Pending,
    Fetching,
    Processing,
    Done,
    Error,
}

impl TaskState {
    /// `Done` and `Error` never transition again.
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Done | TaskState::Error)
    }

    /// Position in the partial order observed by clients.
    ///
    /// `Fetching` and `Processing` share a rank: a client only needs to know the
    /// task has started. `Error` ranks above everything so nothing follows it.
    pub fn rank(self) -> u8 {
        match self {
            TaskState::Pending => 0,
            TaskState::Fetching | TaskState::Processing => 1,
            TaskState::Done => 2,
            TaskState::Error => 3,
        }
    }

    /// Strict order enforced by the store when applying executor updates.
    pub fn can_transition_to(self, next: TaskState) -> bool {
        use TaskState::*;
        match (self, next) {
            (Done | Error, _) => false,
            (_, Error) => true,
            (Pending, Fetching | Processing | Done) => true,
            (Fetching, Fetching | Processing | Done) => true,
            (Processing, Processing | Done) => true,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskState::Pending => "pending",
            TaskState::Fetching => "fetching",
            TaskState::Processing => "processing",
            TaskState::Done => "done",
            TaskState::Error => "error",
        }
    }
}

/// Free-form scope descriptor attached to every task.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskMeta {
    /// Project identifier, or [`GLOBAL_SCOPE`].
    #[serde(default)]
    pub scope: String,
    /// Kind of job, e.g. `refresh-subscribers`.
    #[serde(default)]
    pub category: String,
    /// Any additional keys the store attached; kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TaskMeta {
    pub fn new(scope: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            category: category.into(),
            extra: Map::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatus {
    pub task_id: String,
    pub status: TaskState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loaded: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Milliseconds since the Unix epoch. `0` for records synthesized client-side.
    #[serde(default)]
    pub updated_at: u64,
    #[serde(default)]
    pub meta: TaskMeta,
}

impl TaskStatus {
    /// Record in `pending` state with no progress, as emitted before the first read.
    pub fn pending(task_id: impl Into<String>, meta: TaskMeta) -> Self {
        Self {
            task_id: task_id.into(),
            status: TaskState::Pending,
            loaded: None,
            total: None,
            message: None,
            error: None,
            updated_at: 0,
            meta,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Completion percentage, when both counters are known.
    pub fn percent(&self) -> Option<u8> {
        match (self.loaded, self.total) {
            (Some(loaded), Some(total)) if total > 0 => {
                Some((loaded.saturating_mul(100) / total).min(100) as u8)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_wire_shape() {
        let raw = json!({
            "taskId": "t-1",
            "status": "fetching",
            "loaded": 0,
            "total": 100,
            "updatedAt": 42,
            "meta": { "scope": "proj-42", "category": "refresh-subscribers", "requestedBy": "ops" }
        });

        let status: TaskStatus = serde_json::from_value(raw).unwrap();
        assert_eq!(status.task_id, "t-1");
        assert_eq!(status.status, TaskState::Fetching);
        assert_eq!(status.percent(), Some(0));
        assert_eq!(status.meta.scope, "proj-42");
        assert_eq!(status.meta.extra.get("requestedBy"), Some(&json!("ops")));

        let back = serde_json::to_value(&status).unwrap();
        assert_eq!(back["meta"]["requestedBy"], "ops");
        assert!(back.get("error").is_none());
    }

    #[test]
    fn test_minimal_status_defaults() {
        let status: TaskStatus =
            serde_json::from_value(json!({ "taskId": "t-2", "status": "done" })).unwrap();
        assert!(status.is_terminal());
        assert_eq!(status.updated_at, 0);
        assert_eq!(status.meta, TaskMeta::default());
        assert_eq!(status.percent(), None);
    }

    #[test]
    fn test_percent_is_clamped() {
        let mut status = TaskStatus::pending("t", TaskMeta::default());
        status.loaded = Some(150);
        status.total = Some(100);
        assert_eq!(status.percent(), Some(100));
        status.total = Some(0);
        assert_eq!(status.percent(), None);
    }

    #[test]
    fn test_store_transitions() {
        use TaskState::*;
        assert!(Pending.can_transition_to(Fetching));
        assert!(Fetching.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Error));
        assert!(!Processing.can_transition_to(Fetching));
        assert!(!Done.can_transition_to(Error));
        assert!(!Error.can_transition_to(Done));
    }

    #[test]
    fn test_rank_order() {
        assert!(TaskState::Pending.rank() < TaskState::Fetching.rank());
        assert_eq!(TaskState::Fetching.rank(), TaskState::Processing.rank());
        assert!(TaskState::Processing.rank() < TaskState::Done.rank());
    }

    #[test]
    fn test_global_scope_is_case_insensitive() {
        assert!(is_global_scope("GLOBAL"));
        assert!(is_global_scope("global"));
        assert!(!is_global_scope("proj-42"));
        assert_eq!(normalize_scope("global"), GLOBAL_SCOPE);
        assert_eq!(normalize_scope(" proj-42 "), "proj-42");
    }
}
