//! Read and delete access to the task store.
//!
//! The provided routes are:
//! - `GET /api/tasks`: every task record, whatever its scope or state, wrapped
//!   as `{ "tasks": [...] }`. Feeds the task dashboard.
//!
//! - `DELETE /api/tasks`: removes every record. Running jobs are not stopped.
//!
//! - `GET /api/tasks/active?scope={scope}`: category to task id for the tasks
//!   still running in a scope. Lets a freshly mounted view resume a job instead
//!   of launching it again.
//!
//! - `GET /api/tasks/status/{task_id}`: the current `TaskStatus` of one task,
//!   or 404 once it has been deleted. Polled by the client while a job runs.
//!
//! - `DELETE /api/tasks/{task_id}`: removes one record. A running job keeps
//!   going, but its later progress reports are dropped.

use actix_web::web::{delete, get, scope};
use actix_web::Scope;

mod active;
mod delete;
mod get_status;
mod list;

const API_PATH: &str = "/api/tasks";

/// Configures and returns the Actix scope for task store routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", delete().to(delete::process_all))
        // Index of running tasks for one scope.
        .route("/active", get().to(active::process))
        .route("/status/{task_id}", get().to(get_status::process))
        .route("/{task_id}", delete().to(delete::process_one))
}
