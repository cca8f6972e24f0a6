//! # Job Launch Service
//!
//! `POST /api/jobs/{category}` starts a background job for a scope.
//!
//! ## Workflow:
//!
//! 1.  **Validation**: the category must be one the console knows and the scope
//!     must not be blank.
//!
//! 2.  **Registration**: the registry creates a `pending` record and indexes it
//!     under `(scope, category)`. If a task is already running for that pair, its
//!     id is returned instead and nothing new starts, so two tabs launching the
//!     same job converge on one task.
//!
//! 3.  **Background Processing**: a Tokio task runs the batch executor, which
//!     reports progress through the store's update channel. The handler has
//!     already answered with the task id by then; the client polls for the rest.

use crate::config::ServerConfig;
use crate::job_controller::executor::{run_batches, BatchPlan};
use crate::job_controller::state::{now_millis, Registration, TaskStore};
use actix_web::{web, HttpResponse, Responder};
use common::model::task::categories;
use common::requests::{LaunchRequest, LaunchResponse};
use log::info;
use std::time::Duration;

/// Why a launch was refused.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum LaunchRejection {
    UnknownCategory(String),
    BlankScope,
}

/// The Actix web handler for `POST /api/jobs/{category}`.
pub(crate) async fn process(
    store: web::Data<TaskStore>,
    config: web::Data<ServerConfig>,
    category: web::Path<String>,
    payload: web::Json<LaunchRequest>,
) -> impl Responder {
    match schedule_job(&store, config.step, &category, payload.into_inner()).await {
        Ok(task_id) => HttpResponse::Ok().json(LaunchResponse { task_id }),
        Err(LaunchRejection::UnknownCategory(category)) => {
            HttpResponse::NotFound().body(format!("Categoría de tarea desconocida: {}", category))
        }
        Err(LaunchRejection::BlankScope) => {
            HttpResponse::BadRequest().body("El alcance (scope) no puede estar vacío")
        }
    }
}

/// Registers the task and spawns its executor.
///
/// # Returns
/// The id of the new task, or of the task already running for the same pair.
pub(crate) async fn schedule_job(
    store: &TaskStore,
    step: Duration,
    category: &str,
    request: LaunchRequest,
) -> Result<String, LaunchRejection> {
    if !categories::ALL.contains(&category) {
        return Err(LaunchRejection::UnknownCategory(category.to_string()));
    }
    if request.scope.trim().is_empty() {
        return Err(LaunchRejection::BlankScope);
    }

    let registration = store
        .registry
        .write()
        .await
        .register(&request.scope, category, now_millis());

    match registration {
        Registration::Existing(task_id) => {
            info!(
                "{} already running for scope {} as task {}",
                category, request.scope, task_id
            );
            Ok(task_id)
        }
        Registration::Started(task_id) => {
            info!("starting {} for scope {} as task {}", category, request.scope, task_id);
            let plan = BatchPlan::from_params(&request.params, step);
            tokio::spawn(run_batches(store.tx.clone(), task_id.clone(), plan));
            Ok(task_id)
        }
    }
}
