mod start;

use crate::services::jobs::start::process;
use actix_web::web;

const API_PATH: &str = "/api/jobs";

/// Configures and returns the Actix `Scope` for launching jobs.
///
/// `POST /api/jobs/{category}` with a `LaunchRequest` body answers
/// `{ "taskId": ... }` as soon as the task is registered.
pub fn configure_routes() -> actix_web::Scope {
    web::scope(API_PATH).route("/{category}", web::post().to(process))
}
