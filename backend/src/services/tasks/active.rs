use crate::job_controller::state::TaskStore;
use actix_web::{web, HttpResponse, Responder};
use common::requests::ActiveQuery;

/// Answers with an empty map when nothing runs in the scope.
pub(crate) async fn process(
    query: web::Query<ActiveQuery>,
    store: web::Data<TaskStore>,
) -> impl Responder {
    let active = store.registry.read().await.active_for(&query.scope);
    HttpResponse::Ok().json(active)
}
