use crate::job_controller::state::TaskStore;
use actix_web::{web, HttpResponse, Responder};
use common::requests::DeleteResponse;
use log::info;

/// `success` is `false` when no record had that id.
pub(crate) async fn process_one(
    task_id: web::Path<String>,
    store: web::Data<TaskStore>,
) -> impl Responder {
    let task_id = task_id.into_inner();
    let success = store.registry.write().await.remove(&task_id);
    if success {
        info!("deleted task record {}", task_id);
    }
    HttpResponse::Ok().json(DeleteResponse { success })
}

pub(crate) async fn process_all(store: web::Data<TaskStore>) -> impl Responder {
    let count = store.registry.write().await.clear();
    info!("deleted all {} task record(s)", count);
    HttpResponse::Ok().json(DeleteResponse { success: true })
}
