use crate::job_controller::state::TaskStore;
use actix_web::{web, HttpResponse, Responder};

pub(crate) async fn process(
    task_id: web::Path<String>,
    store: web::Data<TaskStore>,
) -> impl Responder {
    get_task_status(task_id, store).await
}

async fn get_task_status(task_id: web::Path<String>, store: web::Data<TaskStore>) -> HttpResponse {
    let registry = store.registry.read().await;
    if let Some(status) = registry.get(&task_id.into_inner()) {
        HttpResponse::Ok().json(status)
    } else {
        HttpResponse::NotFound().body("Task ID not found")
    }
}
