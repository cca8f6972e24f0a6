use crate::job_controller::state::TaskStore;
use actix_web::{web, HttpResponse, Responder};
use common::requests::TaskListResponse;

pub(crate) async fn process(store: web::Data<TaskStore>) -> impl Responder {
    let tasks = store.registry.read().await.list();
    HttpResponse::Ok().json(TaskListResponse { tasks })
}
