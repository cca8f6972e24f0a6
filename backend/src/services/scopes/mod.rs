//! Scope directory: display names for project identifiers.
//!
//! - `GET /api/scopes`: `{ "<scope id>": "<display name>", ... }` as configured
//!   through `TASK_CONSOLE_SCOPES`. The task dashboard reads it once on mount.

use crate::config::ServerConfig;
use actix_web::web::{get, scope};
use actix_web::{web, HttpResponse, Responder, Scope};

const API_PATH: &str = "/api/scopes";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(process))
}

async fn process(config: web::Data<ServerConfig>) -> impl Responder {
    HttpResponse::Ok().json(&config.scopes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_scopes;
    use actix_web::{test, App};
    use common::requests::ScopeNames;

    #[actix_web::test]
    async fn test_serves_configured_names() {
        let config = ServerConfig {
            scopes: parse_scopes("proj-42=Acme Social"),
            ..ServerConfig::default()
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/scopes").to_request();
        let names: ScopeNames = test::call_and_read_body_json(&app, req).await;
        assert_eq!(names.get("proj-42").map(String::as_str), Some("Acme Social"));
    }
}
