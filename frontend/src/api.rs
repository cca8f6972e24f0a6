//! Browser implementations of the task transport and timer.
//!
//! `HttpTaskApi` talks to the backend through `gloo_net` on the page origin and
//! `GlooTimer` sleeps on `setTimeout`. Both are cheap to clone and are handed to
//! the pollers and the dashboard by value.

use std::future::Future;
use std::time::Duration;

use common::model::task::TaskStatus;
use common::requests::{
    ActiveTasks, DeleteResponse, LaunchRequest, LaunchResponse, ScopeNames, TaskListResponse,
};
use common::tasks::{ApiError, TaskApi, Timer};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HttpTaskApi {
    /// Prefix put before every path; empty for same-origin requests.
    base: String,
}

impl HttpTaskApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

/// Turns a `gloo_net` result into the decoded body or an `ApiError`.
async fn read_json<T: DeserializeOwned>(
    response: Result<Response, gloo_net::Error>,
) -> Result<T, ApiError> {
    let response = response.map_err(|err| ApiError::Network(err.to_string()))?;
    match response.status() {
        404 => Err(ApiError::NotFound),
        code if !response.ok() => {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Status { code, body })
        }
        _ => response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string())),
    }
}

impl TaskApi for HttpTaskApi {
    async fn launch(
        &self,
        endpoint: &str,
        request: &LaunchRequest,
    ) -> Result<LaunchResponse, ApiError> {
        let request = Request::post(&self.url(endpoint))
            .json(request)
            .map_err(|err| ApiError::Network(err.to_string()))?;
        read_json(request.send().await).await
    }

    async fn status(&self, task_id: &str) -> Result<TaskStatus, ApiError> {
        let url = self.url(&format!("/api/tasks/status/{}", task_id));
        read_json(Request::get(&url).send().await).await
    }

    async fn active(&self, scope: &str) -> Result<ActiveTasks, ApiError> {
        let request = Request::get(&self.url("/api/tasks/active")).query([("scope", scope)]);
        read_json(request.send().await).await
    }

    async fn list(&self) -> Result<Vec<TaskStatus>, ApiError> {
        let response: TaskListResponse =
            read_json(Request::get(&self.url("/api/tasks")).send().await).await?;
        Ok(response.tasks)
    }

    async fn delete(&self, task_id: &str) -> Result<DeleteResponse, ApiError> {
        let url = self.url(&format!("/api/tasks/{}", task_id));
        read_json(Request::delete(&url).send().await).await
    }

    async fn delete_all(&self) -> Result<DeleteResponse, ApiError> {
        read_json(Request::delete(&self.url("/api/tasks")).send().await).await
    }

    async fn scope_names(&self) -> Result<ScopeNames, ApiError> {
        read_json(Request::get(&self.url("/api/scopes")).send().await).await
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTimer;

impl Timer for GlooTimer {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis)
    }
}
