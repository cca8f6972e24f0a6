use std::future::Future;

use crate::model::task::TaskStatus;
use crate::requests::{ActiveTasks, DeleteResponse, LaunchRequest, LaunchResponse, ScopeNames};

use super::error::ApiError;

/// Transport for the task HTTP API.
///
/// Implementations map a 404 to [`ApiError::NotFound`] and any other non-2xx
/// answer to [`ApiError::Status`]. Futures are not required to be `Send`: the
/// browser implementation runs on a single-threaded executor.
pub trait TaskApi {
    /// `POST {endpoint}`.
    fn launch(
        &self,
        endpoint: &str,
        request: &LaunchRequest,
    ) -> impl Future<Output = Result<LaunchResponse, ApiError>>;

    /// `GET /api/tasks/status/{task_id}`.
    fn status(&self, task_id: &str) -> impl Future<Output = Result<TaskStatus, ApiError>>;

    /// `GET /api/tasks/active?scope={scope}`.
    fn active(&self, scope: &str) -> impl Future<Output = Result<ActiveTasks, ApiError>>;

    /// `GET /api/tasks`.
    fn list(&self) -> impl Future<Output = Result<Vec<TaskStatus>, ApiError>>;

    /// `DELETE /api/tasks/{task_id}`.
    fn delete(&self, task_id: &str) -> impl Future<Output = Result<DeleteResponse, ApiError>>;

    /// `DELETE /api/tasks`.
    fn delete_all(&self) -> impl Future<Output = Result<DeleteResponse, ApiError>>;

    /// `GET /api/scopes`.
    fn scope_names(&self) -> impl Future<Output = Result<ScopeNames, ApiError>>;
}

impl<A: TaskApi + ?Sized> TaskApi for &A {
    fn launch(
        &self,
        endpoint: &str,
        request: &LaunchRequest,
    ) -> impl Future<Output = Result<LaunchResponse, ApiError>> {
        (**self).launch(endpoint, request)
    }

    fn status(&self, task_id: &str) -> impl Future<Output = Result<TaskStatus, ApiError>> {
        (**self).status(task_id)
    }

    fn active(&self, scope: &str) -> impl Future<Output = Result<ActiveTasks, ApiError>> {
        (**self).active(scope)
    }

    fn list(&self) -> impl Future<Output = Result<Vec<TaskStatus>, ApiError>> {
        (**self).list()
    }

    fn delete(&self, task_id: &str) -> impl Future<Output = Result<DeleteResponse, ApiError>> {
        (**self).delete(task_id)
    }

    fn delete_all(&self) -> impl Future<Output = Result<DeleteResponse, ApiError>> {
        (**self).delete_all()
    }

    fn scope_names(&self) -> impl Future<Output = Result<ScopeNames, ApiError>> {
        (**self).scope_names()
    }
}
