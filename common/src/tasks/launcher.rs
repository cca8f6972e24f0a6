//! Starting jobs.

use log::{info, warn};

use crate::requests::LaunchRequest;

use super::api::TaskApi;
use super::error::{ApiError, TaskError};

/// Conventional launch endpoint of a job category.
pub fn launch_endpoint(category: &str) -> String {
    format!("/api/jobs/{}", category)
}

/// Starts a job and returns its task id as soon as the store has assigned one.
///
/// The job keeps running server-side after this returns. Rejections are
/// reported as [`TaskError::Launch`] and are not retried.
pub async fn launch<A: TaskApi>(
    api: &A,
    endpoint: &str,
    request: &LaunchRequest,
) -> Result<String, TaskError> {
    let response = api.launch(endpoint, request).await.map_err(|err| {
        warn!("launch {} for scope {} rejected: {}", endpoint, request.scope, err);
        TaskError::Launch(err)
    })?;

    if response.task_id.trim().is_empty() {
        return Err(TaskError::Launch(ApiError::Decode(
            "empty task id".to_string(),
        )));
    }

    info!(
        "launched {} for scope {} as task {}",
        endpoint, request.scope, response.task_id
    );
    Ok(response.task_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::mock::{Call, MockTaskApi};

    #[tokio::test]
    async fn test_launch_returns_task_id() {
        let api = MockTaskApi::new();
        let request = LaunchRequest::new("proj-42");

        let task_id = launch(&api, &launch_endpoint("refresh-subscribers"), &request)
            .await
            .unwrap();

        assert_eq!(task_id, "task-1");
        assert_eq!(
            api.calls(),
            vec![Call::Launch("/api/jobs/refresh-subscribers".to_string())]
        );
    }

    #[tokio::test]
    async fn test_launch_rejection_is_not_retried() {
        let api = MockTaskApi::new();
        api.fail_launch(ApiError::Status {
            code: 403,
            body: "forbidden".to_string(),
        });

        let err = launch(&api, "/api/jobs/sync_admins_bulk", &LaunchRequest::new("GLOBAL"))
            .await
            .unwrap_err();

        assert!(matches!(err, TaskError::Launch(ApiError::Status { code: 403, .. })));
        assert_eq!(api.calls().len(), 1);
    }
}
