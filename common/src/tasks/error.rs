use thiserror::Error;

/// Failure reported by a `TaskApi` transport.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx response other than 404.
    #[error("server responded {code}: {body}")]
    Status { code: u16, body: String },
    #[error("resource not found")]
    NotFound,
    /// The response body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Terminal, operator-facing failure of a task operation.
///
/// None of these are retried by this layer; the console turns them into a
/// notification and stops the loop that produced them.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TaskError {
    /// The job could not be started. No task id exists.
    #[error("could not start job: {0}")]
    Launch(ApiError),
    /// A read needed to observe tasks failed at the transport level.
    #[error("{context}: {source}")]
    Transport { context: String, source: ApiError },
    /// The job itself ended in `error`; the executor's message, verbatim.
    #[error("{0}")]
    Job(String),
    /// The status record disappeared while it was being polled.
    #[error("task {0} no longer exists")]
    NotFound(String),
    /// A delete call failed. `deleted` counts records removed before the failure.
    #[error("deletion failed after {deleted} record(s): {reason}")]
    Deletion { deleted: usize, reason: String },
    /// The observer cancelled the poll.
    #[error("polling cancelled")]
    Cancelled,
}

impl TaskError {
    pub(crate) fn transport(context: impl Into<String>, source: ApiError) -> Self {
        TaskError::Transport {
            context: context.into(),
            source,
        }
    }
}
