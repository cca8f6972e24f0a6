//! Fixed-interval status polling of a single task.

use std::time::Duration;

use log::{debug, info, warn};

use crate::model::task::{TaskMeta, TaskState, TaskStatus};

use super::api::TaskApi;
use super::cancel::CancelSignal;
use super::error::{ApiError, TaskError};
use super::timer::Timer;

/// Polls task status records.
///
/// A `Poller` only holds configuration; every call to [`Poller::poll`] keeps its
/// own timer and progress tracking, so any number of polls can run side by side.
pub struct Poller<A, T> {
    api: A,
    timer: T,
    interval: Duration,
}

impl<A: TaskApi, T: Timer> Poller<A, T> {
    pub fn new(api: A, timer: T, interval: Duration) -> Self {
        Self {
            api,
            timer,
            interval,
        }
    }

    /// Observes `task_id` until it reaches a terminal state.
    ///
    /// `on_progress` first receives a synthetic `pending` record, then one record
    /// per read. Reads are issued one interval apart and never overlap.
    ///
    /// Settles exactly once:
    /// - `Ok(final)` after delivering the `done` record;
    /// - `Err(TaskError::Job)` with the executor's message when the task ends in
    ///   `error` (that record is not delivered);
    /// - `Err(TaskError::NotFound)` when the record was deleted;
    /// - `Err(TaskError::Transport)` on any other read failure;
    /// - `Err(TaskError::Cancelled)` when `cancel` fires.
    ///
    /// The pending delay is dropped before the result is returned on every path.
    pub async fn poll<F>(
        &self,
        task_id: &str,
        cancel: CancelSignal,
        mut on_progress: F,
    ) -> Result<TaskStatus, TaskError>
    where
        F: FnMut(&TaskStatus),
    {
        match cancel.guard(self.poll_loop(task_id, &mut on_progress)).await {
            Ok(outcome) => outcome,
            Err(_aborted) => {
                debug!("polling of task {} cancelled", task_id);
                Err(TaskError::Cancelled)
            }
        }
    }

    async fn poll_loop<F>(
        &self,
        task_id: &str,
        on_progress: &mut F,
    ) -> Result<TaskStatus, TaskError>
    where
        F: FnMut(&TaskStatus),
    {
        let mut progress = ProgressTracker::default();
        progress.deliver(&TaskStatus::pending(task_id, TaskMeta::default()), on_progress);

        loop {
            self.timer.sleep(self.interval).await;

            let status = match self.api.status(task_id).await {
                Ok(status) => status,
                Err(ApiError::NotFound) => {
                    info!("task {} disappeared while polling", task_id);
                    return Err(TaskError::NotFound(task_id.to_string()));
                }
                Err(err) => {
                    warn!("status read for task {} failed: {}", task_id, err);
                    return Err(TaskError::transport(format!("task {}", task_id), err));
                }
            };

            match status.status {
                TaskState::Error => {
                    let message = status
                        .error
                        .or(status.message)
                        .unwrap_or_else(|| "job failed".to_string());
                    warn!("task {} failed: {}", task_id, message);
                    return Err(TaskError::Job(message));
                }
                TaskState::Done => {
                    progress.deliver(&status, on_progress);
                    info!("task {} done", task_id);
                    return Ok(status);
                }
                _ => progress.deliver(&status, on_progress),
            }
        }
    }
}

/// Keeps the delivered status sequence monotonic.
#[derive(Default)]
struct ProgressTracker {
    last_rank: Option<u8>,
}

impl ProgressTracker {
    fn deliver<F: FnMut(&TaskStatus)>(&mut self, status: &TaskStatus, on_progress: &mut F) {
        let rank = status.status.rank();
        if self.last_rank.is_some_and(|last| rank < last) {
            debug!(
                "ignoring {} for task {} after a later state",
                status.status.as_str(),
                status.task_id
            );
            return;
        }
        self.last_rank = Some(rank);
        on_progress(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::cancel::cancel_pair;
    use crate::tasks::mock::{failed, status, Call, MockTaskApi, TokioTimer};

    fn poller(api: &MockTaskApi) -> Poller<&MockTaskApi, TokioTimer> {
        Poller::new(api, TokioTimer, Duration::from_millis(1000))
    }

    fn status_reads(api: &MockTaskApi) -> usize {
        api.count(|call| matches!(call, Call::Status(_)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_until_done() {
        let api = MockTaskApi::new();
        api.script(
            "t-1",
            vec![
                Ok(status("t-1", TaskState::Fetching, Some(0), Some(100))),
                Ok(status("t-1", TaskState::Processing, Some(30), Some(100))),
                Ok(status("t-1", TaskState::Processing, Some(70), Some(100))),
                Ok(status("t-1", TaskState::Processing, Some(100), Some(100))),
                Ok(status("t-1", TaskState::Done, Some(100), Some(100))),
            ],
        );

        let (_handle, signal) = cancel_pair();
        let mut seen = Vec::new();
        let result = poller(&api)
            .poll("t-1", signal, |s| seen.push((s.status, s.loaded)))
            .await
            .unwrap();

        assert_eq!(result.status, TaskState::Done);
        assert_eq!(
            seen,
            vec![
                (TaskState::Pending, None),
                (TaskState::Fetching, Some(0)),
                (TaskState::Processing, Some(30)),
                (TaskState::Processing, Some(70)),
                (TaskState::Processing, Some(100)),
                (TaskState::Done, Some(100)),
            ]
        );
        assert_eq!(status_reads(&api), 5);

        // Nothing keeps reading once the poll has settled.
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(status_reads(&api), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_is_reported_before_first_read() {
        let api = MockTaskApi::new();
        api.script("t-1", vec![Ok(status("t-1", TaskState::Done, None, None))]);

        let (_handle, signal) = cancel_pair();
        let mut reads_at_first_callback = None;
        poller(&api)
            .poll("t-1", signal, |s| {
                if reads_at_first_callback.is_none() {
                    assert_eq!(s.status, TaskState::Pending);
                    reads_at_first_callback = Some(status_reads(&api));
                }
            })
            .await
            .unwrap();

        assert_eq!(reads_at_first_callback, Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_job_error_rejects_with_message() {
        let api = MockTaskApi::new();
        api.script("t-1", vec![Ok(failed("t-1", "rate limited"))]);

        let (_handle, signal) = cancel_pair();
        let mut seen = Vec::new();
        let err = poller(&api)
            .poll("t-1", signal, |s| seen.push(s.status))
            .await
            .unwrap_err();

        assert_eq!(err, TaskError::Job("rate limited".to_string()));
        assert_eq!(err.to_string(), "rate limited");
        assert_eq!(seen, vec![TaskState::Pending]);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(status_reads(&api), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_failure_stops_polling() {
        let api = MockTaskApi::new();
        api.script(
            "t-1",
            vec![
                Ok(status("t-1", TaskState::Fetching, Some(0), Some(10))),
                Err(ApiError::Network("connection reset".to_string())),
            ],
        );

        let (_handle, signal) = cancel_pair();
        let err = poller(&api).poll("t-1", signal, |_| {}).await.unwrap_err();

        assert!(matches!(
            err,
            TaskError::Transport { source: ApiError::Network(_), .. }
        ));
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(status_reads(&api), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deleted_record_stops_polling() {
        let api = MockTaskApi::new();
        api.script(
            "t-1",
            vec![Ok(status("t-1", TaskState::Processing, Some(1), Some(10)))],
        );

        let (_handle, signal) = cancel_pair();
        let err = poller(&api).poll("t-1", signal, |_| {}).await.unwrap_err();

        assert_eq!(err, TaskError::NotFound("t-1".to_string()));
        assert_eq!(status_reads(&api), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_reads() {
        let api = MockTaskApi::new();
        api.insert(status("t-1", TaskState::Processing, Some(1), Some(10)));

        let (handle, signal) = cancel_pair();
        let poller = poller(&api);
        let (result, ()) = tokio::join!(poller.poll("t-1", signal, |_| {}), async {
            tokio::time::sleep(Duration::from_millis(2500)).await;
            handle.cancel();
        });

        assert_eq!(result.unwrap_err(), TaskError::Cancelled);
        assert_eq!(status_reads(&api), 2);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(status_reads(&api), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_regressions_are_not_delivered() {
        let api = MockTaskApi::new();
        api.script(
            "t-1",
            vec![
                Ok(status("t-1", TaskState::Processing, Some(5), Some(10))),
                Ok(status("t-1", TaskState::Pending, None, None)),
                Ok(status("t-1", TaskState::Done, Some(10), Some(10))),
            ],
        );

        let (_handle, signal) = cancel_pair();
        let mut ranks = Vec::new();
        poller(&api)
            .poll("t-1", signal, |s| ranks.push(s.status.rank()))
            .await
            .unwrap();

        assert_eq!(ranks, vec![0, 1, 2]);
        assert_eq!(status_reads(&api), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_polls_are_independent() {
        let api = MockTaskApi::new();
        api.script("a", vec![Ok(status("a", TaskState::Done, None, None))]);
        api.script(
            "b",
            vec![
                Ok(status("b", TaskState::Fetching, None, None)),
                Ok(failed("b", "quota exceeded")),
            ],
        );

        let poller = poller(&api);
        let (_ha, sa) = cancel_pair();
        let (_hb, sb) = cancel_pair();
        let (a, b) = tokio::join!(poller.poll("a", sa, |_| {}), poller.poll("b", sb, |_| {}));

        assert_eq!(a.unwrap().task_id, "a");
        assert_eq!(b.unwrap_err(), TaskError::Job("quota exceeded".to_string()));
        assert_eq!(api.count(|c| *c == Call::Status("a".to_string())), 1);
        assert_eq!(api.count(|c| *c == Call::Status("b".to_string())), 2);
    }
}
