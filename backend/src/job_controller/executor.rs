//! Batch executor standing in for the real job workers.
//!
//! What a job actually does (scanning admins, refreshing subscriber lists) lives
//! outside this console. The executor here only walks a task through the
//! lifecycle the console observes: `fetching` with nothing loaded, `processing`
//! in fixed-size batches, then `done` (or `error` when asked to fail).

use super::state::{TaskChange, TaskUpdate};
use common::model::task::TaskState;
use log::{debug, info};
use serde_json::Value;
use std::time::Duration;
use tokio::sync::mpsc;

/// Shape of one executor run, read from the launch `params`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchPlan {
    pub total: u64,
    pub batch: u64,
    /// End in `error` once `loaded` reaches this value.
    pub fail_at: Option<u64>,
    pub step: Duration,
}

impl BatchPlan {
    pub const DEFAULT_TOTAL: u64 = 100;
    pub const DEFAULT_BATCH: u64 = 10;

    /// Reads `total`, `batch` and `fail_at` from `params`; anything missing or
    /// invalid falls back to the defaults.
    pub fn from_params(params: &Value, step: Duration) -> Self {
        let read = |key: &str| params.get(key).and_then(Value::as_u64);
        Self {
            total: read("total").unwrap_or(Self::DEFAULT_TOTAL),
            batch: read("batch").filter(|b| *b > 0).unwrap_or(Self::DEFAULT_BATCH),
            fail_at: read("fail_at"),
            step,
        }
    }
}

/// Runs `plan` for `task_id`, reporting every step on `tx`.
///
/// Stops early when the updater is gone.
pub async fn run_batches(tx: mpsc::Sender<TaskUpdate>, task_id: String, plan: BatchPlan) {
    let send = |change: TaskChange| {
        let tx = tx.clone();
        let task_id = task_id.clone();
        async move { tx.send(TaskUpdate { task_id, change }).await.is_ok() }
    };

    let fetching = TaskChange::Progress {
        state: TaskState::Fetching,
        loaded: Some(0),
        total: Some(plan.total),
        message: Some("Obteniendo datos".to_string()),
    };
    if !send(fetching).await {
        return;
    }

    let mut loaded = 0;
    while loaded < plan.total {
        tokio::time::sleep(plan.step).await;
        loaded = (loaded + plan.batch).min(plan.total);

        if let Some(fail_at) = plan.fail_at {
            if loaded >= fail_at {
                info!("task {} failing at {}/{}", task_id, loaded, plan.total);
                send(TaskChange::Failed {
                    error: format!("Error procesando el elemento {}", fail_at),
                })
                .await;
                return;
            }
        }

        let processing = TaskChange::Progress {
            state: TaskState::Processing,
            loaded: Some(loaded),
            total: Some(plan.total),
            message: Some(format!("Procesando {} de {}", loaded, plan.total)),
        };
        if !send(processing).await {
            debug!("updater closed; abandoning task {}", task_id);
            return;
        }
    }

    tokio::time::sleep(plan.step).await;
    send(TaskChange::Done {
        message: Some(format!("{} elementos procesados", plan.total)),
    })
    .await;
    info!("task {} finished", task_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn collect(plan: BatchPlan) -> Vec<TaskChange> {
        let (tx, mut rx) = mpsc::channel(64);
        run_batches(tx, "t-1".to_string(), plan).await;
        let mut changes = Vec::new();
        while let Ok(update) = rx.try_recv() {
            assert_eq!(update.task_id, "t-1");
            changes.push(update.change);
        }
        changes
    }

    #[test]
    fn test_plan_from_params() {
        let step = Duration::from_millis(1);
        let plan = BatchPlan::from_params(&json!({ "total": 30, "batch": 0, "fail_at": 20 }), step);
        assert_eq!(plan.total, 30);
        assert_eq!(plan.batch, BatchPlan::DEFAULT_BATCH);
        assert_eq!(plan.fail_at, Some(20));

        let plan = BatchPlan::from_params(&Value::Null, step);
        assert_eq!(plan.total, BatchPlan::DEFAULT_TOTAL);
        assert_eq!(plan.fail_at, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_reports_batches_then_done() {
        let params = json!({ "total": 25, "batch": 10 });
        let plan = BatchPlan::from_params(&params, Duration::from_millis(5));
        let changes = collect(plan).await;

        let loaded: Vec<Option<u64>> = changes
            .iter()
            .filter_map(|c| match c {
                TaskChange::Progress { loaded, .. } => Some(*loaded),
                _ => None,
            })
            .collect();
        assert_eq!(loaded, vec![Some(0), Some(10), Some(20), Some(25)]);
        assert!(matches!(
            changes.first(),
            Some(TaskChange::Progress { state: TaskState::Fetching, .. })
        ));
        assert!(matches!(changes.last(), Some(TaskChange::Done { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_can_end_in_error() {
        let params = json!({ "total": 50, "batch": 10, "fail_at": 20 });
        let plan = BatchPlan::from_params(&params, Duration::from_millis(5));
        let changes = collect(plan).await;

        assert_eq!(changes.len(), 3);
        assert_eq!(
            changes.last(),
            Some(&TaskChange::Failed {
                error: "Error procesando el elemento 20".to_string()
            })
        );
    }
}
