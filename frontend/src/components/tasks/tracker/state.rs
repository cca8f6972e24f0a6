//! Component state for the task tracker.

use common::model::task::TaskStatus;
use common::tasks::{CancelHandle, PollingConfig};

use crate::api::HttpTaskApi;

pub struct TaskTrackerComponent {
    pub api: HttpTaskApi,
    pub config: PollingConfig,

    /// Task being observed, once resolved or launched.
    pub task_id: Option<String>,

    /// Latest status delivered by the poller.
    pub status: Option<TaskStatus>,

    /// A launch or a poll is in progress; the run button is disabled.
    pub busy: bool,

    /// Message of the last failure, shown under the progress bar.
    pub error: Option<String>,

    /// Stops the running poll.
    pub cancel: Option<CancelHandle>,

    /// Guard to avoid running the first-render lookup more than once.
    pub checked: bool,
}

impl TaskTrackerComponent {
    pub fn new() -> Self {
        Self {
            api: HttpTaskApi::new(),
            config: PollingConfig::default(),
            task_id: None,
            status: None,
            busy: false,
            error: None,
            cancel: None,
            checked: false,
        }
    }
}
