//! Component state for the task dashboard.

use common::tasks::{PollingConfig, TaskDashboard};
use gloo_timers::callback::Interval;

use crate::api::HttpTaskApi;

pub struct TaskDashboardComponent {
    pub api: HttpTaskApi,
    pub config: PollingConfig,

    /// List, selection and pending deletion.
    pub dashboard: TaskDashboard,

    /// A confirmed deletion is running; interval refreshes are skipped.
    pub deleting: bool,

    /// Periodic refresh; dropped with the component, which stops it.
    pub refresh: Option<Interval>,
}

impl TaskDashboardComponent {
    pub fn new() -> Self {
        Self {
            api: HttpTaskApi::new(),
            config: PollingConfig::default(),
            dashboard: TaskDashboard::new(),
            deleting: false,
            refresh: None,
        }
    }
}
