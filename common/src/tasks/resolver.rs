//! Resuming tasks that are already running.
//!
//! When a view mounts it asks the store which task, if any, is active for its
//! `(scope, category)` pair and attaches to it instead of starting a duplicate.
//! This is what keeps a page reload or a second tab from launching the same job
//! twice.

use std::collections::HashMap;

use log::{debug, info};
use serde_json::Value;

use crate::requests::{ActiveTasks, LaunchRequest};

use super::api::TaskApi;
use super::error::TaskError;
use super::launcher::{launch, launch_endpoint};

/// How a view got hold of its task id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Attachment {
    /// The task was already running; nothing was launched.
    Resumed(String),
    /// A new job was started.
    Launched(String),
}

impl Attachment {
    pub fn task_id(&self) -> &str {
        match self {
            Attachment::Resumed(id) | Attachment::Launched(id) => id,
        }
    }
}

/// Looks up active tasks, at most once per scope.
///
/// Create one per mounted view. The store's index is read the first time a scope
/// is resolved and the answer is reused for every later lookup in that scope.
#[derive(Debug, Default)]
pub struct ActiveTaskResolver {
    checked: HashMap<String, ActiveTasks>,
}

impl ActiveTaskResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Task id active for `(scope, category)` when the scope was first checked.
    pub async fn resolve<A: TaskApi>(
        &mut self,
        api: &A,
        scope: &str,
        category: &str,
    ) -> Result<Option<String>, TaskError> {
        if !self.checked.contains_key(scope) {
            let index = api.active(scope).await.map_err(|err| {
                TaskError::transport(format!("active tasks for scope {}", scope), err)
            })?;
            debug!("scope {} has {} active task(s)", scope, index.len());
            self.checked.insert(scope.to_string(), index);
        }

        let found = self
            .checked
            .get(scope)
            .and_then(|index| index.get(category))
            .cloned();
        if let Some(task_id) = &found {
            info!("resuming task {} ({} in scope {})", task_id, category, scope);
        }
        Ok(found)
    }

    /// Resumes the active task for `(scope, category)` or launches a new one.
    pub async fn attach_or_launch<A: TaskApi>(
        &mut self,
        api: &A,
        scope: &str,
        category: &str,
        params: Value,
    ) -> Result<Attachment, TaskError> {
        if let Some(task_id) = self.resolve(api, scope, category).await? {
            return Ok(Attachment::Resumed(task_id));
        }

        let request = LaunchRequest::new(scope).with_params(params);
        let task_id = launch(api, &launch_endpoint(category), &request).await?;
        Ok(Attachment::Launched(task_id))
    }
}
