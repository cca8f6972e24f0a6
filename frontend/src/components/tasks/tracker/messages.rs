use common::model::task::TaskStatus;
use common::tasks::{Attachment, TaskError};

pub enum Msg {
    /// Answer of the mount-time lookup of a running task.
    Resolved(Result<Option<String>, TaskError>),
    Run,
    /// The run button attached to a running task or launched a new one.
    Launched(Result<Attachment, TaskError>),
    Progress(TaskStatus),
    /// The poll settled. Carries the id it was started for.
    Finished(String, Result<TaskStatus, TaskError>),
}
