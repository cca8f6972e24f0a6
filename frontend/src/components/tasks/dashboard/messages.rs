use common::model::task::TaskStatus;
use common::requests::ScopeNames;
use common::tasks::{DeletionOutcome, DeletionRequest, TaskError};

pub enum Msg {
    /// Interval tick, or an explicit reload after a deletion.
    Refresh,
    Listed(Result<Vec<TaskStatus>, TaskError>),
    ScopeNames(Result<ScopeNames, TaskError>),
    Toggle(String),
    SelectAll,
    ClearSelection,
    RequestDeletion(DeletionRequest),
    CancelDeletion,
    ConfirmDeletion,
    Deleted(Result<DeletionOutcome, TaskError>),
}
