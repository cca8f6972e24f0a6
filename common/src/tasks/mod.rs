//! Client side of the background-task protocol.
//!
//! The flow is the same whichever screen observes a job:
//!
//! 1. `ActiveTaskResolver` asks the store whether a task is already running for a
//!    `(scope, category)` pair, so a reload or a second tab attaches to it.
//! 2. Otherwise `launcher::launch` starts the job and receives its task id.
//! 3. `Poller::poll` reads the task status at a fixed interval, reporting each
//!    status to a callback until the task is `done` or `error`.
//!
//! `TaskDashboard` is an independent read path that lists every task record and
//! deletes records on operator request.
//!
//! Nothing here talks to the network or to a clock directly: the HTTP transport
//! is a `TaskApi` and sleeping is a `Timer`, so the same code runs in the
//! browser and in native tests.

pub mod api;
pub mod cancel;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod launcher;
pub mod poller;
pub mod resolver;
pub mod timer;

#[cfg(test)]
pub(crate) mod mock;

pub use api::TaskApi;
pub use cancel::{cancel_pair, CancelHandle, CancelSignal};
pub use config::PollingConfig;
pub use dashboard::{DeletionOutcome, DeletionRequest, TaskDashboard, TaskRow};
pub use error::{ApiError, TaskError};
pub use launcher::{launch, launch_endpoint};
pub use poller::Poller;
pub use resolver::{ActiveTaskResolver, Attachment};
pub use timer::Timer;
