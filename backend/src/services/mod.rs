pub mod jobs;
pub mod scopes;
pub mod tasks;
