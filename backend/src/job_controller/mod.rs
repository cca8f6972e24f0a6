//! Background task tracking: the shared store and the executors feeding it.

pub mod executor;
pub mod state;
