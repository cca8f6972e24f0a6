//! Components observing background tasks.
//!
//! - `tracker`: one job for one `(scope, category)` pair, with its progress bar.
//! - `dashboard`: every task record in the store, with selection and deletion.

pub mod dashboard;
pub mod tracker;
