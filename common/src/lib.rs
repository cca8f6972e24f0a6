//! Types and client-side protocol shared by the console backend and frontend.
//!
//! - `model`: the `TaskStatus` record and its lifecycle states.
//! - `requests`: HTTP request/response bodies.
//! - `tasks`: launching, polling, resuming and managing background tasks against
//!   any `TaskApi` implementation.

pub mod model;
pub mod requests;
pub mod tasks;
