//! Session module for the logged-in user.
//!
//! This module provides the `Session` struct that ties a user to the store
//! and runs raw front-end input through validation before it is persisted.

mod session;
mod summary;
mod workout;

pub use session::{LoginOutcome, Session};
pub use workout::WorkoutEntry;
