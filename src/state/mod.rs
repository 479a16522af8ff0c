//! UI state machine (pure).
//!
//! All state transitions are plain functions testable without a terminal.

pub mod app_state;
pub mod search;

pub use app_state::{AppState, Outcome};
pub use search::{Direction, SearchSession};
