//! Domain model types (pure).
//!
//! Plain data shared by the store, the view state and the shell.

pub mod command;
pub mod error;
pub mod position;

pub use command::Command;
pub use error::{AppError, InputError};
pub use position::Position;
