//! JSON Log Viewer (jlv)
//!
//! TUI application for paging through large line-oriented log files,
//! typically one JSON record per line.
//!
//! The pure core (`store`, `parser`, `view_state`, `state`) loads lines,
//! maps them to terminal cells, keeps the cursor in view and searches. The
//! impure shell (`source`, `config`, `logging`, `view`) reads input, resolves
//! settings and drives the terminal.

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;
pub mod state;
pub mod store;
pub mod view;
pub mod view_state;
