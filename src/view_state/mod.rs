//! View-state layer: cell mapping and scrolling.
//!
//! # Module Structure
//!
//! - `cell_mapper`: turns store rows into terminal cells (tabs, wide runes)
//! - `viewport`: window position, cursor row and the relocate algorithm

pub mod cell_mapper;
pub mod viewport;

pub use cell_mapper::{display_width, draw, locate, Cell, CellGrid, CellStyle};
pub use viewport::Viewport;
