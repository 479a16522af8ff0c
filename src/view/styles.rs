//! Line styling and color configuration.
//!
//! Lines are colored by their parsed log level: errors red, warnings
//! yellow, info green, everything else the terminal default.

use crate::view_state::CellStyle;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag or `color = false` in the config file
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from the resolved flag and the environment.
    ///
    /// Priority (first match wins):
    /// 1. `no_color_flag` (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== LineStyles =====

/// Styles for the text area, gutter and status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyles {
    normal: Style,
    good: Style,
    warn: Style,
    error: Style,
    gutter: Style,
}

impl LineStyles {
    /// Create styles for the given color configuration.
    ///
    /// With colors disabled every level renders in the default style; the
    /// cursor row and status bar still use reverse video.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                normal: Style::default(),
                good: Style::default().fg(Color::Green),
                warn: Style::default().fg(Color::Yellow),
                error: Style::default().fg(Color::Red),
                gutter: Style::default().fg(Color::DarkGray),
            }
        } else {
            Self {
                normal: Style::default(),
                good: Style::default(),
                warn: Style::default(),
                error: Style::default(),
                gutter: Style::default(),
            }
        }
    }

    /// Style for a cell of the given level.
    pub fn for_cell(&self, style: CellStyle) -> Style {
        match style {
            CellStyle::Normal => self.normal,
            CellStyle::Good => self.good,
            CellStyle::Warn => self.warn,
            CellStyle::Error => self.error,
        }
    }

    /// Line number gutter.
    pub fn gutter(&self) -> Style {
        self.gutter
    }

    /// Patch applied to the cursor row.
    pub fn cursor_row(&self) -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }

    /// Status bar and prompt line.
    pub fn status_bar(&self) -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }
}

impl Default for LineStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
