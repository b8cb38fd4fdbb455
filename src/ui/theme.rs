//! Color theme constants for the dashboard.
//!
//! Same minimal dark palette throughout: gray chrome, white text, one
//! accent for the forecast line.

use ratatui::style::Color;

// ============================================================================
// Chrome
// ============================================================================

/// Panel borders
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Title bar and panel titles
pub const COLOR_HEADER: Color = Color::White;

/// Footer hints, axis labels, grid
pub const COLOR_DIM: Color = Color::DarkGray;

/// Regular text
pub const COLOR_TEXT: Color = Color::Gray;

// ============================================================================
// State
// ============================================================================

/// Placeholder text while loading
pub const COLOR_LOADING: Color = Color::Gray;

/// Failure messages
pub const COLOR_ERROR: Color = Color::Red;

// ============================================================================
// Chart
// ============================================================================

/// Forecast line, the recharts default stroke (#8884d8)
pub const COLOR_SERIES: Color = Color::Rgb(136, 132, 216);

/// Selected point marker and tooltip border
pub const COLOR_SELECTED: Color = Color::Rgb(4, 181, 117);

/// Tooltip background
pub const COLOR_TOOLTIP_BG: Color = Color::Rgb(10, 15, 35);
