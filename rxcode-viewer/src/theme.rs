//! Color palette and sizing constants for the viewer.

use egui::Color32;

// =============================================================================
// BARCODES - printed look: black bars on a white label
// =============================================================================
pub const LABEL_BG: Color32 = Color32::WHITE;
pub const BAR: Color32 = Color32::BLACK;
pub const BAR_TEXT: Color32 = Color32::BLACK;

// =============================================================================
// PANELS
// =============================================================================
pub const PANEL_BORDER: Color32 = Color32::from_rgb(221, 221, 221);
pub const PANEL_SELECTED_BORDER: Color32 = Color32::from_rgb(40, 90, 220);
pub const PANEL_HOVER_BORDER: Color32 = Color32::from_rgb(150, 170, 210);

// =============================================================================
// TEXT
// =============================================================================
pub const DIM_TEXT: Color32 = Color32::from_rgb(140, 145, 150);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(220, 70, 60);

// =============================================================================
// SIZES
// =============================================================================
pub const PANEL_STROKE_WIDTH: f32 = 1.0;
pub const PANEL_SELECTED_STROKE_WIDTH: f32 = 2.0;
pub const PANEL_PADDING: f32 = 10.0;

/// Width of one CODE128 module in points.
pub const MODULE_WIDTH: f32 = 2.0;
pub const BAR_HEIGHT: f32 = 80.0;
/// Blank modules on each side of the symbol.
pub const QUIET_ZONE_MODULES: usize = 10;

pub const DATA_MATRIX_SIZE: f32 = 200.0;
pub const HISTORY_PANEL_WIDTH: f32 = 300.0;
