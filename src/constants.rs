//! Global constants for statcard
//!
//! Consolidates output, palette and font constants
//! to eliminate magic numbers throughout the codebase.

use crate::utils::Color;

// ============================================================================
// Output Constants
// ============================================================================

/// JPEG quality factor (maximum, not configurable)
pub const JPEG_QUALITY: u8 = 100;

/// Object key prefix for rendered cards
pub const IMAGE_KEY_PREFIX: &str = "weightlog";

/// File extension for rendered cards
pub const IMAGE_EXTENSION: &str = "jpg";

// ============================================================================
// Reference Card Geometry
// ============================================================================

/// Reference canvas width (pixels)
pub const CARD_WIDTH: u32 = 1080;

/// Reference canvas height (pixels)
pub const CARD_HEIGHT: u32 = 1080;

// ============================================================================
// Reference Palette
// ============================================================================

/// Card background
pub const BACKGROUND_COLOR: Color = Color::WHITE;

/// Neutral panel fill
pub const PANEL_COLOR: Color = Color::rgb(225, 225, 225);

/// Accent used for numeric values
pub const ACCENT_COLOR: Color = Color::rgb(201, 8, 79);

/// Title, label and unit text
pub const TEXT_COLOR: Color = Color::BLACK;

// ============================================================================
// Reference Fonts
// ============================================================================

pub const FONT_ROBOTO: &str = "Roboto-Regular.ttf";
pub const FONT_ABRIL_FATFACE: &str = "AbrilFatface-Regular.ttf";
pub const FONT_AZERET_MONO_BOLD: &str = "AzeretMono-Bold.ttf";
pub const FONT_B612_MONO_BOLD: &str = "B612Mono-Bold.ttf";

/// The font set a deployment is expected to provide
pub const REFERENCE_FONTS: [&str; 4] = [
    FONT_ROBOTO,
    FONT_ABRIL_FATFACE,
    FONT_AZERET_MONO_BOLD,
    FONT_B612_MONO_BOLD,
];
