//! Color parsing and blending
//!
//! Cards are composed in 8-bit sRGB with no alpha channel. Config files
//! carry colors as `RRGGBB` hex strings.

use std::fmt;

/// Opaque 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string, see [`parse_hex_color`]
    pub fn from_hex(hex: &str) -> Option<Self> {
        parse_hex_color(hex).map(|(r, g, b)| Self { r, g, b })
    }

    /// Lowercase `rrggbb` form used in config files
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_array(rgb: [u8; 3]) -> Self {
        Self::rgb(rgb[0], rgb[1], rgb[2])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

/// Parse 6-digit hex color (e.g., "ff0000" -> (255, 0, 0))
/// Also supports 3-digit short format (e.g., "f00" -> (255, 0, 0))
/// Returns None on invalid input.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            // Short format: expand F -> FF
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Blend `overlay` over `base` by an 8-bit coverage value.
///
/// # Arguments
/// * `base` - Color already on the canvas
/// * `overlay` - Fill color being drawn
/// * `coverage` - Glyph coverage (0 = all base, 255 = all overlay)
///
/// Full coverage returns `overlay` exactly, zero coverage returns `base`.
#[inline]
pub fn blend_colors(base: Color, overlay: Color, coverage: u8) -> Color {
    let a = coverage as u32;
    let inv = 255 - a;
    // Integer lerp with rounding: (o*a + b*(255-a) + 127) / 255
    let mix = |o: u8, b: u8| ((o as u32 * a + b as u32 * inv + 127) / 255) as u8;
    Color {
        r: mix(overlay.r, base.r),
        g: mix(overlay.g, base.g),
        b: mix(overlay.b, base.b),
    }
}
