//! Utility functions shared across statcard
//!
//! Common helpers that don't fit in specialized modules.

pub mod color;

pub use color::{blend_colors, parse_hex_color, Color};
