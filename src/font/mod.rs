//! Font loading
//!
//! Handles:
//! - Font byte sources (directory, in-memory)
//! - TTF/OTF parsing into a caller-owned repository (fontdue)
//! - Font directory discovery

pub mod repository;
pub mod source;

pub use repository::FontRepository;
pub use source::{DirFontSource, FontSource, MemoryFontSource};

use log::debug;
use std::path::PathBuf;

/// Environment variable overriding the font directory
pub const FONT_DIR_ENV: &str = "STATCARD_FONT_DIR";

/// Search for the font directory
///
/// Search order:
/// 1. STATCARD_FONT_DIR environment variable
/// 2. User data dir: ~/.local/share/statcard/fonts
/// 3. ./fonts
pub fn default_font_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(FONT_DIR_ENV) {
        if !dir.is_empty() {
            debug!("Font dir: {} ({})", dir, FONT_DIR_ENV);
            return PathBuf::from(dir);
        }
    }

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("statcard").join("fonts");
        if dir.is_dir() {
            debug!("Font dir: {}", dir.display());
            return dir;
        }
    }

    PathBuf::from("fonts")
}

/// Any TrueType font present on the machine, for tests
#[doc(hidden)]
pub fn system_test_font() -> Option<Vec<u8>> {
    let candidates = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
    ];
    let found = candidates.iter().find_map(|path| std::fs::read(path).ok());
    if found.is_none() {
        eprintln!("no system font found, skipping font-dependent test");
    }
    found
}
