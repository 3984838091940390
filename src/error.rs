//! Error types for the card pipeline

use std::io;

use thiserror::Error;

/// A font identifier could not be resolved to a parsed font
#[derive(Error, Debug)]
#[error("failed to load font {id}: {cause}")]
pub struct FontLoadError {
    /// First identifier that failed
    pub id: String,
    #[source]
    pub cause: FontLoadCause,
}

#[derive(Error, Debug)]
pub enum FontLoadCause {
    /// The byte source could not produce the file
    #[error("read failed: {0}")]
    Read(#[from] io::Error),

    /// The bytes are not a usable font
    #[error("parse failed: {0}")]
    Parse(String),
}

/// Composition failed; no canvas is produced
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    /// Text placements reference fonts absent from the repository
    #[error("unresolved fonts: {}", .0.join(", "))]
    UnresolvedFonts(Vec<String>),

    /// A character has no glyph in the placement's font
    #[error("placement {index}: font {font} has no glyph for {ch:?}")]
    MissingGlyph { index: usize, font: String, ch: char },
}

/// JPEG encoding failed
#[derive(Error, Debug)]
#[error("jpeg encoding failed: {0}")]
pub struct EncodeError(#[from] pub image::ImageError);

/// Any failure of the record -> JPEG pipeline
#[derive(Error, Debug)]
pub enum CardError {
    #[error(transparent)]
    FontLoad(#[from] FontLoadError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Health export could not be turned into records
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("invalid export json: {0}")]
    Json(#[from] serde_json::Error),
}
