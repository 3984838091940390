//! statcard - daily health-metric stat cards
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────────┐
//! │    Record    │   │   FontSource    │
//! └──────┬───────┘   └────────┬────────┘
//!        ↓                    ↓
//!   build_layout        FontRepository
//!        ↓                    ↓
//!   LayoutSpec  ──→  Renderer  ──→  Canvas  ──→  encode_jpeg  ──→  bytes
//! ```
//!
//! The engine is pure: fonts come in through a [`FontSource`], JPEG bytes
//! go out. Where they are stored is up to the caller.

pub mod canvas;
pub mod config;
pub mod constants;
pub mod encode;
pub mod error;
pub mod font;
pub mod health;
pub mod layout;
pub mod record;
pub mod render;
pub mod utils;

pub use canvas::Canvas;
pub use encode::encode_jpeg;
pub use error::{CardError, EncodeError, FontLoadCause, FontLoadError, ImportError, RenderError};
pub use font::{DirFontSource, FontRepository, FontSource, MemoryFontSource};
pub use layout::{build_layout, CardLayout, LayoutSpec, Preset};
pub use record::Record;
pub use render::{render, FontMissPolicy, Renderer};
pub use utils::Color;

/// Build, render and encode one card against an already-loaded repository
pub fn render_card(
    record: &Record,
    card: &CardLayout,
    fonts: &FontRepository,
) -> Result<Vec<u8>, CardError> {
    render_card_with(&Renderer::default(), record, card, fonts)
}

/// [`render_card`] with an explicit renderer configuration
pub fn render_card_with(
    renderer: &Renderer,
    record: &Record,
    card: &CardLayout,
    fonts: &FontRepository,
) -> Result<Vec<u8>, CardError> {
    let spec = build_layout(record, card);
    let canvas = renderer.render(&spec, fonts)?;
    Ok(encode_jpeg(&canvas)?)
}

/// One-shot render: resolve the card's fonts from `source` for this call
/// only, then render and encode.
///
/// Callers rendering many cards should load a [`FontRepository`] once and
/// use [`render_card`] instead.
pub fn generate<S: FontSource + ?Sized>(
    record: &Record,
    card: &CardLayout,
    source: &S,
) -> Result<Vec<u8>, CardError> {
    let fonts = FontRepository::load(source, card.font_ids())?;
    render_card(record, card, &fonts)
}
