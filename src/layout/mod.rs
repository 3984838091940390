//! Layout specification
//!
//! A [`LayoutSpec`] is the declarative description of one card: canvas
//! size, background, panels and text placements. It is rebuilt from a
//! [`Record`] for every render by [`build_layout`]. Vec order is paint
//! order; later entries draw over earlier ones.

pub mod card;
pub mod format;
pub mod preset;

pub use card::{CardLayout, FontRoles, Header, Metric, Palette, TextSizes, Tile};
pub use format::format_fixed;
pub use preset::Preset;

use log::trace;

use crate::record::Record;
use crate::utils::Color;

/// Pixel position; for text, the left end of the baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle, `min` inclusive and `max` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub const fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }
}

/// Solid rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub rect: Rect,
    pub fill: Color,
}

/// One run of text drawn with a single font, size and color
#[derive(Debug, Clone, PartialEq)]
pub struct TextPlacement {
    /// Font identifier, matched exactly against the repository
    pub font: String,
    /// Pixel size (em height)
    pub size: f32,
    pub color: Color,
    /// Baseline origin
    pub anchor: Point,
    pub content: String,
}

/// Everything the renderer draws, in paint order
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSpec {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub panels: Vec<Panel>,
    pub texts: Vec<TextPlacement>,
}

impl LayoutSpec {
    /// Every anchor lies in `[0,width) x [0,height)` and every panel is
    /// non-empty and ends at or before the canvas edge.
    pub fn is_within_bounds(&self) -> bool {
        let canvas = Rect::new(0, 0, self.width, self.height);
        let panels_ok = self.panels.iter().all(|p| {
            p.rect.min.x < p.rect.max.x
                && p.rect.min.y < p.rect.max.y
                && p.rect.max.x <= self.width
                && p.rect.max.y <= self.height
        });
        panels_ok && self.texts.iter().all(|t| canvas.contains(t.anchor))
    }

    /// Distinct font identifiers, in first-use order
    pub fn font_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for t in &self.texts {
            if !ids.contains(&t.font.as_str()) {
                ids.push(&t.font);
            }
        }
        ids
    }
}

fn text(font: &str, size: f32, color: Color, anchor: Point, content: String) -> TextPlacement {
    TextPlacement {
        font: font.to_string(),
        size,
        color,
        anchor,
        content,
    }
}

/// Build the layout for one record.
///
/// Pure and deterministic: equal inputs give equal specs. Paint order is
/// panels (header, then tiles), heading, title, tile labels, tile units,
/// tile values.
pub fn build_layout(record: &Record, card: &CardLayout) -> LayoutSpec {
    let palette = &card.palette;
    let fonts = &card.fonts;
    let sizes = &card.sizes;

    let mut panels = Vec::with_capacity(card.tiles.len() + 1);
    panels.push(Panel {
        rect: card.header.panel,
        fill: palette.panel,
    });
    panels.extend(card.tiles.iter().map(|tile| Panel {
        rect: tile.panel,
        fill: palette.panel,
    }));

    let mut texts = Vec::with_capacity(2 + card.tiles.len() * 3);
    if !card.header.heading.is_empty() {
        texts.push(text(
            &fonts.heading,
            sizes.heading,
            palette.text,
            card.header.heading_at,
            card.header.heading.clone(),
        ));
    }
    texts.push(text(
        &fonts.heading,
        sizes.heading,
        palette.text,
        card.header.title_at,
        record.title.clone(),
    ));
    for tile in &card.tiles {
        texts.push(text(
            &fonts.label,
            sizes.label,
            palette.text,
            tile.label_at,
            tile.label.clone(),
        ));
    }
    for tile in &card.tiles {
        texts.push(text(
            &fonts.unit,
            sizes.unit,
            palette.text,
            tile.unit_at,
            tile.unit.clone(),
        ));
    }
    for tile in &card.tiles {
        texts.push(text(
            &fonts.value,
            sizes.value,
            palette.accent,
            tile.value_at,
            tile.metric.format(record),
        ));
    }

    trace!(
        "Layout built: {}x{}, {} panels, {} texts",
        card.width,
        card.height,
        panels.len(),
        texts.len()
    );

    LayoutSpec {
        width: card.width,
        height: card.height,
        background: palette.background,
        panels,
        texts,
    }
}
