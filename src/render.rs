//! Card renderer
//!
//! Composes a [`LayoutSpec`] onto a [`Canvas`]:
//! 1. background fill
//! 2. panels, opaque, in order
//! 3. text placements, glyph coverage blended over whatever is below
//!
//! No wrapping, measuring or centering happens here. Anchors are final.

use fontdue::Font;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::canvas::Canvas;
use crate::error::RenderError;
use crate::font::FontRepository;
use crate::layout::{LayoutSpec, TextPlacement};

/// What to do with a placement whose font is not in the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontMissPolicy {
    /// Abort with every unresolved identifier listed
    #[default]
    Fail,
    /// Leave the placement out and keep drawing
    Skip,
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    miss_policy: FontMissPolicy,
}

impl Renderer {
    pub fn new(miss_policy: FontMissPolicy) -> Self {
        Self { miss_policy }
    }

    /// Render `spec` using fonts from `fonts`.
    ///
    /// Any error discards the canvas; nothing partial is returned.
    pub fn render(&self, spec: &LayoutSpec, fonts: &FontRepository) -> Result<Canvas, RenderError> {
        debug_assert!(spec.is_within_bounds(), "layout outside canvas bounds");

        let unresolved = unresolved_fonts(spec, fonts);
        if !unresolved.is_empty() {
            match self.miss_policy {
                FontMissPolicy::Fail => return Err(RenderError::UnresolvedFonts(unresolved)),
                FontMissPolicy::Skip => warn!(
                    "Skipping text with unresolved fonts: {}",
                    unresolved.join(", ")
                ),
            }
        }

        let mut canvas = Canvas::new(spec.width, spec.height, spec.background);

        for panel in &spec.panels {
            canvas.fill_rect(panel.rect, panel.fill);
        }

        for (index, placement) in spec.texts.iter().enumerate() {
            let Some(font) = fonts.get(&placement.font) else {
                continue;
            };
            draw_text(&mut canvas, index, placement, font)?;
        }

        debug!(
            "Rendered {}x{}: {} panels, {} texts",
            spec.width,
            spec.height,
            spec.panels.len(),
            spec.texts.len()
        );
        Ok(canvas)
    }
}

/// Render with the default policy ([`FontMissPolicy::Fail`])
pub fn render(spec: &LayoutSpec, fonts: &FontRepository) -> Result<Canvas, RenderError> {
    Renderer::default().render(spec, fonts)
}

/// Identifiers referenced by `spec` but absent from `fonts`, deduplicated
fn unresolved_fonts(spec: &LayoutSpec, fonts: &FontRepository) -> Vec<String> {
    spec.font_ids()
        .into_iter()
        .filter(|id| !fonts.contains(id))
        .map(str::to_string)
        .collect()
}

/// Draw one placement with its baseline starting at the anchor
fn draw_text(
    canvas: &mut Canvas,
    index: usize,
    placement: &TextPlacement,
    font: &Font,
) -> Result<(), RenderError> {
    let size = placement.size;
    let baseline = placement.anchor.y as i32;
    let mut pen_x = placement.anchor.x as f32;
    let mut prev: Option<char> = None;

    // Compose decomposed sequences so precomposed glyphs are used
    let content: String = placement.content.nfc().collect();

    for ch in content.chars() {
        if ch.is_control() {
            continue;
        }
        if let Some(left) = prev {
            pen_x += font.horizontal_kern(left, ch, size).unwrap_or(0.0);
        }
        prev = Some(ch);

        if ch.is_whitespace() {
            pen_x += font.metrics(ch, size).advance_width;
            continue;
        }

        if font.lookup_glyph_index(ch) == 0 {
            return Err(RenderError::MissingGlyph {
                index,
                font: placement.font.clone(),
                ch,
            });
        }

        let (metrics, bitmap) = font.rasterize(ch, size);
        // Bitmap origin is its bottom-left corner, ymin above the baseline
        let x0 = (pen_x + metrics.xmin as f32).round() as i32;
        let y0 = baseline - metrics.ymin - metrics.height as i32;
        canvas.draw_coverage(x0, y0, metrics.width, &bitmap, placement.color);
        trace!(
            "Glyph '{}' at ({}, {}) {}x{}",
            ch,
            x0,
            y0,
            metrics.width,
            metrics.height
        );

        pen_x += metrics.advance_width;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{system_test_font, MemoryFontSource};
    use crate::layout::{Panel, Point, Rect};
    use crate::utils::Color;

    const RED: Color = Color::rgb(200, 0, 0);

    fn spec_with_text(font: &str, content: &str) -> LayoutSpec {
        LayoutSpec {
            width: 200,
            height: 200,
            background: Color::WHITE,
            panels: vec![Panel {
                rect: Rect::new(0, 0, 200, 100),
                fill: Color::rgb(225, 225, 225),
            }],
            texts: vec![TextPlacement {
                font: font.to_string(),
                size: 80.0,
                color: RED,
                anchor: Point::new(20, 90),
                content: content.to_string(),
            }],
        }
    }

    fn repo() -> Option<FontRepository> {
        let source = MemoryFontSource::new().with("sans.ttf", system_test_font()?);
        Some(FontRepository::load(&source, ["sans.ttf"]).unwrap())
    }

    #[test]
    fn test_unresolved_fonts_fail_together() {
        let mut spec = spec_with_text("a.ttf", "x");
        let first = spec.texts[0].clone();
        spec.texts.push(TextPlacement {
            font: "b.ttf".to_string(),
            ..first.clone()
        });
        spec.texts.push(first);
        let err = render(&spec, &FontRepository::new()).unwrap_err();
        assert_eq!(
            err,
            RenderError::UnresolvedFonts(vec!["a.ttf".to_string(), "b.ttf".to_string()])
        );
    }

    #[test]
    fn test_skip_policy_draws_panels_only() {
        let spec = spec_with_text("missing.ttf", "x");
        let canvas = Renderer::new(FontMissPolicy::Skip)
            .render(&spec, &FontRepository::new())
            .unwrap();
        assert_eq!(canvas.pixel(50, 50), Some(Color::rgb(225, 225, 225)));
        assert_eq!(canvas.pixel(50, 150), Some(Color::WHITE));
        assert!(canvas.as_image().pixels().all(|p| p.0 != RED.to_array()));
    }

    #[test]
    fn test_text_painted_over_panel() {
        let Some(fonts) = repo() else {
            return;
        };
        let canvas = render(&spec_with_text("sans.ttf", "H"), &fonts).unwrap();
        let panel = Rect::new(0, 0, 200, 100);
        let mut hits = 0;
        for y in panel.min.y..panel.max.y {
            for x in panel.min.x..panel.max.x {
                if canvas.pixel(x, y) == Some(RED) {
                    hits += 1;
                }
            }
        }
        assert!(hits > 100, "only {} solid glyph pixels", hits);
        // Nothing below the baseline for 'H'
        assert!((100..200).all(|y| canvas.pixel(60, y) == Some(Color::WHITE)));
    }

    #[test]
    fn test_missing_glyph_aborts() {
        let Some(fonts) = repo() else {
            return;
        };
        // Supplementary private use area: no font ships a glyph here
        let err = render(&spec_with_text("sans.ttf", "A\u{10FFFD}"), &fonts).unwrap_err();
        assert_eq!(
            err,
            RenderError::MissingGlyph {
                index: 0,
                font: "sans.ttf".to_string(),
                ch: '\u{10FFFD}',
            }
        );
    }

    #[test]
    fn test_whitespace_only_draws_nothing() {
        let Some(fonts) = repo() else {
            return;
        };
        let canvas = render(&spec_with_text("sans.ttf", "  \t "), &fonts).unwrap();
        assert!(canvas.as_image().pixels().all(|p| p.0 != RED.to_array()));
    }

    #[test]
    fn test_render_is_deterministic() {
        let Some(fonts) = repo() else {
            return;
        };
        let spec = spec_with_text("sans.ttf", "Weight 115.0");
        let a = render(&spec, &fonts).unwrap().into_image();
        let b = render(&spec, &fonts).unwrap().into_image();
        assert_eq!(a.as_raw(), b.as_raw());
    }
}
