//! Pixel canvas
//!
//! RGB8 buffer the renderer composes into. Drawing clips silently at the
//! canvas edges.

use image::{Rgb, RgbImage};

use crate::layout::Rect;
use crate::utils::{blend_colors, Color};

pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// New canvas filled with `background`
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, Rgb(background.to_array())),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Opaque overwrite of `rect`, clipped to the canvas
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let x1 = rect.max.x.min(self.width());
        let y1 = rect.max.y.min(self.height());
        let px = Rgb(color.to_array());
        for y in rect.min.y..y1 {
            for x in rect.min.x..x1 {
                self.image.put_pixel(x, y, px);
            }
        }
    }

    /// Blend `color` into one pixel by `coverage`; off-canvas is ignored
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: u8) {
        if coverage == 0 || x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width() || y >= self.height() {
            return;
        }
        let px = self.image.get_pixel_mut(x, y);
        let blended = blend_colors(Color::from_array(px.0), color, coverage);
        *px = Rgb(blended.to_array());
    }

    /// Blend a coverage bitmap (row-major, `width` columns) with its top-left
    /// corner at `(x0, y0)`
    pub fn draw_coverage(&mut self, x0: i32, y0: i32, width: usize, bitmap: &[u8], color: Color) {
        if width == 0 {
            return;
        }
        for (row, line) in bitmap.chunks(width).enumerate() {
            for (col, &coverage) in line.iter().enumerate() {
                self.blend_pixel(x0 + col as i32, y0 + row as i32, color, coverage);
            }
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width() && y < self.height() {
            Some(Color::from_array(self.image.get_pixel(x, y).0))
        } else {
            None
        }
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
