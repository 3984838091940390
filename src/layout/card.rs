//! Card layout configuration
//!
//! Everything [`build_layout`](super::build_layout) needs besides the
//! record: canvas size, palette, font roles, text sizes and the geometry
//! of the header and the four metric tiles.

use super::{Point, Rect};
use crate::constants::{
    ACCENT_COLOR, BACKGROUND_COLOR, CARD_HEIGHT, CARD_WIDTH, FONT_ABRIL_FATFACE, FONT_ROBOTO,
    PANEL_COLOR, TEXT_COLOR,
};
use crate::layout::format::format_fixed;
use crate::record::Record;
use crate::utils::Color;

/// Record field shown by a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Weight,
    IntakeEnergy,
    ActiveEnergy,
    RestingEnergy,
}

impl Metric {
    pub fn value(self, record: &Record) -> f64 {
        match self {
            Metric::Weight => record.weight,
            Metric::IntakeEnergy => record.intake_energy,
            Metric::ActiveEnergy => record.active_energy,
            Metric::RestingEnergy => record.resting_energy,
        }
    }

    pub fn set(self, record: &mut Record, value: f64) {
        match self {
            Metric::Weight => record.weight = value,
            Metric::IntakeEnergy => record.intake_energy = value,
            Metric::ActiveEnergy => record.active_energy = value,
            Metric::RestingEnergy => record.resting_energy = value,
        }
    }

    /// Fractional digits shown: one for weight, none for energies
    pub fn decimals(self) -> usize {
        match self {
            Metric::Weight => 1,
            _ => 0,
        }
    }

    pub fn format(self, record: &Record) -> String {
        format_fixed(self.value(record), self.decimals())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub background: Color,
    /// Header and tile panels
    pub panel: Color,
    /// Numeric values
    pub accent: Color,
    /// Heading, title, labels and units
    pub text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: BACKGROUND_COLOR,
            panel: PANEL_COLOR,
            accent: ACCENT_COLOR,
            text: TEXT_COLOR,
        }
    }
}

/// Font identifier per text role
#[derive(Debug, Clone, PartialEq)]
pub struct FontRoles {
    /// Heading and title
    pub heading: String,
    pub label: String,
    pub unit: String,
    pub value: String,
}

impl Default for FontRoles {
    fn default() -> Self {
        Self {
            heading: FONT_ABRIL_FATFACE.to_string(),
            label: FONT_ROBOTO.to_string(),
            unit: FONT_ROBOTO.to_string(),
            value: FONT_ABRIL_FATFACE.to_string(),
        }
    }
}

/// Pixel size per text role
#[derive(Debug, Clone, PartialEq)]
pub struct TextSizes {
    pub heading: f32,
    pub label: f32,
    pub unit: f32,
    pub value: f32,
}

impl Default for TextSizes {
    fn default() -> Self {
        Self {
            heading: 64.0,
            label: 32.0,
            unit: 58.0,
            value: 72.0,
        }
    }
}

/// Title band across the top of the card
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub panel: Rect,
    /// Fixed text drawn before the title (empty = none)
    pub heading: String,
    pub heading_at: Point,
    pub title_at: Point,
}

/// One metric box
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub metric: Metric,
    pub label: String,
    pub unit: String,
    pub panel: Rect,
    /// Label sits just above the panel
    pub label_at: Point,
    pub value_at: Point,
    pub unit_at: Point,
}

impl Tile {
    fn new(
        metric: Metric,
        label: &str,
        unit: &str,
        panel: Rect,
        label_at: Point,
        value_at: Point,
        unit_at: Point,
    ) -> Self {
        Self {
            metric,
            label: label.to_string(),
            unit: unit.to_string(),
            panel,
            label_at,
            value_at,
            unit_at,
        }
    }
}

/// Full card configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub width: u32,
    pub height: u32,
    pub palette: Palette,
    pub fonts: FontRoles,
    pub sizes: TextSizes,
    pub header: Header,
    /// Drawn in order
    pub tiles: Vec<Tile>,
}

impl Default for CardLayout {
    fn default() -> Self {
        Self::daily()
    }
}

impl CardLayout {
    /// Reference 1080x1080 daily update card
    pub fn daily() -> Self {
        Self {
            width: CARD_WIDTH,
            height: CARD_HEIGHT,
            palette: Palette::default(),
            fonts: FontRoles::default(),
            sizes: TextSizes::default(),
            header: Header {
                panel: Rect::new(0, 0, 1080, 180),
                heading: "Daily Update".to_string(),
                heading_at: Point::new(150, 150),
                title_at: Point::new(690, 150),
            },
            tiles: vec![
                Tile::new(
                    Metric::Weight,
                    "Weight",
                    "kg",
                    Rect::new(125, 400, 500, 550),
                    Point::new(145, 390),
                    Point::new(165, 500),
                    Point::new(400, 500),
                ),
                Tile::new(
                    Metric::IntakeEnergy,
                    "Intake",
                    "kJ",
                    Rect::new(580, 400, 955, 550),
                    Point::new(600, 390),
                    Point::new(615, 500),
                    Point::new(855, 500),
                ),
                Tile::new(
                    Metric::ActiveEnergy,
                    "Active Energy",
                    "kJ",
                    Rect::new(125, 750, 500, 900),
                    Point::new(145, 740),
                    Point::new(165, 850),
                    Point::new(400, 850),
                ),
                Tile::new(
                    Metric::RestingEnergy,
                    "Resting Energy",
                    "kJ",
                    Rect::new(580, 750, 955, 900),
                    Point::new(600, 740),
                    Point::new(615, 850),
                    Point::new(855, 850),
                ),
            ],
        }
    }

    /// Same card with every coordinate and text size multiplied by `factor`
    pub fn scaled(&self, factor: f32) -> Self {
        let s = |v: u32| (v as f32 * factor).round() as u32;
        let p = |pt: Point| Point::new(s(pt.x), s(pt.y));
        let r = |rect: Rect| Rect {
            min: p(rect.min),
            max: p(rect.max),
        };

        Self {
            width: s(self.width),
            height: s(self.height),
            palette: self.palette.clone(),
            fonts: self.fonts.clone(),
            sizes: TextSizes {
                heading: self.sizes.heading * factor,
                label: self.sizes.label * factor,
                unit: self.sizes.unit * factor,
                value: self.sizes.value * factor,
            },
            header: Header {
                panel: r(self.header.panel),
                heading: self.header.heading.clone(),
                heading_at: p(self.header.heading_at),
                title_at: p(self.header.title_at),
            },
            tiles: self
                .tiles
                .iter()
                .map(|t| Tile {
                    panel: r(t.panel),
                    label_at: p(t.label_at),
                    value_at: p(t.value_at),
                    unit_at: p(t.unit_at),
                    ..t.clone()
                })
                .collect(),
        }
    }

    /// Distinct font identifiers this card draws with
    pub fn font_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::with_capacity(4);
        for id in [
            &self.fonts.heading,
            &self.fonts.label,
            &self.fonts.unit,
            &self.fonts.value,
        ] {
            if !ids.contains(&id.as_str()) {
                ids.push(id);
            }
        }
        ids
    }
}
