//! Named card presets

use std::fmt;

use super::card::{CardLayout, FontRoles};
use crate::constants::{FONT_ABRIL_FATFACE, FONT_AZERET_MONO_BOLD, FONT_B612_MONO_BOLD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Preset {
    /// Reference 1080x1080 card
    #[default]
    Daily,
    /// Reference geometry with monospaced labels, units and values
    DailyMono,
    /// Reference card at 540x540
    DailySmall,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Daily, Preset::DailyMono, Preset::DailySmall];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Daily => "daily",
            Preset::DailyMono => "daily-mono",
            Preset::DailySmall => "daily-small",
        }
    }

    /// Case-insensitive name lookup
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl CardLayout {
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Daily => Self::daily(),
            Preset::DailyMono => Self {
                fonts: FontRoles {
                    heading: FONT_ABRIL_FATFACE.to_string(),
                    label: FONT_B612_MONO_BOLD.to_string(),
                    unit: FONT_B612_MONO_BOLD.to_string(),
                    value: FONT_AZERET_MONO_BOLD.to_string(),
                },
                ..Self::daily()
            },
            Preset::DailySmall => Self::daily().scaled(0.5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_roundtrip() {
        for preset in Preset::ALL {
            assert_eq!(Preset::from_name(preset.name()), Some(preset));
        }
        assert_eq!(Preset::from_name(" Daily-Mono "), Some(Preset::DailyMono));
        assert_eq!(Preset::from_name("weekly"), None);
    }

    #[test]
    fn test_mono_uses_reference_fonts() {
        let card = CardLayout::from_preset(Preset::DailyMono);
        assert_eq!(
            card.font_ids(),
            vec![FONT_ABRIL_FATFACE, FONT_B612_MONO_BOLD, FONT_AZERET_MONO_BOLD]
        );
        assert_eq!(card.tiles, CardLayout::daily().tiles);
    }

    #[test]
    fn test_small_dimensions() {
        let card = CardLayout::from_preset(Preset::DailySmall);
        assert_eq!((card.width, card.height), (540, 540));
    }
}
