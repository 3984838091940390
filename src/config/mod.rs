//! Configuration file management
//!
//! Loads TOML configuration files and provides application settings.
//! Default config path: ~/.config/statcard/config.toml

use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::REFERENCE_FONTS;
use crate::font::default_font_dir;
use crate::layout::{CardLayout, Palette, Preset};
use crate::render::FontMissPolicy;
use crate::utils::Color;

/// Environment variable pointing at a config file
pub const CONFIG_ENV: &str = "STATCARD_CONFIG";

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Card settings
    pub card: CardConfig,
    /// Font settings
    pub fonts: FontConfig,
    /// Palette settings
    pub colors: ColorsConfig,
    /// Output settings
    pub output: OutputConfig,
}

/// Card settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Layout preset: "daily" | "daily-mono" | "daily-small"
    pub preset: String,
    /// Text whose font is not loaded: "fail" (default) or "skip"
    pub on_missing_font: FontMissPolicy,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            preset: Preset::default().name().to_string(),
            on_missing_font: FontMissPolicy::Fail,
        }
    }
}

/// Font settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Directory holding the font files (searched if empty)
    pub dir: String,
    /// Fonts loaded up front in addition to the ones the preset draws with
    pub preload: Vec<String>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            dir: String::new(),
            preload: REFERENCE_FONTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FontConfig {
    /// Configured directory, or the searched default
    pub fn resolve_dir(&self) -> PathBuf {
        if self.dir.is_empty() {
            default_font_dir()
        } else {
            expand_home(&self.dir)
        }
    }
}

/// Palette settings
/// Colors are specified as RRGGBB hex strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    /// Card background
    pub background: String,
    /// Header and tile panels
    pub panel: String,
    /// Numeric values
    pub accent: String,
    /// Heading, title, labels and units
    pub text: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        let palette = Palette::default();
        Self {
            background: palette.background.to_hex(),
            panel: palette.panel.to_hex(),
            accent: palette.accent.to_hex(),
            text: palette.text.to_hex(),
        }
    }
}

impl ColorsConfig {
    /// Parse every entry; invalid entries fall back to the reference palette
    pub fn to_palette(&self) -> Palette {
        let defaults = Palette::default();
        let pick = |name: &str, hex: &str, fallback: Color| {
            Color::from_hex(hex).unwrap_or_else(|| {
                warn!("Invalid {} color {:?}, using {}", name, hex, fallback);
                fallback
            })
        };
        Palette {
            background: pick("background", &self.background, defaults.background),
            panel: pick("panel", &self.panel, defaults.panel),
            accent: pick("accent", &self.accent, defaults.accent),
            text: pick("text", &self.text, defaults.text),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Base directory for batch renders
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
        }
    }
}

impl Config {
    /// System-wide config path
    const SYSTEM_CONFIG_PATH: &'static str = "/etc/statcard/config.toml";

    /// Get the path that would be used for loading config
    /// Returns None if using built-in defaults
    pub fn config_path() -> Option<PathBuf> {
        // 1. STATCARD_CONFIG environment variable
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let p = Path::new(&path);
            if p.exists() {
                return Some(p.to_path_buf());
            }
        }

        // 2. User config: ~/.config/statcard/config.toml
        if let Some(config_path) = default_config_path() {
            if config_path.exists() {
                return Some(config_path);
            }
        }

        // 3. System config: /etc/statcard/config.toml
        let system_config = Path::new(Self::SYSTEM_CONFIG_PATH);
        if system_config.exists() {
            return Some(system_config.to_path_buf());
        }

        None
    }

    /// Load configuration with priority:
    /// 1. STATCARD_CONFIG environment variable
    /// 2. ~/.config/statcard/config.toml (user config)
    /// 3. /etc/statcard/config.toml (system config)
    /// 4. Built-in defaults
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            match Self::load_from_file(&path) {
                Ok(config) => {
                    debug!("Loaded config: {}", path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load config {}: {:#}", path.display(), e);
                }
            }
        }
        debug!("Using built-in default config");
        Self::default()
    }

    /// Load settings from specified path
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Selected preset
    pub fn preset(&self) -> Result<Preset> {
        Preset::from_name(&self.card.preset).ok_or_else(|| {
            let known: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
            anyhow!(
                "Unknown preset {:?} (available: {})",
                self.card.preset,
                known.join(", ")
            )
        })
    }

    /// Card layout for the selected preset with the configured palette
    pub fn card_layout(&self) -> Result<CardLayout> {
        let mut card = CardLayout::from_preset(self.preset()?);
        card.palette = self.colors.to_palette();
        Ok(card)
    }

    /// Identifiers to load: preset fonts first, then the preload list
    pub fn font_ids(&self, card: &CardLayout) -> Vec<String> {
        let mut ids: Vec<String> = card.font_ids().into_iter().map(str::to_string).collect();
        for id in &self.fonts.preload {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        ids
    }

    /// Write the default config to `path`
    pub fn write_default(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = Self::default().to_toml()?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        debug!("Config written: {}", path.display());
        Ok(())
    }
}

/// Get default config file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("statcard").join("config.toml"))
}

/// Expand a leading `~/` to the home directory
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roundtrip() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::from_toml(
            r##"
            [card]
            preset = "daily-small"

            [colors]
            accent = "#336699"
            "##,
        )
        .unwrap();
        assert_eq!(config.card.on_missing_font, FontMissPolicy::Fail);
        assert_eq!(config.fonts, FontConfig::default());

        let card = config.card_layout().unwrap();
        assert_eq!(card.width, 540);
        assert_eq!(card.palette.accent, Color::rgb(0x33, 0x66, 0x99));
        assert_eq!(card.palette.panel, Color::rgb(225, 225, 225));
    }

    #[test]
    fn test_missing_font_policy() {
        let config = Config::from_toml("[card]\non_missing_font = \"skip\"\n").unwrap();
        assert_eq!(config.card.on_missing_font, FontMissPolicy::Skip);
        assert!(Config::from_toml("[card]\non_missing_font = \"ignore\"\n").is_err());
    }

    #[test]
    fn test_unknown_preset() {
        let mut config = Config::default();
        config.card.preset = "weekly".to_string();
        let err = config.card_layout().unwrap_err().to_string();
        assert!(err.contains("weekly"), "{}", err);
    }

    #[test]
    fn test_invalid_color_falls_back() {
        let colors = ColorsConfig {
            background: "nope".to_string(),
            ..ColorsConfig::default()
        };
        assert_eq!(colors.to_palette().background, Color::WHITE);
    }

    #[test]
    fn test_font_ids_merge_preload() {
        let config = Config::default();
        let card = config.card_layout().unwrap();
        assert_eq!(
            config.font_ids(&card),
            vec![
                "AbrilFatface-Regular.ttf",
                "Roboto-Regular.ttf",
                "AzeretMono-Bold.ttf",
                "B612Mono-Bold.ttf",
            ]
        );
    }

    #[test]
    fn test_write_default() {
        let dir = std::env::temp_dir().join(format!("statcard-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        Config::write_default(&path).unwrap();
        assert_eq!(Config::load_from_file(&path).unwrap(), Config::default());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
