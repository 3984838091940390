//! Font repository
//!
//! Parsed fonts keyed by identifier. The repository is owned by the
//! caller: load it once and hand it to as many renders as needed.

use fontdue::{Font, FontSettings};
use log::debug;
use std::collections::HashMap;

use super::source::FontSource;
use crate::error::{FontLoadCause, FontLoadError};

/// Identifier -> parsed font map
#[derive(Default)]
pub struct FontRepository {
    fonts: HashMap<String, Font>,
    /// Identifiers in load order
    order: Vec<String>,
}

impl FontRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every identifier through `source`, in order.
    ///
    /// Duplicate identifiers are loaded once. The first identifier that
    /// cannot be read or parsed aborts the whole load; nothing partial is
    /// returned.
    pub fn load<S, I>(source: &S, ids: I) -> Result<Self, FontLoadError>
    where
        S: FontSource + ?Sized,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut repo = Self::new();
        for id in ids {
            let id = id.as_ref();
            if repo.contains(id) {
                continue;
            }
            let data = source.read_font(id).map_err(|e| FontLoadError {
                id: id.to_string(),
                cause: FontLoadCause::Read(e),
            })?;
            repo.insert(id, data)?;
        }
        debug!("Fonts loaded: {}", repo.order.join(", "));
        Ok(repo)
    }

    /// Parse `data` and register it under `id`, replacing any previous font
    pub fn insert(&mut self, id: &str, data: Vec<u8>) -> Result<(), FontLoadError> {
        let font = Font::from_bytes(data, FontSettings::default()).map_err(|e| FontLoadError {
            id: id.to_string(),
            cause: FontLoadCause::Parse(e.to_string()),
        })?;
        debug!("Font parsed: {} ({} glyphs)", id, font.glyph_count());
        if self.fonts.insert(id.to_string(), font).is_none() {
            self.order.push(id.to_string());
        }
        Ok(())
    }

    /// Exact identifier lookup
    pub fn get(&self, id: &str) -> Option<&Font> {
        self.fonts.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.fonts.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Loaded identifiers, in load order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

impl std::fmt::Debug for FontRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRepository")
            .field("fonts", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::source::MemoryFontSource;
    use crate::font::system_test_font;

    struct Capture(std::sync::Mutex<Vec<(log::Level, String)>>);

    impl log::Log for Capture {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            if record.target().starts_with("statcard::font") {
                self.0
                    .lock()
                    .unwrap()
                    .push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture(std::sync::Mutex::new(Vec::new()));

    #[test]
    fn test_load_logs_at_debug_only() {
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Trace);

        let repo = FontRepository::load(&MemoryFontSource::new(), Vec::<String>::new()).unwrap();
        assert!(repo.is_empty());

        let logged = CAPTURE.0.lock().unwrap();
        assert!(logged.iter().any(|(_, msg)| msg.starts_with("Fonts loaded")));
        assert!(
            logged.iter().all(|(level, _)| *level >= log::Level::Debug),
            "{:?}",
            *logged
        );
    }

    #[test]
    fn test_missing_font_names_identifier() {
        let source = MemoryFontSource::new();
        let err = FontRepository::load(&source, ["Roboto-Regular.ttf"]).unwrap_err();
        assert_eq!(err.id, "Roboto-Regular.ttf");
        assert!(matches!(err.cause, FontLoadCause::Read(_)));
    }

    #[test]
    fn test_malformed_font_is_parse_error() {
        let source = MemoryFontSource::new().with("junk.ttf", b"not a font".to_vec());
        let err = FontRepository::load(&source, ["junk.ttf"]).unwrap_err();
        assert_eq!(err.id, "junk.ttf");
        assert!(matches!(err.cause, FontLoadCause::Parse(_)));
    }

    #[test]
    fn test_first_failure_wins() {
        let Some(data) = system_test_font() else {
            return;
        };
        let source = MemoryFontSource::new()
            .with("ok.ttf", data)
            .with("bad.ttf", vec![0; 16]);
        let err = FontRepository::load(&source, ["ok.ttf", "missing.ttf", "bad.ttf"]).unwrap_err();
        assert_eq!(err.id, "missing.ttf");
    }

    #[test]
    fn test_duplicates_loaded_once() {
        let Some(data) = system_test_font() else {
            return;
        };
        let source = MemoryFontSource::new()
            .with("a.ttf", data.clone())
            .with("b.ttf", data);
        let repo = FontRepository::load(&source, ["a.ttf", "b.ttf", "a.ttf"]).unwrap();
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.ids().collect::<Vec<_>>(), vec!["a.ttf", "b.ttf"]);
        assert!(repo.get("a.ttf").is_some());
        assert!(repo.get("A.ttf").is_none());
    }
}
