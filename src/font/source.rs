//! Font byte sources
//!
//! The renderer never fetches fonts itself. A source maps a font
//! identifier (a filename-like token) to the raw TTF/OTF bytes.

use log::debug;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

/// Resolves font identifiers to raw font file bytes
pub trait FontSource {
    fn read_font(&self, id: &str) -> io::Result<Vec<u8>>;
}

impl<S: FontSource + ?Sized> FontSource for &S {
    fn read_font(&self, id: &str) -> io::Result<Vec<u8>> {
        (**self).read_font(id)
    }
}

/// Reads `<dir>/<id>` from the filesystem
#[derive(Debug, Clone)]
pub struct DirFontSource {
    dir: PathBuf,
}

impl DirFontSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FontSource for DirFontSource {
    fn read_font(&self, id: &str) -> io::Result<Vec<u8>> {
        // Identifiers are file names, not paths
        if id.is_empty() || id.contains(|c: char| c == '/' || c == '\\') || id == ".." {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid font identifier: {:?}", id),
            ));
        }
        let path = self.dir.join(id);
        debug!("Reading font: {}", path.display());
        std::fs::read(&path)
    }
}

/// In-memory font table
#[derive(Debug, Clone, Default)]
pub struct MemoryFontSource {
    fonts: HashMap<String, Vec<u8>>,
}

impl MemoryFontSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, data: Vec<u8>) {
        self.fonts.insert(id.into(), data);
    }

    pub fn with(mut self, id: impl Into<String>, data: Vec<u8>) -> Self {
        self.insert(id, data);
        self
    }
}

impl FontSource for MemoryFontSource {
    fn read_font(&self, id: &str) -> io::Result<Vec<u8>> {
        self.fonts.get(id).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("font not found: {}", id))
        })
    }
}
