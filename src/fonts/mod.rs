//! Loaded fonts and font collections

pub mod glyph;
pub mod metrics;
pub mod renderer;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::error::{FontError, Result};

pub use glyph::{GlyphColor, GlyphMetrics, GlyphType};
pub use metrics::FontMetrics;
pub use renderer::{GlyphRenderer, GlyphRendererParameters};

/// A font at a specific point size: shared metrics plus the size text
/// will be laid out at. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Font {
    metrics: Arc<FontMetrics>,
    size: f32,
}

impl Font {
    pub fn new(metrics: Arc<FontMetrics>, size: f32) -> Self {
        Self { metrics, size }
    }

    /// Parse a font from raw bytes at the given point size.
    pub fn from_bytes(data: &[u8], size: f32) -> Result<Self> {
        Ok(Self::new(Arc::new(FontMetrics::from_bytes(data)?), size))
    }

    /// Load a font file at the given point size.
    pub fn from_file(path: impl AsRef<Path>, size: f32) -> Result<Self> {
        Ok(Self::new(Arc::new(FontMetrics::from_file(path)?), size))
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// Point size
    pub fn size(&self) -> f32 {
        self.size
    }

    /// The same font at a different point size.
    pub fn with_size(&self, size: f32) -> Self {
        Self {
            metrics: Arc::clone(&self.metrics),
            size,
        }
    }
}

/// Installed font families, looked up by name.
#[derive(Debug, Default)]
pub struct FontCollection {
    families: HashMap<String, Arc<FontMetrics>>,
}

impl FontCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a font under a family name, replacing any previous font
    /// with the same name.
    pub fn install(&mut self, family: impl Into<String>, metrics: FontMetrics) {
        let family = family.into();
        debug!(family = %family, "installing font family");
        self.families.insert(family, Arc::new(metrics));
    }

    /// Parse and install a font file under a family name.
    pub fn install_bytes(&mut self, family: impl Into<String>, data: &[u8]) -> Result<()> {
        let metrics = FontMetrics::from_bytes(data)?;
        self.install(family, metrics);
        Ok(())
    }

    /// Look up an installed family.
    pub fn find(&self, family: &str) -> Result<&Arc<FontMetrics>> {
        self.families
            .get(family)
            .ok_or_else(|| FontError::FontFamilyNotFound(family.to_string()))
    }

    /// A [`Font`] for an installed family at a point size.
    pub fn create_font(&self, family: &str, size: f32) -> Result<Font> {
        Ok(Font::new(Arc::clone(self.find(family)?), size))
    }

    pub fn family_names(&self) -> impl Iterator<Item = &str> {
        self.families.keys().map(String::as_str)
    }
}
