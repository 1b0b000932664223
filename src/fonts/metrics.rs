//! Font-wide metrics assembled from the individual tables
//!
//! [`FontMetrics`] is the loaded form of one font: the character map,
//! horizontal metrics, outlines, kerning and substitution data, plus
//! the scalars every layout computation needs. It is immutable after
//! loading and safe to share across threads behind an `Arc`.

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::fonts::glyph::{GlyphMetrics, GlyphType};
use crate::geometry::Point;
use crate::tables::cmap::CmapTable;
use crate::tables::glyf::{GlyphTable, GlyphVector};
use crate::tables::gsub::SubstitutionTable;
use crate::tables::head::HeadTable;
use crate::tables::hhea::HorizontalHeaderTable;
use crate::tables::hmtx::HorizontalMetricsTable;
use crate::tables::kern::KerningTable;
use crate::tables::loca::IndexLocationTable;
use crate::tables::maxp::MaximumProfileTable;
use crate::tables::FontReader;

/// All data loaded from one font file.
#[derive(Debug)]
pub struct FontMetrics {
    units_per_em: u16,
    scale_factor: f32,
    ascender: i16,
    descender: i16,
    line_gap: i16,
    cmap: CmapTable,
    horizontal_metrics: HorizontalMetricsTable,
    glyphs: Option<GlyphTable>,
    kerning: KerningTable,
    substitutions: SubstitutionTable,
}

impl FontMetrics {
    /// Parse a font from raw file bytes.
    ///
    /// The required tables (`head`, `maxp`, `hhea`, `hmtx`, `cmap`) must
    /// all be present; outlines, kerning and substitutions are optional
    /// and default to empty when their tables are missing.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let font = FontReader::new(data)?;

        let head = HeadTable::load(&font)?;
        let maxp = MaximumProfileTable::load(&font)?;
        let hhea = HorizontalHeaderTable::load(&font)?;
        let horizontal_metrics = HorizontalMetricsTable::load(&font, &hhea, &maxp)?;
        let cmap = CmapTable::load(&font)?;

        let glyphs = match IndexLocationTable::load(&font)? {
            Some(loca) => GlyphTable::load(&font, &loca)?,
            None => None,
        };
        let kerning = KerningTable::load(&font)?;
        let substitutions = SubstitutionTable::load(&font)?;

        debug!(
            units_per_em = head.units_per_em,
            glyphs = maxp.num_glyphs,
            has_outlines = glyphs.is_some(),
            "loaded font"
        );

        Ok(Self::new(
            head.units_per_em,
            hhea.ascender,
            hhea.descender,
            hhea.line_gap,
            cmap,
            horizontal_metrics,
            glyphs,
            kerning,
            substitutions,
        ))
    }

    /// Read and parse a font file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Assemble metrics from already-loaded tables, for fonts built in
    /// memory rather than parsed from a file.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        units_per_em: u16,
        ascender: i16,
        descender: i16,
        line_gap: i16,
        cmap: CmapTable,
        horizontal_metrics: HorizontalMetricsTable,
        glyphs: Option<GlyphTable>,
        kerning: KerningTable,
        substitutions: SubstitutionTable,
    ) -> Self {
        Self {
            units_per_em,
            scale_factor: units_per_em as f32 * 72.0,
            ascender,
            descender,
            line_gap,
            cmap,
            horizontal_metrics,
            glyphs,
            kerning,
            substitutions,
        }
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// `units_per_em * 72`; the divisor that maps font units scaled by
    /// `dpi * point_size` into device space.
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    pub fn ascender(&self) -> i16 {
        self.ascender
    }

    pub fn descender(&self) -> i16 {
        self.descender
    }

    pub fn line_gap(&self) -> i16 {
        self.line_gap
    }

    /// Baseline-to-baseline distance in font units.
    pub fn line_height(&self) -> i32 {
        self.ascender as i32 - self.descender as i32 + self.line_gap as i32
    }

    /// Whether the character map covers `code_point`.
    pub fn contains_code_point(&self, code_point: char) -> bool {
        self.cmap.contains(code_point as u32)
    }

    /// Glyph index for a code point, `None` when unmapped.
    pub fn glyph_id(&self, code_point: char) -> Option<u16> {
        self.cmap.glyph_id(code_point as u32)
    }

    /// Kerning adjustment between two glyphs, in font units.
    pub fn kerning_offset(&self, left: u16, right: u16) -> Point {
        self.kerning.offset(left, right)
    }

    /// Applies every substitution lookup in order.
    pub fn substitute(&self, glyph_id: u16) -> u16 {
        self.substitutions.substitute(glyph_id)
    }

    /// Metrics for the glyph a code point maps to.
    ///
    /// Unmapped code points resolve to glyph 0 and are marked
    /// [`GlyphType::Fallback`] so callers can probe other fonts.
    pub fn glyph_metrics(&self, code_point: char) -> Result<GlyphMetrics> {
        let (glyph_id, glyph_type) = match self.glyph_id(code_point) {
            Some(id) => (id, GlyphType::Standard),
            None => (0, GlyphType::Fallback),
        };
        let vector = match &self.glyphs {
            Some(table) => table.glyph(glyph_id)?,
            None => GlyphVector::empty(),
        };
        let advance_height = (self.ascender as i32 - self.descender as i32).max(0) as u16;
        Ok(GlyphMetrics::new(
            code_point,
            glyph_id,
            vector,
            self.horizontal_metrics.advance_width(glyph_id),
            advance_height,
            self.horizontal_metrics.left_side_bearing(glyph_id),
            self.units_per_em,
            glyph_type,
            None,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_metrics() -> FontMetrics {
        FontMetrics::new(
            1000,
            800,
            -200,
            90,
            CmapTable::from_mappings([('A' as u32, 1), ('B' as u32, 2)]),
            HorizontalMetricsTable::from_metrics(vec![500, 600, 700], vec![0, 50, 60]),
            None,
            KerningTable::default(),
            SubstitutionTable::default(),
        )
    }

    #[test]
    fn test_scale_factor_is_upem_times_72() {
        let metrics = fake_metrics();
        assert_eq!(metrics.scale_factor(), 72_000.0);
    }

    #[test]
    fn test_line_height_sums_vertical_metrics() {
        let metrics = fake_metrics();
        assert_eq!(metrics.line_height(), 800 + 200 + 90);
    }

    #[test]
    fn test_mapped_code_point_is_standard() {
        let metrics = fake_metrics();
        let glyph = metrics.glyph_metrics('B').unwrap();
        assert_eq!(glyph.glyph_id(), 2);
        assert_eq!(glyph.glyph_type(), GlyphType::Standard);
        assert_eq!(glyph.advance_width(), 700);
        assert_eq!(glyph.left_side_bearing(), 60);
        assert_eq!(glyph.advance_height(), 1000);
    }

    #[test]
    fn test_unmapped_code_point_falls_back_to_glyph_zero() {
        let metrics = fake_metrics();
        let glyph = metrics.glyph_metrics('Z').unwrap();
        assert_eq!(glyph.glyph_id(), 0);
        assert_eq!(glyph.glyph_type(), GlyphType::Fallback);
        assert_eq!(glyph.advance_width(), 500);
    }

    #[test]
    fn test_contains_code_point() {
        let metrics = fake_metrics();
        assert!(metrics.contains_code_point('A'));
        assert!(!metrics.contains_code_point('z'));
    }
}
