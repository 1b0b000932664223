//! `hmtx` table: horizontal glyph metrics
//!
//! The table stores `number_of_h_metrics` (advance, left side bearing)
//! pairs followed by bare bearings for the remaining glyphs, which all
//! share the last advance. Typical for monospaced tails.

use crate::error::Result;
use crate::tables::hhea::HorizontalHeaderTable;
use crate::tables::maxp::MaximumProfileTable;
use crate::tables::{FontReader, TableTag};

/// Table tag for the horizontal metrics.
pub const TAG: TableTag = TableTag::new(b"hmtx");

/// Parsed horizontal metrics, expanded to one entry per glyph.
#[derive(Debug, Clone)]
pub struct HorizontalMetricsTable {
    advances: Vec<u16>,
    bearings: Vec<i16>,
}

impl HorizontalMetricsTable {
    /// Load the horizontal metrics; fails with `MissingTable("hmtx")`
    /// when absent.
    pub fn load(
        font: &FontReader<'_>,
        hhea: &HorizontalHeaderTable,
        maxp: &MaximumProfileTable,
    ) -> Result<Self> {
        let mut reader = font.table_reader(TAG)?;

        let metric_count = hhea.number_of_h_metrics as usize;
        let glyph_count = maxp.num_glyphs as usize;

        let mut advances = Vec::with_capacity(glyph_count);
        let mut bearings = Vec::with_capacity(glyph_count);
        for _ in 0..metric_count.min(glyph_count) {
            advances.push(reader.read_u16()?);
            bearings.push(reader.read_i16()?);
        }

        let last_advance = advances.last().copied().unwrap_or(0);
        for _ in advances.len()..glyph_count {
            advances.push(last_advance);
            bearings.push(reader.read_i16().unwrap_or(0));
        }

        Ok(Self { advances, bearings })
    }

    /// Build metrics directly from per-glyph values.
    pub fn from_metrics(advances: Vec<u16>, bearings: Vec<i16>) -> Self {
        Self { advances, bearings }
    }

    /// Advance width for a glyph, in font units.
    pub fn advance_width(&self, glyph_id: u16) -> u16 {
        self.advances
            .get(glyph_id as usize)
            .or(self.advances.last())
            .copied()
            .unwrap_or(0)
    }

    /// Left side bearing for a glyph, in font units.
    pub fn left_side_bearing(&self, glyph_id: u16) -> i16 {
        self.bearings.get(glyph_id as usize).copied().unwrap_or(0)
    }
}
