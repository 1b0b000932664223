//! `hhea` table: horizontal header
//!
//! Supplies the typographic ascender/descender/line gap and the number of
//! entries in the horizontal metrics table.

use crate::error::Result;
use crate::tables::{FontReader, TableTag};

/// Table tag for the horizontal header.
pub const TAG: TableTag = TableTag::new(b"hhea");

/// Parsed horizontal header table.
#[derive(Debug, Clone, Copy)]
pub struct HorizontalHeaderTable {
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub advance_width_max: u16,
    pub number_of_h_metrics: u16,
}

impl HorizontalHeaderTable {
    /// Load the horizontal header; fails with `MissingTable("hhea")` when
    /// absent.
    pub fn load(font: &FontReader<'_>) -> Result<Self> {
        let mut reader = font.table_reader(TAG)?;

        let _version = reader.read_u32()?;
        let ascender = reader.read_i16()?;
        let descender = reader.read_i16()?;
        let line_gap = reader.read_i16()?;
        let advance_width_max = reader.read_u16()?;
        // minLeftSideBearing, minRightSideBearing, xMaxExtent,
        // caretSlopeRise, caretSlopeRun, caretOffset, 4 reserved words,
        // metricDataFormat
        reader.skip(22);
        let number_of_h_metrics = reader.read_u16()?;

        Ok(Self {
            ascender,
            descender,
            line_gap,
            advance_width_max,
            number_of_h_metrics,
        })
    }

    /// Line height in font units.
    pub fn line_height(&self) -> i32 {
        self.ascender as i32 - self.descender as i32 + self.line_gap as i32
    }
}
