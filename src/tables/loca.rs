//! `loca` table: glyph location offsets
//!
//! Maps each glyph index to its byte range inside `glyf`. The table
//! cannot be interpreted on its own: the offset width comes from `head`
//! and the entry count from `maxp`, so those must parse first. The table
//! itself is optional; fonts without outlines simply have none.

use crate::error::{FontError, Result};
use crate::tables::head::{HeadTable, IndexLocationFormat};
use crate::tables::maxp::MaximumProfileTable;
use crate::tables::{maxp, FontReader, TableTag};

/// Table tag for the glyph locations.
pub const TAG: TableTag = TableTag::new(b"loca");

/// Parsed glyph location offsets (one more entry than glyphs).
#[derive(Debug, Clone)]
pub struct IndexLocationTable {
    offsets: Vec<u32>,
}

impl IndexLocationTable {
    /// Load the location table.
    ///
    /// Returns `Ok(None)` when the font has no `loca` table. Fails with
    /// `MissingTable("head")` when the header is absent, and with
    /// `InvalidTable("maxp")` when the header parsed but the profile
    /// table needed for the entry count did not.
    pub fn load(font: &FontReader<'_>) -> Result<Option<Self>> {
        let head = HeadTable::load(font)?;
        let maxp = match MaximumProfileTable::load(font) {
            Ok(maxp) => maxp,
            Err(FontError::MissingTable(_)) => {
                // head parsed, so the loca format is known, but without a
                // glyph count the table contents cannot be validated.
                return Err(FontError::InvalidTable(maxp::TAG));
            }
            Err(e) => return Err(e),
        };

        let Some(mut reader) = font.try_table_reader(TAG) else {
            return Ok(None);
        };

        let entry_count = maxp.num_glyphs as usize + 1;
        let mut offsets = Vec::with_capacity(entry_count);
        match head.index_location_format {
            IndexLocationFormat::Short => {
                for _ in 0..entry_count {
                    offsets.push(reader.read_u16()? as u32 * 2);
                }
            }
            IndexLocationFormat::Long => {
                for _ in 0..entry_count {
                    offsets.push(reader.read_u32()?);
                }
            }
        }

        Ok(Some(Self { offsets }))
    }

    /// Byte range of a glyph inside `glyf`; `None` past the glyph count.
    pub fn glyph_range(&self, glyph_id: u16) -> Option<(u32, u32)> {
        let start = *self.offsets.get(glyph_id as usize)?;
        let end = *self.offsets.get(glyph_id as usize + 1)?;
        Some((start, end))
    }

    /// Number of glyphs covered by the table.
    pub fn glyph_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }
}
