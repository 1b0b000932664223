//! `maxp` table: maximum profile
//!
//! Only the glyph count matters to us; the remaining fields are
//! interpreter resource limits.

use crate::error::Result;
use crate::tables::{FontReader, TableTag};

/// Table tag for the maximum profile.
pub const TAG: TableTag = TableTag::new(b"maxp");

/// Parsed maximum profile table.
#[derive(Debug, Clone, Copy)]
pub struct MaximumProfileTable {
    pub num_glyphs: u16,
}

impl MaximumProfileTable {
    /// Load the maximum profile; fails with `MissingTable("maxp")` when
    /// absent.
    pub fn load(font: &FontReader<'_>) -> Result<Self> {
        let mut reader = font.table_reader(TAG)?;
        let _version = reader.read_u32()?;
        let num_glyphs = reader.read_u16()?;
        Ok(Self { num_glyphs })
    }
}
