//! `head` table: global font header
//!
//! Carries units per em, the outline bounding box and the format used by
//! the glyph location table. Required for every font.

use crate::error::{FontError, Result};
use crate::geometry::{Bounds, Point};
use crate::tables::{FontReader, TableTag};
use bitflags::bitflags;

/// Table tag for the font header.
pub const TAG: TableTag = TableTag::new(b"head");

bitflags! {
    /// `head` flags field (only the bits we interpret).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct HeadFlags: u16 {
        /// Baseline for font at y = 0
        const BASELINE_AT_ZERO = 1 << 0;
        /// Left sidebearing point at x = 0
        const LSB_AT_ZERO = 1 << 1;
        /// Instructions may depend on point size
        const SIZE_DEPENDENT_INSTRUCTIONS = 1 << 2;
        /// Force ppem to integer values
        const INTEGER_PPEM = 1 << 3;
        /// Instructions may alter advance width
        const INSTRUCTIONS_ALTER_ADVANCE = 1 << 4;
    }
}

bitflags! {
    /// `head` macStyle field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MacStyle: u16 {
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
        const OUTLINE = 1 << 3;
        const SHADOW = 1 << 4;
        const CONDENSED = 1 << 5;
        const EXTENDED = 1 << 6;
    }
}

/// Format of the `loca` table offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexLocationFormat {
    /// Offsets stored as u16, halved
    Short,
    /// Offsets stored as u32
    Long,
}

/// Parsed font header table.
#[derive(Debug, Clone)]
pub struct HeadTable {
    pub flags: HeadFlags,
    pub mac_style: MacStyle,
    pub units_per_em: u16,
    pub bounds: Bounds,
    pub lowest_rec_ppem: u16,
    pub index_location_format: IndexLocationFormat,
}

impl HeadTable {
    /// Load the header table; fails with `MissingTable("head")` when the
    /// directory has no such table.
    pub fn load(font: &FontReader<'_>) -> Result<Self> {
        let mut reader = font.table_reader(TAG)?;

        let _version = reader.read_u32()?;
        let _font_revision = reader.read_u32()?;
        let _checksum_adjustment = reader.read_u32()?;
        let _magic = reader.read_u32()?;
        let flags = HeadFlags::from_bits_truncate(reader.read_u16()?);
        let units_per_em = reader.read_u16()?;
        // created / modified timestamps
        reader.skip(16);
        let x_min = reader.read_i16()?;
        let y_min = reader.read_i16()?;
        let x_max = reader.read_i16()?;
        let y_max = reader.read_i16()?;
        let mac_style = MacStyle::from_bits_truncate(reader.read_u16()?);
        let lowest_rec_ppem = reader.read_u16()?;
        let _font_direction_hint = reader.read_i16()?;
        let index_location_format = match reader.read_i16()? {
            0 => IndexLocationFormat::Short,
            1 => IndexLocationFormat::Long,
            _ => return Err(FontError::InvalidTable(TAG)),
        };

        Ok(Self {
            flags,
            mac_style,
            units_per_em,
            bounds: Bounds::new(
                Point::new(x_min as f32, y_min as f32),
                Point::new(x_max as f32, y_max as f32),
            ),
            lowest_rec_ppem,
            index_location_format,
        })
    }
}
