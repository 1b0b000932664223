//! `cmap` table: code point to glyph index mapping
//!
//! Encoding records point at per-platform subtables; we pick the first
//! Unicode-capable one and decode format 4 (segmented, BMP) or format 12
//! (sequential groups, full range). Everything is flattened into one map
//! at load time so lookups are a plain hash probe.

use crate::binary::BigEndianReader;
use crate::error::{FontError, Result};
use crate::tables::{FontReader, TableTag};
use std::collections::HashMap;
use tracing::warn;

/// Table tag for the character map.
pub const TAG: TableTag = TableTag::new(b"cmap");

const PLATFORM_UNICODE: u16 = 0;
const PLATFORM_WINDOWS: u16 = 3;

/// Parsed character map.
#[derive(Debug, Clone, Default)]
pub struct CmapTable {
    glyph_ids: HashMap<u32, u16>,
}

impl CmapTable {
    /// Load the character map; fails with `MissingTable("cmap")` when
    /// absent.
    pub fn load(font: &FontReader<'_>) -> Result<Self> {
        let mut reader = font.table_reader(TAG)?;

        let _version = reader.read_u16()?;
        let num_tables = reader.read_u16()?;

        let mut chosen_offset = None;
        for _ in 0..num_tables {
            let platform_id = reader.read_u16()?;
            let _encoding_id = reader.read_u16()?;
            let offset = reader.read_offset32()?;
            if chosen_offset.is_none()
                && (platform_id == PLATFORM_UNICODE || platform_id == PLATFORM_WINDOWS)
            {
                chosen_offset = Some(offset as usize);
            }
        }

        let Some(offset) = chosen_offset else {
            return Err(FontError::InvalidTable(TAG));
        };

        reader.seek(offset);
        let format = reader.read_u16()?;
        let glyph_ids = match format {
            4 => Self::parse_format4(&mut reader)?,
            12 => Self::parse_format12(&mut reader)?,
            _ => {
                warn!(format, "unsupported cmap subtable format");
                return Err(FontError::InvalidTable(TAG));
            }
        };

        Ok(Self { glyph_ids })
    }

    /// Build a map directly from code point / glyph id pairs.
    pub fn from_mappings(mappings: impl IntoIterator<Item = (u32, u16)>) -> Self {
        Self {
            glyph_ids: mappings.into_iter().collect(),
        }
    }

    /// Glyph index for a code point, if the font maps it.
    pub fn glyph_id(&self, code_point: u32) -> Option<u16> {
        self.glyph_ids.get(&code_point).copied().filter(|&id| id != 0)
    }

    /// Whether the font maps this code point to a real glyph.
    pub fn contains(&self, code_point: u32) -> bool {
        self.glyph_id(code_point).is_some()
    }

    fn parse_format4(reader: &mut BigEndianReader<'_>) -> Result<HashMap<u32, u16>> {
        let _length = reader.read_u16()?;
        let _language = reader.read_u16()?;
        let seg_count = (reader.read_u16()? / 2) as usize;
        // searchRange, entrySelector, rangeShift
        reader.skip(6);

        let mut end_codes = Vec::with_capacity(seg_count);
        for _ in 0..seg_count {
            end_codes.push(reader.read_u16()?);
        }
        let _reserved = reader.read_u16()?;
        let mut start_codes = Vec::with_capacity(seg_count);
        for _ in 0..seg_count {
            start_codes.push(reader.read_u16()?);
        }
        let mut id_deltas = Vec::with_capacity(seg_count);
        for _ in 0..seg_count {
            id_deltas.push(reader.read_i16()?);
        }
        let range_offset_base = reader.position();
        let mut id_range_offsets = Vec::with_capacity(seg_count);
        for _ in 0..seg_count {
            id_range_offsets.push(reader.read_u16()?);
        }

        let mut glyph_ids = HashMap::new();
        for seg in 0..seg_count {
            let start = start_codes[seg];
            let end = end_codes[seg];
            if start == 0xFFFF && end == 0xFFFF {
                continue;
            }
            for code in start..=end {
                let glyph = if id_range_offsets[seg] == 0 {
                    (code as i32 + id_deltas[seg] as i32) as u16
                } else {
                    // The offset is relative to its own position in the
                    // idRangeOffset array.
                    let entry = range_offset_base + seg * 2;
                    let glyph_pos = entry
                        + id_range_offsets[seg] as usize
                        + (code - start) as usize * 2;
                    reader.seek(glyph_pos);
                    let raw = reader.read_u16()?;
                    if raw == 0 {
                        0
                    } else {
                        (raw as i32 + id_deltas[seg] as i32) as u16
                    }
                };
                if glyph != 0 {
                    glyph_ids.insert(code as u32, glyph);
                }
                if code == u16::MAX {
                    break;
                }
            }
        }

        Ok(glyph_ids)
    }

    fn parse_format12(reader: &mut BigEndianReader<'_>) -> Result<HashMap<u32, u16>> {
        let _reserved = reader.read_u16()?;
        let _length = reader.read_u32()?;
        let _language = reader.read_u32()?;
        let num_groups = reader.read_u32()?;

        let mut glyph_ids = HashMap::new();
        for _ in 0..num_groups {
            let start_char = reader.read_u32()?;
            let end_char = reader.read_u32()?;
            let start_glyph = reader.read_u32()?;
            if end_char < start_char {
                return Err(FontError::InvalidTable(TAG));
            }
            for (i, code) in (start_char..=end_char).enumerate() {
                glyph_ids.insert(code, (start_glyph as usize + i) as u16);
            }
        }

        Ok(glyph_ids)
    }
}
