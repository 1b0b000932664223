//! `GSUB` table: glyph substitution lookups
//!
//! Lookups are format-tagged: a 16-bit type selects the decoder. Type 1
//! (single substitution) is supported in both of its formats; type 7 is
//! the extension mechanism that parks the real subtable behind a 32-bit
//! offset for tables too large for 16-bit offsets. Anything else decodes
//! to [`LookupSubTable::NotImplemented`] so an exotic lookup never sinks
//! an otherwise usable font.

use crate::binary::BigEndianReader;
use crate::error::Result;
use crate::tables::{FontReader, TableTag};
use tracing::warn;

/// Table tag for the substitution data.
pub const TAG: TableTag = TableTag::new(b"GSUB");

const EXTENSION_LOOKUP_TYPE: u16 = 7;

/// Which glyphs a lookup applies to.
#[derive(Debug, Clone)]
pub enum CoverageTable {
    /// Format 1: sorted glyph list; the coverage index is the position.
    Glyphs(Vec<u16>),
    /// Format 2: glyph ranges with a running start index.
    Ranges(Vec<(u16, u16, u16)>),
}

impl CoverageTable {
    fn load(reader: &mut BigEndianReader<'_>, offset: usize) -> Result<Self> {
        reader.seek(offset);
        let format = reader.read_u16()?;
        match format {
            1 => {
                let count = reader.read_u16()?;
                let mut glyphs = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    glyphs.push(reader.read_u16()?);
                }
                Ok(Self::Glyphs(glyphs))
            }
            _ => {
                let count = reader.read_u16()?;
                let mut ranges = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    let start = reader.read_u16()?;
                    let end = reader.read_u16()?;
                    let start_index = reader.read_u16()?;
                    ranges.push((start, end, start_index));
                }
                Ok(Self::Ranges(ranges))
            }
        }
    }

    /// Coverage index of a glyph, if covered.
    fn index_of(&self, glyph_id: u16) -> Option<u16> {
        match self {
            Self::Glyphs(glyphs) => glyphs
                .binary_search(&glyph_id)
                .ok()
                .map(|index| index as u16),
            Self::Ranges(ranges) => ranges
                .iter()
                .find(|&&(start, end, _)| glyph_id >= start && glyph_id <= end)
                .map(|&(start, _, start_index)| start_index + (glyph_id - start)),
        }
    }
}

/// One substitution lookup subtable, selected by its lookup type and
/// format tags.
#[derive(Debug, Clone)]
pub enum LookupSubTable {
    /// Single substitution by glyph-id delta (type 1 format 1).
    SingleDelta {
        coverage: CoverageTable,
        delta: i16,
    },
    /// Single substitution via a substitute array (type 1 format 2).
    SingleMapped {
        coverage: CoverageTable,
        substitutes: Vec<u16>,
    },
    /// Unsupported or malformed lookup; substitutes nothing.
    NotImplemented,
}

impl LookupSubTable {
    /// Decode a subtable of the given lookup type at `offset`.
    ///
    /// Extension subtables (type 7) re-dispatch at their 32-bit offset
    /// with the declared inner type; an extension may not nest another
    /// extension, so an inner type of 7 degrades to
    /// [`LookupSubTable::NotImplemented`] rather than failing the font.
    pub fn load(lookup_type: u16, reader: &mut BigEndianReader<'_>, offset: usize) -> Result<Self> {
        match lookup_type {
            1 => Self::load_single(reader, offset),
            EXTENSION_LOOKUP_TYPE => {
                reader.seek(offset);
                let _format = reader.read_u16()?;
                let extension_lookup_type = reader.read_u16()?;
                let extension_offset = reader.read_offset32()?;

                if extension_lookup_type == EXTENSION_LOOKUP_TYPE {
                    // An extension may not point at another extension.
                    warn!("self-referential extension lookup; substituting a no-op");
                    return Ok(Self::NotImplemented);
                }

                Self::load(
                    extension_lookup_type,
                    reader,
                    offset + extension_offset as usize,
                )
            }
            _ => {
                warn!(lookup_type, "unsupported substitution lookup type");
                Ok(Self::NotImplemented)
            }
        }
    }

    fn load_single(reader: &mut BigEndianReader<'_>, offset: usize) -> Result<Self> {
        reader.seek(offset);
        let format = reader.read_u16()?;
        let coverage_offset = reader.read_u16()? as usize;
        match format {
            1 => {
                let delta = reader.read_i16()?;
                let coverage = CoverageTable::load(reader, offset + coverage_offset)?;
                Ok(Self::SingleDelta { coverage, delta })
            }
            2 => {
                let count = reader.read_u16()?;
                let mut substitutes = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    substitutes.push(reader.read_u16()?);
                }
                let coverage = CoverageTable::load(reader, offset + coverage_offset)?;
                Ok(Self::SingleMapped {
                    coverage,
                    substitutes,
                })
            }
            _ => {
                warn!(format, "unsupported single substitution format");
                Ok(Self::NotImplemented)
            }
        }
    }

    /// Whether this subtable is the no-op variant.
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented)
    }

    /// The substitute for a glyph, if this subtable rewrites it.
    pub fn substitute(&self, glyph_id: u16) -> Option<u16> {
        match self {
            Self::SingleDelta { coverage, delta } => {
                coverage.index_of(glyph_id)?;
                Some((glyph_id as i32 + *delta as i32) as u16)
            }
            Self::SingleMapped {
                coverage,
                substitutes,
            } => {
                let index = coverage.index_of(glyph_id)?;
                substitutes.get(index as usize).copied()
            }
            Self::NotImplemented => None,
        }
    }
}

/// Parsed substitution table; empty when the font has none.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionTable {
    subtables: Vec<LookupSubTable>,
}

impl SubstitutionTable {
    /// Load the substitution lookups. The table is optional; an absent
    /// table yields an empty one.
    pub fn load(font: &FontReader<'_>) -> Result<Self> {
        let Some(mut reader) = font.try_table_reader(TAG) else {
            return Ok(Self::default());
        };

        let _major = reader.read_u16()?;
        let _minor = reader.read_u16()?;
        let _script_list_offset = reader.read_u16()?;
        let _feature_list_offset = reader.read_u16()?;
        let lookup_list_offset = reader.read_u16()? as usize;

        reader.seek(lookup_list_offset);
        let lookup_count = reader.read_u16()?;
        let mut lookup_offsets = Vec::with_capacity(lookup_count as usize);
        for _ in 0..lookup_count {
            lookup_offsets.push(lookup_list_offset + reader.read_u16()? as usize);
        }

        let mut subtables = Vec::new();
        for lookup_offset in lookup_offsets {
            reader.seek(lookup_offset);
            let lookup_type = reader.read_u16()?;
            let _lookup_flag = reader.read_u16()?;
            let subtable_count = reader.read_u16()?;
            let mut subtable_offsets = Vec::with_capacity(subtable_count as usize);
            for _ in 0..subtable_count {
                subtable_offsets.push(lookup_offset + reader.read_u16()? as usize);
            }
            for subtable_offset in subtable_offsets {
                subtables.push(LookupSubTable::load(lookup_type, &mut reader, subtable_offset)?);
            }
        }

        Ok(Self { subtables })
    }

    /// The loaded lookup subtables, in table order.
    pub fn subtables(&self) -> &[LookupSubTable] {
        &self.subtables
    }

    /// Apply single-substitution lookups to a glyph, in table order.
    pub fn substitute(&self, glyph_id: u16) -> u16 {
        let mut current = glyph_id;
        for subtable in &self.subtables {
            if let Some(next) = subtable.substitute(current) {
                current = next;
            }
        }
        current
    }
}
