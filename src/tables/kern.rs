//! `kern` table: pairwise glyph spacing adjustments
//!
//! The table is a list of format-tagged subtables. Format 0 is a sorted
//! pair list, format 2 a class-based matrix; anything else is skipped so
//! one exotic subtable never invalidates the font. Subtables compose
//! additively: every subtable is consulted in load order and its offset
//! summed into the result.

use crate::binary::BigEndianReader;
use crate::error::Result;
use crate::geometry::Point;
use crate::tables::{FontReader, TableTag};
use bitflags::bitflags;
use tracing::warn;

/// Table tag for the kerning data.
pub const TAG: TableTag = TableTag::new(b"kern");

bitflags! {
    /// Kern subtable coverage bits (low byte; the high byte is the
    /// subtable format).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Coverage: u8 {
        const HORIZONTAL = 0x01;
        const MINIMUM = 0x02;
        const CROSS_STREAM = 0x04;
        const OVERRIDE = 0x08;
    }
}

/// One kerning subtable, selected by its format tag.
#[derive(Debug, Clone)]
enum KerningSubTable {
    /// Format 0: sorted (left, right) pair list.
    Pairs {
        cross_stream: bool,
        /// Sorted by `left << 16 | right` for binary search.
        pairs: Vec<(u32, i16)>,
    },
    /// Format 2: class-based two-dimensional matrix.
    ClassMatrix {
        cross_stream: bool,
        left_classes: ClassTable,
        right_classes: ClassTable,
        row_width: u16,
        /// Matrix values addressed by left class + right class, where
        /// the classes are pre-multiplied offsets per the format.
        values: Vec<i16>,
        array_offset: u16,
    },
}

#[derive(Debug, Clone)]
struct ClassTable {
    first_glyph: u16,
    values: Vec<u16>,
}

impl ClassTable {
    /// Class value for a glyph; `None` for glyphs outside the table,
    /// which never kern.
    fn class_of(&self, glyph_id: u16) -> Option<u16> {
        glyph_id
            .checked_sub(self.first_glyph)
            .and_then(|i| self.values.get(i as usize))
            .copied()
    }
}

/// Parsed kerning table; empty when the font has none.
#[derive(Debug, Clone, Default)]
pub struct KerningTable {
    subtables: Vec<KerningSubTable>,
}

impl KerningTable {
    /// Load the kerning table. The table is optional; an absent table
    /// yields an empty one.
    pub fn load(font: &FontReader<'_>) -> Result<Self> {
        let Some(mut reader) = font.try_table_reader(TAG) else {
            return Ok(Self::default());
        };

        let _version = reader.read_u16()?;
        let subtable_count = reader.read_u16()?;

        let mut subtables = Vec::with_capacity(subtable_count as usize);
        for _ in 0..subtable_count {
            if let Some(subtable) = KerningSubTable::load(&mut reader)? {
                subtables.push(subtable);
            }
        }

        Ok(Self { subtables })
    }

    /// Build a single-subtable pair list, for fonts assembled in
    /// memory.
    pub fn from_pairs(pairs: impl IntoIterator<Item = ((u16, u16), i16)>) -> Self {
        let mut pairs: Vec<(u32, i16)> = pairs
            .into_iter()
            .map(|((left, right), value)| (((left as u32) << 16) | right as u32, value))
            .collect();
        pairs.sort_by_key(|&(key, _)| key);
        Self {
            subtables: vec![KerningSubTable::Pairs {
                cross_stream: false,
                pairs,
            }],
        }
    }

    /// Number of usable subtables.
    pub fn subtable_count(&self) -> usize {
        self.subtables.len()
    }

    /// Accumulated kerning offset for a glyph pair, in font units.
    /// Subtables compose additively in load order.
    pub fn offset(&self, left: u16, right: u16) -> Point {
        let mut result = Point::zero();
        for subtable in &self.subtables {
            subtable.apply_offset(left, right, &mut result);
        }
        result
    }
}

impl KerningSubTable {
    /// Parse one subtable, leaving the reader at the next one.
    /// Unsupported formats return `None`.
    fn load(reader: &mut BigEndianReader<'_>) -> Result<Option<Self>> {
        let subtable_start = reader.position();
        let _version = reader.read_u16()?;
        let length = reader.read_u16()?;
        let coverage_and_format = reader.read_u16()?;
        let format = (coverage_and_format >> 8) as u8;
        let coverage = Coverage::from_bits_truncate(coverage_and_format as u8);
        let cross_stream = coverage.contains(Coverage::CROSS_STREAM);

        let subtable = match format {
            0 => Some(Self::load_pairs(reader, cross_stream)?),
            2 => Some(Self::load_class_matrix(
                reader,
                subtable_start,
                length,
                cross_stream,
            )?),
            _ => {
                warn!(format, "skipping unsupported kern subtable format");
                None
            }
        };

        // Always resume at the recorded subtable boundary, supported or
        // not.
        reader.seek(subtable_start + length as usize);
        Ok(subtable)
    }

    fn load_pairs(reader: &mut BigEndianReader<'_>, cross_stream: bool) -> Result<Self> {
        let pair_count = reader.read_u16()?;
        // searchRange, entrySelector, rangeShift
        reader.skip(6);

        let mut pairs = Vec::with_capacity(pair_count as usize);
        for _ in 0..pair_count {
            let left = reader.read_u16()?;
            let right = reader.read_u16()?;
            let value = reader.read_i16()?;
            pairs.push(((left as u32) << 16 | right as u32, value));
        }
        pairs.sort_unstable_by_key(|&(key, _)| key);

        Ok(Self::Pairs {
            cross_stream,
            pairs,
        })
    }

    fn load_class_matrix(
        reader: &mut BigEndianReader<'_>,
        subtable_start: usize,
        length: u16,
        cross_stream: bool,
    ) -> Result<Self> {
        let row_width = reader.read_u16()?;
        let left_offset = reader.read_u16()?;
        let right_offset = reader.read_u16()?;
        let array_offset = reader.read_u16()?;

        let left_classes = Self::load_class_table(reader, subtable_start + left_offset as usize)?;
        let right_classes = Self::load_class_table(reader, subtable_start + right_offset as usize)?;

        // Class values are pre-multiplied byte offsets from the subtable
        // start; read the matrix region up to the subtable boundary so
        // lookups become slice indexing.
        let entry_count = (length as usize).saturating_sub(array_offset as usize) / 2;
        reader.seek(subtable_start + array_offset as usize);
        let mut values = Vec::with_capacity(entry_count);
        for _ in 0..entry_count {
            values.push(reader.read_i16()?);
        }

        Ok(Self::ClassMatrix {
            cross_stream,
            left_classes,
            right_classes,
            row_width,
            values,
            array_offset,
        })
    }

    fn load_class_table(reader: &mut BigEndianReader<'_>, offset: usize) -> Result<ClassTable> {
        reader.seek(offset);
        let first_glyph = reader.read_u16()?;
        let glyph_count = reader.read_u16()?;
        let mut values = Vec::with_capacity(glyph_count as usize);
        for _ in 0..glyph_count {
            values.push(reader.read_u16()?);
        }
        Ok(ClassTable {
            first_glyph,
            values,
        })
    }

    fn apply_offset(&self, left: u16, right: u16, result: &mut Point) {
        match self {
            Self::Pairs {
                cross_stream,
                pairs,
            } => {
                let key = (left as u32) << 16 | right as u32;
                if let Ok(index) = pairs.binary_search_by_key(&key, |&(k, _)| k) {
                    apply(pairs[index].1, *cross_stream, result);
                }
            }
            Self::ClassMatrix {
                cross_stream,
                left_classes,
                right_classes,
                row_width,
                values,
                array_offset,
            } => {
                if *row_width == 0 {
                    return;
                }
                // Left class values are pre-multiplied row offsets from
                // the subtable start; right class values are column byte
                // offsets.
                let (Some(left_class), Some(right_class)) =
                    (left_classes.class_of(left), right_classes.class_of(right))
                else {
                    return;
                };
                let Some(byte_offset) = (left_class as usize + right_class as usize)
                    .checked_sub(*array_offset as usize)
                else {
                    return;
                };
                if let Some(&value) = values.get(byte_offset / 2) {
                    apply(value, *cross_stream, result);
                }
            }
        }
    }
}

fn apply(value: i16, cross_stream: bool, result: &mut Point) {
    if cross_stream {
        result.y += value as f32;
    } else {
        result.x += value as f32;
    }
}
