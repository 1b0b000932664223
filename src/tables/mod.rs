//! Font table parsing
//!
//! A font file starts with a table directory mapping four-byte tags to
//! byte regions. [`FontReader`] parses that directory once and hands out
//! bounds-checked readers over individual tables. Whether an absent table
//! is an error is the caller's call: required tables go through
//! [`FontReader::table_reader`], optional ones through
//! [`FontReader::try_table_reader`].

pub mod cmap;
pub mod glyf;
pub mod gsub;
pub mod head;
pub mod hhea;
pub mod hmtx;
pub mod kern;
pub mod loca;
pub mod maxp;

use crate::binary::BigEndianReader;
use crate::error::{FontError, Result};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// A four-byte table identifier, e.g. `head` or `glyf`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableTag([u8; 4]);

impl TableTag {
    /// Create a tag from its four bytes.
    pub const fn new(bytes: &[u8; 4]) -> Self {
        Self(*bytes)
    }

    /// The raw tag bytes.
    pub const fn bytes(&self) -> [u8; 4] {
        self.0
    }
}

impl fmt::Display for TableTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            // Tags are nominally printable ASCII; escape anything else.
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

/// One entry of the table directory: where a table's bytes live.
#[derive(Debug, Clone, Copy)]
pub struct TableRecord {
    /// Table identifier
    pub tag: TableTag,
    /// Table checksum as recorded in the directory
    pub checksum: u32,
    /// Byte offset from the start of the file
    pub offset: u32,
    /// Byte length of the table
    pub length: u32,
}

/// Parsed table directory over a font file's bytes.
#[derive(Debug)]
pub struct FontReader<'a> {
    data: &'a [u8],
    tables: HashMap<TableTag, TableRecord>,
}

impl<'a> FontReader<'a> {
    /// Parse the file header and table directory.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let mut reader = BigEndianReader::new(data);

        let sfnt_version = reader.read_u32()?;
        // 0x00010000 and 'true' tag TrueType outlines; 'OTTO' files
        // carry the same directory layout.
        if !matches!(sfnt_version, 0x0001_0000 | 0x7472_7565 | 0x4F54_544F) {
            return Err(FontError::InvalidFontFile(format!(
                "unknown sfnt version 0x{sfnt_version:08X}"
            )));
        }
        let num_tables = reader.read_u16()?;
        // searchRange, entrySelector, rangeShift: binary-search hints we
        // recompute nothing from.
        reader.skip(6);

        let mut tables = HashMap::with_capacity(num_tables as usize);
        for _ in 0..num_tables {
            let tag = TableTag(reader.read_tag()?);
            let checksum = reader.read_u32()?;
            let offset = reader.read_offset32()?;
            let length = reader.read_u32()?;

            let end = offset
                .checked_add(length)
                .ok_or(FontError::InvalidTable(tag))?;
            if end as usize > data.len() {
                return Err(FontError::InvalidTable(tag));
            }

            tables.insert(
                tag,
                TableRecord {
                    tag,
                    checksum,
                    offset,
                    length,
                },
            );
        }

        debug!(tables = tables.len(), "parsed font table directory");
        Ok(Self { data, tables })
    }

    /// Directory record for a table, if present.
    pub fn table_record(&self, tag: TableTag) -> Option<&TableRecord> {
        self.tables.get(&tag)
    }

    /// Reader over an optional table's byte region, positioned at its
    /// start. Callers substitute an empty default on `None`.
    pub fn try_table_reader(&self, tag: TableTag) -> Option<BigEndianReader<'a>> {
        let record = self.tables.get(&tag)?;
        let start = record.offset as usize;
        let end = start + record.length as usize;
        Some(BigEndianReader::new(&self.data[start..end]))
    }

    /// Reader over a required table's byte region.
    pub fn table_reader(&self, tag: TableTag) -> Result<BigEndianReader<'a>> {
        self.try_table_reader(tag)
            .ok_or(FontError::MissingTable(tag))
    }
}
