//! Synthetic font assembly for integration tests
//!
//! `FontBuilder` produces a complete font file byte-for-byte: table
//! directory plus head, maxp, hhea, hmtx, cmap (format 4), loca/glyf,
//! and optional kern and substitution tables.

// Not every test binary uses every helper.
#![allow(dead_code)]

/// One glyph in a synthetic font.
struct GlyphDef {
    advance: u16,
    bearing: i16,
    outline: Vec<u8>,
}

pub struct FontBuilder {
    units_per_em: u16,
    ascender: i16,
    descender: i16,
    line_gap: i16,
    mappings: Vec<(u16, u16)>,
    glyphs: Vec<GlyphDef>,
    kern_subtables: Vec<Vec<u8>>,
    gsub: Option<Vec<u8>>,
    omit_outlines: bool,
}

impl Default for FontBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FontBuilder {
    /// A font with glyph 0 predefined as a small box outline.
    pub fn new() -> Self {
        Self {
            units_per_em: 1000,
            ascender: 750,
            descender: -250,
            line_gap: 0,
            mappings: Vec::new(),
            glyphs: vec![GlyphDef {
                advance: 400,
                bearing: 0,
                outline: simple_glyph(&[&[
                    (0, 0, true),
                    (300, 0, true),
                    (300, 600, true),
                    (0, 600, true),
                ]]),
            }],
            kern_subtables: Vec::new(),
            gsub: None,
            omit_outlines: false,
        }
    }

    pub fn units_per_em(mut self, units_per_em: u16) -> Self {
        self.units_per_em = units_per_em;
        self
    }

    pub fn vertical_metrics(mut self, ascender: i16, descender: i16, line_gap: i16) -> Self {
        self.ascender = ascender;
        self.descender = descender;
        self.line_gap = line_gap;
        self
    }

    /// Map a character to a glyph index.
    pub fn map(mut self, code_point: char, glyph_id: u16) -> Self {
        self.mappings.push((code_point as u16, glyph_id));
        self
    }

    /// Append a glyph; ids are assigned in call order starting at 1.
    pub fn glyph(mut self, advance: u16, outline: Vec<u8>) -> Self {
        self.glyphs.push(GlyphDef {
            advance,
            bearing: 0,
            outline,
        });
        self
    }

    /// Add a format 0 kerning subtable from (left, right, value) pairs.
    pub fn kern_pairs(mut self, pairs: &[(u16, u16, i16)]) -> Self {
        self.kern_subtables.push(kern_format0(pairs, false));
        self
    }

    /// Add a cross-stream format 0 kerning subtable.
    pub fn cross_stream_kern_pairs(mut self, pairs: &[(u16, u16, i16)]) -> Self {
        self.kern_subtables.push(kern_format0(pairs, true));
        self
    }

    /// Attach a raw substitution table.
    pub fn gsub(mut self, table: Vec<u8>) -> Self {
        self.gsub = Some(table);
        self
    }

    /// Drop the loca and glyf tables from the output.
    pub fn without_outlines(mut self) -> Self {
        self.omit_outlines = true;
        self
    }

    /// Assemble the font file.
    pub fn build(self) -> Vec<u8> {
        let num_glyphs = self.glyphs.len() as u16;

        let head = self.head_table();
        let maxp = maxp_table(num_glyphs);
        let hhea = self.hhea_table(num_glyphs);
        let hmtx = self.hmtx_table();
        let cmap = cmap_table(&self.mappings);

        let mut tables: Vec<(&[u8; 4], Vec<u8>)> = vec![
            (b"head", head),
            (b"maxp", maxp),
            (b"hhea", hhea),
            (b"hmtx", hmtx),
            (b"cmap", cmap),
        ];

        let (loca, glyf);
        if !self.omit_outlines {
            // Short loca offsets require even record lengths.
            let padded: Vec<Vec<u8>> = self
                .glyphs
                .iter()
                .map(|g| {
                    let mut outline = g.outline.clone();
                    if outline.len() % 2 == 1 {
                        outline.push(0);
                    }
                    outline
                })
                .collect();
            let mut offsets = vec![0u32];
            let mut data = Vec::new();
            for outline in &padded {
                data.extend_from_slice(outline);
                offsets.push(data.len() as u32);
            }
            let mut loca_bytes = Vec::new();
            for offset in offsets {
                loca_bytes.extend(&((offset / 2) as u16).to_be_bytes());
            }
            loca = loca_bytes;
            glyf = data;
            tables.push((b"loca", loca));
            tables.push((b"glyf", glyf));
        }

        if !self.kern_subtables.is_empty() {
            let mut kern = Vec::new();
            kern.extend(&0u16.to_be_bytes()); // version
            kern.extend(&(self.kern_subtables.len() as u16).to_be_bytes());
            for subtable in &self.kern_subtables {
                kern.extend_from_slice(subtable);
            }
            tables.push((b"kern", kern));
        }

        if let Some(gsub) = self.gsub {
            tables.push((b"GSUB", gsub));
        }

        assemble(&tables)
    }

    fn head_table(&self) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend(&0x00010000u32.to_be_bytes()); // version
        data.extend(&0x00010000u32.to_be_bytes()); // fontRevision
        data.extend(&0u32.to_be_bytes()); // checkSumAdjustment
        data.extend(&0x5F0F3CF5u32.to_be_bytes()); // magicNumber
        data.extend(&0u16.to_be_bytes()); // flags
        data.extend(&self.units_per_em.to_be_bytes());
        data.extend(&[0u8; 16]); // created / modified
        data.extend(&0i16.to_be_bytes()); // xMin
        data.extend(&self.descender.to_be_bytes()); // yMin
        data.extend(&(self.units_per_em as i16).to_be_bytes()); // xMax
        data.extend(&self.ascender.to_be_bytes()); // yMax
        data.extend(&0u16.to_be_bytes()); // macStyle
        data.extend(&8u16.to_be_bytes()); // lowestRecPPEM
        data.extend(&2i16.to_be_bytes()); // fontDirectionHint
        data.extend(&0i16.to_be_bytes()); // indexToLocFormat: short
        data.extend(&0i16.to_be_bytes()); // glyphDataFormat
        data
    }

    fn hhea_table(&self, num_glyphs: u16) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend(&0x00010000u32.to_be_bytes());
        data.extend(&self.ascender.to_be_bytes());
        data.extend(&self.descender.to_be_bytes());
        data.extend(&self.line_gap.to_be_bytes());
        let advance_width_max = self.glyphs.iter().map(|g| g.advance).max().unwrap_or(0);
        data.extend(&advance_width_max.to_be_bytes());
        data.extend(&[0u8; 22]); // bearings, caret, reserved, format
        data.extend(&num_glyphs.to_be_bytes()); // numberOfHMetrics
        data
    }

    fn hmtx_table(&self) -> Vec<u8> {
        let mut data = Vec::new();
        for glyph in &self.glyphs {
            data.extend(&glyph.advance.to_be_bytes());
            data.extend(&glyph.bearing.to_be_bytes());
        }
        data
    }
}

/// Simple glyph record from contours of (x, y, on_curve) points given
/// in absolute font units.
pub fn simple_glyph(contours: &[&[(i16, i16, bool)]]) -> Vec<u8> {
    let points: Vec<(i16, i16, bool)> = contours.iter().flat_map(|c| c.iter().copied()).collect();
    let x_min = points.iter().map(|p| p.0).min().unwrap_or(0);
    let y_min = points.iter().map(|p| p.1).min().unwrap_or(0);
    let x_max = points.iter().map(|p| p.0).max().unwrap_or(0);
    let y_max = points.iter().map(|p| p.1).max().unwrap_or(0);

    let mut data = Vec::new();
    data.extend(&(contours.len() as i16).to_be_bytes());
    data.extend(&x_min.to_be_bytes());
    data.extend(&y_min.to_be_bytes());
    data.extend(&x_max.to_be_bytes());
    data.extend(&y_max.to_be_bytes());
    let mut end = -1i32;
    for contour in contours {
        end += contour.len() as i32;
        data.extend(&(end as u16).to_be_bytes());
    }
    data.extend(&0u16.to_be_bytes()); // instructionLength
    for &(_, _, on_curve) in &points {
        data.push(if on_curve { 0x01 } else { 0x00 });
    }
    let mut prev = 0i16;
    for &(x, _, _) in &points {
        data.extend(&(x - prev).to_be_bytes());
        prev = x;
    }
    prev = 0;
    for &(_, y, _) in &points {
        data.extend(&(y - prev).to_be_bytes());
        prev = y;
    }
    data
}

/// A zero-length glyph record.
pub fn empty_outline() -> Vec<u8> {
    Vec::new()
}

fn kern_format0(pairs: &[(u16, u16, i16)], cross_stream: bool) -> Vec<u8> {
    let mut body: Vec<u8> = Vec::new();
    body.extend(&(pairs.len() as u16).to_be_bytes());
    body.extend(&[0u8; 6]); // searchRange, entrySelector, rangeShift
    let mut sorted: Vec<_> = pairs.to_vec();
    sorted.sort_by_key(|&(l, r, _)| ((l as u32) << 16) | r as u32);
    for (left, right, value) in sorted {
        body.extend(&left.to_be_bytes());
        body.extend(&right.to_be_bytes());
        body.extend(&value.to_be_bytes());
    }

    let coverage: u16 = if cross_stream { 0x0005 } else { 0x0001 };
    let length = (body.len() + 6) as u16;
    let mut subtable = Vec::new();
    subtable.extend(&0u16.to_be_bytes()); // version
    subtable.extend(&length.to_be_bytes());
    subtable.extend(&coverage.to_be_bytes()); // format 0 in high byte
    subtable.extend(body);
    subtable
}

/// Substitution table from (lookup type, subtable bytes) lookups, one
/// subtable per lookup.
pub fn gsub_with_lookups(lookups: &[(u16, Vec<u8>)]) -> Vec<u8> {
    let lookup_list_offset = 10u16;
    let mut table = Vec::new();
    table.extend(&1u16.to_be_bytes()); // majorVersion
    table.extend(&0u16.to_be_bytes()); // minorVersion
    table.extend(&0u16.to_be_bytes()); // scriptListOffset
    table.extend(&0u16.to_be_bytes()); // featureListOffset
    table.extend(&lookup_list_offset.to_be_bytes());

    // Lookup list: count plus offsets, lookups packed after.
    let count = lookups.len();
    let mut lookup_offsets = Vec::with_capacity(count);
    let mut offset = 2 + 2 * count;
    for (_, subtable) in lookups {
        lookup_offsets.push(offset as u16);
        offset += 8 + subtable.len();
    }
    table.extend(&(count as u16).to_be_bytes());
    for lookup_offset in &lookup_offsets {
        table.extend(&lookup_offset.to_be_bytes());
    }
    for (lookup_type, subtable) in lookups {
        table.extend(&lookup_type.to_be_bytes());
        table.extend(&0u16.to_be_bytes()); // lookupFlag
        table.extend(&1u16.to_be_bytes()); // subTableCount
        table.extend(&8u16.to_be_bytes()); // subtable right after header
        table.extend_from_slice(subtable);
    }
    table
}

/// Single substitution subtable, format 1: adds `delta` to every
/// covered glyph.
pub fn single_delta_subtable(covered: &[u16], delta: i16) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend(&1u16.to_be_bytes()); // substFormat
    data.extend(&6u16.to_be_bytes()); // coverageOffset
    data.extend(&delta.to_be_bytes());
    data.extend(&1u16.to_be_bytes()); // coverage format 1
    data.extend(&(covered.len() as u16).to_be_bytes());
    for glyph in covered {
        data.extend(&glyph.to_be_bytes());
    }
    data
}

/// Extension subtable (type 7) wrapping an inner subtable.
pub fn extension_subtable(inner_type: u16, inner: &[u8]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend(&1u16.to_be_bytes()); // format
    data.extend(&inner_type.to_be_bytes());
    data.extend(&8u32.to_be_bytes()); // extensionOffset
    data.extend_from_slice(inner);
    data
}

fn maxp_table(num_glyphs: u16) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend(&0x00010000u32.to_be_bytes());
    data.extend(&num_glyphs.to_be_bytes());
    data.extend(&[0u8; 26]);
    data
}

fn cmap_table(mappings: &[(u16, u16)]) -> Vec<u8> {
    let mut sorted: Vec<_> = mappings.to_vec();
    sorted.sort_by_key(|&(code, _)| code);

    // One single-character segment per mapping plus the 0xFFFF sentinel.
    let seg_count = sorted.len() + 1;
    let mut subtable: Vec<u8> = Vec::new();
    subtable.extend(&4u16.to_be_bytes()); // format
    let length = (16 + 8 * seg_count) as u16;
    subtable.extend(&length.to_be_bytes());
    subtable.extend(&0u16.to_be_bytes()); // language
    subtable.extend(&((seg_count * 2) as u16).to_be_bytes());
    subtable.extend(&[0u8; 6]); // searchRange, entrySelector, rangeShift
    for &(code, _) in &sorted {
        subtable.extend(&code.to_be_bytes()); // endCode
    }
    subtable.extend(&0xFFFFu16.to_be_bytes());
    subtable.extend(&0u16.to_be_bytes()); // reservedPad
    for &(code, _) in &sorted {
        subtable.extend(&code.to_be_bytes()); // startCode
    }
    subtable.extend(&0xFFFFu16.to_be_bytes());
    for &(code, glyph) in &sorted {
        subtable.extend(&(glyph.wrapping_sub(code) as i16).to_be_bytes()); // idDelta
    }
    subtable.extend(&1i16.to_be_bytes()); // sentinel idDelta
    for _ in 0..seg_count {
        subtable.extend(&0u16.to_be_bytes()); // idRangeOffset
    }

    let mut data = Vec::new();
    data.extend(&0u16.to_be_bytes()); // version
    data.extend(&1u16.to_be_bytes()); // numTables
    data.extend(&3u16.to_be_bytes()); // platform: Windows
    data.extend(&1u16.to_be_bytes()); // encoding: Unicode BMP
    data.extend(&12u32.to_be_bytes()); // subtable offset
    data.extend(subtable);
    data
}

/// A valid table directory over the given tables.
pub fn assemble(tables: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend(&0x00010000u32.to_be_bytes()); // sfnt version
    data.extend(&(tables.len() as u16).to_be_bytes());
    data.extend(&[0u8; 6]); // searchRange, entrySelector, rangeShift

    let mut offset = 12 + 16 * tables.len();
    for (tag, table) in tables {
        data.extend_from_slice(*tag);
        data.extend(&0u32.to_be_bytes()); // checksum
        data.extend(&(offset as u32).to_be_bytes());
        data.extend(&(table.len() as u32).to_be_bytes());
        offset += table.len();
    }
    for (_, table) in tables {
        data.extend_from_slice(table);
    }
    data
}
