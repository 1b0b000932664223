//! Property-based tests for font data decoding
//!
//! Generates character maps, kerning pairs, and raw byte streams and
//! checks that what goes into a synthetic font file comes back out of
//! the parser unchanged.

mod common;

use common::FontBuilder;
use oxidize_fonts::binary::BigEndianReader;
use oxidize_fonts::{FontMetrics, LayoutOptions, TextMeasurer};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn mapping_strategy() -> impl Strategy<Value = BTreeMap<u16, u16>> {
    // BMP code points below the surrogate range, nonzero glyph ids.
    prop::collection::btree_map(1u16..0xD7FF, 1u16..2000, 1..20)
}

fn kern_pair_strategy() -> impl Strategy<Value = BTreeMap<(u16, u16), i16>> {
    prop::collection::btree_map((0u16..50, 0u16..50), any::<i16>(), 1..30)
}

proptest! {
    #[test]
    fn test_big_endian_u16_roundtrip(values in prop::collection::vec(any::<u16>(), 0..50)) {
        let mut data = Vec::new();
        for value in &values {
            data.extend(&value.to_be_bytes());
        }
        let mut reader = BigEndianReader::new(&data);
        for &value in &values {
            prop_assert_eq!(reader.read_u16().unwrap(), value);
        }
        prop_assert!(reader.read_u16().is_err());
    }

    #[test]
    fn test_big_endian_mixed_roundtrip(a in any::<u32>(), b in any::<i16>(), c in any::<u8>()) {
        let mut data = Vec::new();
        data.extend(&a.to_be_bytes());
        data.extend(&b.to_be_bytes());
        data.push(c);
        let mut reader = BigEndianReader::new(&data);
        prop_assert_eq!(reader.read_u32().unwrap(), a);
        prop_assert_eq!(reader.read_i16().unwrap(), b);
        prop_assert_eq!(reader.read_u8().unwrap(), c);
    }

    #[test]
    fn test_failed_read_does_not_advance(len in 0usize..3) {
        let data = vec![0u8; len];
        let mut reader = BigEndianReader::new(&data);
        prop_assert!(reader.read_u32().is_err());
        prop_assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_cmap_mappings_roundtrip(mappings in mapping_strategy()) {
        let mut builder = FontBuilder::new().without_outlines();
        for (&code, &glyph) in &mappings {
            if let Some(c) = char::from_u32(code as u32) {
                builder = builder.map(c, glyph);
            }
        }
        let metrics = FontMetrics::from_bytes(&builder.build()).unwrap();
        for (&code, &glyph) in &mappings {
            if let Some(c) = char::from_u32(code as u32) {
                prop_assert_eq!(metrics.glyph_id(c), Some(glyph));
            }
        }
        // A code point outside the map resolves to nothing.
        prop_assert_eq!(metrics.glyph_id('\u{E000}'), None);
    }

    #[test]
    fn test_kern_pairs_roundtrip(pairs in kern_pair_strategy()) {
        let flat: Vec<(u16, u16, i16)> =
            pairs.iter().map(|(&(l, r), &v)| (l, r, v)).collect();
        let data = FontBuilder::new().without_outlines().kern_pairs(&flat).build();
        let metrics = FontMetrics::from_bytes(&data).unwrap();
        for (&(left, right), &value) in &pairs {
            prop_assert_eq!(metrics.kerning_offset(left, right).x, value as f32);
        }
        prop_assert_eq!(metrics.kerning_offset(900, 901).x, 0.0);
    }

    #[test]
    fn test_tabs_scale_linearly(count in 1usize..8, tab_width in 0.5f32..16.0) {
        let data = FontBuilder::new()
            .glyph(250, Vec::new())
            .map(' ', 1)
            .build();
        let font = oxidize_fonts::Font::from_bytes(&data, 12.0).unwrap();
        let options = LayoutOptions::new(font).with_tab_width(tab_width);
        let measurer = TextMeasurer::default();

        let one = measurer.measure("\t", &options).unwrap();
        let many = measurer.measure(&"\t".repeat(count), &options).unwrap();
        let expected = count as f32 * one.width;
        prop_assert!((many.width - expected).abs() <= expected.abs() * 1e-4 + 1e-4);
    }
}
