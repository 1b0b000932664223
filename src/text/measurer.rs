//! Text measurement built on top of the layout engine
//!
//! Two notions of extent are offered: [`TextMeasurer::measure`] sizes
//! the advance box (pen travel plus line heights, including trailing
//! whitespace), while [`TextMeasurer::measure_bounds`] aggregates the
//! ink extents of the glyph outlines.

use crate::error::Result;
use crate::geometry::{Bounds, FontRect, Point};
use crate::text::layout::{GlyphLayout, TextLayout};
use crate::text::options::LayoutOptions;

/// Per-character ink box from
/// [`TextMeasurer::try_measure_character_bounds`].
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphBounds {
    pub code_point: char,
    pub bounds: FontRect,
}

/// Measures text without rendering it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextMeasurer {
    layout: TextLayout,
}

impl TextMeasurer {
    pub fn new(layout: TextLayout) -> Self {
        Self { layout }
    }

    /// Advance-box size of the text in device space: the rectangle the
    /// pen sweeps, including whitespace advances.
    pub fn measure(&self, text: &str, options: &LayoutOptions) -> Result<FontRect> {
        let glyphs = self.layout.generate_layout(text, options)?;
        Ok(advance_box(&glyphs, options.dpi()))
    }

    /// Ink bounds of the text in device space: the union of every
    /// glyph outline's bounding box. Empty when nothing has ink.
    pub fn measure_bounds(&self, text: &str, options: &LayoutOptions) -> Result<FontRect> {
        let glyphs = self.layout.generate_layout(text, options)?;
        Ok(ink_bounds(&glyphs, options.dpi()))
    }

    /// Per-character ink boxes plus whether any character has size.
    ///
    /// Line-break characters yield an empty box. The flag is true when
    /// at least one character contributes ink, so a string that mixes
    /// visible text with line breaks still reports a size.
    pub fn try_measure_character_bounds(
        &self,
        text: &str,
        options: &LayoutOptions,
    ) -> Result<(Vec<GlyphBounds>, bool)> {
        let glyphs = self.layout.generate_layout(text, options)?;
        let dpi = options.dpi();
        let mut has_size = false;
        let mut result = Vec::with_capacity(glyphs.len());
        for glyph in &glyphs {
            if is_line_break(glyph.code_point) {
                result.push(GlyphBounds {
                    code_point: glyph.code_point,
                    bounds: FontRect::empty(),
                });
            } else {
                has_size = true;
                result.push(GlyphBounds {
                    code_point: glyph.code_point,
                    bounds: glyph.bounding_box(dpi),
                });
            }
        }
        Ok((result, has_size))
    }
}

fn is_line_break(code_point: char) -> bool {
    code_point == '\n' || code_point == '\r'
}

fn advance_box(glyphs: &[GlyphLayout], dpi: Point) -> FontRect {
    let mut extent: Option<Bounds> = None;
    for glyph in glyphs {
        let top = glyph.location.y - glyph.line_height;
        let glyph_bounds = Bounds::new(
            Point::new(glyph.location.x, top),
            Point::new(glyph.location.x + glyph.width, top + glyph.height),
        );
        extent = Some(match extent {
            Some(bounds) => bounds.union(glyph_bounds),
            None => glyph_bounds,
        });
    }
    match extent {
        Some(bounds) => {
            let top_left = bounds.min * dpi;
            let size = bounds.size() * dpi;
            FontRect::new(top_left.x, top_left.y, size.x, size.y)
        }
        None => FontRect::empty(),
    }
}

fn ink_bounds(glyphs: &[GlyphLayout], dpi: Point) -> FontRect {
    let mut extent: Option<Bounds> = None;
    for glyph in glyphs {
        if is_line_break(glyph.code_point) {
            continue;
        }
        let rect = glyph.bounding_box(dpi);
        let glyph_bounds = Bounds::new(
            Point::new(rect.left(), rect.top()),
            Point::new(rect.right(), rect.bottom()),
        );
        extent = Some(match extent {
            Some(bounds) => bounds.union(glyph_bounds),
            None => glyph_bounds,
        });
    }
    match extent {
        Some(bounds) => {
            let size = bounds.size();
            FontRect::new(bounds.min.x, bounds.min.y, size.x, size.y)
        }
        None => FontRect::empty(),
    }
}
