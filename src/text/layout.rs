//! Glyph placement: turns a string plus options into positioned glyphs
//!
//! Positions are produced in dpi-independent layout units (font units
//! scaled by `point_size / scale_factor`); consumers multiply by the
//! dpi from the options when they need device coordinates. Keeping the
//! dpi out of the pen arithmetic means measuring and rendering share
//! one set of positions.

use tracing::trace;

use crate::error::Result;
use crate::fonts::{Font, GlyphMetrics};
use crate::geometry::{FontRect, Point};
use crate::text::options::{HorizontalAlignment, LayoutOptions, VerticalAlignment};

/// One positioned glyph.
#[derive(Debug, Clone)]
pub struct GlyphLayout {
    /// Code point this glyph renders
    pub code_point: char,
    /// Resolved glyph, possibly from a fallback font
    pub metrics: GlyphMetrics,
    /// Point size the glyph was laid out at
    pub point_size: f32,
    /// Pen position in layout units; `y` is the bottom of the line
    pub location: Point,
    /// Horizontal advance in layout units
    pub width: f32,
    /// Cell height of the glyph's font, in layout units
    pub height: f32,
    /// Height of the line the glyph sits on, line spacing applied
    pub line_height: f32,
}

impl GlyphLayout {
    /// Device-space bounding box of the glyph outline.
    pub fn bounding_box(&self, dpi: Point) -> FontRect {
        self.metrics
            .bounding_box(self.location * dpi, dpi * self.point_size)
    }
}

/// A glyph placed on the line being built, before vertical position and
/// alignment are known.
struct PendingGlyph {
    code_point: char,
    metrics: GlyphMetrics,
    x: f32,
    width: f32,
    height: f32,
}

/// The layout engine. Stateless; all inputs come through
/// [`LayoutOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TextLayout;

impl TextLayout {
    /// Lay out `text`, producing one [`GlyphLayout`] per code point.
    ///
    /// Line breaks (`\n`, `\r`, `\r\n`) appear in the output as
    /// zero-width entries so callers can recover character indices.
    /// Tabs advance by `tab_width` space advances and never kern with
    /// their neighbors.
    pub fn generate_layout(
        &self,
        text: &str,
        options: &LayoutOptions,
    ) -> Result<Vec<GlyphLayout>> {
        let point_size = options.font.size();
        let primary = options.font.metrics();
        let primary_height = scale(primary.line_height() as f32, point_size, primary.scale_factor());
        let max_width = if options.wrapping_width > 0.0 {
            options.wrapping_width / options.dpi_x
        } else {
            f32::INFINITY
        };

        let mut lines: Vec<Vec<PendingGlyph>> = Vec::new();
        let mut current: Vec<PendingGlyph> = Vec::new();
        let mut pen_x = 0.0f32;
        // (font index, glyph id) of the previous glyph, for kerning
        let mut previous: Option<(usize, u16)> = None;
        // index in `current` of the last whitespace glyph
        let mut last_break: Option<usize> = None;

        let mut chars = text.chars().peekable();
        while let Some(code_point) = chars.next() {
            match code_point {
                '\r' | '\n' => {
                    if code_point == '\r' && chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    let metrics = primary.glyph_metrics(code_point)?;
                    current.push(PendingGlyph {
                        code_point,
                        metrics,
                        x: pen_x,
                        width: 0.0,
                        height: primary_height,
                    });
                    lines.push(std::mem::take(&mut current));
                    pen_x = 0.0;
                    previous = None;
                    last_break = None;
                }
                '\t' => {
                    // A tab is a pen movement, not a glyph lookup: it
                    // advances by a multiple of the space advance and
                    // never kerns.
                    let space = primary.glyph_metrics(' ')?;
                    let advance = scale(
                        space.advance_width() as f32,
                        point_size,
                        primary.scale_factor(),
                    ) * options.tab_width;
                    current.push(PendingGlyph {
                        code_point,
                        metrics: space,
                        x: pen_x,
                        width: advance,
                        height: primary_height,
                    });
                    pen_x += advance;
                    previous = None;
                    last_break = Some(current.len() - 1);
                }
                _ => {
                    let (font_index, font) = resolve_font(options, code_point);
                    let font_metrics = font.metrics();
                    let metrics = font_metrics.glyph_metrics(code_point)?;
                    let advance = scale(
                        metrics.advance_width() as f32,
                        point_size,
                        font_metrics.scale_factor(),
                    );

                    if pen_x + advance > max_width && !current.is_empty() {
                        match last_break {
                            Some(index) if index + 1 < current.len() => {
                                // Carry the run since the last break
                                // onto a fresh line.
                                let mut tail = current.split_off(index + 1);
                                lines.push(std::mem::take(&mut current));
                                let shift = tail.first().map(|p| p.x).unwrap_or(pen_x);
                                for pending in &mut tail {
                                    pending.x -= shift;
                                }
                                pen_x -= shift;
                                current = tail;
                            }
                            _ => {
                                lines.push(std::mem::take(&mut current));
                                pen_x = 0.0;
                                previous = None;
                            }
                        }
                        last_break = None;
                    }

                    if options.apply_kerning {
                        if let Some((previous_font, previous_glyph)) = previous {
                            if previous_font == font_index {
                                let kern =
                                    font_metrics.kerning_offset(previous_glyph, metrics.glyph_id());
                                if kern != Point::zero() {
                                    trace!(
                                        left = previous_glyph,
                                        right = metrics.glyph_id(),
                                        x = kern.x,
                                        "kerning pair"
                                    );
                                }
                                pen_x +=
                                    scale(kern.x, point_size, font_metrics.scale_factor());
                            }
                        }
                    }

                    let height = scale(
                        font_metrics.line_height() as f32,
                        point_size,
                        font_metrics.scale_factor(),
                    );
                    previous = Some((font_index, metrics.glyph_id()));
                    if code_point.is_whitespace() {
                        last_break = Some(current.len());
                    }
                    current.push(PendingGlyph {
                        code_point,
                        metrics,
                        x: pen_x,
                        width: advance,
                        height,
                    });
                    pen_x += advance;
                }
            }
        }
        lines.push(current);

        Ok(self.place_lines(lines, options, point_size, primary_height))
    }

    /// Assigns vertical positions and applies alignment.
    fn place_lines(
        &self,
        lines: Vec<Vec<PendingGlyph>>,
        options: &LayoutOptions,
        point_size: f32,
        primary_height: f32,
    ) -> Vec<GlyphLayout> {
        let line_heights: Vec<f32> = lines
            .iter()
            .map(|line| {
                let tallest = line.iter().map(|p| p.height).fold(0.0f32, f32::max);
                let height = if tallest > 0.0 { tallest } else { primary_height };
                height * options.line_spacing
            })
            .collect();
        let total_height: f32 = line_heights.iter().sum();
        let vertical_shift = match options.vertical_alignment {
            VerticalAlignment::Top => 0.0,
            VerticalAlignment::Center => -total_height / 2.0,
            VerticalAlignment::Bottom => -total_height,
        };

        let mut result = Vec::with_capacity(lines.iter().map(Vec::len).sum());
        let mut line_bottom = 0.0f32;
        for (line, line_height) in lines.into_iter().zip(line_heights) {
            line_bottom += line_height;
            let line_width = line.last().map(|p| p.x + p.width).unwrap_or(0.0);
            let horizontal_shift = match options.horizontal_alignment {
                HorizontalAlignment::Left => 0.0,
                HorizontalAlignment::Center => -line_width / 2.0,
                HorizontalAlignment::Right => -line_width,
            };
            for pending in line {
                result.push(GlyphLayout {
                    code_point: pending.code_point,
                    metrics: pending.metrics,
                    point_size,
                    location: Point::new(
                        pending.x + horizontal_shift,
                        line_bottom + vertical_shift,
                    ) + options.origin,
                    width: pending.width,
                    height: pending.height,
                    line_height,
                });
            }
        }
        result
    }
}

/// Probes the primary font then the fallbacks, in order; an unmapped
/// code point everywhere resolves against the primary font, which
/// yields its missing glyph.
fn resolve_font<'a>(options: &'a LayoutOptions, code_point: char) -> (usize, &'a Font) {
    if options.font.metrics().contains_code_point(code_point) {
        return (0, &options.font);
    }
    for (index, font) in options.fallback_fonts.iter().enumerate() {
        if font.metrics().contains_code_point(code_point) {
            return (index + 1, font);
        }
    }
    (0, &options.font)
}

fn scale(units: f32, point_size: f32, scale_factor: f32) -> f32 {
    units * point_size / scale_factor
}
