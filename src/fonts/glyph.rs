//! Per-glyph metrics and outline emission
//!
//! [`GlyphMetrics`] couples a decoded outline with the horizontal
//! metrics needed to place it, and knows how to replay the outline as
//! drawing commands against a [`GlyphRenderer`].

use crate::error::{FontError, Result};
use crate::fonts::renderer::{GlyphRenderer, GlyphRendererParameters};
use crate::geometry::{FontRect, Point};
use crate::tables::glyf::GlyphVector;

/// Flips font-unit Y (up-positive) into device Y (down-positive).
const FLIP_Y: Point = Point::new(1.0, -1.0);

/// How a glyph was resolved during layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphType {
    /// Mapped directly by the font's character map
    Standard,
    /// The code point was unmapped; this is the missing-glyph stand-in
    Fallback,
    /// One layer of a layered color glyph
    ColrLayer,
}

/// RGBA color attached to a color-layer glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

/// A glyph outline together with its metrics, tied to the font it came
/// from through `units_per_em` and the derived scale factor.
#[derive(Debug, Clone)]
pub struct GlyphMetrics {
    code_point: char,
    glyph_id: u16,
    vector: GlyphVector,
    advance_width: u16,
    advance_height: u16,
    left_side_bearing: i16,
    units_per_em: u16,
    scale_factor: f32,
    glyph_type: GlyphType,
    color: Option<GlyphColor>,
}

impl GlyphMetrics {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        code_point: char,
        glyph_id: u16,
        vector: GlyphVector,
        advance_width: u16,
        advance_height: u16,
        left_side_bearing: i16,
        units_per_em: u16,
        glyph_type: GlyphType,
        color: Option<GlyphColor>,
    ) -> Self {
        Self {
            code_point,
            glyph_id,
            vector,
            advance_width,
            advance_height,
            left_side_bearing,
            units_per_em,
            scale_factor: units_per_em as f32 * 72.0,
            glyph_type,
            color,
        }
    }

    pub fn code_point(&self) -> char {
        self.code_point
    }

    pub fn glyph_id(&self) -> u16 {
        self.glyph_id
    }

    /// Horizontal advance in font units.
    pub fn advance_width(&self) -> u16 {
        self.advance_width
    }

    /// Vertical advance in font units.
    pub fn advance_height(&self) -> u16 {
        self.advance_height
    }

    pub fn left_side_bearing(&self) -> i16 {
        self.left_side_bearing
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// `units_per_em * 72`; divides font units into point-at-dpi space.
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    pub fn glyph_type(&self) -> GlyphType {
        self.glyph_type
    }

    /// Outline extent, in font units.
    pub fn width(&self) -> f32 {
        self.vector.bounds().size().x
    }

    pub fn height(&self) -> f32 {
        self.vector.bounds().size().y
    }

    /// Device-space bounding box of the outline when rendered at
    /// `origin` with `scaled_point_size` (`dpi * point_size`).
    pub fn bounding_box(&self, origin: Point, scaled_point_size: Point) -> FontRect {
        let bounds = self.vector.bounds();
        let size = bounds.size() * scaled_point_size / self.scale_factor;
        let loc =
            Point::new(bounds.min.x, bounds.max.y) * scaled_point_size / self.scale_factor * FLIP_Y
                + origin;
        FontRect::new(loc.x, loc.y, size.x, size.y)
    }

    /// Replays the outline as drawing commands.
    ///
    /// `location` is the baseline origin in dpi-independent units; it is
    /// multiplied by `dpi` here so callers pass the same value used for
    /// layout. Contours with consecutive off-curve points get implicit
    /// on-curve midpoints so the renderer only ever sees quadratic
    /// segments with a single control point.
    pub fn render_to(
        &self,
        surface: &mut dyn GlyphRenderer,
        point_size: f32,
        location: Point,
        dpi: Point,
    ) -> Result<()> {
        let location = location * dpi;
        let scaled_point = dpi * point_size;
        let bounds = self.bounding_box(location, scaled_point);
        let parameters = GlyphRendererParameters {
            glyph_id: self.glyph_id,
            point_size,
            dpi,
            glyph_type: self.glyph_type,
        };

        if surface.begin_glyph(bounds, &parameters) {
            if let Some(color) = self.color {
                surface.set_color(color);
            }
            self.render_outline(surface, scaled_point, location)?;
        }
        surface.end_glyph();
        Ok(())
    }

    fn render_outline(
        &self,
        surface: &mut dyn GlyphRenderer,
        scaled_point: Point,
        location: Point,
    ) -> Result<()> {
        let on_curves = self.vector.on_curves();
        let mut end_of_contour: i32 = -1;
        for &end_point in self.vector.end_points() {
            surface.begin_figure();
            let start = (end_of_contour + 1) as usize;
            end_of_contour = end_point as i32;
            let end = end_of_contour as usize;
            let length = end - start + 1;

            let mut prev;
            let mut curr = self.point(scaled_point, end) + location;
            let mut next = self.point(scaled_point, start) + location;

            // Start on an on-curve point when either endpoint offers
            // one; otherwise the implied midpoint between them.
            if on_curves[end] {
                surface.move_to(curr);
            } else if on_curves[start] {
                surface.move_to(next);
            } else {
                surface.move_to(curr.midpoint(next));
            }

            let mut control = ControlPoints::default();
            for offset in 0..length {
                prev = curr;
                curr = next;
                let current_index = start + offset;
                let prev_index = start + (offset + length - 1) % length;
                let next_index = start + (offset + 1) % length;
                next = self.point(scaled_point, next_index) + location;

                if on_curves[current_index] {
                    surface.line_to(curr);
                } else {
                    let mut curve_end = next;
                    if !on_curves[prev_index] {
                        surface.line_to(curr.midpoint(prev));
                    }
                    if !on_curves[next_index] {
                        curve_end = curr.midpoint(next);
                    }
                    control.add(curr)?;
                    control.flush(surface, curve_end)?;
                }
            }
            surface.end_figure();
        }
        Ok(())
    }

    fn point(&self, scaled_point: Point, index: usize) -> Point {
        self.vector.control_points()[index] * scaled_point / self.scale_factor * FLIP_Y
    }
}

/// Accumulates off-curve control points for the segment being emitted.
#[derive(Default)]
struct ControlPoints {
    second: Point,
    third: Point,
    count: u8,
}

impl ControlPoints {
    fn add(&mut self, point: Point) -> Result<()> {
        match self.count {
            0 => self.second = point,
            1 => self.third = point,
            _ => return Err(FontError::TooManyControlPoints),
        }
        self.count += 1;
        Ok(())
    }

    fn flush(&mut self, surface: &mut dyn GlyphRenderer, end: Point) -> Result<()> {
        match self.count {
            0 => surface.line_to(end),
            1 => surface.quadratic_bezier_to(self.second, end),
            2 => surface.cubic_bezier_to(self.second, self.third, end),
            _ => return Err(FontError::TooManyControlPoints),
        }
        self.count = 0;
        Ok(())
    }
}
