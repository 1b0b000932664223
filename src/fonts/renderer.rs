//! Rendering-command contract between glyphs and an external rasterizer
//!
//! The library never rasterizes; it walks a glyph outline and emits
//! drawing primitives to an implementation of [`GlyphRenderer`]. All
//! points are in the caller's device coordinate space, already scaled
//! and Y-flipped.

use crate::fonts::glyph::{GlyphColor, GlyphType};
use crate::geometry::{FontRect, Point};

/// Per-glyph context passed to [`GlyphRenderer::begin_glyph`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphRendererParameters {
    /// Glyph index within its font
    pub glyph_id: u16,
    /// Point size the glyph is being rendered at
    pub point_size: f32,
    /// Device scale
    pub dpi: Point,
    /// How the glyph was resolved
    pub glyph_type: GlyphType,
}

/// Receiver of glyph drawing commands.
///
/// For each glyph, `begin_glyph` is invoked once; when it returns
/// `false` the outline is skipped, but `end_glyph` is still delivered so
/// implementations can pair begin/end unconditionally.
pub trait GlyphRenderer {
    /// Start a glyph. The bounds are the glyph's device-space bounding
    /// box. Return `false` to skip the outline (e.g. already cached).
    fn begin_glyph(&mut self, bounds: FontRect, parameters: &GlyphRendererParameters) -> bool;

    /// Set the color for a color-layer glyph. Renderers without color
    /// support can ignore this; the default does nothing.
    fn set_color(&mut self, _color: GlyphColor) {}

    /// Start one closed contour of the current glyph.
    fn begin_figure(&mut self);

    /// Move the pen without drawing.
    fn move_to(&mut self, point: Point);

    /// Straight line from the pen to `point`.
    fn line_to(&mut self, point: Point);

    /// Quadratic Bézier from the pen through `control` to `end`.
    fn quadratic_bezier_to(&mut self, control: Point, end: Point);

    /// Cubic Bézier from the pen to `end`.
    fn cubic_bezier_to(&mut self, control1: Point, control2: Point, end: Point);

    /// Close the current contour.
    fn end_figure(&mut self);

    /// Finish the glyph. Always called, even when `begin_glyph`
    /// declined.
    fn end_glyph(&mut self);
}
