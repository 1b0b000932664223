//! Layout configuration

use crate::fonts::Font;
use crate::geometry::Point;

/// Horizontal placement of each line relative to the pen origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical placement of the whole block relative to the pen origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlignment {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Everything that influences how a string is laid out.
///
/// Built with [`LayoutOptions::new`] and adjusted through the `with_*`
/// builders; the fields are public for direct manipulation too.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Primary font
    pub font: Font,
    /// Fonts probed, in order, for code points the primary font lacks
    pub fallback_fonts: Vec<Font>,
    /// Tab advance as a multiple of the space advance
    pub tab_width: f32,
    /// Whether pair kerning adjusts glyph positions
    pub apply_kerning: bool,
    /// Wrap lines at this device-space width; non-positive disables
    /// wrapping
    pub wrapping_width: f32,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
    /// Multiplier applied to each line's height
    pub line_spacing: f32,
    pub dpi_x: f32,
    pub dpi_y: f32,
    /// Pen start point, in dpi-independent layout units
    pub origin: Point,
}

impl LayoutOptions {
    pub fn new(font: Font) -> Self {
        Self {
            font,
            fallback_fonts: Vec::new(),
            tab_width: 4.0,
            apply_kerning: true,
            wrapping_width: -1.0,
            horizontal_alignment: HorizontalAlignment::default(),
            vertical_alignment: VerticalAlignment::default(),
            line_spacing: 1.0,
            dpi_x: 72.0,
            dpi_y: 72.0,
            origin: Point::zero(),
        }
    }

    pub fn with_fallback_fonts(mut self, fonts: Vec<Font>) -> Self {
        self.fallback_fonts = fonts;
        self
    }

    pub fn with_tab_width(mut self, tab_width: f32) -> Self {
        self.tab_width = tab_width;
        self
    }

    pub fn with_kerning(mut self, apply: bool) -> Self {
        self.apply_kerning = apply;
        self
    }

    pub fn with_wrapping_width(mut self, width: f32) -> Self {
        self.wrapping_width = width;
        self
    }

    pub fn with_horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.horizontal_alignment = alignment;
        self
    }

    pub fn with_vertical_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.vertical_alignment = alignment;
        self
    }

    pub fn with_line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    pub fn with_dpi(mut self, dpi_x: f32, dpi_y: f32) -> Self {
        self.dpi_x = dpi_x;
        self.dpi_y = dpi_y;
        self
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Device scale as a point
    pub fn dpi(&self) -> Point {
        Point::new(self.dpi_x, self.dpi_y)
    }
}
