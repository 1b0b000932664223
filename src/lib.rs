//! # oxidize-fonts
//!
//! A pure Rust TrueType/OpenType font reader and text layout engine with zero external font dependencies.
//!
//! ## Features
//!
//! - **Font Parsing**: Read sfnt font files covering metrics, character maps, and glyph outlines
//! - **Glyph Outlines**: Decode simple and composite glyphs, with a renderer-agnostic drawing interface
//! - **Kerning**: Pair-list and class-matrix kerning subtables, composed additively
//! - **Substitution**: Single-substitution lookups, including extension indirection
//! - **Text Layout**: Position glyphs with kerning, tabs, line breaks, wrapping, and fallback fonts
//! - **Measurement**: Advance-box and ink-extent measurement without rendering
//! - **Pure Rust**: No C dependencies or external libraries
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use oxidize_fonts::{Font, LayoutOptions, TextMeasurer, Result};
//!
//! # fn main() -> Result<()> {
//! let font = Font::from_file("DejaVuSans.ttf", 12.0)?;
//! let options = LayoutOptions::new(font).with_dpi(96.0, 96.0);
//!
//! let measurer = TextMeasurer::default();
//! let size = measurer.measure("Hello, fonts!", &options)?;
//! println!("{}x{}", size.width, size.height);
//! # Ok(())
//! # }
//! ```
//!
//! Rendering goes through the [`GlyphRenderer`] trait: the library
//! walks each outline and emits move/line/curve commands, leaving
//! rasterization to the caller.

pub mod binary;
pub mod error;
pub mod fonts;
pub mod geometry;
pub mod tables;
pub mod text;

pub use error::{FontError, Result};
pub use fonts::{
    Font, FontCollection, FontMetrics, GlyphColor, GlyphMetrics, GlyphRenderer,
    GlyphRendererParameters, GlyphType,
};
pub use geometry::{Bounds, FontRect, Point};
pub use text::{
    GlyphBounds, GlyphLayout, HorizontalAlignment, LayoutOptions, TextLayout, TextMeasurer,
    VerticalAlignment,
};
