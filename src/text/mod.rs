//! Text layout and measurement

pub mod layout;
pub mod measurer;
pub mod options;

pub use layout::{GlyphLayout, TextLayout};
pub use measurer::{GlyphBounds, TextMeasurer};
pub use options::{HorizontalAlignment, LayoutOptions, VerticalAlignment};
