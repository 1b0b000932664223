use crate::tables::TableTag;
use thiserror::Error;

/// Errors surfaced while loading fonts or laying out text.
#[derive(Error, Debug)]
pub enum FontError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of font data at offset {0}")]
    UnexpectedEof(usize),

    #[error("invalid font file: {0}")]
    InvalidFontFile(String),

    #[error("required font table '{0}' is missing")]
    MissingTable(TableTag),

    #[error("font table '{0}' is invalid")]
    InvalidTable(TableTag),

    #[error("font family '{0}' is not installed")]
    FontFamilyNotFound(String),

    #[error("loop detected loading glyphs")]
    CircularGlyphReference,

    #[error("too many control points")]
    TooManyControlPoints,
}

pub type Result<T> = std::result::Result<T, FontError>;
