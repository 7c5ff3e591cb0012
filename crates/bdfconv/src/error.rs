use thiserror::Error;

#[derive(Debug, Error)]
pub enum BdfError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "zip")]
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("archive error: {0}")]
    Archive(String),
    #[error("line {line}: malformed {keyword} record: {reason}")]
    Malformed {
        line: usize,
        keyword: &'static str,
        reason: String,
    },
    #[error("line {line}: invalid scanline {text:?}")]
    InvalidScanline { line: usize, text: String },
    #[error("line {line}: bitmap truncated, expected {expected} rows but found {found}")]
    TruncatedBitmap {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: BITMAP without preceding {missing}")]
    IncompleteGlyph { line: usize, missing: &'static str },
    #[error("glyph {codepoint}: scanline 0x{value:x} does not fit in {bits} bits")]
    ScanlineTooWide { codepoint: u32, value: u32, bits: u32 },
    #[error("glyph {codepoint}: width {width} cannot be split into two 8 pixel halves")]
    GlyphTooWide { codepoint: u32, width: u32 },
}

pub type Result<T> = std::result::Result<T, BdfError>;
