//! Tokenizing pre-pass: classifies one BDF line by its leading keyword.
use crate::error::{BdfError, Result};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub width: u32,
    pub height: u32,
    pub x_offset: i32,
    pub y_offset: i32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Line<'a> {
    StartChar(&'a str),
    /// Negative values mark glyphs without a standard encoding.
    Encoding(i32),
    Bbx(BoundingBox),
    Bitmap,
    EndChar,
    Other(&'a str),
}

impl<'a> Line<'a> {
    pub fn parse(text: &'a str, line: usize) -> Result<Self> {
        let mut tokens = text.split_whitespace();
        let parsed = match tokens.next() {
            Some("STARTCHAR") => {
                let name = text.trim_start()["STARTCHAR".len()..].trim();
                Line::StartChar(name)
            }
            Some("ENCODING") => Line::Encoding(number(tokens.next(), line, "ENCODING", "code")?),
            Some("BBX") => {
                let width = number(tokens.next(), line, "BBX", "width")?;
                let height = number(tokens.next(), line, "BBX", "height")?;
                let x_offset = optional_number(tokens.next(), line, "x offset")?;
                let y_offset = optional_number(tokens.next(), line, "y offset")?;
                Line::Bbx(BoundingBox {
                    width,
                    height,
                    x_offset,
                    y_offset,
                })
            }
            Some("BITMAP") => Line::Bitmap,
            Some("ENDCHAR") => Line::EndChar,
            _ => Line::Other(text),
        };
        Ok(parsed)
    }
}

fn number<T: std::str::FromStr>(
    token: Option<&str>,
    line: usize,
    keyword: &'static str,
    field: &str,
) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    let token = token.ok_or_else(|| BdfError::Malformed {
        line,
        keyword,
        reason: format!("missing {field}"),
    })?;
    token.parse().map_err(|e| BdfError::Malformed {
        line,
        keyword,
        reason: format!("{field} {token:?}: {e}"),
    })
}

fn optional_number(token: Option<&str>, line: usize, field: &str) -> Result<i32> {
    match token {
        Some(_) => number(token, line, "BBX", field),
        None => Ok(0),
    }
}

/// Codepoint of an `ENCODING` line, or `None` for any other line.
///
/// Only the `ENCODING` keyword is tokenized; malformed lines of other kinds
/// pass through untouched.
pub fn parse_encoding(text: &str, line: usize) -> Result<Option<i32>> {
    let mut tokens = text.split_whitespace();
    if tokens.next() != Some("ENCODING") {
        return Ok(None);
    }
    number(tokens.next(), line, "ENCODING", "code").map(Some)
}

/// Parses one bitmap row. Rows are hexadecimal, padded to whole bytes.
pub fn parse_scanline(text: &str, line: usize) -> Result<u32> {
    let digits = text.trim();
    let invalid = || BdfError::InvalidScanline {
        line,
        text: text.to_string(),
    };
    if digits.is_empty() || digits.starts_with('+') {
        return Err(invalid());
    }
    u32::from_str_radix(digits, 16).map_err(|_| invalid())
}
