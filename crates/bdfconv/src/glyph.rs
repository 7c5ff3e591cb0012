use crate::{
    error::{BdfError, Result},
    line::BoundingBox,
};

/// Glyphs wider than this many pixels no longer fit one byte per scanline.
pub const NARROW_WIDTH: u32 = 8;
/// Widest glyph that can still be split into two byte-wide halves.
pub const SPLIT_WIDTH: u32 = 16;

/// One finalized glyph: its `ENCODING`, optional `BBX` and complete `BITMAP` block.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphRecord {
    pub codepoint: u32,
    /// Absent when rows were read with a fixed count and `BBX` was ignored.
    pub bbox: Option<BoundingBox>,
    /// Scanlines, top to bottom, as parsed from hex.
    pub rows: Vec<u32>,
}

impl GlyphRecord {
    pub fn width(&self) -> Option<u32> {
        self.bbox.map(|b| b.width)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_wide(&self) -> bool {
        self.width().is_some_and(|w| w > NARROW_WIDTH)
    }

    /// Scanlines as bytes. Every row must fit in 8 bits.
    pub fn narrow_rows(&self) -> Result<Vec<u8>> {
        self.rows
            .iter()
            .map(|&row| {
                u8::try_from(row).map_err(|_| BdfError::ScanlineTooWide {
                    codepoint: self.codepoint,
                    value: row,
                    bits: 8,
                })
            })
            .collect()
    }

    /// Splits 16 bit scanlines into the left (`row >> 8`) and right (`row & 0xff`) halves.
    pub fn split_rows(&self) -> Result<(Vec<u8>, Vec<u8>)> {
        if let Some(width) = self.width().filter(|&w| w > SPLIT_WIDTH) {
            return Err(BdfError::GlyphTooWide {
                codepoint: self.codepoint,
                width,
            });
        }
        let mut left = Vec::with_capacity(self.rows.len());
        let mut right = Vec::with_capacity(self.rows.len());
        for &row in &self.rows {
            let word = u16::try_from(row).map_err(|_| BdfError::ScanlineTooWide {
                codepoint: self.codepoint,
                value: row,
                bits: 16,
            })?;
            let [hi, lo] = word.to_be_bytes();
            left.push(hi);
            right.push(lo);
        }
        Ok((left, right))
    }
}
