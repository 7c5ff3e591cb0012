//! Sequential BDF reader.
//!
//! [`BdfReader`] walks the source line by line and yields tokenized [`Line`]s.
//! Bitmap rows are pulled explicitly with [`BdfReader::scanlines`] since they
//! carry no keyword. [`Glyphs`] builds complete [`GlyphRecord`]s on top of it.
use crate::{
    error::{BdfError, Result},
    glyph::GlyphRecord,
    line::{parse_encoding, parse_scanline, BoundingBox, Line},
};
use log::debug;

/// Upper bound on rows reserved ahead of reading a bitmap.
const MAX_ROW_RESERVE: usize = 64;

pub struct BdfReader<'a> {
    lines: std::str::Lines<'a>,
    line: usize,
}

impl<'a> BdfReader<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines(),
            line: 0,
        }
    }

    /// 1-based number of the last consumed line (0 before the first read).
    pub fn line_number(&self) -> usize {
        self.line
    }

    fn next_raw(&mut self) -> Option<(usize, &'a str)> {
        let text = self.lines.next()?;
        self.line += 1;
        Some((self.line, text))
    }

    /// Consumes every line up to and including the first `STARTCHAR` and
    /// returns the lines before it.
    pub fn header(&mut self) -> Vec<&'a str> {
        let mut header = Vec::new();
        while let Some((_, text)) = self.next_raw() {
            if is_keyword(text, "STARTCHAR") {
                break;
            }
            header.push(text);
        }
        header
    }

    /// Reads exactly `count` bitmap rows.
    pub fn scanlines(&mut self, count: usize) -> Result<Vec<u32>> {
        let bitmap_line = self.line;
        // count comes from the input, rows may not exist
        let mut rows = Vec::with_capacity(count.min(MAX_ROW_RESERVE));
        for found in 0..count {
            let Some((line, text)) = self.next_raw() else {
                return Err(BdfError::TruncatedBitmap {
                    line: bitmap_line,
                    expected: count,
                    found,
                });
            };
            rows.push(parse_scanline(text, line)?);
        }
        Ok(rows)
    }

    /// Discards lines through the next `ENDCHAR`. Returns false if input ran out first.
    pub fn skip_glyph(&mut self) -> bool {
        while let Some((_, text)) = self.next_raw() {
            if is_keyword(text, "ENDCHAR") {
                return true;
            }
        }
        false
    }

    /// Codepoints of every `ENCODING` line with their line numbers. No other
    /// line is tokenized.
    pub fn encodings(mut self) -> impl Iterator<Item = Result<(usize, i32)>> + 'a {
        std::iter::from_fn(move || loop {
            let (line, text) = self.next_raw()?;
            match parse_encoding(text, line) {
                Ok(Some(code)) => return Some(Ok((line, code))),
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }
        })
    }

    pub fn glyphs<'r>(&'r mut self, rows: RowCount) -> Glyphs<'r, 'a> {
        Glyphs {
            reader: self,
            rows,
            skip_wider_than: None,
            skipped_wide: 0,
            skipped_unencoded: 0,
        }
    }
}

impl<'a> Iterator for BdfReader<'a> {
    type Item = Result<(usize, Line<'a>)>;

    fn next(&mut self) -> Option<Self::Item> {
        let (line, text) = self.next_raw()?;
        Some(Line::parse(text, line).map(|parsed| (line, parsed)))
    }
}

fn is_keyword(text: &str, keyword: &str) -> bool {
    text.split_whitespace().next() == Some(keyword)
}

/// How many scanlines follow a `BITMAP` marker.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RowCount {
    /// Always this many rows; `BBX` is ignored.
    Fixed(usize),
    /// The height from the glyph's `BBX` line, which becomes mandatory.
    Declared,
}

/// Iterator over finalized glyphs.
///
/// A glyph is produced only after its `ENCODING`, (`BBX`) and full `BITMAP`
/// block have been read. `STARTCHAR` and `ENDCHAR` drop any partial state.
pub struct Glyphs<'r, 'a> {
    reader: &'r mut BdfReader<'a>,
    rows: RowCount,
    skip_wider_than: Option<u32>,
    skipped_wide: usize,
    skipped_unencoded: usize,
}

impl Glyphs<'_, '_> {
    /// Skip glyphs whose `BBX` width exceeds `width` without reading their bitmap.
    pub fn skip_wider_than(mut self, width: u32) -> Self {
        self.skip_wider_than = Some(width);
        self
    }

    pub fn skipped_wide(&self) -> usize {
        self.skipped_wide
    }

    pub fn skipped_unencoded(&self) -> usize {
        self.skipped_unencoded
    }

    fn too_wide(&self, bbox: &BoundingBox) -> bool {
        self.rows == RowCount::Declared
            && self.skip_wider_than.is_some_and(|max| bbox.width > max)
    }

    fn finish(
        &mut self,
        line: usize,
        codepoint: Option<u32>,
        bbox: Option<BoundingBox>,
    ) -> Result<GlyphRecord> {
        let codepoint = codepoint.ok_or(BdfError::IncompleteGlyph {
            line,
            missing: "ENCODING",
        })?;
        let (count, bbox) = match self.rows {
            RowCount::Fixed(count) => (count, None),
            RowCount::Declared => {
                let bbox = bbox.ok_or(BdfError::IncompleteGlyph {
                    line,
                    missing: "BBX",
                })?;
                (bbox.height as usize, Some(bbox))
            }
        };
        let rows = self.reader.scanlines(count)?;
        Ok(GlyphRecord {
            codepoint,
            bbox,
            rows,
        })
    }
}

impl Iterator for Glyphs<'_, '_> {
    type Item = Result<GlyphRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut codepoint = None;
        let mut bbox = None;
        loop {
            let (line, parsed) = match self.reader.next()? {
                Ok(next) => next,
                Err(e) => return Some(Err(e)),
            };
            match parsed {
                Line::StartChar(_) | Line::EndChar => {
                    codepoint = None;
                    bbox = None;
                }
                Line::Encoding(code) => match u32::try_from(code) {
                    Ok(code) => codepoint = Some(code),
                    Err(_) => {
                        debug!("line {line}: skipping unencoded glyph (ENCODING {code})");
                        self.skipped_unencoded += 1;
                        self.reader.skip_glyph();
                        codepoint = None;
                        bbox = None;
                    }
                },
                Line::Bbx(b) => {
                    if self.too_wide(&b) {
                        debug!(
                            "line {line}: skipping glyph {:?} of width {}",
                            codepoint, b.width
                        );
                        self.skipped_wide += 1;
                        self.reader.skip_glyph();
                        codepoint = None;
                        bbox = None;
                    } else {
                        bbox = Some(b);
                    }
                }
                Line::Bitmap => return Some(self.finish(line, codepoint, bbox)),
                Line::Other(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_GLYPHS: &str = "STARTFONT 2.1\nFONT test\nSTARTCHAR A\nENCODING 65\nBBX 8 2 0 0\nBITMAP\n18\n24\nENDCHAR\nSTARTCHAR wide\nENCODING 66\nBBX 16 1 0 0\nBITMAP\nFFFF\nENDCHAR\nENDFONT\n";

    #[test]
    fn test_header_stops_at_startchar() {
        let mut reader = BdfReader::new(TWO_GLYPHS);
        assert_eq!(reader.header(), vec!["STARTFONT 2.1", "FONT test"]);
        assert_eq!(reader.line_number(), 3);
    }

    #[test]
    fn test_header_without_glyphs() {
        let mut reader = BdfReader::new("STARTFONT 2.1\nENDFONT");
        assert_eq!(reader.header().len(), 2);
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_declared_rows() {
        let mut reader = BdfReader::new(TWO_GLYPHS);
        reader.header();
        let glyphs: Vec<_> = reader
            .glyphs(RowCount::Declared)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].codepoint, 65);
        assert_eq!(glyphs[0].rows, vec![0x18, 0x24]);
        assert_eq!(glyphs[1].rows, vec![0xffff]);
    }

    #[test]
    fn test_skip_wide_keeps_following_glyphs() {
        let source = TWO_GLYPHS.replace("ENCODING 65\nBBX 8", "ENCODING 65\nBBX 12");
        let mut reader = BdfReader::new(&source);
        reader.header();
        let mut glyphs = reader.glyphs(RowCount::Declared).skip_wider_than(8);
        assert!(glyphs.next().is_none());
        assert_eq!(glyphs.skipped_wide(), 2);

        let source = TWO_GLYPHS.replace("ENCODING 66\nBBX 16", "ENCODING 66\nBBX 8");
        let source = source.replace("FFFF", "7E");
        let mut reader = BdfReader::new(&source);
        reader.header();
        let mut glyphs = reader.glyphs(RowCount::Declared).skip_wider_than(8);
        assert_eq!(glyphs.next().unwrap().unwrap().codepoint, 65);
        assert_eq!(glyphs.next().unwrap().unwrap().codepoint, 66);
        assert!(glyphs.next().is_none());
        assert_eq!(glyphs.skipped_wide(), 0);
    }

    #[test]
    fn test_missing_bbx_is_incomplete() {
        let mut reader = BdfReader::new("STARTCHAR A\nENCODING 65\nBITMAP\nFF\nENDCHAR\n");
        reader.header();
        let err = reader.glyphs(RowCount::Declared).next().unwrap().unwrap_err();
        assert!(matches!(
            err,
            BdfError::IncompleteGlyph {
                line: 3,
                missing: "BBX"
            }
        ));
    }

    #[test]
    fn test_fixed_rows_ignore_bbx() {
        let mut reader = BdfReader::new("STARTCHAR A\nENCODING 65\nBBX 8 1 0 0\nBITMAP\n01\n02\n03\nENDCHAR\n");
        reader.header();
        let glyph = reader.glyphs(RowCount::Fixed(3)).next().unwrap().unwrap();
        assert_eq!(glyph.rows, vec![1, 2, 3]);
        assert_eq!(glyph.bbox, None);
    }

    #[test]
    fn test_truncated_bitmap() {
        let mut reader = BdfReader::new("STARTCHAR A\nENCODING 65\nBITMAP\n01\n02\n");
        reader.header();
        let err = reader.glyphs(RowCount::Fixed(16)).next().unwrap().unwrap_err();
        assert!(matches!(
            err,
            BdfError::TruncatedBitmap {
                line: 3,
                expected: 16,
                found: 2
            }
        ));
    }

    #[test]
    fn test_huge_declared_height_is_truncated_bitmap() {
        let mut reader = BdfReader::new("STARTCHAR A\nENCODING 65\nBBX 8 4000000000 0 0\nBITMAP\nFF\n");
        reader.header();
        let err = reader.glyphs(RowCount::Declared).next().unwrap().unwrap_err();
        assert!(matches!(
            err,
            BdfError::TruncatedBitmap {
                line: 4,
                expected: 4_000_000_000,
                found: 1
            }
        ));
    }

    #[test]
    fn test_unencoded_glyph_is_skipped() {
        let source = "STARTCHAR x\nENCODING -1\nBBX 8 1 0 0\nBITMAP\nFF\nENDCHAR\nSTARTCHAR A\nENCODING 65\nBBX 8 1 0 0\nBITMAP\n81\nENDCHAR\n";
        let mut reader = BdfReader::new(source);
        reader.header();
        let mut glyphs = reader.glyphs(RowCount::Declared);
        assert_eq!(glyphs.next().unwrap().unwrap().rows, vec![0x81]);
        assert!(glyphs.next().is_none());
        assert_eq!(glyphs.skipped_unencoded(), 1);
    }
}
