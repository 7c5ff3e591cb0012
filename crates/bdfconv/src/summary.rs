use crate::{
    error::Result,
    glyph::NARROW_WIDTH,
    line::{BoundingBox, Line},
    reader::BdfReader,
};

/// Overview of a BDF font, gathered in one pass without decoding bitmaps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontSummary {
    /// Value of the header's `FONT` property.
    pub name: Option<String>,
    pub header_lines: usize,
    /// Number of `STARTCHAR` records.
    pub glyphs: usize,
    /// Glyphs with a non-negative `ENCODING`.
    pub encoded: usize,
    pub wide: usize,
    pub max_width: u32,
    pub max_height: u32,
    pub first_codepoint: Option<u32>,
    pub last_codepoint: Option<u32>,
}

impl FontSummary {
    pub fn scan(source: &str) -> Result<Self> {
        let mut reader = BdfReader::new(source);
        let header = reader.header();
        let mut summary = FontSummary {
            name: header.iter().find_map(|line| font_property(line)),
            header_lines: header.len(),
            ..Default::default()
        };
        // header() consumed the first STARTCHAR
        if reader.line_number() > header.len() {
            summary.glyphs = 1;
        }

        for next in reader {
            match next?.1 {
                Line::StartChar(_) => summary.glyphs += 1,
                Line::Encoding(code) => {
                    if let Ok(code) = u32::try_from(code) {
                        summary.encoded += 1;
                        let first = summary.first_codepoint.get_or_insert(code);
                        *first = (*first).min(code);
                        let last = summary.last_codepoint.get_or_insert(code);
                        *last = (*last).max(code);
                    }
                }
                Line::Bbx(bbox) => summary.add_bbox(&bbox),
                _ => {}
            }
        }
        Ok(summary)
    }

    fn add_bbox(&mut self, bbox: &BoundingBox) {
        if bbox.width > NARROW_WIDTH {
            self.wide += 1;
        }
        self.max_width = self.max_width.max(bbox.width);
        self.max_height = self.max_height.max(bbox.height);
    }
}

fn font_property(line: &str) -> Option<String> {
    let rest = line.strip_prefix("FONT")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_property() {
        assert_eq!(font_property("FONT -misc-fixed"), Some("-misc-fixed".into()));
        assert_eq!(font_property("FONTBOUNDINGBOX 8 16 0 -4"), None);
        assert_eq!(font_property("COMMENT FONT x"), None);
    }

    #[test]
    fn test_scan_counts() {
        let source = "STARTFONT 2.1\nFONT demo\nCHARS 3\nSTARTCHAR a\nENCODING 97\nBBX 8 16 0 0\nBITMAP\nENDCHAR\nSTARTCHAR box\nENCODING 9608\nBBX 16 16 0 0\nBITMAP\nENDCHAR\nSTARTCHAR none\nENCODING -1\nBBX 6 8 0 0\nBITMAP\nENDCHAR\nENDFONT\n";
        let summary = FontSummary::scan(source).unwrap();
        assert_eq!(summary.name.as_deref(), Some("demo"));
        assert_eq!(summary.header_lines, 3);
        assert_eq!(summary.glyphs, 3);
        assert_eq!(summary.encoded, 2);
        assert_eq!(summary.wide, 1);
        assert_eq!((summary.max_width, summary.max_height), (16, 16));
        assert_eq!(summary.first_codepoint, Some(97));
        assert_eq!(summary.last_codepoint, Some(9608));
    }

    #[test]
    fn test_scan_headers_only() {
        let summary = FontSummary::scan("STARTFONT 2.1\nENDFONT\n").unwrap();
        assert_eq!(summary.glyphs, 0);
        assert_eq!(summary.header_lines, 2);
        assert_eq!(summary.first_codepoint, None);
    }
}
