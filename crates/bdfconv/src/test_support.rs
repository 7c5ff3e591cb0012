//! Test support utilities for bdfconv.
//!
//! This module provides helpers for synthesising BDF sources in tests and
//! benchmarks. It is not part of the stable API.

/// Builds BDF text glyph by glyph.
#[derive(Clone, Debug)]
pub struct BdfBuilder {
    name: String,
    glyphs: Vec<String>,
}

impl BdfBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            glyphs: Vec::new(),
        }
    }

    /// Adds a glyph with a `BBX` of `width` x `rows.len()`.
    pub fn glyph(mut self, codepoint: i32, width: u32, rows: &[&str]) -> Self {
        let bbx = format!("BBX {width} {} 0 -2\n", rows.len());
        self.push(codepoint, width, &bbx, rows);
        self
    }

    /// Adds a glyph that has no `BBX` line.
    pub fn glyph_without_bbx(mut self, codepoint: i32, rows: &[&str]) -> Self {
        self.push(codepoint, 8, "", rows);
        self
    }

    fn push(&mut self, codepoint: i32, width: u32, bbx: &str, rows: &[&str]) {
        let mut glyph = format!(
            "STARTCHAR char{codepoint}\nENCODING {codepoint}\nSWIDTH 500 0\nDWIDTH {width} 0\n{bbx}BITMAP\n"
        );
        for row in rows {
            glyph.push_str(row);
            glyph.push('\n');
        }
        glyph.push_str("ENDCHAR\n");
        self.glyphs.push(glyph);
    }

    /// Header lines as they appear before the first `STARTCHAR`.
    pub fn header_lines(&self) -> Vec<String> {
        vec![
            "STARTFONT 2.1".to_string(),
            format!("FONT {}", self.name),
            "SIZE 16 75 75".to_string(),
            format!("CHARS {}", self.glyphs.len()),
        ]
    }

    pub fn build(&self) -> String {
        let mut out = String::new();
        for line in self.header_lines() {
            out.push_str(&line);
            out.push('\n');
        }
        for glyph in &self.glyphs {
            out.push_str(glyph);
        }
        out.push_str("ENDFONT\n");
        out
    }
}

/// A font of `count` 8x16 glyphs starting at `first`.
pub fn fixed_font(first: i32, count: i32) -> String {
    let rows = [
        "00", "00", "18", "3C", "66", "66", "7E", "66", "66", "66", "66", "00", "00", "00", "00",
        "00",
    ];
    (first..first + count)
        .fold(BdfBuilder::new("fixed-8x16"), |b, cp| b.glyph(cp, 8, &rows))
        .build()
}
