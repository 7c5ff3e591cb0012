//! Codepoint list emitter: a BBC BASIC program that prints every glyph of a font.
//!
//! The program body is fixed; the font only contributes the numbered `DATA`
//! lines, which list each codepoint of 32 or above and end with `-1`.
use crate::{error::Result, reader::BdfReader};
use log::{debug, info};
use std::{fmt, io::Write};

/// Program text written ahead of the `DATA` lines. It reads codepoints until
/// `-1` and sends each one to the VDU as UTF-8.
pub const SHOWFONT_PREAMBLE: &str = "\
10 REM Show all characters in the UTF-8 font.
20 MODE 0:VDU 23,26,11,0,0,0
30 REPEAT
40 READ C
45 IF C=-1 THEN END
50 IF C<128 THEN VDU C ELSE IF C<2048 THEN VDU 192+C DIV 64,128+(C AND 63) ELSE VDU 224+C DIV 4096,128+((C DIV 64) AND 63),128+(C AND 63)
60 UNTIL 0
";

/// Value that ends the data read by the BASIC program.
pub const SENTINEL: i64 = -1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingOptions {
    pub first_line: u32,
    pub line_step: u32,
    pub values_per_line: usize,
    /// Codepoints below this are left out (control characters).
    pub min_codepoint: i64,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            first_line: 100,
            line_step: 10,
            values_per_line: 10,
            min_codepoint: 32,
        }
    }
}

/// A single `<number> DATA v1,v2,...` statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataLine {
    pub number: u32,
    pub values: Vec<i64>,
}

impl fmt::Display for DataLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} DATA ", self.number)?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

/// Collects values into numbered `DATA` lines.
#[derive(Debug)]
pub struct DataAccumulator {
    next_number: u32,
    line_step: u32,
    capacity: usize,
    values: Vec<i64>,
}

impl DataAccumulator {
    pub fn new(first_line: u32, line_step: u32, values_per_line: usize) -> Self {
        let capacity = values_per_line.max(1);
        Self {
            next_number: first_line,
            line_step,
            capacity,
            values: Vec::with_capacity(capacity),
        }
    }

    /// Adds a value, returning a completed line once the buffer is full.
    pub fn append(&mut self, value: i64) -> Option<DataLine> {
        self.values.push(value);
        if self.values.len() >= self.capacity {
            self.flush()
        } else {
            None
        }
    }

    /// Emits the buffered values, if any, as the next line.
    pub fn flush(&mut self) -> Option<DataLine> {
        if self.values.is_empty() {
            return None;
        }
        let line = DataLine {
            number: self.next_number,
            values: std::mem::replace(&mut self.values, Vec::with_capacity(self.capacity)),
        };
        self.next_number = self.next_number.saturating_add(self.line_step);
        Some(line)
    }

    /// Appends the sentinel and returns the last line, which always exists.
    pub fn finish(mut self) -> DataLine {
        self.values.push(SENTINEL);
        let number = self.next_number;
        self.flush().unwrap_or(DataLine {
            number,
            values: vec![SENTINEL],
        })
    }
}

impl Default for DataAccumulator {
    fn default() -> Self {
        let options = ListingOptions::default();
        Self::new(options.first_line, options.line_step, options.values_per_line)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingStats {
    pub codepoints: usize,
    pub filtered: usize,
    pub data_lines: usize,
}

/// Writes the BASIC program for every `ENCODING` in `source`.
pub fn write_codepoint_listing<W: Write>(
    source: &str,
    options: &ListingOptions,
    mut out: W,
) -> Result<ListingStats> {
    out.write_all(SHOWFONT_PREAMBLE.as_bytes())?;
    let mut data = DataAccumulator::new(
        options.first_line,
        options.line_step,
        options.values_per_line,
    );
    let mut stats = ListingStats::default();

    for next in BdfReader::new(source).encodings() {
        let (line, code) = next?;
        let code = i64::from(code);
        if code < options.min_codepoint {
            debug!("line {line}: leaving out codepoint {code}");
            stats.filtered += 1;
            continue;
        }
        stats.codepoints += 1;
        if let Some(data_line) = data.append(code) {
            writeln!(out, "{data_line}")?;
            stats.data_lines += 1;
        }
    }
    writeln!(out, "{}", data.finish())?;
    stats.data_lines += 1;
    out.flush()?;

    info!(
        "listed {} codepoints in {} DATA lines ({} below {} left out)",
        stats.codepoints, stats.data_lines, stats.filtered, options.min_codepoint
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_line_format() {
        let line = DataLine {
            number: 120,
            values: vec![65, 66, -1],
        };
        assert_eq!(line.to_string(), "120 DATA 65,66,-1");
    }

    #[test]
    fn test_accumulator_flushes_when_full() {
        let mut acc = DataAccumulator::new(100, 10, 3);
        assert_eq!(acc.append(32), None);
        assert_eq!(acc.append(33), None);
        let full = acc.append(34).unwrap();
        assert_eq!(full.number, 100);
        assert_eq!(full.values, vec![32, 33, 34]);
        assert_eq!(acc.flush(), None);
        acc.append(35);
        let last = acc.finish();
        assert_eq!(last.to_string(), "110 DATA 35,-1");
    }

    #[test]
    fn test_finish_on_empty_buffer() {
        let acc = DataAccumulator::default();
        assert_eq!(acc.finish().to_string(), "100 DATA -1");
    }

    #[test]
    fn test_numbering_stops_at_u32_max() {
        let mut acc = DataAccumulator::new(u32::MAX - 5, 10, 1);
        assert_eq!(acc.append(65).unwrap().number, u32::MAX - 5);
        assert_eq!(acc.append(66).unwrap().number, u32::MAX);
        assert_eq!(acc.finish().number, u32::MAX);
    }

    #[test]
    fn test_sentinel_completes_full_line() {
        let mut acc = DataAccumulator::new(100, 10, 2);
        assert_eq!(acc.append(40), None);
        assert_eq!(acc.finish().to_string(), "100 DATA 40,-1");
    }
}
