//! Glyph table emitter: BDF to a C array of `{codepoint, {rows...}}` entries.
use crate::{
    error::Result,
    glyph::{GlyphRecord, NARROW_WIDTH},
    reader::{BdfReader, RowCount},
};
use log::{debug, info};
use std::io::Write;

/// Rows read per glyph by [`TableLayout::Fixed`].
pub const FIXED_ROWS: usize = 16;

/// The named modes of the table emitter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableLayout {
    /// 16 rows per glyph regardless of `BBX`, for 8x16 fonts.
    Fixed,
    /// Rows from `BBX`; glyphs wider than 8 pixels are left out.
    #[default]
    SkipWide,
    /// Rows from `BBX`; glyphs wider than 8 pixels become two half-glyphs
    /// at `2*codepoint` and `2*codepoint+1`.
    SplitWide,
}

/// How split half-glyph indices are written.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IndexStyle {
    /// `0x0082`, `0x0083`
    #[default]
    Precomputed,
    /// `2*0x0041`, `2*0x0041+1`, as older generated headers spell them.
    Legacy,
}

#[derive(Clone, Debug)]
pub struct TableOptions {
    pub layout: TableLayout,
    pub index_style: IndexStyle,
    /// C element type of the generated array.
    pub struct_type: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            layout: TableLayout::default(),
            index_style: IndexStyle::default(),
            struct_type: "CharDef16".to_string(),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TableStats {
    /// Array elements written, counting both halves of a split glyph.
    pub entries: usize,
    pub skipped_wide: usize,
    pub skipped_unencoded: usize,
    pub split: usize,
}

/// C identifier derived from a font name.
pub fn symbol_name(font_name: &str) -> String {
    font_name.replace('-', "_")
}

/// Writes one array of glyph entries, framed by a declaration and a terminator.
pub struct TableWriter<W: Write> {
    out: W,
    index_style: IndexStyle,
    stats: TableStats,
}

impl<W: Write> TableWriter<W> {
    /// Writes the header lines as comments followed by the array declaration.
    pub fn begin(
        mut out: W,
        header: &[&str],
        struct_type: &str,
        symbol: &str,
        index_style: IndexStyle,
    ) -> Result<Self> {
        for line in header {
            writeln!(out, "// {line}")?;
        }
        writeln!(out, "const {struct_type} {symbol}_font_data[] = {{")?;
        Ok(Self {
            out,
            index_style,
            stats: TableStats::default(),
        })
    }

    pub fn narrow(&mut self, glyph: &GlyphRecord) -> Result<()> {
        let rows = glyph.narrow_rows()?;
        self.entry(&format!("0x{:04x}", glyph.codepoint), &rows)
    }

    pub fn split(&mut self, glyph: &GlyphRecord) -> Result<()> {
        let (left, right) = glyph.split_rows()?;
        let cp = glyph.codepoint;
        let (left_index, right_index) = match self.index_style {
            IndexStyle::Precomputed => {
                let doubled = 2 * u64::from(cp);
                (format!("0x{doubled:04x}"), format!("0x{:04x}", doubled + 1))
            }
            IndexStyle::Legacy => (format!("2*0x{cp:04x}"), format!("2*0x{cp:04x}+1")),
        };
        self.entry(&left_index, &left)?;
        self.entry(&right_index, &right)?;
        self.stats.split += 1;
        Ok(())
    }

    fn entry(&mut self, index: &str, rows: &[u8]) -> Result<()> {
        write!(self.out, "    {{{index}, {{")?;
        for row in rows {
            write!(self.out, "0x{row:02x},")?;
        }
        writeln!(self.out, "}}}},")?;
        self.stats.entries += 1;
        Ok(())
    }

    /// Closes the array and flushes the output.
    pub fn finish(mut self) -> Result<TableStats> {
        writeln!(self.out, "}};")?;
        self.out.flush()?;
        Ok(self.stats)
    }
}

/// Converts a whole BDF source into a glyph table written to `out`.
///
/// Entries are written as soon as each glyph's bitmap has been read, so on
/// error `out` holds everything up to the failing glyph.
pub fn write_glyph_table<W: Write>(
    source: &str,
    font_name: &str,
    options: &TableOptions,
    out: W,
) -> Result<TableStats> {
    let mut reader = BdfReader::new(source);
    let header = reader.header();
    let symbol = symbol_name(font_name);
    let mut table = TableWriter::begin(
        out,
        &header,
        &options.struct_type,
        &symbol,
        options.index_style,
    )?;

    let mut glyphs = match options.layout {
        TableLayout::Fixed => reader.glyphs(RowCount::Fixed(FIXED_ROWS)),
        TableLayout::SkipWide => reader
            .glyphs(RowCount::Declared)
            .skip_wider_than(NARROW_WIDTH),
        TableLayout::SplitWide => reader.glyphs(RowCount::Declared),
    };
    for glyph in glyphs.by_ref() {
        let glyph = glyph?;
        if glyph.is_wide() {
            debug!(
                "splitting glyph 0x{:04x} ({}x{} px)",
                glyph.codepoint,
                glyph.width().unwrap_or_default(),
                glyph.height()
            );
            table.split(&glyph)?;
        } else {
            table.narrow(&glyph)?;
        }
    }
    let (skipped_wide, skipped_unencoded) = (glyphs.skipped_wide(), glyphs.skipped_unencoded());

    let mut stats = table.finish()?;
    stats.skipped_wide = skipped_wide;
    stats.skipped_unencoded = skipped_unencoded;
    info!(
        "{symbol}_font_data: {} entries, {} split, {} wide glyphs skipped",
        stats.entries, stats.split, stats.skipped_wide
    );
    Ok(stats)
}
