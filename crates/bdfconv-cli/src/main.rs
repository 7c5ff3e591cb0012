use anyhow::{Context, Result};
use bdfconv::{
    decode_source, symbol_name, write_codepoint_listing, write_glyph_table, FontSummary,
    IndexStyle, ListingOptions, TableLayout, TableOptions,
};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use crate::report::summary_text;
mod report;

#[derive(Parser)]
#[command(name = "bdfconv", about = "BDF font converter")]
struct Cli {
    /// Log each skipped or split glyph
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Write a C glyph table (<name>.h) from <name>.bdf
    Table {
        /// Font base name; `.bdf` is appended when missing
        name: String,
        #[arg(long, value_enum, default_value_t = Layout::SkipWide)]
        layout: Layout,
        /// Spell split indices as `2*0x....` like older generated headers
        #[arg(long)]
        legacy_index: bool,
        #[arg(long, default_value = "CharDef16")]
        struct_type: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a BASIC program (showfont.bas) listing every codepoint of <name>.bdf
    Basic {
        name: String,
        #[arg(short, long, default_value = "showfont.bas")]
        output: PathBuf,
    },
    /// Inspect font metadata
    Inspect {
        name: String,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum Layout {
    /// 16 rows per glyph, BBX ignored
    Fixed,
    /// Rows from BBX, glyphs wider than 8 pixels left out
    SkipWide,
    /// Rows from BBX, wide glyphs split into two half-glyphs
    SplitWide,
}

impl From<Layout> for TableLayout {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Fixed => TableLayout::Fixed,
            Layout::SkipWide => TableLayout::SkipWide,
            Layout::SplitWide => TableLayout::SplitWide,
        }
    }
}

/// Input path and font name for a base name such as `fonts/ttxt-16`.
fn resolve(name: &str) -> (PathBuf, String) {
    let path = if name.ends_with(".bdf") {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{name}.bdf"))
    };
    let font_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());
    (path, font_name)
}

fn read_font(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    decode_source(&bytes).with_context(|| format!("cannot decode {}", path.display()))
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Cmd::Table {
            name,
            layout,
            legacy_index,
            struct_type,
            output,
        } => {
            let (input, font_name) = resolve(&name);
            let source = read_font(&input)?;
            let output =
                output.unwrap_or_else(|| PathBuf::from(format!("{}.h", symbol_name(&font_name))));
            let options = TableOptions {
                layout: layout.into(),
                index_style: if legacy_index {
                    IndexStyle::Legacy
                } else {
                    IndexStyle::Precomputed
                },
                struct_type,
            };
            let stats = write_glyph_table(&source, &font_name, &options, create(&output)?)
                .with_context(|| format!("converting {}", input.display()))?;
            info!("wrote {} entries to {}", stats.entries, output.display());
        }
        Cmd::Basic { name, output } => {
            let (input, _) = resolve(&name);
            let source = read_font(&input)?;
            let stats =
                write_codepoint_listing(&source, &ListingOptions::default(), create(&output)?)
                    .with_context(|| format!("listing {}", input.display()))?;
            info!(
                "wrote {} codepoints to {}",
                stats.codepoints,
                output.display()
            );
        }
        Cmd::Inspect { name, json } => {
            let (input, font_name) = resolve(&name);
            let source = read_font(&input)?;
            let summary = FontSummary::scan(&source)
                .with_context(|| format!("scanning {}", input.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", summary_text(&font_name, &summary));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_appends_extension() {
        let (path, name) = resolve("fonts/ttxt-16");
        assert_eq!(path, PathBuf::from("fonts/ttxt-16.bdf"));
        assert_eq!(name, "ttxt-16");
    }

    #[test]
    fn test_resolve_keeps_bdf_path() {
        let (path, name) = resolve("agon.bdf");
        assert_eq!(path, PathBuf::from("agon.bdf"));
        assert_eq!(name, "agon");
    }
}
