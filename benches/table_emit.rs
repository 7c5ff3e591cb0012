//! Benchmark for BDF conversion over a synthetic font.
//!
//! The font holds a block of 8x16 glyphs plus a run of 16 pixel wide glyphs,
//! so the split layout exercises both entry kinds.

use bdfconv::{
    test_support::BdfBuilder, write_codepoint_listing, write_glyph_table, ListingOptions,
    TableLayout, TableOptions,
};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn synthetic_font() -> String {
    let narrow = ["00", "18", "3C", "66", "66", "7E", "66", "66"].repeat(2);
    let wide = ["0180", "03C0", "07E0", "0FF0", "1FF8", "3FFC", "7FFE", "FFFF"].repeat(2);
    let mut builder = BdfBuilder::new("bench-font");
    for cp in 32..1024 {
        builder = builder.glyph(cp, 8, &narrow);
    }
    for cp in 0x2500..0x2600 {
        builder = builder.glyph(cp, 16, &wide);
    }
    builder.build()
}

fn bench_conversion(c: &mut Criterion) {
    let source = synthetic_font();

    for (label, layout) in [
        ("table_skip_wide", TableLayout::SkipWide),
        ("table_split_wide", TableLayout::SplitWide),
    ] {
        let options = TableOptions {
            layout,
            ..Default::default()
        };
        c.bench_function(label, |b| {
            b.iter(|| {
                let mut out = Vec::with_capacity(source.len());
                write_glyph_table(black_box(&source), "bench-font", &options, &mut out).unwrap();
                black_box(out)
            })
        });
    }

    c.bench_function("basic_listing", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            write_codepoint_listing(black_box(&source), &ListingOptions::default(), &mut out)
                .unwrap();
            black_box(out)
        })
    });
}

criterion_group!(benches, bench_conversion);
criterion_main!(benches);
