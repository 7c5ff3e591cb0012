use bdfconv::FontSummary;

/// Human readable summary for `inspect`.
pub fn summary_text(font_name: &str, summary: &FontSummary) -> String {
    let mut out = String::new();
    match &summary.name {
        Some(name) => out.push_str(&format!("BDF font: {font_name} ({name})\n")),
        None => out.push_str(&format!("BDF font: {font_name}\n")),
    }
    out.push_str(&format!("  Header lines: {}\n", summary.header_lines));
    out.push_str(&format!(
        "  Glyphs: {} ({} encoded)\n",
        summary.glyphs, summary.encoded
    ));
    out.push_str(&format!("  Wider than 8 pixels: {}\n", summary.wide));
    out.push_str(&format!(
        "  Largest bounding box: {}x{}\n",
        summary.max_width, summary.max_height
    ));
    if let (Some(first), Some(last)) = (summary.first_codepoint, summary.last_codepoint) {
        out.push_str(&format!("  Codepoints: U+{first:04X}..U+{last:04X}\n"));
    }
    out
}
