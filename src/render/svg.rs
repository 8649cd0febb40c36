//! SVG export of a laid-out heatmap

use super::layout::GridLayout;

/// Legend swatch edge in px
const SWATCH: u32 = 12;
/// Space between grid and legend row
const LEGEND_MARGIN: u32 = 16;
/// Rough advance per label character (12px sans-serif)
const CHAR_WIDTH: u32 = 7;
/// Space after each legend label
const LEGEND_SPACING: u32 = 16;

/// Render `layout` as a standalone SVG document. Each cell carries its label as `<title>`.
pub fn render_svg(layout: &GridLayout, subject: &str, total_count: u64) -> String {
    let legend_width: u32 = layout
        .legend
        .iter()
        .map(|e| legend_entry_width(&e.label))
        .sum();
    let width = layout.width.max(legend_width.saturating_sub(LEGEND_SPACING));
    let height = if layout.legend.is_empty() {
        layout.height
    } else {
        layout.height + LEGEND_MARGIN + SWATCH
    };

    let mut out = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img" aria-label="Contribution heatmap for {subject}">
  <title>{subject}: {total} total contributions</title>
"#,
        w = width,
        h = height,
        subject = escape(subject),
        total = total_count,
    );

    for cell in layout.cells() {
        out.push_str(&format!(
            r#"  <rect x="{}" y="{}" width="{s}" height="{s}" rx="2" fill="{}"><title>{}</title></rect>
"#,
            cell.x,
            cell.y,
            cell.color,
            escape(&cell.label),
            s = layout.cell_size,
        ));
    }

    if !layout.legend.is_empty() {
        let y = layout.height + LEGEND_MARGIN;
        let mut x = 0;
        out.push_str("  <g font-family=\"sans-serif\" font-size=\"12\">\n");
        for entry in &layout.legend {
            out.push_str(&format!(
                r#"    <rect x="{x}" y="{y}" width="{s}" height="{s}" rx="2" fill="{color}"/>
    <text x="{tx}" y="{ty}">{label}</text>
"#,
                color = entry.color,
                s = SWATCH,
                tx = x + SWATCH + 4,
                ty = y + SWATCH - 2,
                label = escape(&entry.label),
            ));
            x += legend_entry_width(&entry.label);
        }
        out.push_str("  </g>\n");
    }

    out.push_str("</svg>\n");
    out
}

fn legend_entry_width(label: &str) -> u32 {
    SWATCH + 4 + label.chars().count() as u32 * CHAR_WIDTH + LEGEND_SPACING
}

/// Minimal XML text/attribute escaping
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
