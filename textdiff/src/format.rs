use crate::model::{DiffFormat, Hunk, LineTag};

/// Render hunks as one string. Every line, header included, ends with `\n`;
/// an empty slice renders as the empty string.
pub fn format_hunks(hunks: &[Hunk], format: DiffFormat) -> String {
    let mut out = String::new();
    for hunk in hunks {
        render_hunk(hunk, format, &mut out);
    }
    out
}

fn render_hunk(hunk: &Hunk, format: DiffFormat, out: &mut String) {
    if format.has_header() {
        out.push_str(&unified_header(hunk));
        out.push('\n');
    }

    for line in &hunk.lines {
        out.push(marker(line.tag, format));
        out.push_str(&line.text);
        out.push('\n');
    }
}

fn marker(tag: LineTag, format: DiffFormat) -> char {
    match tag {
        LineTag::Context => format.context_marker(),
        LineTag::Delete => format.delete_marker(),
        LineTag::Insert => format.insert_marker(),
    }
}

/// `@@ -a,b +c,d @@` for one hunk.
pub fn unified_header(hunk: &Hunk) -> String {
    format!(
        "@@ -{} +{} @@",
        unified_range(hunk.start_a, hunk.len_a),
        unified_range(hunk.start_b, hunk.len_b)
    )
}

// An empty side points at the line before the hunk.
fn unified_range(start: usize, len: usize) -> String {
    let start = if len == 0 {
        start.saturating_sub(1)
    } else {
        start
    };
    format!("{start},{len}")
}
