use crate::format::unified_header;
use crate::model::{Diff, Hunk, LineTag};

/// Format a markdown summary of a diff result.
pub fn format_summary_report(diff: &Diff, left_label: &str, right_label: &str) -> String {
    let mut out = String::new();
    out.push_str("# Text Diff Report\n\n");
    out.push_str(&format!("- Left: `{left_label}`\n"));
    out.push_str(&format!("- Right: `{right_label}`\n"));
    out.push_str(&format!(
        "- Format: {} ({} context line(s))\n\n",
        diff.format, diff.context_lines
    ));

    out.push_str("## Stats\n\n");
    out.push_str(&format!("- Hunks: {}\n", diff.stats.hunks));
    out.push_str(&format!("- Inserted lines: {}\n", diff.stats.inserted_lines));
    out.push_str(&format!("- Deleted lines: {}\n\n", diff.stats.deleted_lines));

    out.push_str("## Hunks\n\n");
    if diff.hunks.is_empty() {
        out.push_str("No differences detected.\n");
    } else {
        for (idx, hunk) in diff.hunks.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", idx + 1, describe_hunk(hunk)));
        }
    }

    if !diff.findings.is_empty() {
        out.push_str("\n## Findings\n\n");
        for finding in &diff.findings {
            out.push_str(&format!(
                "- {:?} [{}]: {}\n",
                finding.level, finding.code, finding.message
            ));
        }
    }

    out
}

fn describe_hunk(hunk: &Hunk) -> String {
    format!(
        "`{}` removes {} line(s), adds {} line(s)",
        unified_header(hunk),
        hunk.count(LineTag::Delete),
        hunk.count(LineTag::Insert),
    )
}
