use textdiff_lines::LineSequence;

use crate::model::{Finding, FindingLevel};

pub(crate) fn collect_findings(a: &LineSequence, b: &LineSequence, has_changes: bool) -> Vec<Finding> {
    let mut findings = Vec::new();
    collect_final_newline_findings(a, "left", &mut findings);
    collect_final_newline_findings(b, "right", &mut findings);

    if !has_changes && a.metadata.final_newline != b.metadata.final_newline {
        findings.push(Finding {
            code: "final-newline-only-difference".to_string(),
            level: FindingLevel::Warning,
            message: "inputs differ only in the final line terminator, which line diffs do not render"
                .to_string(),
        });
    }

    if a.metadata.crlf_lines != b.metadata.crlf_lines {
        findings.push(Finding {
            code: "line-endings-differ".to_string(),
            level: FindingLevel::Info,
            message: format!(
                "left has {} CRLF line(s), right has {}; terminators are stripped before comparing",
                a.metadata.crlf_lines, b.metadata.crlf_lines
            ),
        });
    }

    findings
}

fn collect_final_newline_findings(seq: &LineSequence, side: &str, out: &mut Vec<Finding>) {
    if seq.is_empty() || seq.metadata.final_newline {
        return;
    }

    let name = seq.metadata.source_name.as_deref().unwrap_or(side);
    out.push(Finding {
        code: "missing-final-newline".to_string(),
        level: FindingLevel::Info,
        message: format!("{side} input `{name}` has no newline at end of file"),
    });
}
