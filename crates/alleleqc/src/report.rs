//! Plain-text QC report rendering.
//!
//! The report has two banners: warnings first (records still loaded), then
//! the skip block (records reported and excluded). Under each banner, one
//! section per issue category that collected anything, in the fixed category
//! order, each listing line number, raw line text, and a total.

use std::fmt::Write as _;

use crate::engine::QcRun;
use crate::validation::{IssueCategory, Severity, ValidationIssue};

const RULE: &str = "------------------------------------------------------------";

/// Render the full QC report for a completed run.
pub fn render(run: &QcRun) -> String {
    let mut out = String::new();

    if let Some(source) = &run.source {
        let _ = writeln!(out, "QC report for {}", source.file);
        let _ = writeln!(
            out,
            "{} data lines, generated {}",
            source.line_count,
            source.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        out.push('\n');
    }

    banner(&mut out, "Warning QC - these will be loaded");
    let mut warned = false;
    for category in IssueCategory::ALL {
        if category.severity() != Severity::Warning {
            continue;
        }
        warned |= section(&mut out, *category, run.issues.get(*category));
    }
    if !warned {
        out.push_str("No warnings\n");
    }

    out.push('\n');
    banner(&mut out, "Report/Skip QC - these will be reported and skipped");
    let mut skipped = false;
    for category in IssueCategory::ALL {
        if category.severity() != Severity::Fatal {
            continue;
        }
        skipped |= section(&mut out, *category, run.issues.get(*category));
    }
    if !skipped {
        out.push_str("No skipped records\n");
    }

    out.push('\n');
    let _ = writeln!(
        out,
        "Processed: {}  Loaded: {}  With warning: {}  Skipped: {}",
        run.summary.lines_processed,
        run.summary.accepted,
        run.summary.loaded_with_warning,
        run.summary.skipped
    );

    out
}

fn banner(out: &mut String, title: &str) {
    out.push_str(RULE);
    out.push('\n');
    let _ = writeln!(out, "{title:^60}");
    out.push_str(RULE);
    out.push_str("\n\n");
}

fn section(out: &mut String, category: IssueCategory, issues: &[ValidationIssue]) -> bool {
    if issues.is_empty() {
        return false;
    }
    let _ = writeln!(out, "{}", category.label());
    out.push_str("Line#\tLine\n");
    out.push_str(RULE);
    out.push('\n');
    for issue in issues {
        let _ = writeln!(out, "{}\t{}", issue.line_number, issue.raw_line);
    }
    let _ = writeln!(out, "Total: {}\n", issues.len());
    true
}
