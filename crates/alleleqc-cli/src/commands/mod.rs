//! Command implementations.

pub mod check;
pub mod status;

use alleleqc::QcRun;

/// Exit code for a completed run: 0 clean, 2 skips and warnings,
/// 3 skips only, 4 warnings only.
pub fn exit_code(run: &QcRun) -> i32 {
    match (run.summary.has_skip, run.summary.has_warn) {
        (true, true) => 2,
        (true, false) => 3,
        (false, true) => 4,
        (false, false) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alleleqc::{AlleleQc, QcConfig, RawLine, ReferenceData};

    fn run_over(lines: &[&str]) -> QcRun {
        let reference = ReferenceData::default();
        let mut engine = AlleleQc::new(&reference, &QcConfig::default());
        for (idx, text) in lines.iter().enumerate() {
            engine.process_line(&RawLine {
                number: idx + 2,
                text: text.to_string(),
            });
        }
        engine.finish()
    }

    #[test]
    fn test_clean_run_exits_zero() {
        assert_eq!(exit_code(&run_over(&[])), 0);
    }

    #[test]
    fn test_skip_only_exits_three() {
        // short line is a fatal skip against an empty reference
        assert_eq!(exit_code(&run_over(&["too\tshort"])), 3);
    }
}
