//! The QC engine: one pass over a submission, record by record.
//!
//! Each data line runs the same pipeline: duplicate-line check, column
//! parse, field validation, defaults normalization, then cell-line
//! resolution for the allele types that need it. The engine is
//! deterministic; running the same input against the same reference
//! snapshot always produces the same outcome set.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::{InputRecord, RawLine, RecordSource, SourceMetadata};
use crate::reference::{DerivationStore, ReferenceData};
use crate::resolve::CellLineResolver;
use crate::terms;
use crate::validation::{
    AcceptedAllele, FieldValidator, IssueBuckets, IssueCategory, RunContext, ValidationIssue,
};

/// Tunable run behavior.
#[derive(Debug, Clone)]
pub struct QcConfig {
    /// Treat an empty strain-of-origin column as a missing required column.
    pub require_strain_of_origin: bool,
}

impl Default for QcConfig {
    fn default() -> Self {
        Self {
            require_strain_of_origin: true,
        }
    }
}

/// What the engine concluded about one input line.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Record passed; it will appear in the load output.
    Accepted(AcceptedAllele),
    /// Record failed; the issues raised against it, in raise order.
    Rejected { issues: Vec<ValidationIssue> },
}

/// Totals for a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub lines_processed: usize,
    pub accepted: usize,
    pub loaded_with_warning: usize,
    pub skipped: usize,
    /// At least one record was skipped.
    pub has_skip: bool,
    /// At least one warning was raised.
    pub has_warn: bool,
}

/// Immutable snapshot of a completed run.
///
/// Serializes to JSON and loads back, so a run can be written once and
/// summarized later without re-checking the submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QcRun {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    pub summary: RunSummary,
    pub issues: IssueBuckets,
    pub accepted: Vec<AcceptedAllele>,
}

/// Drives validation and resolution for one submission.
pub struct AlleleQc<'a, S: DerivationStore = ReferenceData> {
    validator: FieldValidator<'a>,
    resolver: CellLineResolver<'a, S>,
    ctx: RunContext,
}

impl<'a> AlleleQc<'a, ReferenceData> {
    /// Engine backed entirely by an in-memory reference snapshot.
    pub fn new(reference: &'a ReferenceData, config: &QcConfig) -> Self {
        Self::with_store(reference, reference, config)
    }
}

impl<'a, S: DerivationStore> AlleleQc<'a, S> {
    /// Engine with a custom derivation store behind the reference snapshot.
    pub fn with_store(reference: &'a ReferenceData, store: &'a S, config: &QcConfig) -> Self {
        Self {
            validator: FieldValidator::new(reference, config.require_strain_of_origin),
            resolver: CellLineResolver::new(reference, store),
            ctx: RunContext::new(),
        }
    }

    /// Run the full pipeline against one data line.
    pub fn process_line(&mut self, line: &RawLine) -> Outcome {
        let mark = self.ctx.mark();

        // A duplicate line is always rejected, but every other check still
        // runs so the line shows up in each bucket it violates.
        let duplicate = self.ctx.register_line(&line.text);
        if duplicate {
            self.ctx
                .raise(IssueCategory::DuplicateLine, line.number, &line.text);
        }

        let record = match InputRecord::from_line(&line.text) {
            Some(record) => record,
            None => {
                self.ctx
                    .raise(IssueCategory::MissingColumns, line.number, &line.text);
                return self.rejected(mark);
            }
        };

        let summary = self.validator.validate(&record, line, &mut self.ctx);
        if summary.fatal {
            return self.rejected(mark);
        }

        let record = record.normalized();

        // Cell-line resolution only applies to TAR/GT/EM records that carry
        // MCLs; an EM record with neither cell line is accepted without an
        // association.
        let mut association = None;
        if terms::requires_cell_line(&record.allele_type) && record.has_mcls() {
            let before = self.ctx.mark();
            association = self.resolver.resolve(&record, line, &mut self.ctx);
            if association.is_none() && self.ctx.mark() != before {
                return self.rejected(mark);
            }
        }

        if duplicate {
            return self.rejected(mark);
        }

        let accepted = AcceptedAllele {
            line_number: line.number,
            record,
            association,
            with_warning: summary.warning,
        };
        self.ctx.accept(accepted.clone());
        Outcome::Accepted(accepted)
    }

    fn rejected(&self, mark: usize) -> Outcome {
        Outcome::Rejected {
            issues: self.ctx.issues_since(mark),
        }
    }

    /// Close out the run: fold in end-of-run warnings and snapshot totals.
    pub fn finish(self) -> QcRun {
        self.finish_inner(None)
    }

    /// Like [`AlleleQc::finish`], recording the source file metadata.
    pub fn finish_with_source(self, source: SourceMetadata) -> QcRun {
        self.finish_inner(Some(source))
    }

    fn finish_inner(mut self, source: Option<SourceMetadata>) -> QcRun {
        self.ctx.finish();
        let (issues, _, accepted, lines_processed) = self.ctx.into_parts();

        let loaded_with_warning = accepted.iter().filter(|a| a.with_warning).count();
        let skipped = lines_processed - accepted.len();
        let summary = RunSummary {
            lines_processed,
            accepted: accepted.len(),
            loaded_with_warning,
            skipped,
            has_skip: skipped > 0,
            has_warn: issues.has_warning(),
        };

        QcRun {
            source,
            summary,
            issues,
            accepted,
        }
    }
}

/// Run the engine over a submission file.
pub fn check_file(
    input: impl AsRef<Path>,
    reference: &ReferenceData,
    config: &QcConfig,
) -> Result<QcRun> {
    let source = RecordSource::open(input)?;
    let metadata = source.metadata().clone();
    let mut engine = AlleleQc::new(reference, config);
    for line in source {
        engine.process_line(&line);
    }
    Ok(engine.finish_with_source(metadata))
}
