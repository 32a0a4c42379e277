//! AlleleQC: validation and cell-line resolution for curator-submitted
//! allele records.
//!
//! AlleleQC takes a tab-separated submission of genetic allele records,
//! checks every field against reference vocabularies, and resolves mutant
//! cell lines against derivation metadata before anything reaches the load.
//!
//! # Core Principles
//!
//! - **Exact-match**: every vocabulary test is case-sensitive, no fuzzing
//! - **Non-destructive**: the submission file is never modified
//! - **Deterministic**: the same input and reference snapshot always
//!   produce the same report
//!
//! # Example
//!
//! ```no_run
//! use alleleqc::{check_file, QcConfig, ReferenceData};
//!
//! let reference = ReferenceData::load("reference.json").unwrap();
//! let run = check_file("submission.txt", &reference, &QcConfig::default()).unwrap();
//!
//! println!("Accepted: {}", run.summary.accepted);
//! println!("Skipped: {}", run.summary.skipped);
//! ```

pub mod error;
pub mod input;
pub mod loadfile;
pub mod reference;
pub mod report;
pub mod resolve;
pub mod terms;
pub mod validation;

mod engine;

pub use engine::{AlleleQc, Outcome, QcConfig, QcRun, RunSummary, check_file};
pub use error::{AlleleQcError, Result};
pub use input::{InputRecord, RawLine, RecordSource, SourceMetadata};
pub use reference::{DerivationStore, ReferenceData};
pub use resolve::ResolvedAssociation;
pub use validation::{AcceptedAllele, IssueCategory, Severity, ValidationIssue};
