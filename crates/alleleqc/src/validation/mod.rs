//! Field validation and run-scoped issue tracking.

mod context;
mod field;
mod issue;

pub use context::{AcceptedAllele, RunContext};
pub use field::{FieldSummary, FieldValidator};
pub use issue::{IssueBuckets, IssueCategory, Severity, ValidationIssue};
