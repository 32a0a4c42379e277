//! Run-scoped accumulator state.
//!
//! One `RunContext` lives for the duration of a QC pass. It replaces what
//! would otherwise be module-global mutable lists: the issue buckets, the
//! duplicate-line and duplicate-symbol trackers, and the ledger of accepted
//! records. All state is append-only while the run is in progress.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::input::InputRecord;
use crate::resolve::ResolvedAssociation;

use super::issue::{IssueBuckets, IssueCategory, ValidationIssue};

/// An accepted record with its resolved cell-line association.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptedAllele {
    /// 1-based input line number.
    pub line_number: usize,
    /// The record with defaults applied.
    pub record: InputRecord,
    /// Present only for allele types that entered cell-line resolution.
    pub association: Option<ResolvedAssociation>,
    /// True when a warning-severity issue was raised against the line.
    pub with_warning: bool,
}

/// Mutable state shared across all records of one run.
#[derive(Debug, Default)]
pub struct RunContext {
    seen_lines: HashSet<String>,
    symbol_lines: IndexMap<String, Vec<usize>>,
    buckets: IssueBuckets,
    log: Vec<ValidationIssue>,
    accepted: Vec<AcceptedAllele>,
    lines_processed: usize,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a raw line; returns true when the identical text was seen
    /// earlier in this run.
    pub fn register_line(&mut self, text: &str) -> bool {
        self.lines_processed += 1;
        !self.seen_lines.insert(text.to_string())
    }

    /// Track where an allele symbol appears, for the end-of-run
    /// duplicate-symbol warning.
    pub fn record_symbol(&mut self, symbol: &str, line_number: usize) {
        self.symbol_lines
            .entry(symbol.to_string())
            .or_default()
            .push(line_number);
    }

    /// Raise an issue against a line.
    pub fn raise(&mut self, category: IssueCategory, line_number: usize, raw_line: &str) {
        let issue = ValidationIssue {
            category,
            line_number,
            raw_line: raw_line.to_string(),
        };
        self.buckets.push(issue.clone());
        self.log.push(issue);
    }

    /// Position marker into the flat issue log.
    pub fn mark(&self) -> usize {
        self.log.len()
    }

    /// Issues raised since a marker, in raise order.
    pub fn issues_since(&self, mark: usize) -> Vec<ValidationIssue> {
        self.log[mark..].to_vec()
    }

    /// Add a record to the accepted ledger.
    pub fn accept(&mut self, allele: AcceptedAllele) {
        self.accepted.push(allele);
    }

    /// Fold the symbol multimap into the duplicate-symbol warning bucket.
    ///
    /// Called once after the full pass; symbols seen on more than one line
    /// get one warning carrying the symbol and its line numbers.
    pub fn finish(&mut self) {
        let duplicated: Vec<(String, Vec<usize>)> = self
            .symbol_lines
            .iter()
            .filter(|(_, lines)| lines.len() > 1)
            .map(|(sym, lines)| (sym.clone(), lines.clone()))
            .collect();

        for (symbol, lines) in duplicated {
            let joined = lines
                .iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            self.raise(
                IssueCategory::DuplicateSymbolInInput,
                lines[0],
                &format!("{symbol}    {joined}"),
            );
        }
    }

    pub fn buckets(&self) -> &IssueBuckets {
        &self.buckets
    }

    pub fn log(&self) -> &[ValidationIssue] {
        &self.log
    }

    pub fn accepted(&self) -> &[AcceptedAllele] {
        &self.accepted
    }

    pub fn lines_processed(&self) -> usize {
        self.lines_processed
    }

    /// Tear down into the pieces the run snapshot keeps.
    pub fn into_parts(self) -> (IssueBuckets, Vec<ValidationIssue>, Vec<AcceptedAllele>, usize) {
        (self.buckets, self.log, self.accepted, self.lines_processed)
    }
}
