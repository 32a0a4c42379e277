//! Issue taxonomy for the QC pass.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Severity of an issue category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Record is still loaded, but flagged.
    Warning,
    /// Record is excluded from load output.
    Fatal,
}

/// The closed set of issue kinds a record can be flagged with.
///
/// Each category maps to one section of the QC report; the order of
/// [`IssueCategory::ALL`] is the report section order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    // Warnings: reported, record still loaded.
    DuplicateInDatabase,
    DuplicateSymbolInInput,

    // Fatal: reported and skipped.
    DuplicateLine,
    MissingColumns,
    MissingRequiredColumn,
    TarGtMissingCellLine,
    EmCellLineMismatch,
    UnexpectedMclPcl,
    InvalidGeneId,
    SymbolMarkerMismatch,
    MalformedSymbolBrackets,
    InvalidUser,
    InvalidStatus,
    InvalidType,
    InvalidInheritanceMode,
    OtherModeMissingNote,
    InvalidTransmission,
    InvalidCollection,
    MissingOriginalReference,
    InvalidOriginalReference,
    InvalidTransmissionReference,
    InvalidMolecularReference,
    InvalidIndexReference,
    InvalidParentCellLine,
    OtherPclMissingNote,
    InvalidStrainOfOrigin,
    InvalidMutantCellLine,
    MismatchedGeneId,
    InvalidSubtype,
    InvalidMutation,
    OtherMutationMissingNote,
    PclMismatch,
    SooMismatch,
    UnresolvedDerivation,
    AmbiguousMclResolution,
}

impl IssueCategory {
    /// Every category, in report section order.
    pub const ALL: &'static [IssueCategory] = &[
        IssueCategory::DuplicateInDatabase,
        IssueCategory::DuplicateSymbolInInput,
        IssueCategory::DuplicateLine,
        IssueCategory::MissingColumns,
        IssueCategory::MissingRequiredColumn,
        IssueCategory::TarGtMissingCellLine,
        IssueCategory::EmCellLineMismatch,
        IssueCategory::UnexpectedMclPcl,
        IssueCategory::InvalidGeneId,
        IssueCategory::SymbolMarkerMismatch,
        IssueCategory::MalformedSymbolBrackets,
        IssueCategory::InvalidUser,
        IssueCategory::InvalidStatus,
        IssueCategory::InvalidType,
        IssueCategory::InvalidInheritanceMode,
        IssueCategory::OtherModeMissingNote,
        IssueCategory::InvalidTransmission,
        IssueCategory::InvalidCollection,
        IssueCategory::MissingOriginalReference,
        IssueCategory::InvalidOriginalReference,
        IssueCategory::InvalidTransmissionReference,
        IssueCategory::InvalidMolecularReference,
        IssueCategory::InvalidIndexReference,
        IssueCategory::InvalidParentCellLine,
        IssueCategory::OtherPclMissingNote,
        IssueCategory::InvalidStrainOfOrigin,
        IssueCategory::InvalidMutantCellLine,
        IssueCategory::MismatchedGeneId,
        IssueCategory::InvalidSubtype,
        IssueCategory::InvalidMutation,
        IssueCategory::OtherMutationMissingNote,
        IssueCategory::PclMismatch,
        IssueCategory::SooMismatch,
        IssueCategory::UnresolvedDerivation,
        IssueCategory::AmbiguousMclResolution,
    ];

    /// Severity of this category.
    pub fn severity(&self) -> Severity {
        match self {
            IssueCategory::DuplicateInDatabase | IssueCategory::DuplicateSymbolInInput => {
                Severity::Warning
            }
            _ => Severity::Fatal,
        }
    }

    /// Report section header for this category.
    pub fn label(&self) -> &'static str {
        match self {
            IssueCategory::DuplicateInDatabase => {
                "Allele Symbols already in the DB (case sensitive)"
            }
            IssueCategory::DuplicateSymbolInInput => {
                "Allele Symbols duplicated in the input file (case sensitive)"
            }
            IssueCategory::DuplicateLine => "Lines Duplicated",
            IssueCategory::MissingColumns => "Lines with < 23 Columns",
            IssueCategory::MissingRequiredColumn => "Missing Data in Required Columns",
            IssueCategory::TarGtMissingCellLine => "TAR/GT Allele with missing MCL or PCL",
            IssueCategory::EmCellLineMismatch => "EM Allele with missing MCL or PCL",
            IssueCategory::UnexpectedMclPcl => {
                "Non TAR/GT/EM Allele with specified MCL and/or PCL"
            }
            IssueCategory::InvalidGeneId => "Invalid Gene ID",
            IssueCategory::SymbolMarkerMismatch => {
                "Marker symbol not in Allele symbol and Allele not Transgenic"
            }
            IssueCategory::MalformedSymbolBrackets => {
                "Allele symbol must either have both < and > or neither"
            }
            IssueCategory::InvalidUser => "Invalid User Login",
            IssueCategory::InvalidStatus => "Invalid Allele Status",
            IssueCategory::InvalidType => "Invalid Allele Type",
            IssueCategory::InvalidInheritanceMode => "Invalid Inheritance Mode",
            IssueCategory::OtherModeMissingNote => {
                "Inheritance Mode \"Other (see notes)\" with no General Note"
            }
            IssueCategory::InvalidTransmission => "Invalid Allele Transmission",
            IssueCategory::InvalidCollection => "Invalid Collection",
            IssueCategory::MissingOriginalReference => "Missing Original Reference",
            IssueCategory::InvalidOriginalReference => "Invalid Original Reference",
            IssueCategory::InvalidTransmissionReference => "Invalid Transmission Reference",
            IssueCategory::InvalidMolecularReference => "Invalid Molecular Reference",
            IssueCategory::InvalidIndexReference => "Invalid Index Reference",
            IssueCategory::InvalidParentCellLine => "Invalid Parent Cell Line",
            IssueCategory::OtherPclMissingNote => {
                "PCL Other (see notes) with no General Note"
            }
            IssueCategory::InvalidStrainOfOrigin => "Invalid Strain of Origin",
            IssueCategory::InvalidMutantCellLine => "Invalid Mutant Cell Line",
            IssueCategory::MismatchedGeneId => "MCL marker doesn't match input marker",
            IssueCategory::InvalidSubtype => "Invalid Allele Subtype",
            IssueCategory::InvalidMutation => "Invalid Molecular Mutation",
            IssueCategory::OtherMutationMissingNote => {
                "Molecular Mutation \"Other\" with no Molecular Note"
            }
            IssueCategory::PclMismatch => "Specified MCL where input PCL != DB PCL",
            IssueCategory::SooMismatch => "Specified MCL where input SOO != DB PCL Strain",
            IssueCategory::UnresolvedDerivation => "MCL with no unique Derivation in the DB",
            IssueCategory::AmbiguousMclResolution => {
                "Allele with both existing MCL and MCL to create"
            }
        }
    }
}

/// One issue raised against one input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub category: IssueCategory,
    /// 1-based line number in the input file.
    pub line_number: usize,
    /// The raw line text the issue was raised against.
    pub raw_line: String,
}

/// Append-only per-category issue buckets, in report section order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueBuckets {
    buckets: IndexMap<IssueCategory, Vec<ValidationIssue>>,
}

impl IssueBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an issue to its category bucket.
    pub fn push(&mut self, issue: ValidationIssue) {
        self.buckets.entry(issue.category).or_default().push(issue);
    }

    /// Issues in one category, report order.
    pub fn get(&self, category: IssueCategory) -> &[ValidationIssue] {
        self.buckets.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any fatal-severity issue was raised in the run.
    pub fn has_fatal(&self) -> bool {
        self.buckets
            .keys()
            .any(|c| c.severity() == Severity::Fatal)
    }

    /// Whether any warning-severity issue was raised in the run.
    pub fn has_warning(&self) -> bool {
        self.buckets
            .keys()
            .any(|c| c.severity() == Severity::Warning)
    }

    /// Total issue count across categories.
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
