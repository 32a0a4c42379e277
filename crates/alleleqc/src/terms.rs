//! Controlled-vocabulary terms with special meaning to the engine.
//!
//! Everything else in the vocabularies is opaque data; these literals drive
//! branching in validation and resolution and so are pinned here.

/// Sentinel cell line / collection / allele-type value.
pub const NOT_SPECIFIED: &str = "Not Specified";

/// Sentinel requiring an accompanying general note.
pub const OTHER_SEE_NOTES: &str = "Other (see notes)";

/// Molecular-mutation term requiring a molecular note.
pub const OTHER: &str = "Other";

/// Inheritance-mode default.
pub const NOT_APPLICABLE: &str = "Not Applicable";

/// Allele-status default.
pub const RESERVED: &str = "Reserved";

/// Allele types that carry mutant/parent cell-line bookkeeping.
pub const TARGETED: &str = "Targeted";
pub const GENE_TRAPPED: &str = "Gene trapped";
pub const ENDONUCLEASE_MEDIATED: &str = "Endonuclease-mediated";

/// Allele type exempt from the marker-in-symbol check.
pub const TRANSGENIC: &str = "Transgenic";

/// Whether an allele type participates in cell-line resolution.
pub fn requires_cell_line(allele_type: &str) -> bool {
    matches!(allele_type, TARGETED | GENE_TRAPPED | ENDONUCLEASE_MEDIATED)
}

/// Whether an allele type requires both MCL and PCL to be present.
pub fn requires_both_cell_lines(allele_type: &str) -> bool {
    matches!(allele_type, TARGETED | GENE_TRAPPED)
}
