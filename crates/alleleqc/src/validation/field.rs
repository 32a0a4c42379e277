//! Per-record field validation.
//!
//! Every check is a case-sensitive exact-match test against the reference
//! snapshot, applied in a fixed order so report sections fill predictably.
//! Fields left empty that have documented defaults are not vocabulary
//! errors; defaults are applied after validation, not before.

use crate::input::{InputRecord, RawLine};
use crate::reference::ReferenceData;
use crate::terms;

use super::context::RunContext;
use super::issue::IssueCategory;

/// What the field pass concluded about one record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldSummary {
    /// At least one fatal issue was raised; the record must be skipped.
    pub fatal: bool,
    /// At least one warning was raised; the record is loaded but flagged.
    pub warning: bool,
}

/// Validates each column of a record against the reference vocabularies.
pub struct FieldValidator<'a> {
    reference: &'a ReferenceData,
    require_strain_of_origin: bool,
}

// Bundles the context, the line under scrutiny, and the running verdict so
// each check is a one-liner.
struct LineIssues<'a, 'b> {
    ctx: &'a mut RunContext,
    line: &'b RawLine,
    fatal: bool,
    warning: bool,
}

impl LineIssues<'_, '_> {
    fn fatal(&mut self, category: IssueCategory) {
        self.ctx.raise(category, self.line.number, &self.line.text);
        self.fatal = true;
    }

    fn warning(&mut self, category: IssueCategory) {
        self.ctx.raise(category, self.line.number, &self.line.text);
        self.warning = true;
    }
}

impl<'a> FieldValidator<'a> {
    pub fn new(reference: &'a ReferenceData, require_strain_of_origin: bool) -> Self {
        Self {
            reference,
            require_strain_of_origin,
        }
    }

    /// Run every field check against one record, raising issues into `ctx`.
    pub fn validate(
        &self,
        record: &InputRecord,
        line: &RawLine,
        ctx: &mut RunContext,
    ) -> FieldSummary {
        let r = record;
        let reference = self.reference;

        if !r.symbol.is_empty() {
            ctx.record_symbol(&r.symbol, line.number);
        }

        let mut iss = LineIssues {
            ctx,
            line,
            fatal: false,
            warning: false,
        };

        let soo_missing = self.require_strain_of_origin && r.strain_of_origin.is_empty();
        if r.symbol.is_empty()
            || r.name.is_empty()
            || r.gene_id.is_empty()
            || r.user.is_empty()
            || r.transmission.is_empty()
            || soo_missing
        {
            iss.fatal(IssueCategory::MissingRequiredColumn);
        }

        // Allele type drives the cell-line gating below; remember when it
        // failed vocabulary so the gating checks don't pile on.
        let mut bad_allele_type = false;
        if !r.allele_type.is_empty() && !reference.allele_types.contains(&r.allele_type) {
            iss.fatal(IssueCategory::InvalidType);
            bad_allele_type = true;
        }

        if terms::requires_both_cell_lines(&r.allele_type) && (!r.has_mcls() || !r.has_pcl()) {
            iss.fatal(IssueCategory::TarGtMissingCellLine);
        }
        if r.allele_type == terms::ENDONUCLEASE_MEDIATED && r.has_mcls() != r.has_pcl() {
            iss.fatal(IssueCategory::EmCellLineMismatch);
        }
        if !bad_allele_type
            && !terms::requires_cell_line(&r.allele_type)
            && (r.has_mcls() || r.has_pcl())
        {
            iss.fatal(IssueCategory::UnexpectedMclPcl);
        }

        if r.symbol.contains('<') != r.symbol.contains('>') {
            iss.fatal(IssueCategory::MalformedSymbolBrackets);
        }

        if reference.allele_symbols.contains(&r.symbol) {
            iss.warning(IssueCategory::DuplicateInDatabase);
        }

        match reference.gene_markers.get(&r.gene_id) {
            None => {
                iss.fatal(IssueCategory::InvalidGeneId);
            }
            Some(marker) => {
                // Transgenic symbols are named independently of the marker.
                if r.allele_type != terms::TRANSGENIC && !r.symbol.contains(marker.as_str()) {
                    iss.fatal(IssueCategory::SymbolMarkerMismatch);
                }
            }
        }

        if !reference.users.contains(&r.user) {
            iss.fatal(IssueCategory::InvalidUser);
        }

        if !r.status.is_empty() && !reference.statuses.contains(&r.status) {
            iss.fatal(IssueCategory::InvalidStatus);
        }

        if !r.inheritance_mode.is_empty() {
            if !reference.inheritance_modes.contains(&r.inheritance_mode) {
                iss.fatal(IssueCategory::InvalidInheritanceMode);
            } else if r.inheritance_mode == terms::OTHER_SEE_NOTES && r.general_note.is_empty() {
                iss.fatal(IssueCategory::OtherModeMissingNote);
            }
        }

        if !r.transmission.is_empty() && !reference.transmissions.contains(&r.transmission) {
            iss.fatal(IssueCategory::InvalidTransmission);
        }

        if !r.collection.is_empty() && !reference.collections.contains(&r.collection) {
            iss.fatal(IssueCategory::InvalidCollection);
        }

        if r.original_ref.is_empty() {
            iss.fatal(IssueCategory::MissingOriginalReference);
        } else if !reference.references.contains(&r.original_ref) {
            iss.fatal(IssueCategory::InvalidOriginalReference);
        }

        if !r.transmission_ref.is_empty() && !reference.references.contains(&r.transmission_ref) {
            iss.fatal(IssueCategory::InvalidTransmissionReference);
        }
        if !r.molecular_ref.is_empty() && !reference.references.contains(&r.molecular_ref) {
            iss.fatal(IssueCategory::InvalidMolecularReference);
        }
        for ref_id in &r.index_refs {
            if !reference.references.contains(ref_id) {
                iss.fatal(IssueCategory::InvalidIndexReference);
            }
        }

        // The sentinel PCL names are present in the snapshot as rows of
        // their own, so plain membership covers them too.
        if !r.parent_cell_line.is_empty()
            && !reference.parent_cell_lines.contains_key(&r.parent_cell_line)
        {
            iss.fatal(IssueCategory::InvalidParentCellLine);
        }
        if r.parent_cell_line == terms::OTHER_SEE_NOTES && r.general_note.is_empty() {
            iss.fatal(IssueCategory::OtherPclMissingNote);
        }

        if !r.strain_of_origin.is_empty() && !reference.strains.contains(&r.strain_of_origin) {
            iss.fatal(IssueCategory::InvalidStrainOfOrigin);
        }

        for mcl in &r.mutant_cell_lines {
            if !reference.mutant_cell_lines.contains(mcl) {
                iss.fatal(IssueCategory::InvalidMutantCellLine);
            } else if mcl != terms::NOT_SPECIFIED {
                // A valid MCL name with no marker row is left for the
                // resolver to reject; here we only compare when one exists.
                if let Some(db_gene) = reference.mcl_markers.get(mcl) {
                    if *db_gene != r.gene_id {
                        iss.fatal(IssueCategory::MismatchedGeneId);
                    }
                }
            }
        }

        for subtype in &r.subtypes {
            if !reference.subtypes.contains(subtype) {
                iss.fatal(IssueCategory::InvalidSubtype);
            }
        }

        for mutation in &r.mutations {
            if !reference.mutations.contains(mutation) {
                iss.fatal(IssueCategory::InvalidMutation);
            } else if mutation == terms::OTHER && r.molecular_note.is_empty() {
                iss.fatal(IssueCategory::OtherMutationMissingNote);
            }
        }

        FieldSummary {
            fatal: iss.fatal,
            warning: iss.warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ParentCellLine;

    fn reference() -> ReferenceData {
        let mut data = ReferenceData::default();
        data.gene_markers
            .insert("MGI:97490".to_string(), "Pax6".to_string());
        data.users.insert("jdoe".to_string());
        data.statuses.insert("Approved".to_string());
        for t in ["Targeted", "Gene trapped", "Endonuclease-mediated", "Transgenic"] {
            data.allele_types.insert(t.to_string());
        }
        data.inheritance_modes.insert("Dominant".to_string());
        data.inheritance_modes
            .insert("Other (see notes)".to_string());
        data.transmissions.insert("Germline".to_string());
        data.collections.insert("EUCOMM".to_string());
        data.references.insert("J:12345".to_string());
        data.references.insert("J:67890".to_string());
        data.parent_cell_lines.insert(
            "P1".to_string(),
            ParentCellLine {
                key: 7,
                strain: "129".to_string(),
            },
        );
        data.strains.insert("129".to_string());
        data.mutant_cell_lines.insert("CL1".to_string());
        data.mcl_markers
            .insert("CL1".to_string(), "MGI:97490".to_string());
        data.subtypes.insert("Null/knockout".to_string());
        data.mutations.insert("Insertion".to_string());
        data.mutations.insert("Other".to_string());
        data
    }

    fn record() -> InputRecord {
        let mut r = InputRecord::default();
        r.symbol = "Pax6<tm1Jdo>".to_string();
        r.name = "targeted mutation 1".to_string();
        r.gene_id = "MGI:97490".to_string();
        r.user = "jdoe".to_string();
        r.allele_type = "Targeted".to_string();
        r.transmission = "Germline".to_string();
        r.original_ref = "J:12345".to_string();
        r.parent_cell_line = "P1".to_string();
        r.strain_of_origin = "129".to_string();
        r.mutant_cell_lines = vec!["CL1".to_string()];
        r
    }

    fn line() -> RawLine {
        RawLine {
            number: 2,
            text: "raw".to_string(),
        }
    }

    fn run(record: &InputRecord) -> (FieldSummary, RunContext) {
        let reference = reference();
        let validator = FieldValidator::new(&reference, true);
        let mut ctx = RunContext::new();
        let summary = validator.validate(record, &line(), &mut ctx);
        (summary, ctx)
    }

    #[test]
    fn test_clean_record_passes() {
        let (summary, ctx) = run(&record());
        assert!(!summary.fatal);
        assert!(!summary.warning);
        assert!(ctx.buckets().is_empty());
    }

    #[test]
    fn test_empty_defaulted_fields_are_not_vocabulary_errors() {
        let mut r = record();
        r.status.clear();
        r.inheritance_mode.clear();
        r.collection.clear();
        let (summary, _) = run(&r);
        assert!(!summary.fatal);
    }

    #[test]
    fn test_missing_required_column() {
        let mut r = record();
        r.user.clear();
        let (summary, ctx) = run(&r);
        assert!(summary.fatal);
        assert!(!ctx
            .buckets()
            .get(IssueCategory::MissingRequiredColumn)
            .is_empty());
    }

    #[test]
    fn test_soo_requirement_is_configurable() {
        let mut r = record();
        r.strain_of_origin.clear();
        let reference = reference();
        let mut ctx = RunContext::new();
        let summary = FieldValidator::new(&reference, false).validate(&r, &line(), &mut ctx);
        assert!(!summary.fatal);
    }

    #[test]
    fn test_targeted_without_cell_lines() {
        let mut r = record();
        r.mutant_cell_lines.clear();
        r.parent_cell_line.clear();
        r.strain_of_origin = "129".to_string();
        let (summary, ctx) = run(&r);
        assert!(summary.fatal);
        assert!(!ctx
            .buckets()
            .get(IssueCategory::TarGtMissingCellLine)
            .is_empty());
    }

    #[test]
    fn test_em_requires_both_or_neither() {
        let mut r = record();
        r.allele_type = "Endonuclease-mediated".to_string();
        r.mutant_cell_lines.clear();
        let (summary, ctx) = run(&r);
        assert!(summary.fatal);
        assert!(!ctx
            .buckets()
            .get(IssueCategory::EmCellLineMismatch)
            .is_empty());

        let mut r = record();
        r.allele_type = "Endonuclease-mediated".to_string();
        r.mutant_cell_lines.clear();
        r.parent_cell_line.clear();
        let (summary, _) = run(&r);
        assert!(!summary.fatal);
    }

    #[test]
    fn test_unexpected_cell_lines_for_transgenic() {
        let mut r = record();
        r.allele_type = "Transgenic".to_string();
        r.symbol = "Tg(Pax6)1Jdo".to_string();
        let (summary, ctx) = run(&r);
        assert!(summary.fatal);
        assert!(!ctx.buckets().get(IssueCategory::UnexpectedMclPcl).is_empty());
    }

    #[test]
    fn test_invalid_type_suppresses_gating_check() {
        let mut r = record();
        r.allele_type = "Bogus".to_string();
        let (summary, ctx) = run(&r);
        assert!(summary.fatal);
        assert!(!ctx.buckets().get(IssueCategory::InvalidType).is_empty());
        assert!(ctx.buckets().get(IssueCategory::UnexpectedMclPcl).is_empty());
    }

    #[test]
    fn test_symbol_bracket_balance() {
        let mut r = record();
        r.symbol = "Pax6<tm1".to_string();
        let (_, ctx) = run(&r);
        assert!(!ctx
            .buckets()
            .get(IssueCategory::MalformedSymbolBrackets)
            .is_empty());
    }

    #[test]
    fn test_marker_must_appear_in_symbol_unless_transgenic() {
        let mut r = record();
        r.symbol = "Foo<tm1>".to_string();
        let (_, ctx) = run(&r);
        assert!(!ctx
            .buckets()
            .get(IssueCategory::SymbolMarkerMismatch)
            .is_empty());
    }

    #[test]
    fn test_marker_check_skipped_when_gene_id_invalid() {
        let mut r = record();
        r.gene_id = "MGI:0".to_string();
        r.symbol = "Foo<tm1>".to_string();
        r.mutant_cell_lines.clear();
        let (_, ctx) = run(&r);
        assert!(!ctx.buckets().get(IssueCategory::InvalidGeneId).is_empty());
        assert!(ctx
            .buckets()
            .get(IssueCategory::SymbolMarkerMismatch)
            .is_empty());
    }

    #[test]
    fn test_duplicate_in_database_is_warning_only() {
        let mut reference = reference();
        reference.allele_symbols.insert("Pax6<tm1Jdo>".to_string());
        let mut ctx = RunContext::new();
        let summary =
            FieldValidator::new(&reference, true).validate(&record(), &line(), &mut ctx);
        assert!(!summary.fatal);
        assert!(summary.warning);
    }

    #[test]
    fn test_other_see_notes_mode_requires_general_note() {
        let mut r = record();
        r.inheritance_mode = "Other (see notes)".to_string();
        let (summary, ctx) = run(&r);
        assert!(summary.fatal);
        assert!(!ctx
            .buckets()
            .get(IssueCategory::OtherModeMissingNote)
            .is_empty());

        r.general_note = "derived in-house".to_string();
        let (summary, _) = run(&r);
        assert!(!summary.fatal);
    }

    #[test]
    fn test_reference_columns() {
        let mut r = record();
        r.original_ref.clear();
        let (_, ctx) = run(&r);
        assert!(!ctx
            .buckets()
            .get(IssueCategory::MissingOriginalReference)
            .is_empty());

        let mut r = record();
        r.original_ref = "J:99999".to_string();
        r.transmission_ref = "J:99999".to_string();
        r.molecular_ref = "J:99999".to_string();
        r.index_refs = vec!["J:12345".to_string(), "J:99999".to_string()];
        let (_, ctx) = run(&r);
        assert!(!ctx
            .buckets()
            .get(IssueCategory::InvalidOriginalReference)
            .is_empty());
        assert!(!ctx
            .buckets()
            .get(IssueCategory::InvalidTransmissionReference)
            .is_empty());
        assert!(!ctx
            .buckets()
            .get(IssueCategory::InvalidMolecularReference)
            .is_empty());
        assert_eq!(ctx.buckets().get(IssueCategory::InvalidIndexReference).len(), 1);
    }

    #[test]
    fn test_mcl_marker_mismatch() {
        let mut reference = reference();
        reference
            .mcl_markers
            .insert("CL1".to_string(), "MGI:88052".to_string());
        let mut ctx = RunContext::new();
        let summary =
            FieldValidator::new(&reference, true).validate(&record(), &line(), &mut ctx);
        assert!(summary.fatal);
        assert!(!ctx.buckets().get(IssueCategory::MismatchedGeneId).is_empty());
    }

    #[test]
    fn test_other_mutation_requires_molecular_note() {
        let mut r = record();
        r.mutations = vec!["Other".to_string()];
        let (summary, ctx) = run(&r);
        assert!(summary.fatal);
        assert!(!ctx
            .buckets()
            .get(IssueCategory::OtherMutationMissingNote)
            .is_empty());

        r.molecular_note = "large deletion".to_string();
        let (summary, _) = run(&r);
        assert!(!summary.fatal);
    }
}
