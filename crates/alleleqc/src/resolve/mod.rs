//! Cell-line resolution for allele types that carry MCL/PCL bookkeeping.
//!
//! A record that survives field validation and names a Targeted, Gene
//! trapped, or Endonuclease-mediated allele must have its mutant cell lines
//! resolved against the derivation metadata before it can be loaded. Each
//! MCL element follows one of two paths:
//!
//! * a named MCL must match exactly one recorded derivation row whose parent
//!   cell line and parent strain agree with the submitted PCL and SOO; the
//!   existing cell-line key is reused;
//! * a "Not Specified" MCL is minted fresh: the submitted PCL and SOO pick a
//!   parent cell-line key (directly, or through the sentinel fallback
//!   tables), and a derivation row for that parent and allele type supplies
//!   the key to create under.
//!
//! A record may not mix the two paths; reuse-plus-create is ambiguous and
//! rejected outright.

use serde::{Deserialize, Serialize};

use crate::input::{InputRecord, RawLine};
use crate::reference::{CellLineKey, DerivationKey, DerivationStore, ReferenceData};
use crate::terms;
use crate::validation::{IssueCategory, RunContext};

/// How an accepted record's mutant cell lines attach to the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ResolvedAssociation {
    /// Every MCL already exists; associate by key.
    Reuse { cell_line_keys: Vec<CellLineKey> },
    /// Mint new "Not Specified" cell lines under this derivation.
    Create { derivation_key: DerivationKey },
}

/// Resolves the MCL elements of one record against derivation metadata.
pub struct CellLineResolver<'a, S: DerivationStore> {
    reference: &'a ReferenceData,
    store: &'a S,
}

impl<'a, S: DerivationStore> CellLineResolver<'a, S> {
    pub fn new(reference: &'a ReferenceData, store: &'a S) -> Self {
        Self { reference, store }
    }

    /// Resolve every MCL element of `record`.
    ///
    /// Issues are raised into `ctx`; `None` means at least one element
    /// failed and the record must be skipped. Records whose allele type
    /// does not participate in resolution, or that carry no MCLs (the
    /// Endonuclease-mediated neither-nor case), resolve to `None` without
    /// raising anything; the caller accepts them with no association.
    pub fn resolve(
        &self,
        record: &InputRecord,
        line: &RawLine,
        ctx: &mut RunContext,
    ) -> Option<ResolvedAssociation> {
        if !terms::requires_cell_line(&record.allele_type) || !record.has_mcls() {
            return None;
        }

        let mark = ctx.mark();
        let mut reuse_keys: Vec<CellLineKey> = Vec::new();
        let mut create_key: Option<DerivationKey> = None;

        for mcl in &record.mutant_cell_lines {
            if mcl == terms::NOT_SPECIFIED {
                if let Some(key) = self.resolve_not_specified(record, line, ctx) {
                    create_key = Some(key);
                }
            } else if let Some(key) = self.resolve_named(mcl, record, line, ctx) {
                reuse_keys.push(key);
            }
        }

        if !reuse_keys.is_empty() && create_key.is_some() {
            ctx.raise(IssueCategory::AmbiguousMclResolution, line.number, &line.text);
            return None;
        }
        if ctx.mark() != mark {
            return None;
        }

        if let Some(derivation_key) = create_key {
            Some(ResolvedAssociation::Create { derivation_key })
        } else {
            Some(ResolvedAssociation::Reuse {
                cell_line_keys: reuse_keys,
            })
        }
    }

    /// Named-MCL path: exactly one derivation row, agreeing on PCL and SOO.
    fn resolve_named(
        &self,
        mcl: &str,
        record: &InputRecord,
        line: &RawLine,
        ctx: &mut RunContext,
    ) -> Option<CellLineKey> {
        let rows = self.store.mcl_derivations(mcl);
        if rows.len() != 1 {
            ctx.raise(IssueCategory::UnresolvedDerivation, line.number, &line.text);
            return None;
        }
        let row = &rows[0];
        if row.parent_cell_line != record.parent_cell_line {
            ctx.raise(IssueCategory::PclMismatch, line.number, &line.text);
            return None;
        }
        if row.parent_strain != record.strain_of_origin {
            ctx.raise(IssueCategory::SooMismatch, line.number, &line.text);
            return None;
        }
        Some(row.cell_line_key)
    }

    /// Not-Specified path: pick a parent key, then find the minting
    /// derivation for it.
    fn resolve_not_specified(
        &self,
        record: &InputRecord,
        line: &RawLine,
        ctx: &mut RunContext,
    ) -> Option<DerivationKey> {
        let parent_key = self.parent_key(record, line, ctx)?;
        match self.store.find_derivation(
            parent_key,
            terms::NOT_SPECIFIED,
            &record.allele_type,
        ) {
            Some(key) => Some(key),
            None => {
                ctx.raise(IssueCategory::UnresolvedDerivation, line.number, &line.text);
                None
            }
        }
    }

    fn parent_key(
        &self,
        record: &InputRecord,
        line: &RawLine,
        ctx: &mut RunContext,
    ) -> Option<CellLineKey> {
        match record.parent_cell_line.as_str() {
            terms::NOT_SPECIFIED => Some(
                self.reference
                    .ns_parent_keys
                    .parent_key_for(&record.strain_of_origin),
            ),
            terms::OTHER_SEE_NOTES => Some(
                self.reference
                    .osn_parent_keys
                    .parent_key_for(&record.strain_of_origin),
            ),
            name => {
                // Field validation vouched for membership, but a missing
                // parent row still must not slip through as accepted.
                let Some(pcl) = self.reference.parent_cell_lines.get(name) else {
                    ctx.raise(IssueCategory::UnresolvedDerivation, line.number, &line.text);
                    return None;
                };
                if pcl.strain != record.strain_of_origin {
                    ctx.raise(IssueCategory::SooMismatch, line.number, &line.text);
                    return None;
                }
                Some(pcl.key)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{Derivation, MclDerivation, ParentCellLine};

    fn reference() -> ReferenceData {
        let mut data = ReferenceData::default();
        data.parent_cell_lines.insert(
            "P1".to_string(),
            ParentCellLine {
                key: 7,
                strain: "129".to_string(),
            },
        );
        data.mutant_cell_lines.insert("CL1".to_string());
        data.mutant_cell_lines.insert("CL2".to_string());
        data.mcl_derivations.push(MclDerivation {
            cell_line: "CL1".to_string(),
            cell_line_key: 11,
            parent_cell_line: "P1".to_string(),
            parent_strain: "129".to_string(),
        });
        data.mcl_derivations.push(MclDerivation {
            cell_line: "CL2".to_string(),
            cell_line_key: 12,
            parent_cell_line: "P1".to_string(),
            parent_strain: "129".to_string(),
        });
        // minting derivations: named parent, NS-table parent, OSN fallback
        data.derivations.push(Derivation {
            key: 900,
            parent_cell_line_key: 7,
            creator: "Not Specified".to_string(),
            derivation_type: "Targeted".to_string(),
        });
        data.derivations.push(Derivation {
            key: 901,
            parent_cell_line_key: 1101,
            creator: "Not Specified".to_string(),
            derivation_type: "Endonuclease-mediated".to_string(),
        });
        data.derivations.push(Derivation {
            key: 902,
            parent_cell_line_key: 1069,
            creator: "Not Specified".to_string(),
            derivation_type: "Targeted".to_string(),
        });
        data
    }

    fn record(mcls: &[&str], pcl: &str, soo: &str, allele_type: &str) -> InputRecord {
        let mut r = InputRecord::default();
        r.allele_type = allele_type.to_string();
        r.parent_cell_line = pcl.to_string();
        r.strain_of_origin = soo.to_string();
        r.mutant_cell_lines = mcls.iter().map(|s| s.to_string()).collect();
        r
    }

    fn line() -> RawLine {
        RawLine {
            number: 2,
            text: "raw".to_string(),
        }
    }

    fn resolve(record: &InputRecord) -> (Option<ResolvedAssociation>, RunContext) {
        let reference = reference();
        let resolver = CellLineResolver::new(&reference, &reference);
        let mut ctx = RunContext::new();
        let result = resolver.resolve(record, &line(), &mut ctx);
        (result, ctx)
    }

    #[test]
    fn test_named_mcls_reuse_existing_keys() {
        let r = record(&["CL1", "CL2"], "P1", "129", "Targeted");
        let (result, ctx) = resolve(&r);
        assert_eq!(
            result,
            Some(ResolvedAssociation::Reuse {
                cell_line_keys: vec![11, 12]
            })
        );
        assert!(ctx.buckets().is_empty());
    }

    #[test]
    fn test_named_mcl_pcl_mismatch() {
        let r = record(&["CL1"], "Not Specified", "129", "Targeted");
        let (result, ctx) = resolve(&r);
        assert!(result.is_none());
        assert!(!ctx.buckets().get(IssueCategory::PclMismatch).is_empty());
    }

    #[test]
    fn test_named_mcl_soo_mismatch() {
        let r = record(&["CL1"], "P1", "C57BL/6J", "Targeted");
        let (result, ctx) = resolve(&r);
        assert!(result.is_none());
        assert!(!ctx.buckets().get(IssueCategory::SooMismatch).is_empty());
    }

    #[test]
    fn test_named_mcl_without_unique_derivation_row() {
        let mut reference = reference();
        reference.mcl_derivations.push(MclDerivation {
            cell_line: "CL1".to_string(),
            cell_line_key: 99,
            parent_cell_line: "P1".to_string(),
            parent_strain: "129".to_string(),
        });
        let resolver = CellLineResolver::new(&reference, &reference);
        let mut ctx = RunContext::new();
        let r = record(&["CL1"], "P1", "129", "Targeted");
        assert!(resolver.resolve(&r, &line(), &mut ctx).is_none());
        assert!(!ctx
            .buckets()
            .get(IssueCategory::UnresolvedDerivation)
            .is_empty());
    }

    #[test]
    fn test_not_specified_mcl_under_named_parent() {
        let r = record(&["Not Specified"], "P1", "129", "Targeted");
        let (result, _) = resolve(&r);
        assert_eq!(
            result,
            Some(ResolvedAssociation::Create { derivation_key: 900 })
        );
    }

    #[test]
    fn test_not_specified_mcl_uses_strain_table() {
        // NS PCL + strain "129" maps to parent key 1101
        let r = record(
            &["Not Specified"],
            "Not Specified",
            "129",
            "Endonuclease-mediated",
        );
        let (result, _) = resolve(&r);
        assert_eq!(
            result,
            Some(ResolvedAssociation::Create { derivation_key: 901 })
        );
    }

    #[test]
    fn test_other_see_notes_falls_back_to_generic_parent() {
        // unlisted strain under OSN falls back to parent key 1069
        let r = record(
            &["Not Specified"],
            "Other (see notes)",
            "C57BL/6J",
            "Targeted",
        );
        let (result, _) = resolve(&r);
        assert_eq!(
            result,
            Some(ResolvedAssociation::Create { derivation_key: 902 })
        );
    }

    #[test]
    fn test_no_minting_derivation_is_fatal() {
        let r = record(&["Not Specified"], "P1", "129", "Gene trapped");
        let (result, ctx) = resolve(&r);
        assert!(result.is_none());
        assert!(!ctx
            .buckets()
            .get(IssueCategory::UnresolvedDerivation)
            .is_empty());
    }

    #[test]
    fn test_named_parent_strain_must_match_soo() {
        let r = record(&["Not Specified"], "P1", "C57BL/6J", "Targeted");
        let (result, ctx) = resolve(&r);
        assert!(result.is_none());
        assert!(!ctx.buckets().get(IssueCategory::SooMismatch).is_empty());
    }

    #[test]
    fn test_mixed_reuse_and_create_is_ambiguous() {
        let r = record(&["CL1", "Not Specified"], "P1", "129", "Targeted");
        let (result, ctx) = resolve(&r);
        assert!(result.is_none());
        assert!(!ctx
            .buckets()
            .get(IssueCategory::AmbiguousMclResolution)
            .is_empty());
    }

    #[test]
    fn test_non_cell_line_type_is_skipped() {
        let r = record(&[], "", "", "Transgenic");
        let (result, ctx) = resolve(&r);
        assert!(result.is_none());
        assert!(ctx.buckets().is_empty());
    }
}
