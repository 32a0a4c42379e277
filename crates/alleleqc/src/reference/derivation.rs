//! The derivation-lookup seam consulted by the cell-line resolver.

use super::data::{CellLineKey, DerivationKey, MclDerivation, ReferenceData};

/// Pure queries against cell-line derivation metadata.
///
/// The resolver calls these once per MCL element, synchronously; they must be
/// idempotent and side-effect-free. `ReferenceData` implements the trait for
/// the in-memory case; a deployment backed by a live store can substitute its
/// own implementation.
pub trait DerivationStore {
    /// All recorded derivation rows for a named mutant cell line.
    ///
    /// A well-formed store returns exactly one row per valid name; zero or
    /// several rows is an anomaly the resolver rejects.
    fn mcl_derivations(&self, cell_line: &str) -> Vec<MclDerivation>;

    /// Key of the derivation minting a new cell line under `parent_key`
    /// with the given creator tag and derivation type.
    fn find_derivation(
        &self,
        parent_key: CellLineKey,
        creator: &str,
        derivation_type: &str,
    ) -> Option<DerivationKey>;
}

impl DerivationStore for ReferenceData {
    fn mcl_derivations(&self, cell_line: &str) -> Vec<MclDerivation> {
        self.mcl_derivations
            .iter()
            .filter(|row| row.cell_line == cell_line)
            .cloned()
            .collect()
    }

    fn find_derivation(
        &self,
        parent_key: CellLineKey,
        creator: &str,
        derivation_type: &str,
    ) -> Option<DerivationKey> {
        self.derivations
            .iter()
            .find(|d| {
                d.parent_cell_line_key == parent_key
                    && d.creator == creator
                    && d.derivation_type == derivation_type
            })
            .map(|d| d.key)
    }
}
