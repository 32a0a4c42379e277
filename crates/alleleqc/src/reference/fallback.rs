//! Strain-to-parent-cell-line fallback tables.
//!
//! When a curator writes "Not Specified" for both MCL and PCL (or "Other
//! (see notes)" for PCL), the parent cell line used to locate a derivation
//! is chosen by strain of origin. The mapping is data, not code: a handful
//! of strains carry dedicated parent keys, everything else falls through to
//! a generic key. Defaults mirror the production curation database.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::data::CellLineKey;

/// An ordered strain → parent-cell-line-key map with a generic fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrainKeyTable {
    /// Strains with dedicated parent cell lines.
    #[serde(default)]
    pub entries: IndexMap<String, CellLineKey>,
    /// Key used for any strain not listed above.
    pub fallback: CellLineKey,
}

impl StrainKeyTable {
    /// Parent key for a strain, falling back to the generic key.
    pub fn parent_key_for(&self, strain: &str) -> CellLineKey {
        self.entries.get(strain).copied().unwrap_or(self.fallback)
    }

    /// Default table for PCL = "Not Specified".
    pub fn default_not_specified() -> Self {
        let mut entries = IndexMap::new();
        entries.insert("129".to_string(), 1101);
        entries.insert("129S/SvEv".to_string(), 40245);
        Self {
            entries,
            fallback: -1,
        }
    }

    /// Default table for PCL = "Other (see notes)".
    pub fn default_other_see_notes() -> Self {
        let mut entries = IndexMap::new();
        entries.insert("129".to_string(), 1101);
        entries.insert("129P2/OlaHsd".to_string(), 40248);
        entries.insert("12955/SvEvBrd".to_string(), 40255);
        Self {
            entries,
            fallback: 1069,
        }
    }
}
