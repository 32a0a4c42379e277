//! Reference vocabularies and cell-line metadata.
//!
//! Loaded once per run from a JSON snapshot and treated as immutable
//! thereafter. All membership tests are case-sensitive exact-match.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AlleleQcError, Result};

use super::fallback::StrainKeyTable;

/// Numeric key of a cell line row in the backing store.
pub type CellLineKey = i64;

/// Numeric key of a derivation row in the backing store.
pub type DerivationKey = i64;

/// A parent (non-mutant) cell line with its strain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentCellLine {
    pub key: CellLineKey,
    pub strain: String,
}

/// Recorded derivation metadata for a named mutant cell line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MclDerivation {
    /// Mutant cell line name.
    pub cell_line: String,
    /// Key of the mutant cell line itself.
    pub cell_line_key: CellLineKey,
    /// Name of the parent cell line it was derived from.
    pub parent_cell_line: String,
    /// Strain of that parent cell line.
    pub parent_strain: String,
}

/// A derivation row: the protocol under which new "Not Specified" mutant
/// cell lines are minted for a given parent, creator tag, and allele type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derivation {
    pub key: DerivationKey,
    pub parent_cell_line_key: CellLineKey,
    pub creator: String,
    pub derivation_type: String,
}

/// All vocabulary sets and cell-line metadata consulted during a run.
///
/// The mutant-cell-line name set and the derivation metadata rows are kept
/// separate on purpose: a name can be valid vocabulary while its derivation
/// lookup returns zero or several rows, which the resolver treats as an
/// anomaly rather than a membership failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceData {
    pub allele_symbols: HashSet<String>,
    /// Gene identifier → marker symbol.
    pub gene_markers: HashMap<String, String>,
    pub users: HashSet<String>,
    pub statuses: HashSet<String>,
    pub allele_types: HashSet<String>,
    pub inheritance_modes: HashSet<String>,
    pub transmissions: HashSet<String>,
    pub collections: HashSet<String>,
    /// Bibliographic reference identifiers (J-numbers).
    pub references: HashSet<String>,
    /// Parent cell line name → key and strain.
    pub parent_cell_lines: HashMap<String, ParentCellLine>,
    pub strains: HashSet<String>,
    /// Valid mutant cell line names.
    pub mutant_cell_lines: HashSet<String>,
    /// Mutant cell line name → the gene it is linked to.
    pub mcl_markers: HashMap<String, String>,
    pub subtypes: HashSet<String>,
    pub mutations: HashSet<String>,
    /// Derivation metadata rows for named mutant cell lines.
    #[serde(default)]
    pub mcl_derivations: Vec<MclDerivation>,
    /// Derivation rows used to mint new "Not Specified" mutant cell lines.
    #[serde(default)]
    pub derivations: Vec<Derivation>,
    /// Strain fallback table for PCL = "Not Specified".
    #[serde(default = "StrainKeyTable::default_not_specified")]
    pub ns_parent_keys: StrainKeyTable,
    /// Strain fallback table for PCL = "Other (see notes)".
    #[serde(default = "StrainKeyTable::default_other_see_notes")]
    pub osn_parent_keys: StrainKeyTable,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            allele_symbols: HashSet::new(),
            gene_markers: HashMap::new(),
            users: HashSet::new(),
            statuses: HashSet::new(),
            allele_types: HashSet::new(),
            inheritance_modes: HashSet::new(),
            transmissions: HashSet::new(),
            collections: HashSet::new(),
            references: HashSet::new(),
            parent_cell_lines: HashMap::new(),
            strains: HashSet::new(),
            mutant_cell_lines: HashSet::new(),
            mcl_markers: HashMap::new(),
            subtypes: HashSet::new(),
            mutations: HashSet::new(),
            mcl_derivations: Vec::new(),
            derivations: Vec::new(),
            ns_parent_keys: StrainKeyTable::default_not_specified(),
            osn_parent_keys: StrainKeyTable::default_other_see_notes(),
        }
    }
}

impl ReferenceData {
    /// Load a reference snapshot from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| AlleleQcError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let data: ReferenceData = serde_json::from_reader(BufReader::new(file))?;
        data.verify()?;
        Ok(data)
    }

    /// Cheap consistency checks on a loaded snapshot.
    fn verify(&self) -> Result<()> {
        for row in &self.mcl_derivations {
            if !self.mutant_cell_lines.contains(&row.cell_line) {
                return Err(AlleleQcError::Reference(format!(
                    "derivation metadata for unknown mutant cell line '{}'",
                    row.cell_line
                )));
            }
        }
        Ok(())
    }
}
