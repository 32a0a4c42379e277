//! The curator-submitted allele record and its field layout.

use serde::{Deserialize, Serialize};

use crate::terms;

/// Number of tab-separated columns a submission line must carry.
pub const COLUMN_COUNT: usize = 23;

/// Split a pipe-delimited multi-valued field.
///
/// An empty field is the empty sequence; a non-empty field splits on `|`
/// keeping empty elements, so `"a||b"` yields three elements. The distinction
/// between "no values" and "one empty value" matters downstream.
pub fn split_multi(field: &str) -> Vec<String> {
    if field.is_empty() {
        Vec::new()
    } else {
        field.split('|').map(str::to_string).collect()
    }
}

/// Join a multi-valued field back to its pipe-delimited form.
pub fn join_multi(values: &[String]) -> String {
    values.join("|")
}

/// One curator-submitted row, immutable once parsed.
///
/// Fields appear in file column order. Multi-valued columns are stored as
/// ordered sequences; everything else is the trimmed cell text, with empty
/// strings standing for absent optional values until defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub symbol: String,
    pub name: String,
    pub gene_id: String,
    pub user: String,
    pub status: String,
    pub allele_type: String,
    pub inheritance_mode: String,
    pub transmission: String,
    pub collection: String,
    pub molecular_note: String,
    pub nomenclature_note: String,
    pub general_note: String,
    pub colony_note: String,
    pub original_ref: String,
    pub transmission_ref: String,
    pub molecular_ref: String,
    pub index_refs: Vec<String>,
    pub parent_cell_line: String,
    pub strain_of_origin: String,
    pub mutant_cell_lines: Vec<String>,
    pub synonyms: Vec<String>,
    pub subtypes: Vec<String>,
    pub mutations: Vec<String>,
}

impl InputRecord {
    /// Parse a raw submission line.
    ///
    /// Returns `None` when the line has fewer than [`COLUMN_COUNT`] columns;
    /// the caller reports that as a missing-columns issue. Extra columns
    /// beyond the 23rd are ignored. Cells are whitespace-trimmed.
    pub fn from_line(line: &str) -> Option<Self> {
        let cells: Vec<&str> = line.split('\t').map(str::trim).collect();
        if cells.len() < COLUMN_COUNT {
            return None;
        }

        Some(Self {
            symbol: cells[0].to_string(),
            name: cells[1].to_string(),
            gene_id: cells[2].to_string(),
            user: cells[3].to_string(),
            status: cells[4].to_string(),
            allele_type: cells[5].to_string(),
            inheritance_mode: cells[6].to_string(),
            transmission: cells[7].to_string(),
            collection: cells[8].to_string(),
            molecular_note: cells[9].to_string(),
            nomenclature_note: cells[10].to_string(),
            general_note: cells[11].to_string(),
            colony_note: cells[12].to_string(),
            original_ref: cells[13].to_string(),
            transmission_ref: cells[14].to_string(),
            molecular_ref: cells[15].to_string(),
            index_refs: split_multi(cells[16]),
            parent_cell_line: cells[17].to_string(),
            strain_of_origin: cells[18].to_string(),
            mutant_cell_lines: split_multi(cells[19]),
            synonyms: split_multi(cells[20]),
            subtypes: split_multi(cells[21]),
            mutations: split_multi(cells[22]),
        })
    }

    /// Apply the documented defaults for empty optional fields.
    ///
    /// This is the single normalization step: status defaults to "Reserved",
    /// allele type and collection to "Not Specified", inheritance mode to
    /// "Not Applicable". All other fields pass through unchanged.
    pub fn normalized(&self) -> Self {
        let mut rec = self.clone();
        if rec.status.is_empty() {
            rec.status = terms::RESERVED.to_string();
        }
        if rec.allele_type.is_empty() {
            rec.allele_type = terms::NOT_SPECIFIED.to_string();
        }
        if rec.inheritance_mode.is_empty() {
            rec.inheritance_mode = terms::NOT_APPLICABLE.to_string();
        }
        if rec.collection.is_empty() {
            rec.collection = terms::NOT_SPECIFIED.to_string();
        }
        rec
    }

    /// Whether the record declares any mutant cell line.
    pub fn has_mcls(&self) -> bool {
        !self.mutant_cell_lines.is_empty()
    }

    /// Whether the record declares a parent cell line.
    pub fn has_pcl(&self) -> bool {
        !self.parent_cell_line.is_empty()
    }
}
