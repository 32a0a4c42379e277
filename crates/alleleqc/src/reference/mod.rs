//! Reference vocabularies, cell-line metadata, and derivation lookups.

mod data;
mod derivation;
mod fallback;

pub use data::{
    CellLineKey, Derivation, DerivationKey, MclDerivation, ParentCellLine, ReferenceData,
};
pub use derivation::DerivationStore;
pub use fallback::StrainKeyTable;
