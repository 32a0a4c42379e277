//! Load-ready output for accepted records.
//!
//! One tab-separated row per accepted record, in the column order the load
//! consumer reads: 22 descriptive columns (defaults applied, multi-valued
//! fields re-joined, ending with parent cell line and strain of origin),
//! then the resolved association as two key columns (reused cell-line
//! keys, then the derivation key to mint under; whichever does not apply
//! is left blank). The raw mutant-cell-line names are not carried; the key
//! columns replace them.

use std::fs::File;
use std::io;
use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};

use crate::engine::QcRun;
use crate::error::{AlleleQcError, Result};
use crate::input::join_multi;
use crate::resolve::ResolvedAssociation;
use crate::validation::AcceptedAllele;

/// Write the load file for a completed run.
pub fn write_load_file(run: &QcRun, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| AlleleQcError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_load(run, file)
}

/// Write load rows to any writer.
pub fn write_load<W: io::Write>(run: &QcRun, writer: W) -> Result<()> {
    let mut out = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .has_headers(false)
        .from_writer(writer);

    for allele in &run.accepted {
        out.write_record(row(allele))?;
    }
    out.flush().map_err(|e| AlleleQcError::Io {
        path: "<load output>".into(),
        source: e,
    })?;
    Ok(())
}

fn row(allele: &AcceptedAllele) -> Vec<String> {
    let r = &allele.record;
    let (reuse_keys, derivation_key) = match &allele.association {
        Some(ResolvedAssociation::Reuse { cell_line_keys }) => (
            cell_line_keys
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join("|"),
            String::new(),
        ),
        Some(ResolvedAssociation::Create { derivation_key }) => {
            (String::new(), derivation_key.to_string())
        }
        None => (String::new(), String::new()),
    };

    vec![
        r.symbol.clone(),
        r.name.clone(),
        r.gene_id.clone(),
        r.user.clone(),
        r.status.clone(),
        r.allele_type.clone(),
        r.inheritance_mode.clone(),
        r.transmission.clone(),
        r.collection.clone(),
        r.molecular_note.clone(),
        r.nomenclature_note.clone(),
        r.general_note.clone(),
        r.colony_note.clone(),
        r.original_ref.clone(),
        r.transmission_ref.clone(),
        r.molecular_ref.clone(),
        join_multi(&r.index_refs),
        join_multi(&r.synonyms),
        join_multi(&r.subtypes),
        join_multi(&r.mutations),
        r.parent_cell_line.clone(),
        r.strain_of_origin.clone(),
        reuse_keys,
        derivation_key,
    ]
}
