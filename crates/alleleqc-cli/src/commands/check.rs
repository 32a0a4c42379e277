//! Check command - run the full QC pass and write outputs.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;

use alleleqc::{QcConfig, ReferenceData, check_file, loadfile, report};

use super::exit_code;

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    reference_path: PathBuf,
    report_path: Option<PathBuf>,
    load_file: Option<PathBuf>,
    json_output: bool,
    allow_missing_soo: bool,
    verbose: bool,
) -> Result<i32, Box<dyn std::error::Error>> {
    if verbose {
        eprintln!("Loading reference data from {}", reference_path.display());
    }
    let reference = ReferenceData::load(&reference_path)?;

    let config = QcConfig {
        require_strain_of_origin: !allow_missing_soo,
    };
    let run = check_file(&file, &reference, &config)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&run)?);
    } else {
        let text = report::render(&run);
        match &report_path {
            Some(path) => {
                fs::write(path, &text)?;
                if verbose {
                    eprintln!("Report written to {}", path.display());
                }
            }
            None => print!("{}", text),
        }

        let summary = &run.summary;
        eprintln!(
            "{} {} loaded, {} with warning, {} skipped",
            "QC complete:".cyan().bold(),
            summary.accepted.to_string().green(),
            summary.loaded_with_warning.to_string().yellow(),
            summary.skipped.to_string().red()
        );
    }

    if let Some(path) = &load_file {
        loadfile::write_load_file(&run, path)?;
        if verbose {
            eprintln!(
                "Load file with {} records written to {}",
                run.summary.accepted,
                path.display()
            );
        }
    }

    Ok(exit_code(&run))
}
