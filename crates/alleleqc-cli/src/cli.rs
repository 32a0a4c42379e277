//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AlleleQC: validation and cell-line resolution for allele submissions
#[derive(Parser)]
#[command(name = "alleleqc")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full QC pass over a submission file
    ///
    /// Exit code reports the run outcome: 0 clean, 2 skips and warnings,
    /// 3 skips only, 4 warnings only, 1 on error.
    Check {
        /// Path to the tab-separated submission file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Path to the reference-data JSON snapshot
        #[arg(short, long, value_name = "REFERENCE")]
        reference: PathBuf,

        /// Write the QC report here instead of stdout
        #[arg(long)]
        report: Option<PathBuf>,

        /// Write a load-ready file for the accepted records
        #[arg(long)]
        load_file: Option<PathBuf>,

        /// Emit the full run snapshot as JSON instead of the text report
        #[arg(long)]
        json: bool,

        /// Accept records with an empty strain-of-origin column
        #[arg(long)]
        allow_missing_soo: bool,
    },

    /// Summarize a saved run snapshot (written by `check --json`)
    Status {
        /// Path to the run snapshot JSON
        #[arg(value_name = "RUN_FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
