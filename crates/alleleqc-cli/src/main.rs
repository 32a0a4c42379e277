//! AlleleQC CLI - allele submission validation and cell-line resolution.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            file,
            reference,
            report,
            load_file,
            json,
            allow_missing_soo,
        } => commands::check::run(
            file,
            reference,
            report,
            load_file,
            json,
            allow_missing_soo,
            cli.verbose,
        ),

        Commands::Status { file, json } => commands::status::run(file, json, cli.verbose),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
