//! Status command - summarize a saved run snapshot.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use colored::Colorize;

use alleleqc::{IssueCategory, QcRun};

pub fn run(
    file: PathBuf,
    json_output: bool,
    _verbose: bool,
) -> Result<i32, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!(
            "Run snapshot not found: {}\nRun 'alleleqc check --json <FILE> > {}' first.",
            file.display(),
            file.display()
        )
        .into());
    }

    let run: QcRun = serde_json::from_reader(BufReader::new(File::open(&file)?))?;
    let summary = &run.summary;

    if json_output {
        let status = serde_json::json!({
            "file": run.source.as_ref().map(|s| s.file.clone()),
            "lines_processed": summary.lines_processed,
            "accepted": summary.accepted,
            "loaded_with_warning": summary.loaded_with_warning,
            "skipped": summary.skipped,
            "clean": !summary.has_skip && !summary.has_warn,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        if let Some(source) = &run.source {
            println!(
                "{} {}",
                "QC status for".cyan().bold(),
                source.file.white()
            );
            println!();
        }

        println!("{}", "Records:".yellow().bold());
        println!("  Processed: {}", summary.lines_processed.to_string().white());
        println!("  Loaded:    {}", summary.accepted.to_string().green());
        println!(
            "  Warned:    {}",
            summary.loaded_with_warning.to_string().yellow()
        );
        println!("  Skipped:   {}", summary.skipped.to_string().red());
        println!();

        let flagged: Vec<(&str, usize)> = IssueCategory::ALL
            .iter()
            .map(|c| (c.label(), run.issues.get(*c).len()))
            .filter(|(_, n)| *n > 0)
            .collect();
        if flagged.is_empty() {
            println!("{}", "No issues found".green().bold());
        } else {
            println!("{}", "Issues:".yellow().bold());
            for (label, count) in flagged {
                println!("  {:>4}  {}", count, label);
            }
        }
    }

    Ok(0)
}
