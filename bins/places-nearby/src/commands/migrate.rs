//! `migrate`: back-fill canonical points in a documents file.

use super::store_error;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::Path;
use tourism_cli::output::{format_count, Status};
use tourism_cli::progress;
use tourism_places::{load_documents, migrate_places_with, save_documents, MigrationReport};

#[derive(Serialize)]
struct JsonMigrateOutput<'a> {
    input: String,
    output: Option<String>,
    dry_run: bool,
    total: usize,
    #[serde(flatten)]
    report: &'a MigrationReport,
}

pub fn run(input: &Path, output: Option<&Path>, dry_run: bool, json: bool) -> tourism_core::Result<()> {
    let mut places = load_documents(input).map_err(store_error)?;

    let pb = progress::place_progress(places.len() as u64, "Migrating");
    let report = migrate_places_with(&mut places, |_, _| pb.inc(1));
    progress::finish_success(&pb, "Migration pass complete");

    let destination = output.unwrap_or(input);
    let written = !dry_run && (report.migrated > 0 || output.is_some());
    if written {
        save_documents(destination, &places).map_err(store_error)?;
    }

    if json {
        let out = serde_json::to_string_pretty(&JsonMigrateOutput {
            input: input.display().to_string(),
            output: written.then(|| destination.display().to_string()),
            dry_run,
            total: report.total(),
            report: &report,
        })?;
        println!("{out}");
        return Ok(());
    }

    Status::header(&format!("Migration of {}", input.display()));
    println!("  {:<18} {}", "migrated".green(), report.migrated);
    println!("  {:<18} {}", "already canonical", report.already_canonical);
    println!("  {:<18} {}", "skipped".yellow(), report.skipped);
    println!("  {:<18} {}", "no coordinates".dimmed(), report.no_coordinates);

    if report.skipped > 0 {
        Status::warning(&format!(
            "{} hold unset or out-of-range coordinates and were left alone",
            format_count(report.skipped, "document", "documents")
        ));
    }

    if dry_run {
        Status::info("Dry run: nothing written");
    } else if written {
        Status::success(&format!("Wrote {}", destination.display()));
    } else {
        Status::success("Already migrated, nothing to write");
    }
    Ok(())
}
