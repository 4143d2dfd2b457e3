//! `stats`: what the store would index for each category.

use super::{data_path, load_store};
use std::path::PathBuf;
use tourism_cli::output::{Status, Table};
use tourism_core::config::Config;

pub fn run(config: &Config, data: Option<PathBuf>, json: bool) -> tourism_core::Result<()> {
    let path = data_path(config, data);
    let store = load_store(&path)?;
    let stats = store.stats();

    if json {
        let by_collection: serde_json::Map<String, serde_json::Value> = stats
            .iter()
            .map(|(category, counts)| {
                serde_json::to_value(counts).map(|value| (category.collection().to_string(), value))
            })
            .collect::<Result<_, _>>()?;
        println!("{}", serde_json::to_string_pretty(&by_collection)?);
        return Ok(());
    }

    Status::header(&format!("{} ({})", config.schema.general.site_name, path.display()));

    let mut table = Table::new(["Collection", "Total", "Indexed", "Public", "Unlocated"])
        .align_right(1)
        .align_right(2)
        .align_right(3)
        .align_right(4);
    for (category, counts) in &stats {
        table.push([
            category.collection().to_string(),
            counts.total.to_string(),
            counts.indexed.to_string(),
            counts.public.to_string(),
            (counts.total - counts.indexed).to_string(),
        ]);
    }
    println!("{}", table.render());

    let unlocated: usize = stats.values().map(|c| c.total - c.indexed).sum();
    if unlocated > 0 {
        Status::warning(&format!(
            "{unlocated} without usable coordinates; they never appear in nearby results"
        ));
    }
    Ok(())
}
