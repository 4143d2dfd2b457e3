//! `nearby`: run one request through the query service.

use super::{data_path, load_store};
use std::path::PathBuf;
use tourism_cli::output::{format_count, format_distance, format_duration, Status, Table};
use tourism_core::config::Config;
use tourism_nearby::{NearbyRequest, NearbyService};
use tourism_telemetry::Timer;

pub async fn run(
    config: &Config,
    data: Option<PathBuf>,
    request: &NearbyRequest,
    json: bool,
) -> tourism_core::Result<()> {
    // Reject a bad request before paying for the load.
    let query = request.validate(&config.schema.nearby)?;

    let store = load_store(&data_path(config, data))?;
    let service = NearbyService::new(store, &config.schema);

    let timer = Timer::start("nearby");
    let results = service.run(&query).await?;
    let elapsed = timer.stop();

    if json {
        let out = serde_json::to_string_pretty(&results)?;
        println!("{out}");
        return Ok(());
    }

    Status::header(&format!(
        "{}: {} near {}",
        config.schema.general.site_name,
        query.target_category.collection(),
        query.source_id
    ));

    if results.is_empty() {
        Status::info(&format!(
            "No {} within {}",
            query.target_category.collection(),
            format_distance(query.radius_km)
        ));
        return Ok(());
    }

    let mut table = Table::new(["#", "Name", "Distance", "Latitude", "Longitude", "Id"])
        .align_right(0)
        .align_right(2);
    for (rank, place) in results.iter().enumerate() {
        table.push([
            (rank + 1).to_string(),
            place.name.clone(),
            format_distance(place.distance),
            format!("{:.6}", place.latitude),
            format!("{:.6}", place.longitude),
            place.id.to_string(),
        ]);
    }
    println!("{}", table.render());

    Status::success(&format!(
        "{} in {}",
        format_count(results.len(), "place", "places"),
        format_duration(elapsed)
    ));
    Ok(())
}
