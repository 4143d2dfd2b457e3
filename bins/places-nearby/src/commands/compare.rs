//! `compare`: the same leg under every distance estimate.

use serde::Serialize;
use tourism_cli::output::{format_distance, Status, Table};
use tourism_geo::{approximate_distance, haversine_distance, vincenty_distance, Coordinate};

#[derive(Debug, Serialize)]
struct Estimate {
    method: &'static str,
    /// `None` when the method has no answer for this leg
    distance_km: Option<f64>,
    /// Relative difference to Haversine, in percent
    relative_error_pct: Option<f64>,
}

#[derive(Serialize)]
struct JsonCompareOutput {
    from: Coordinate,
    to: Coordinate,
    estimates: Vec<Estimate>,
}

fn estimates(from: &Coordinate, to: &Coordinate) -> Vec<Estimate> {
    let reference = haversine_distance(from, to);
    let relative = |km: f64| (reference > 0.0).then(|| (km - reference) / reference * 100.0);

    let vincenty = vincenty_distance(from, to);
    let approximate = approximate_distance(from, to);

    vec![
        Estimate {
            method: "haversine",
            distance_km: Some(reference),
            relative_error_pct: relative(reference),
        },
        Estimate {
            method: "vincenty",
            distance_km: vincenty,
            relative_error_pct: vincenty.and_then(relative),
        },
        Estimate {
            method: "equirectangular",
            distance_km: Some(approximate),
            relative_error_pct: relative(approximate),
        },
    ]
}

pub fn run(from: &str, to: &str, json: bool) -> tourism_core::Result<()> {
    let from = Coordinate::parse_pair(from)?;
    let to = Coordinate::parse_pair(to)?;
    let estimates = estimates(&from, &to);

    if json {
        let out = serde_json::to_string_pretty(&JsonCompareOutput { from, to, estimates })?;
        println!("{out}");
        return Ok(());
    }

    Status::header(&format!("{from} → {to}"));

    let mut table = Table::new(["Method", "Distance", "Kilometers", "vs Haversine"])
        .align_right(1)
        .align_right(2)
        .align_right(3);
    for estimate in &estimates {
        let (shown, km) = match estimate.distance_km {
            Some(km) => (format_distance(km), format!("{km:.4}")),
            None => ("did not converge".to_string(), "-".to_string()),
        };
        let error = estimate
            .relative_error_pct
            .map_or_else(|| "-".to_string(), |pct| format!("{pct:+.3}%"));
        table.push([estimate.method.to_string(), shown, km, error]);
    }
    println!("{}", table.render());
    Ok(())
}
