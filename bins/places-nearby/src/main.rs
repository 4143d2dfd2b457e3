//! places-nearby: query nearby places and maintain place coordinates.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tourism_cli::output::Status;
use tourism_core::config::Config;
use tourism_telemetry::TelemetryConfig;

mod commands;

/// Nearby places across accommodations, attractions, cuisine and entertainment
#[derive(Parser)]
#[command(name = "places-nearby")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find places of one category near a given place
    Nearby {
        /// Place documents (defaults to store.data_path)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Category of the source place
        #[arg(long)]
        source_category: String,

        /// Identifier of the source place
        #[arg(long)]
        source_id: String,

        /// Category to search in
        #[arg(long)]
        target_category: String,

        /// Search radius in kilometers
        #[arg(short, long, allow_negative_numbers = true)]
        radius: Option<f64>,

        /// Maximum number of results
        #[arg(short, long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },

    /// Back-fill canonical points from legacy latitude/longitude fields
    Migrate {
        /// Place documents to migrate
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the result (defaults to rewriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report what would change without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Compare distance formulas between two coordinates
    Compare {
        /// Start as "lat,lng"
        #[arg(long, allow_hyphen_values = true)]
        from: String,

        /// End as "lat,lng"
        #[arg(long, allow_hyphen_values = true)]
        to: String,
    },

    /// Per-category document and index counts
    Stats {
        /// Place documents (defaults to store.data_path)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            Status::report(&e);
            return exit_code(e.exit_code());
        }
    };

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.schema.logging.level.clone()
    };
    let telemetry = TelemetryConfig::with_level(level).json(config.schema.logging.json);
    if let Err(e) = tourism_telemetry::init_with_config(telemetry) {
        Status::warning(&format!("Logging disabled: {e}"));
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            Status::error(&format!("Failed to start async runtime: {e}"));
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Nearby {
            data,
            source_category,
            source_id,
            target_category,
            radius,
            limit,
        } => {
            let request = tourism_nearby::NearbyRequest {
                source_category,
                source_id,
                target_category,
                radius,
                limit,
            };
            runtime.block_on(commands::nearby::run(&config, data, &request, cli.json))
        }

        Commands::Migrate {
            input,
            output,
            dry_run,
        } => commands::migrate::run(&input, output.as_deref(), dry_run, cli.json),

        Commands::Compare { from, to } => commands::compare::run(&from, &to, cli.json),

        Commands::Stats { data } => commands::stats::run(&config, data, cli.json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(code = %e.code, session_id = tourism_telemetry::session_id(), "command failed");
            if cli.json {
                if let Ok(report) = serde_json::to_string_pretty(&e.to_report()) {
                    eprintln!("{report}");
                }
            } else {
                Status::report(&e);
            }
            exit_code(e.exit_code())
        }
    }
}

fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}
