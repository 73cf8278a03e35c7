//! CLI entry point for the raildash aggregation tool.
//!
//! Provides subcommands for building the dashboard payload, rendering
//! per-page reports, printing summary statistics, and sampling a source
//! on an interval.

mod infra;
mod services;

use crate::infra::opsdb::OpsDbClient;
use crate::services::journey_api::JourneyApi;
use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use raildash::{
    api::{build_dashboard, page_response},
    events::{DashboardEvent, EventBus},
    model::{JourneyRow, TrainEntry},
    output::{append_record, write_json},
    parser::{parse_rows, parse_rows_csv},
    record::SummaryRecord,
    reports,
    sample::sample_entries,
    summary::SummaryStats,
    transform::transform_rows,
};
use std::ffi::OsStr;
use std::path::Path;
use tokio::sync::broadcast;
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "raildash")]
#[command(about = "Aggregate train-operations data into dashboard statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Dashboard page to build a payload for.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Page {
    TicketSales,
    TrainFleet,
    RemoteManagement,
    Reports,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the full dashboard JSON payload
    Dashboard {
        /// Journey rows: a URL or a path to a CSV/JSON file
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Year to filter to (defaults to the latest year in the data)
        #[arg(short, long)]
        year: Option<i32>,

        /// Metric the front end has selected
        #[arg(short, long, default_value = "revenue")]
        metric: String,

        /// File to write the payload to (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Build the payload for a single dashboard page
    Report {
        /// Which page to build
        #[arg(value_enum)]
        page: Page,

        /// Journey rows: a URL or a path to a CSV/JSON file
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// How many rows the ranked groupings keep
        #[arg(short, long, default_value_t = 5)]
        top: usize,

        /// File to write the payload to (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print summary statistics for a source
    Summary {
        /// Journey rows: a URL or a path to a CSV/JSON file
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Year to filter to (all years if omitted)
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Sample a source on an interval, appending one summary row per sample
    Watch {
        /// Journey rows: a URL or a path to a CSV/JSON file
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Seconds between samples
        #[arg(short = 'r', long, default_value_t = 60)]
        interval: u64,

        /// Number of samples to collect (0 = infinite)
        #[arg(short = 'n', long, default_value_t = 1)]
        samples: usize,

        /// CSV file to append sample rows to
        #[arg(short, long, default_value = "samples.csv")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/raildash.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("raildash.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Dashboard {
            source,
            year,
            metric,
            output,
        } => {
            let entries = load_entries(&source).await;
            let payload = build_dashboard(&entries, year, &metric, Utc::now().date_naive());
            write_json(output.as_deref(), &payload)?;
        }
        Commands::Report {
            page,
            source,
            top,
            output,
        } => {
            let entries = load_entries(&source).await;
            match page {
                Page::TicketSales => {
                    let report = reports::ticket_sales_report(&entries, top);
                    write_json(output.as_deref(), &page_response(report, &entries))?;
                }
                Page::TrainFleet => {
                    let report = reports::train_fleet_report(&entries);
                    write_json(output.as_deref(), &page_response(report, &entries))?;
                }
                Page::RemoteManagement => {
                    let report = reports::remote_management_report(&entries, top);
                    write_json(output.as_deref(), &page_response(report, &entries))?;
                }
                Page::Reports => {
                    let report = reports::operations_report(&entries);
                    write_json(output.as_deref(), &page_response(report, &entries))?;
                }
            }
        }
        Commands::Summary { source, year } => {
            let mut entries = load_entries(&source).await;
            if let Some(year) = year {
                entries.retain(|e| e.year == year);
            }
            let stats = SummaryStats::from_entries(&entries);
            write_json(None, &stats)?;
        }
        Commands::Watch {
            source,
            interval,
            samples,
            output,
        } => {
            watch(&source, interval, samples, &output).await?;
        }
    }

    Ok(())
}

/// Loads and normalizes journey rows, substituting the built-in sample
/// dataset when the source cannot be read. No retry, no partial results.
#[tracing::instrument(fields(source = %source))]
async fn load_entries(source: &str) -> Vec<TrainEntry> {
    match try_load(source).await {
        Ok(entries) => {
            info!(entries = entries.len(), "Journey rows loaded");
            entries
        }
        Err(e) => {
            warn!(error = %e, "Source unavailable, using built-in sample journeys");
            sample_entries()
        }
    }
}

async fn try_load(source: &str) -> Result<Vec<TrainEntry>> {
    let rows = load_rows(source).await?;
    transform_rows(&rows)
}

/// Loads journey rows from the OpsDB facade or a local CSV/JSON file.
async fn load_rows(source: &str) -> Result<Vec<JourneyRow>> {
    if source.starts_with("http") {
        return opsdb_client(source).fetch_journeys().await;
    }

    let bytes = std::fs::read(source)?;
    if source.ends_with(".csv") {
        parse_rows_csv(&bytes)
    } else {
        parse_rows(&bytes)
    }
}

/// Builds the OpsDB client, picking up credentials from the environment:
/// `OPSDB_API_KEY` for bearer auth, or `OPSDB_API_KEY_PARAM` as
/// `name=value` for gateways that take the key as a query parameter.
fn opsdb_client(url: &str) -> OpsDbClient {
    if let Ok(key) = std::env::var("OPSDB_API_KEY") {
        return OpsDbClient::with_bearer(url, key);
    }

    if let Ok(param) = std::env::var("OPSDB_API_KEY_PARAM") {
        if let Some((name, value)) = param.split_once('=') {
            return OpsDbClient::with_query_key(url, name.to_string(), value.to_string());
        }
        warn!("OPSDB_API_KEY_PARAM is not in name=value form, ignoring");
    }

    OpsDbClient::new(url)
}

/// Samples a source every `interval` seconds, appending one flat summary
/// row per sample and publishing bus events. Failed samples append an
/// error record and the loop keeps going.
#[tracing::instrument(skip(output), fields(source = %source, interval, samples))]
async fn watch(source: &str, interval: u64, samples: usize, output: &str) -> Result<()> {
    let bus = EventBus::new(16);

    let mut rx = bus.subscribe();
    let listener = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => info!(?event, "Dashboard event"),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Event listener lagged")
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    if samples == 0 {
        info!(interval, "Sampling infinitely. Press Ctrl+C to stop.");
    } else {
        info!(samples, interval, "Starting sample collection");
    }

    let mut sample_count = 0;

    loop {
        if samples > 0 && sample_count >= samples {
            break;
        }

        sample_count += 1;
        info!(sample = sample_count, "Starting sample round");

        match load_rows(source).await {
            Ok(rows) => match transform_rows(&rows) {
                Ok(entries) => {
                    let stats = SummaryStats::from_entries(&entries);
                    let record =
                        SummaryRecord::from_stats(&stats, entries.len()).with_source(source);

                    if let Err(e) = append_record(output, &record) {
                        error!(error = %e, "Failed to write sample row");
                    }

                    bus.publish(DashboardEvent::JourneysRefreshed {
                        source: source.to_string(),
                        entries: entries.len(),
                    });
                    bus.publish(DashboardEvent::SummaryUpdated {
                        source: source.to_string(),
                        total_revenue: stats.total_revenue,
                        average_delay: stats.average_delay,
                    });
                }
                Err(e) => {
                    error!(error = %e, "Row transform failed");
                    let record =
                        SummaryRecord::from_error("transform_error", &e.to_string())
                            .with_source(source);
                    let _ = append_record(output, &record);

                    bus.publish(DashboardEvent::RefreshFailed {
                        source: source.to_string(),
                        error: e.to_string(),
                    });
                }
            },
            Err(e) => {
                error!(error = %e, "Row fetch failed");
                let record =
                    SummaryRecord::from_error("fetch_error", &e.to_string()).with_source(source);
                let _ = append_record(output, &record);

                bus.publish(DashboardEvent::RefreshFailed {
                    source: source.to_string(),
                    error: e.to_string(),
                });
            }
        }

        // If not the last sample, wait before next iteration
        if samples == 0 || sample_count < samples {
            info!(interval, "Waiting before next sample");
            tokio::time::sleep(tokio::time::Duration::from_secs(interval)).await;
        }
    }

    drop(bus);
    let _ = listener.await;

    info!(output, "Finished sampling");
    Ok(())
}
