//! DNS Failover Controller
//!
//! Watches the health check of a primary endpoint and, when a majority of
//! regions report failure, points its DNS failover record pair at the
//! secondary endpoint.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────── dns-failover ────────────────────────────────┐
//!   │                                                                              │
//!   │  ┌──────────┐   ┌────────────────────────────┐   ┌────────────────────────┐  │
//!   │  │  config  │──▶│   controller (run/watch)   │──▶│ observability          │  │
//!   │  └──────────┘   └──────┬──────────────┬──────┘   │ logs, metrics          │  │
//!   │                        │ 1. evaluate  │ 2. if    └────────────────────────┘  │
//!   │                        ▼              ▼ unhealthy                            │
//!   │                 ┌────────────┐  ┌─────────────┐                              │
//!   │                 │   health   │  │     dns     │                              │
//!   │                 │ evaluator  │  │   switch    │                              │
//!   │                 └─────┬──────┘  └──────┬──────┘                              │
//!   └───────────────────────┼────────────────┼─────────────────────────────────────┘
//!                           ▼                ▼
//!                 health check service   DNS control plane
//!                 (regional reports)     (UPSERT change batch)
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use dns_failover::config::{load_config, FailoverConfig};
use dns_failover::controller::{Controller, Scheduler};
use dns_failover::dns::{DnsControlPlane, MemoryZone};
use dns_failover::health::{HealthCheckService, HttpHealthCheckClient};
use dns_failover::lifecycle::{signals, Shutdown};
use dns_failover::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "dns-failover")]
#[command(about = "Fail DNS over to a secondary endpoint when the primary's health check fails", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "failover.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single evaluate-and-switch cycle
    Run {
        /// Apply the change batch to an in-memory zone instead of the control plane
        #[arg(long)]
        dry_run: bool,
    },
    /// Run cycles on the configured interval until interrupted
    Watch,
    /// Evaluate health only and print the verdict
    Check,
    /// Print the change batch a failover would submit
    Plan,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration from {}: {}", cli.config.display(), e);
            return ExitCode::from(1);
        }
    };

    let _log_guard = match logging::init_logging(&config.observability) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::from(1);
        }
    };

    tracing::info!(
        health_check_id = %config.health_check.id,
        hosted_zone_id = %config.dns.hosted_zone_id,
        record = %config.record.name,
        record_type = %config.record.record_type,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Run { dry_run } => run_once(&config, dry_run).await,
        Commands::Watch => watch(&config).await,
        Commands::Check => check(&config).await,
        Commands::Plan => plan(&config),
    }
}

async fn run_once(config: &FailoverConfig, dry_run: bool) -> ExitCode {
    if !dry_run {
        let outcome = Controller::from_config(config).run().await;
        return ExitCode::from(outcome.exit_code());
    }

    tracing::info!("Dry run: change batches go to an in-memory zone");
    let health: Arc<dyn HealthCheckService> =
        Arc::new(HttpHealthCheckClient::new(&config.health_check.endpoint));
    let zone = Arc::new(MemoryZone::new(config.dns.hosted_zone_id.clone()));
    let plane: Arc<dyn DnsControlPlane> = zone.clone();

    let outcome = Controller::with_services(config, health, plane).run().await;
    match serde_json::to_string_pretty(&zone.records()) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!(error = %e, "Failed to render dry-run records"),
    }
    ExitCode::from(outcome.exit_code())
}

async fn watch(config: &FailoverConfig) -> ExitCode {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn(signals::shutdown_on_signal(shutdown));

    let scheduler = Scheduler::new(
        Arc::new(Controller::from_config(config)),
        Duration::from_secs(config.controller.interval_secs),
    );
    scheduler.run(receiver).await;

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}

async fn check(config: &FailoverConfig) -> ExitCode {
    match Controller::from_config(config).evaluate().await {
        Ok(verdict) => {
            match serde_json::to_string_pretty(&verdict) {
                Ok(json) => println!("{}", json),
                Err(e) => tracing::error!(error = %e, "Failed to render verdict"),
            }
            if verdict.is_healthy {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn plan(config: &FailoverConfig) -> ExitCode {
    let controller = Controller::from_config(config);
    let switch = controller.switch();
    let request = serde_json::json!({
        "HostedZoneId": switch.hosted_zone_id(),
        "ChangeBatch": switch.change_batch(),
    });

    match serde_json::to_string_pretty(&request) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
