//! Mesh generation worker binary.

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use veloxi_worker::{metrics, ProcessingContext, RedisIntake, Scheduler, WorkerConfig};

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("veloxi=info".parse().unwrap())
        .add_directive("chromiumoxide=warn".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting veloxi-worker");

    // Load configuration
    let config = WorkerConfig::from_env();
    info!("Worker config: {:?}", config);

    metrics::init_metrics(config.metrics_addr);

    // Build collaborators
    let ctx = match ProcessingContext::from_env(config.clone()) {
        Ok(ctx) => Arc::new(ctx),
        Err(e) => {
            error!("Failed to create processing context: {}", e);
            std::process::exit(1);
        }
    };

    let scheduler = Arc::new(Scheduler::new(ctx));

    // Drain task ids pushed by the platform API
    let redis_url =
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let intake = match RedisIntake::new(&redis_url, config.intake_key.as_str(), config.poll_interval) {
        Ok(intake) => intake,
        Err(e) => {
            error!("Failed to create task intake: {}", e);
            std::process::exit(1);
        }
    };
    let intake_task = tokio::spawn(intake.run(
        Arc::clone(&scheduler),
        scheduler.subscribe_shutdown(),
    ));

    // Setup signal handlers
    {
        let scheduler = Arc::clone(&scheduler);
        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            info!("Received shutdown signal");
            scheduler.shutdown();
        });
    }

    // Run the scheduling loop
    scheduler.run().await;
    intake_task.await.ok();

    info!("Worker shutdown complete");
}
