//! Weathervane - Discord weather bot
//!
//! Answers "weather now" / "weather tomorrow" / "help" when mentioned,
//! using a Dark Sky-compatible forecast provider, and runs a daily check
//! that announces day-over-day weather changes.

mod announcer;
mod camera;
mod common;
mod config;
mod discord;
mod forecast;

use std::sync::Arc;

use anyhow::{Context, Result};
use serenity::prelude::GatewayIntents;
use serenity::Client;
use tokio::signal;
use tokio_cron_scheduler::JobScheduler;
use tracing::{error, info, warn};

use discord::{BotState, WeatherHandler};
use forecast::ForecastClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Weathervane v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = config::load_config().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        error!("WEATHERVANE_DISCORD_TOKEN and WEATHERVANE_FORECAST_TOKEN must be set.");
        e
    })?;

    info!("Configuration loaded successfully");
    info!("  Forecast endpoint: {}", config.forecast.base_url);
    info!(
        "  Coordinates: {},{}",
        config.forecast.latitude, config.forecast.longitude
    );
    info!("  Daily check at local hour {}", config.announcer.hour);

    let forecast = ForecastClient::new(config.forecast.clone());
    let camera = config.camera.clone().map(camera::CameraClient::new);
    match &camera {
        Some(_) => info!("Traffic camera follow-up enabled"),
        None => info!("Traffic camera follow-up disabled"),
    }
    let state = Arc::new(BotState::new(forecast, camera));

    // Baseline for the change announcer, fetched once outside the schedule.
    // Failure just leaves the announcer idle until its first scheduled tick.
    announcer::arm_baseline(&state).await;

    // Set up the daily check
    let mut scheduler = JobScheduler::new()
        .await
        .context("Failed to create job scheduler")?;
    announcer::schedule_daily_check(
        &scheduler,
        state.clone(),
        &config.announcer.cron_expression(),
    )
    .await?;
    scheduler
        .start()
        .await
        .context("Failed to start scheduler")?;

    // Connect to Discord
    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;
    let mut client = Client::builder(&config.discord.token, intents)
        .event_handler(WeatherHandler::new(state))
        .await
        .context("Failed to create Discord client")?;

    let shard_manager = client.shard_manager.clone();

    tokio::select! {
        biased;
        _ = shutdown_signal() => {
            info!("Shutdown signal received - stopping the daily check and disconnecting...");
        }
        result = client.start() => {
            if let Err(e) = result {
                error!("Discord client error: {}", e);
            }
        }
    }

    if let Err(e) = scheduler.shutdown().await {
        warn!("Failed to stop scheduler: {}", e);
    }
    shard_manager.shutdown_all().await;

    info!("Exiting...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
