mod bot;
mod card;
mod coc;
mod config;

use anyhow::{Context as _, Result};
use serenity::all::{Client, GatewayIntents};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::bot::Handler;
use crate::coc::CocClient;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cocbot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("Failed to load configuration from environment")?;

    info!("Configuration loaded successfully");
    info!("  API base URL: {}", config.coc.base_url);

    let handler = Handler::new(CocClient::new(config.coc));

    // Slash commands only need the guilds intent
    let mut client = Client::builder(&config.discord.bot_token, GatewayIntents::GUILDS)
        .event_handler(handler)
        .await
        .context("Failed to create Discord client")?;

    // Disconnect cleanly on ctrl-c
    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl-c: {}", e);
            return;
        }
        info!("Shutting down...");
        shard_manager.shutdown_all().await;
    });

    info!("Bot is starting...");
    client.start().await.context("Discord client error")?;

    Ok(())
}
