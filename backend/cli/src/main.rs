mod config;

use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Router};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use ekyc_channels::{
    Activity, BotFrameworkAdapter, BotFrameworkConfig, ChannelAdapter, ConnectorClient,
    ConnectorConfig,
};
use ekyc_dialog::DialogEngine;
use ekyc_vision::OcrClient;

use config::Config;

#[derive(Parser)]
#[command(name = "ekycbot")]
#[command(about = "EKYC document-collection bot")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot webhook server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show current runtime status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{}/api/health", config.port))
                .send()
                .await
            {
                Ok(resp) => {
                    println!("ekycbot is up: {}", resp.text().await?);
                }
                Err(_) => {
                    println!("ekycbot is not running on port {}", config.port);
                }
            }
        }
    }

    Ok(())
}

async fn run_server(config: Config) -> Result<()> {
    info!(
        port = config.port,
        bind = %config.bind_address,
        webhook = %config.webhook_path,
        "Starting EKYC bot"
    );

    if config.vision_api_key.is_none() {
        error!("MICROSOFT_VISION_API_KEY is not set; OCR requests will be rejected by the provider");
    }

    // Inbound activities flow from the webhook into the dialog engine.
    let (inbound_tx, inbound_rx) = mpsc::channel::<Activity>(64);

    let connector = Arc::new(ConnectorClient::new(ConnectorConfig {
        app_id: config.app_id.clone(),
        app_password: config.app_password.clone(),
    }));
    let ocr = Arc::new(OcrClient::new(config.ocr_config()));

    let engine = DialogEngine::new(connector, ocr, config.export_path.clone());
    tokio::spawn(engine.run(inbound_rx));

    let adapter = BotFrameworkAdapter::new(
        BotFrameworkConfig { webhook_path: config.webhook_path.clone() },
        inbound_tx,
    );
    adapter.start().await?;

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(adapter.build_router())
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.bind_address, config.port);
    info!(addr = %addr, "HTTP server listening");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
