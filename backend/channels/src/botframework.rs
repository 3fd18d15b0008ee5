/// Bot Framework channel adapter: receives connector webhooks and
/// hands message/conversationUpdate activities to the dialog layer.
///
/// Inbound: HTTP POST on the configured webhook path (Bot Connector
/// activity format)
/// Outbound: handled by [`crate::ConnectorClient`] against the
/// service URL each inbound activity carries
use async_trait::async_trait;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::activity::Activity;
use crate::ChannelAdapter;

#[derive(Debug, Clone)]
pub struct BotFrameworkConfig {
    pub webhook_path: String,
}

impl Default for BotFrameworkConfig {
    fn default() -> Self {
        Self { webhook_path: "/api/messages".into() }
    }
}

pub struct BotFrameworkAdapter {
    config: BotFrameworkConfig,
    inbound_tx: mpsc::Sender<Activity>,
}

impl BotFrameworkAdapter {
    pub fn new(config: BotFrameworkConfig, inbound_tx: mpsc::Sender<Activity>) -> Self {
        Self { config, inbound_tx }
    }
}

#[derive(Clone)]
struct AppState {
    inbound_tx: mpsc::Sender<Activity>,
}

async fn webhook_handler(
    State(state): State<AppState>,
    Json(activity): Json<Activity>,
) -> impl IntoResponse {
    if !activity.is_message() && !activity.is_conversation_update() {
        debug!(activity_type = %activity.activity_type, "ignoring activity");
        return StatusCode::OK;
    }

    let sender = activity
        .from
        .as_ref()
        .and_then(|f| f.name.clone().or_else(|| f.id.clone()))
        .unwrap_or_else(|| "unknown".into());
    info!(
        activity_type = %activity.activity_type,
        from = %sender,
        "inbound activity"
    );

    if state.inbound_tx.send(activity).await.is_err() {
        warn!("dialog engine is gone; dropping activity");
        return StatusCode::SERVICE_UNAVAILABLE;
    }
    StatusCode::OK
}

#[async_trait]
impl ChannelAdapter for BotFrameworkAdapter {
    fn name(&self) -> &str {
        "botframework"
    }

    fn build_router(&self) -> Router {
        let state = AppState { inbound_tx: self.inbound_tx.clone() };
        Router::new()
            .route(&self.config.webhook_path, post(webhook_handler))
            .with_state(state)
    }

    async fn start(&self) -> anyhow::Result<()> {
        info!("[BotFramework] Adapter ready at {}", self.config.webhook_path);
        Ok(())
    }
}
