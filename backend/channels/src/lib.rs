use async_trait::async_trait;

use ekyc_core::EkycError;

pub mod activity;
pub mod botframework;
pub mod cards;
pub mod connector;
pub mod links;

pub use activity::{Activity, Attachment, ChannelAccount, ConversationAccount};
pub use botframework::{BotFrameworkAdapter, BotFrameworkConfig};
pub use connector::{ConnectorClient, ConnectorConfig};
pub use links::{image_url_from_text, parse_anchor_tag};

/// All channel adapters implement this trait.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// Human-readable adapter name for logging.
    fn name(&self) -> &str;

    /// Build an optional Axum sub-router for inbound webhook endpoints.
    fn build_router(&self) -> axum::Router {
        axum::Router::new()
    }

    /// Start the adapter's background work, if any.
    async fn start(&self) -> anyhow::Result<()>;
}

/// Outbound side of a conversation: how the dialog layer talks back
/// to the user and pulls uploaded attachments.
#[async_trait]
pub trait ActivitySink: Send + Sync {
    /// Send a plain-text reply to the conversation an activity came from.
    async fn send_text(&self, reply_to: &Activity, text: &str) -> Result<(), EkycError>;

    /// Send a single-card reply (hero or adaptive card attachment).
    async fn send_card(&self, reply_to: &Activity, card: Attachment) -> Result<(), EkycError>;

    /// Download the bytes of an uploaded attachment. Returns the raw
    /// bytes and the content type to forward to the OCR provider.
    async fn fetch_attachment(
        &self,
        activity: &Activity,
        attachment: &Attachment,
    ) -> Result<(Vec<u8>, String), EkycError>;
}
