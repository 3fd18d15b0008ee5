//! Bot Connector REST client.
//!
//! Replies are POSTed to the service URL the inbound activity carried
//! (`{serviceUrl}/v3/conversations/{id}/activities`). When app
//! credentials are configured, a Bot Framework OAuth token is fetched
//! with the client-credentials grant and cached until shortly before
//! expiry; without credentials (local emulator) requests go out bare.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use ekyc_core::EkycError;

use crate::activity::{Activity, Attachment};
use crate::ActivitySink;

const TOKEN_URL: &str =
    "https://login.microsoftonline.com/botframework.com/oauth2/v2.0/token";
const TOKEN_SCOPE: &str = "https://api.botframework.com/.default";

/// Seconds knocked off the advertised token lifetime before refresh.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// Bot Framework app id; `None` runs unauthenticated (emulator).
    pub app_id: Option<String>,
    pub app_password: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

pub struct ConnectorClient {
    config: ConnectorConfig,
    http: Client,
    token: RwLock<Option<CachedToken>>,
}

impl ConnectorClient {
    pub fn new(config: ConnectorConfig) -> Self {
        Self {
            config,
            http: Client::new(),
            token: RwLock::new(None),
        }
    }

    /// Whether attachment URLs on this channel are secured by the
    /// connector JWT (Skype and Teams serve them behind auth).
    fn requires_token(channel_id: Option<&str>) -> bool {
        matches!(channel_id, Some("skype") | Some("msteams"))
    }

    /// Current Bearer token, fetching or refreshing as needed.
    /// `Ok(None)` means the connector runs unauthenticated.
    async fn access_token(&self) -> Result<Option<String>, EkycError> {
        let (Some(app_id), Some(app_password)) =
            (self.config.app_id.as_ref(), self.config.app_password.as_ref())
        else {
            return Ok(None);
        };

        if let Some(cached) = self.token.read().await.as_ref() {
            if cached.expires_at > Utc::now() {
                return Ok(Some(cached.access_token.clone()));
            }
        }

        info!("refreshing bot connector token");
        let resp = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", app_id.as_str()),
                ("client_secret", app_password.as_str()),
                ("scope", TOKEN_SCOPE),
            ])
            .send()
            .await
            .map_err(|e| EkycError::ConnectorAuth(e.to_string()))?;

        if !resp.status().is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(EkycError::ConnectorAuth(detail));
        }

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| EkycError::ConnectorAuth(e.to_string()))?;

        let cached = CachedToken {
            access_token: token.access_token.clone(),
            expires_at: Utc::now()
                + Duration::seconds((token.expires_in - TOKEN_EXPIRY_MARGIN_SECS).max(0)),
        };
        *self.token.write().await = Some(cached);
        Ok(Some(token.access_token))
    }

    /// POST an outbound activity back into its conversation.
    async fn post_activity(&self, outbound: &Activity) -> Result<(), EkycError> {
        let service_url = outbound
            .service_url
            .as_deref()
            .ok_or_else(|| EkycError::ReplyFailed("activity has no service url".into()))?;
        let conversation_id = outbound
            .conversation
            .as_ref()
            .and_then(|c| c.id.as_deref())
            .ok_or_else(|| EkycError::ReplyFailed("activity has no conversation id".into()))?;

        let url = format!(
            "{}/v3/conversations/{}/activities",
            service_url.trim_end_matches('/'),
            conversation_id
        );

        let mut request = self.http.post(&url).json(outbound);
        if let Some(token) = self.access_token().await? {
            request = request.bearer_auth(token);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| EkycError::ReplyFailed(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp.text().await.unwrap_or_default();
            error!(%status, detail, "connector rejected outbound activity");
            return Err(EkycError::ReplyFailed(format!("{status}: {detail}")));
        }
        Ok(())
    }
}

#[async_trait]
impl ActivitySink for ConnectorClient {
    async fn send_text(&self, reply_to: &Activity, text: &str) -> Result<(), EkycError> {
        self.post_activity(&reply_to.reply_with_text(text)).await
    }

    async fn send_card(&self, reply_to: &Activity, card: Attachment) -> Result<(), EkycError> {
        self.post_activity(&reply_to.reply_with_attachment(card)).await
    }

    async fn fetch_attachment(
        &self,
        activity: &Activity,
        attachment: &Attachment,
    ) -> Result<(Vec<u8>, String), EkycError> {
        let content_url = attachment
            .content_url
            .as_deref()
            .ok_or_else(|| EkycError::AttachmentFetch("attachment has no content url".into()))?;
        let content_type = attachment
            .content_type
            .clone()
            .unwrap_or_else(|| "application/octet-stream".into());

        let mut request = self.http.get(content_url);
        if Self::requires_token(activity.channel_id.as_deref()) {
            match self.access_token().await? {
                Some(token) => request = request.bearer_auth(token),
                None => warn!("secured attachment url but no app credentials configured"),
            }
        }

        let resp = request
            .send()
            .await
            .map_err(|e| EkycError::AttachmentFetch(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(EkycError::AttachmentFetch(format!(
                "attachment fetch returned {}",
                resp.status()
            )));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| EkycError::AttachmentFetch(e.to_string()))?;
        Ok((bytes.to_vec(), content_type))
    }
}
