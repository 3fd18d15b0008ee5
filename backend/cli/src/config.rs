use ekyc_vision::{OcrConfig, DEFAULT_OCR_ENDPOINT};

/// EKYC bot runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Path the Bot Framework connector POSTs activities to
    pub webhook_path: String,
    /// Bot Framework app credentials; absent for the local emulator
    pub app_id: Option<String>,
    pub app_password: Option<String>,
    /// OCR provider endpoint and key
    pub vision_endpoint: String,
    pub vision_api_key: Option<String>,
    /// Where the completed field record is written
    pub export_path: String,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3978,
            webhook_path: "/api/messages".to_string(),
            app_id: None,
            app_password: None,
            vision_endpoint: DEFAULT_OCR_ENDPOINT.to_string(),
            vision_api_key: None,
            export_path: "data/test.xlsx".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: std::env::var("EKYC_BIND").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3978),
            webhook_path: std::env::var("EKYC_WEBHOOK_PATH")
                .unwrap_or_else(|_| "/api/messages".to_string()),
            app_id: std::env::var("MICROSOFT_APP_ID").ok().filter(|v| !v.is_empty()),
            app_password: std::env::var("MICROSOFT_APP_PASSWORD")
                .ok()
                .filter(|v| !v.is_empty()),
            vision_endpoint: std::env::var("MICROSOFT_VISION_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_OCR_ENDPOINT.to_string()),
            vision_api_key: std::env::var("MICROSOFT_VISION_API_KEY").ok(),
            export_path: std::env::var("EKYC_EXPORT_PATH")
                .unwrap_or_else(|_| "data/test.xlsx".to_string()),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    pub fn ocr_config(&self) -> OcrConfig {
        OcrConfig {
            endpoint: self.vision_endpoint.clone(),
            subscription_key: self.vision_api_key.clone().unwrap_or_default(),
        }
    }
}
