use thiserror::Error;

/// Top-level error type for the EKYC bot runtime.
#[derive(Debug, Error)]
pub enum EkycError {
    #[error("vision provider error ({status}): {detail}")]
    Vision { status: u16, detail: String },

    #[error("vision transport error: {0}")]
    VisionTransport(String),

    #[error("connector auth failed: {0}")]
    ConnectorAuth(String),

    #[error("reply delivery failed: {0}")]
    ReplyFailed(String),

    #[error("attachment fetch failed: {0}")]
    AttachmentFetch(String),

    #[error("export error: {0}")]
    Export(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EkycError {
    /// Whether the vision provider rejected us for lack of access.
    ///
    /// The dialog layer appends provider detail to its fixed
    /// client-facing failure message only for this case.
    pub fn is_access_denied(&self) -> bool {
        match self {
            EkycError::Vision { status, detail } => {
                matches!(*status, 401 | 403) || detail.contains("Access denied")
            }
            _ => false,
        }
    }
}
