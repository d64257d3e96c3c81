/// Core error type for the alerting pipeline.
///
/// Adapter crates map their transport-specific failures into this type so the
/// hook can log and discard them uniformly. Nothing below the hook boundary
/// ever reaches the request path.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    /// Failure creating the hosted error page (account or page call).
    #[error("publish error: {0}")]
    Publish(String),

    /// Failure delivering the chat message.
    #[error("delivery error: {0}")]
    Delivery(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
