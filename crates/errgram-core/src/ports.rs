use async_trait::async_trait;

use crate::Result;

/// Paste-hosting service for reports too large for the chat transport.
///
/// Implemented by the Telegraph adapter; the hook only ever sees the trait
/// object, so tests can substitute a recording double.
#[async_trait]
pub trait PastePort: Send + Sync {
    /// Host `content` under `title`, returning the public page URL.
    async fn publish(&self, title: &str, content: &str) -> Result<String>;
}

/// Chat destination for the bounded alert summary.
#[async_trait]
pub trait AlertPort: Send + Sync {
    /// Deliver `text` to `chat_id`. One shot; the caller never retries.
    async fn send_text(&self, chat_id: &str, text: &str) -> Result<()>;
}
