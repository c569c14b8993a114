use async_trait::async_trait;

use crate::{domain::ChatTarget, Result};

/// Cross-messenger port.
///
/// Only plain-text delivery to a single chat is needed; the Telegram adapter
/// lives in `hwr-telegram`.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_text(&self, chat: &ChatTarget, text: &str) -> Result<()>;
}
