use tracing::{error, info};

use crate::{domain::ChatTarget, messaging::port::MessagingPort};

/// Deliver `text` to `chat`, best-effort.
///
/// Delivery failures are logged and swallowed; callers are never told.
pub async fn send_message(messenger: &dyn MessagingPort, chat: &ChatTarget, text: &str) {
    match messenger.send_text(chat, text).await {
        Ok(()) => {
            info!("Сообщение в Telegram успешно отправлено");
            info!("Текст: {text}");
        }
        Err(e) => error!("Не получилось отправить сообщение в Telegram: {e}"),
    }
}
