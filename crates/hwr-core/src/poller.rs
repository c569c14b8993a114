//! The poll loop: fetch, validate, notify, sleep, repeat.
//!
//! Every cycle failure is caught here, reported to the chat (best-effort) and
//! followed by the regular sleep. The loop only ends when `cancel` fires,
//! which interrupts an in-flight cycle as well as the sleep.

use std::sync::Arc;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::{
    config::Config,
    messaging::{port::MessagingPort, send_message},
    ports::{Clock, ReviewApi},
    review::{check_response, parse_status},
    Result,
};

/// Text sent to the chat when a cycle fails.
pub fn failure_message(err: &crate::Error) -> String {
    format!("Сбой в работе программы: {err}")
}

#[derive(Clone)]
pub struct HomeworkPoller {
    cfg: Arc<Config>,
    api: Arc<dyn ReviewApi>,
    messenger: Arc<dyn MessagingPort>,
    clock: Arc<dyn Clock>,
}

impl HomeworkPoller {
    pub fn new(
        cfg: Arc<Config>,
        api: Arc<dyn ReviewApi>,
        messenger: Arc<dyn MessagingPort>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cfg,
            api,
            messenger,
            clock,
        }
    }

    /// Poll until cancelled, starting from the current time.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut cursor = self.clock.now_unix();
        info!(
            "Опрос {} каждые {} с",
            self.cfg.endpoint,
            self.cfg.retry_time.as_secs()
        );

        loop {
            // A hung request or delivery must not outlive cancellation.
            let cycle = async move {
                match self.poll_once(cursor).await {
                    Ok(next) => Some(next),
                    Err(e) => {
                        let text = failure_message(&e);
                        error!("{text}");
                        send_message(self.messenger.as_ref(), &self.cfg.telegram_chat_id, &text)
                            .await;
                        None
                    }
                }
            };

            tokio::select! {
              biased;
              _ = cancel.cancelled() => break,
              next = cycle => {
                if let Some(next) = next {
                    cursor = next;
                }
              }
            }

            tokio::select! {
              biased;
              _ = cancel.cancelled() => break,
              _ = sleep(self.cfg.retry_time) => {}
            }
        }

        info!("Опрос остановлен");
    }

    /// Run one fetch/validate/notify cycle and return the next cursor.
    ///
    /// On error the caller keeps the previous cursor.
    pub async fn poll_once(&self, cursor: i64) -> Result<i64> {
        let payload = self.api.get_api_answer(cursor).await?;
        let homeworks = check_response(&payload)?;

        if homeworks.is_empty() {
            debug!("Новых статусов домашних работ не обнаружено");
        }
        for homework in &homeworks {
            let text = parse_status(homework)?;
            send_message(self.messenger.as_ref(), &self.cfg.telegram_chat_id, &text).await;
        }

        Ok(self.clock.now_unix())
    }
}
