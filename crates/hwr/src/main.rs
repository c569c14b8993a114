use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use hwr_core::{config::Config, poller::HomeworkPoller, ports::SystemClock};
use hwr_practicum::PracticumClient;
use hwr_telegram::TelegramMessenger;

struct Adapters {
    api: Arc<PracticumClient>,
    messenger: Arc<TelegramMessenger>,
}

fn build_adapters(cfg: &Config) -> anyhow::Result<Adapters> {
    let api = PracticumClient::new(cfg).context("не удалось создать клиент API проверки")?;
    let messenger = TelegramMessenger::from_token(cfg.telegram_token.clone());
    Ok(Adapters {
        api: Arc::new(api),
        messenger: Arc::new(messenger),
    })
}

/// Validate the config, then build the adapters.
///
/// `None` means the config was rejected: the error is logged and `build` is
/// never called, so no bot client exists.
fn startup<T>(
    loaded: hwr_core::Result<Config>,
    build: impl FnOnce(&Config) -> anyhow::Result<T>,
) -> Option<anyhow::Result<(Arc<Config>, T)>> {
    let cfg = match loaded {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            tracing::error!("CRITICAL: {e}");
            return None;
        }
    };
    Some(build(&cfg).map(|built| (cfg, built)))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    hwr_core::logging::init("hwr")?;

    let Some(ready) = startup(Config::load(), build_adapters) else {
        std::process::exit(1);
    };
    let (cfg, Adapters { api, messenger }) = ready?;

    if let Some(name) = messenger.username().await {
        tracing::info!("hwr запущен: @{name}");
    }

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Получен сигнал прерывания, завершение работы");
            on_signal.cancel();
        }
    });

    HomeworkPoller::new(cfg, api, messenger, Arc::new(SystemClock))
        .run(cancel)
        .await;

    Ok(())
}
