//! Fires one synthetic alert through the configured channel so operators can
//! verify the pipeline end to end before wiring the hook into an application.

use std::sync::Arc;

use tracing::info;

use errgram_core::{config::Config, hook::ErrorHook};
use errgram_telegram::TelegramAlerter;
use errgram_telegraph::TelegraphPublisher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    errgram_core::logging::init("errgram");

    let cfg = Arc::new(Config::load()?);

    let paste = Arc::new(TelegraphPublisher::new(
        cfg.telegraph_api_url.clone(),
        cfg.chat_id.clone(),
        cfg.call_timeout,
    )?);
    let alert = Arc::new(TelegramAlerter::new(
        &cfg.bot_token,
        cfg.call_timeout,
        &cfg.telegram_api_url,
    )?);

    let hook = ErrorHook::new(cfg.clone(), paste, alert);

    let probe = std::io::Error::new(std::io::ErrorKind::Other, "errgram test alert");
    hook.process_exception("https://example.invalid/errgram-selftest", Some(&probe))
        .await;

    info!(chat_id = %cfg.chat_id, "test alert dispatched");
    Ok(())
}
