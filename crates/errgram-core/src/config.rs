use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

pub const DEFAULT_SUMMARY_LIMIT: usize = 2000;
pub const DEFAULT_LABEL: &str = "LOGGER";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_TELEGRAPH_API_URL: &str = "https://api.telegra.ph";

/// Typed configuration for the alerting pipeline.
///
/// Loaded once at startup and shared read-only behind an `Arc`; nothing
/// mutates it afterwards, so concurrent request handlers can read it freely.
#[derive(Clone, Debug)]
pub struct Config {
    /// Telegram bot credential.
    pub bot_token: String,
    /// Destination chat (numeric id or `@channel` username). Doubles as the
    /// Telegraph account short name.
    pub chat_id: String,
    /// Human-readable source label shown at the top of every alert.
    pub label: String,
    /// Master switch; when off the hook is a complete no-op.
    pub enabled: bool,

    /// Maximum number of report characters carried in the chat summary.
    /// Reports longer than this are also published as an overflow page.
    pub summary_limit: usize,
    /// Timeout applied to each outbound call, so a slow endpoint cannot
    /// block the request thread indefinitely.
    pub call_timeout: Duration,

    /// API base overrides (self-hosted bot API servers, tests).
    pub telegram_api_url: String,
    pub telegraph_api_url: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let bot_token = env_str("ERRGRAM_BOT_TOKEN").unwrap_or_default();
        if bot_token.trim().is_empty() {
            return Err(Error::Config(
                "ERRGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let chat_id = env_str("ERRGRAM_CHAT_ID").unwrap_or_default();
        if chat_id.trim().is_empty() {
            return Err(Error::Config(
                "ERRGRAM_CHAT_ID environment variable is required".to_string(),
            ));
        }

        let label = env_str("ERRGRAM_LABEL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_LABEL.to_string());
        let enabled = env_bool("ERRGRAM_ON").unwrap_or(true);

        let summary_limit = env_usize("ERRGRAM_SUMMARY_LIMIT").unwrap_or(DEFAULT_SUMMARY_LIMIT);
        let call_timeout = Duration::from_millis(env_u64("ERRGRAM_TIMEOUT_MS").unwrap_or(10_000));

        let telegram_api_url = env_str("TELEGRAM_API_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string());
        let telegraph_api_url = env_str("TELEGRAPH_API_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_TELEGRAPH_API_URL.to_string());

        Ok(Self {
            bot_token,
            chat_id,
            label,
            enabled,
            summary_limit,
            call_timeout,
            telegram_api_url,
            telegraph_api_url,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    env_str(key).map(|s| {
        matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn env_usize(key: &str) -> Option<usize> {
    env_str(key).and_then(|s| s.trim().parse::<usize>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
