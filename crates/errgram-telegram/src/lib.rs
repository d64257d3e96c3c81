//! Telegram adapter (teloxide).
//!
//! Implements the core `AlertPort` over the Bot API `sendMessage` call:
//! markdown parse mode, link previews disabled. One shot per alert; the
//! caller treats a failure as a dropped notification and never retries.

use std::time::Duration;

use async_trait::async_trait;

use teloxide::{
    payloads::SendMessageSetters,
    prelude::Requester,
    types::{ChatId, ParseMode, Recipient},
    Bot,
};

use errgram_core::{errors::Error, ports::AlertPort, Result};

#[derive(Clone, Debug)]
pub struct TelegramAlerter {
    bot: Bot,
}

impl TelegramAlerter {
    /// Build an alerter for `bot_token` with a bounded per-call timeout.
    ///
    /// `api_url` points at a non-default Bot API server (self-hosted, tests);
    /// pass the standard `https://api.telegram.org` otherwise.
    pub fn new(bot_token: &str, timeout: Duration, api_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("telegram http client: {e}")))?;

        let url = reqwest::Url::parse(api_url)
            .map_err(|e| Error::Config(format!("invalid telegram api url {api_url:?}: {e}")))?;

        Ok(Self {
            bot: Bot::with_client(bot_token, client).set_api_url(url),
        })
    }

    /// `sendMessage` accepts either a numeric chat id or an `@channel` name.
    fn recipient(chat_id: &str) -> Recipient {
        match chat_id.trim().parse::<i64>() {
            Ok(id) => Recipient::Id(ChatId(id)),
            Err(_) => Recipient::ChannelUsername(chat_id.trim().to_string()),
        }
    }
}

#[async_trait]
impl AlertPort for TelegramAlerter {
    async fn send_text(&self, chat_id: &str, text: &str) -> Result<()> {
        self.bot
            .send_message(Self::recipient(chat_id), text.to_string())
            .parse_mode(ParseMode::Markdown)
            .disable_web_page_preview(true)
            .await
            .map_err(|e| Error::Delivery(format!("telegram sendMessage failed: {e}")))?;
        Ok(())
    }
}
