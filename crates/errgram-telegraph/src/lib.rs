//! Telegraph adapter.
//!
//! Hosts oversized reports as Telegraph pages behind the core `PastePort`.
//! An account is created on every publish with the chat id as its short
//! name; the pipeline never reuses credentials across events.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use errgram_core::{errors::Error, ports::PastePort, Result};

#[derive(Clone, Debug)]
pub struct TelegraphPublisher {
    http: reqwest::Client,
    base_url: String,
    short_name: String,
}

#[derive(Serialize)]
struct CreateAccount<'a> {
    short_name: &'a str,
}

#[derive(Serialize)]
struct CreatePage<'a> {
    access_token: &'a str,
    title: &'a str,
    html_content: &'a str,
    return_content: bool,
}

impl TelegraphPublisher {
    pub fn new(
        base_url: impl Into<String>,
        short_name: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("telegraph http client: {e}")))?;

        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            short_name: short_name.into(),
        })
    }

    /// POST one API method and return the decoded body. Telegraph wraps every
    /// response as `{"ok": bool, ...}` with the payload under `result`.
    async fn call(&self, method: &str, body: &impl Serialize) -> Result<serde_json::Value> {
        let url = format!("{}/{method}", self.base_url);

        let resp = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Publish(format!("{method} request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Publish(format!("{method} returned {status}")));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| Error::Publish(format!("{method} body read failed: {e}")))?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;

        if value.get("ok").and_then(|v| v.as_bool()) == Some(false) {
            let why = value
                .get("error")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown error");
            return Err(Error::Publish(format!("{method} rejected: {why}")));
        }

        Ok(value)
    }

    async fn create_account(&self) -> Result<String> {
        let account = CreateAccount {
            short_name: &self.short_name,
        };
        let value = self.call("createAccount", &account).await?;

        value
            .pointer("/result/access_token")
            .or_else(|| value.get("access_token"))
            .and_then(|t| t.as_str())
            .map(str::to_string)
            .ok_or_else(|| Error::Publish("createAccount response missing access_token".to_string()))
    }
}

#[async_trait]
impl PastePort for TelegraphPublisher {
    /// Two calls per publish: createAccount, then createPage with the full
    /// report as the page body (passed through, not re-escaped). Returns the
    /// public page URL.
    async fn publish(&self, title: &str, content: &str) -> Result<String> {
        let access_token = self.create_account().await?;

        let page = CreatePage {
            access_token: &access_token,
            title,
            html_content: content,
            return_content: false,
        };
        let value = self.call("createPage", &page).await?;

        value
            .pointer("/result/url")
            .or_else(|| value.get("url"))
            .and_then(|u| u.as_str())
            .map(str::to_string)
            .ok_or_else(|| Error::Publish("createPage response missing url".to_string()))
    }
}
