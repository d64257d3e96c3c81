//! End-to-end pipeline tests with recording port doubles.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use errgram_core::{
    config::Config,
    domain::ExceptionEvent,
    hook::ErrorHook,
    ports::{AlertPort, PastePort},
    Error, Result,
};

struct RecordingPaste {
    calls: Mutex<Vec<(String, String)>>,
    url: String,
    fail: bool,
}

impl RecordingPaste {
    fn returning(url: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            url: url.to_string(),
            fail: false,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            url: String::new(),
            fail: true,
        })
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PastePort for RecordingPaste {
    async fn publish(&self, title: &str, content: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((title.to_string(), content.to_string()));
        if self.fail {
            return Err(Error::Publish("paste host down".to_string()));
        }
        Ok(self.url.clone())
    }
}

struct RecordingAlert {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingAlert {
    fn ok() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlertPort for RecordingAlert {
    async fn send_text(&self, chat_id: &str, text: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((chat_id.to_string(), text.to_string()));
        if self.fail {
            return Err(Error::Delivery("telegram unreachable".to_string()));
        }
        Ok(())
    }
}

fn test_config(enabled: bool) -> Arc<Config> {
    Arc::new(Config {
        bot_token: "123:abc".to_string(),
        chat_id: "42".to_string(),
        label: "MyApp".to_string(),
        enabled,
        summary_limit: 2000,
        call_timeout: Duration::from_secs(5),
        telegram_api_url: "https://api.telegram.org".to_string(),
        telegraph_api_url: "https://api.telegra.ph".to_string(),
    })
}

fn small_event() -> ExceptionEvent {
    ExceptionEvent::new(
        "https://x.test/path",
        "ValueError('bad input')",
        "Traceback...\n",
    )
}

fn large_event() -> ExceptionEvent {
    ExceptionEvent::new("https://x.test/path", "boom", "x".repeat(5000))
}

#[tokio::test]
async fn small_report_skips_publisher() {
    let paste = RecordingPaste::returning("https://telegra.ph/Error-1");
    let alert = RecordingAlert::ok();
    let hook = ErrorHook::new(test_config(true), paste.clone(), alert.clone());

    hook.report_event(&small_event()).await;

    assert!(paste.calls().is_empty());
    let sent = alert.sent();
    assert_eq!(sent.len(), 1);
    let (chat_id, text) = &sent[0];
    assert_eq!(chat_id, "42");
    assert!(text.starts_with("🌐MyApp\n⏰ Time: "));
    assert!(text.contains("🔗HOST: https://x.test/path"));
    assert!(text.contains("💥 ERROR: ValueError('bad input')"));
    assert!(!text.contains("FOR MORE"));
}

#[tokio::test]
async fn large_report_publishes_once_and_links_the_page() {
    let paste = RecordingPaste::returning("https://telegra.ph/Error-1");
    let alert = RecordingAlert::ok();
    let hook = ErrorHook::new(test_config(true), paste.clone(), alert.clone());

    hook.report_event(&large_event()).await;

    let calls = paste.calls();
    assert_eq!(calls.len(), 1);
    let (title, content) = &calls[0];
    assert_eq!(title, "ERROR");
    assert!(content.starts_with("🌐MyApp\n⏰ Time: "));
    assert!(content.contains(&"x".repeat(5000)));

    let sent = alert.sent();
    assert_eq!(sent.len(), 1);
    let text = &sent[0].1;
    assert!(text.ends_with("\n\nFOR MORE: https://telegra.ph/Error-1"));

    // Summary carries exactly the first 2000 report characters between the
    // header and the overflow link.
    let truncated: String = content.chars().take(2000).collect();
    assert!(text.contains(&truncated));
    let suffix = "\n\nFOR MORE: https://telegra.ph/Error-1";
    let header_len = text.chars().count() - 2000 - suffix.chars().count();
    let header: String = text.chars().take(header_len).collect();
    assert!(header.starts_with("🌐MyApp\n⏰ Time: "));
    assert!(!header.contains("🔗HOST"));
}

#[tokio::test]
async fn publish_failure_degrades_to_no_reference() {
    let paste = RecordingPaste::failing();
    let alert = RecordingAlert::ok();
    let hook = ErrorHook::new(test_config(true), paste.clone(), alert.clone());

    hook.report_event(&large_event()).await;

    assert_eq!(paste.calls().len(), 1);
    let sent = alert.sent();
    assert_eq!(sent.len(), 1);
    assert!(!sent[0].1.contains("FOR MORE"));
}

#[tokio::test]
async fn delivery_failure_is_contained() {
    let paste = RecordingPaste::failing();
    let alert = RecordingAlert::failing();
    let hook = ErrorHook::new(test_config(true), paste, alert.clone());

    // Both ports fail; the call must still return normally.
    hook.report_event(&large_event()).await;
    assert_eq!(alert.sent().len(), 1);
}

#[tokio::test]
async fn process_exception_never_fails_for_live_errors() {
    let paste = RecordingPaste::failing();
    let alert = RecordingAlert::failing();
    let hook = ErrorHook::new(test_config(true), paste, alert.clone());

    let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
    hook.process_exception("https://x.test/path", Some(&err)).await;
    assert_eq!(alert.sent().len(), 1);

    hook.process_exception("https://x.test/path", None).await;
    assert_eq!(alert.sent().len(), 1);
}

#[tokio::test]
async fn disabled_hook_makes_no_calls() {
    let paste = RecordingPaste::returning("https://telegra.ph/Error-1");
    let alert = RecordingAlert::ok();
    let hook = ErrorHook::new(test_config(false), paste.clone(), alert.clone());

    let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
    hook.process_exception("https://x.test/path", Some(&err)).await;
    hook.report_event(&large_event()).await;

    assert!(paste.calls().is_empty());
    assert!(alert.sent().is_empty());
}

#[tokio::test]
async fn overflow_reference_never_leaks_into_the_next_event() {
    let paste = RecordingPaste::returning("https://telegra.ph/Error-1");
    let alert = RecordingAlert::ok();
    let hook = ErrorHook::new(test_config(true), paste.clone(), alert.clone());

    hook.report_event(&large_event()).await;
    hook.report_event(&small_event()).await;

    assert_eq!(paste.calls().len(), 1);
    let sent = alert.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].1.contains("FOR MORE"));
    assert!(!sent[1].1.contains("FOR MORE"));
}
