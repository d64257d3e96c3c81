//! Report formatting and alert-text composition.

use chrono::Local;

use crate::domain::{ExceptionEvent, Report};

/// Placeholder when the captured error has no usable representation.
pub const ERROR_PLACEHOLDER: &str = "ERROR";

/// Timestamp format used in both the report body and the alert prefix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Local wall-clock timestamp. Called twice per event: once when the report
/// is formatted and once when the alert is sent, so the two lines may differ
/// by a second or two. That is intentional.
pub fn now_stamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Build the full diagnostic report for one event.
///
/// Never fails. An event with no error representation degrades to a literal
/// `ERROR` marker. No truncation happens here: this exact text is what the
/// overflow page receives when the summary cannot hold it.
pub fn format_report(label: &str, timestamp: &str, event: &ExceptionEvent) -> Report {
    let error_repr = if event.error_repr.trim().is_empty() {
        ERROR_PLACEHOLDER
    } else {
        event.error_repr.as_str()
    };

    Report::new(format!(
        "🌐{label}\n⏰ Time: {timestamp}\n🔗HOST: {url}\n💥 ERROR: {error_repr}\n\n```rust\n{trace}```",
        url = event.request_url,
        trace = event.trace,
    ))
}

/// Compose the outgoing chat text: label and timestamp header, the first
/// `limit` characters of the report, and the overflow link when one exists.
///
/// Truncation is character-exact, not word-boundary aware.
pub fn compose_alert_text(
    label: &str,
    timestamp: &str,
    report: &Report,
    overflow_url: Option<&str>,
    limit: usize,
) -> String {
    let mut text = format!("🌐{label}\n⏰ Time: {timestamp}");
    text.extend(report.as_str().chars().take(limit));
    if let Some(url) = overflow_url {
        text.push_str("\n\nFOR MORE: ");
        text.push_str(url);
    }
    text
}
