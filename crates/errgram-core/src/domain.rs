use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;

/// One observed request failure, captured at the hook boundary.
///
/// Everything the pipeline needs is copied out of the request/error context up
/// front; the event owns its data and is consumed by exactly one delivery
/// attempt. Nothing is shared across events.
#[derive(Clone, Debug)]
pub struct ExceptionEvent {
    /// Absolute URL of the request that failed.
    pub request_url: String,
    /// Canonical one-line representation of the error.
    pub error_repr: String,
    /// Formatted error chain / backtrace text.
    pub trace: String,
}

impl ExceptionEvent {
    pub fn new(
        request_url: impl Into<String>,
        error_repr: impl Into<String>,
        trace: impl Into<String>,
    ) -> Self {
        Self {
            request_url: request_url.into(),
            error_repr: error_repr.into(),
            trace: trace.into(),
        }
    }

    /// Capture an event from a live error value: Debug representation, the
    /// `source()` chain, and a backtrace when one is available (RUST_BACKTRACE).
    pub fn from_error(
        request_url: impl Into<String>,
        error: &(dyn std::error::Error + 'static),
    ) -> Self {
        Self {
            request_url: request_url.into(),
            error_repr: format!("{error:?}"),
            trace: render_trace(error),
        }
    }
}

fn render_trace(error: &(dyn std::error::Error + 'static)) -> String {
    let mut out = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        out.push_str("\ncaused by: ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }

    let backtrace = Backtrace::capture();
    if matches!(backtrace.status(), BacktraceStatus::Captured) {
        out.push('\n');
        out.push_str(&backtrace.to_string());
    }
    out
}

/// Formatted diagnostic text for one event.
///
/// Unbounded: truncation is the notifier's job, and the overflow page always
/// receives the full text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report(String);

impl Report {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Character count. The summary limit is measured in characters, not
    /// bytes, so multibyte text never splits mid-scalar.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl Default for Report {
    /// Degenerate "nothing captured yet" report.
    fn default() -> Self {
        Self("LOGGER".to_string())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
