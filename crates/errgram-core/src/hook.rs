//! Exception hook: the single entry point the host framework glue calls.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    config::Config,
    domain::{ExceptionEvent, Report},
    formatting::{compose_alert_text, format_report, now_stamp},
    ports::{AlertPort, PastePort},
};

/// Title used for hosted overflow pages.
const OVERFLOW_PAGE_TITLE: &str = "ERROR";

/// Orchestrates format → overflow publish → notify for one observed error.
///
/// Every failure below this point is logged and dropped: the request that
/// triggered the alert must never be affected by the alerting path. The hook
/// holds no per-event state, so concurrent request handlers can share one
/// instance without locking.
pub struct ErrorHook {
    cfg: Arc<Config>,
    paste: Arc<dyn PastePort>,
    alert: Arc<dyn AlertPort>,
}

impl ErrorHook {
    pub fn new(cfg: Arc<Config>, paste: Arc<dyn PastePort>, alert: Arc<dyn AlertPort>) -> Self {
        Self { cfg, paste, alert }
    }

    /// Report `error` raised while serving `request_url`.
    ///
    /// No-op when disabled or when there is no error. Infallible by contract:
    /// publish and delivery failures are logged and swallowed here, and the
    /// caller's response handling continues untouched.
    pub async fn process_exception(
        &self,
        request_url: &str,
        error: Option<&(dyn std::error::Error + 'static)>,
    ) {
        if !self.cfg.enabled {
            return;
        }
        let Some(error) = error else {
            return;
        };
        self.report_event(&ExceptionEvent::from_error(request_url, error))
            .await;
    }

    /// Run the pipeline for an already-captured event. Used by framework glue
    /// that only has textual context, and by tests.
    pub async fn report_event(&self, event: &ExceptionEvent) {
        if !self.cfg.enabled {
            return;
        }

        let report = format_report(&self.cfg.label, &now_stamp(), event);
        debug!(chars = report.char_count(), url = %event.request_url, "report formatted");

        let overflow_url = self.publish_overflow(&report).await;
        let text = compose_alert_text(
            &self.cfg.label,
            &now_stamp(),
            &report,
            overflow_url.as_deref(),
            self.cfg.summary_limit,
        );

        if let Err(e) = self.alert.send_text(&self.cfg.chat_id, &text).await {
            warn!(error = %e, "alert delivery failed");
        }
    }

    /// Host the full report when it cannot fit in the summary. A publish
    /// failure degrades to "no reference" and never blocks the notification.
    async fn publish_overflow(&self, report: &Report) -> Option<String> {
        if report.char_count() <= self.cfg.summary_limit {
            return None;
        }

        match self.paste.publish(OVERFLOW_PAGE_TITLE, report.as_str()).await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(error = %e, "overflow page creation failed");
                None
            }
        }
    }
}
