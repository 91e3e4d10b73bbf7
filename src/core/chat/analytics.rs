//! Fire-and-forget usage notifications.
//!
//! The panel reports button clicks and form submits through [`notify`].
//! A failing sink is logged and ignored: it never blocks the action that
//! triggered it and is never retried.

/// Category every panel event is filed under.
pub const PAGE_CATEGORY: &str = "page";

/// One usage notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsEvent {
    ButtonClick {
        category: &'static str,
        name: &'static str,
    },
    FormSubmit {
        category: &'static str,
        name: &'static str,
    },
}

impl AnalyticsEvent {
    pub fn click(name: &'static str) -> Self {
        Self::ButtonClick {
            category: PAGE_CATEGORY,
            name,
        }
    }

    pub fn submit(name: &'static str) -> Self {
        Self::FormSubmit {
            category: PAGE_CATEGORY,
            name,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ButtonClick { name, .. } | Self::FormSubmit { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AnalyticsError {
    #[error("Analytics sink unavailable: {0}")]
    Unavailable(String),
    #[error("Analytics channel closed")]
    Closed,
}

/// Destination for usage notifications.
#[cfg_attr(test, mockall::automock)]
pub trait Analytics: Send + Sync {
    fn track(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError>;
}

/// Report `event`, swallowing any failure.
pub fn notify(analytics: &dyn Analytics, event: AnalyticsEvent) {
    if let Err(e) = analytics.track(&event) {
        log::debug!("Dropped analytics event {}: {e}", event.name());
    }
}

/// Writes every event to the log under the `analytics` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
    fn track(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        match event {
            AnalyticsEvent::ButtonClick { category, name } => {
                tracing::info!(target: "analytics", kind = "button_click", category = *category, name = *name);
            }
            AnalyticsEvent::FormSubmit { category, name } => {
                tracing::info!(target: "analytics", kind = "form_submit", category = *category, name = *name);
            }
        }
        Ok(())
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAnalytics;

impl Analytics for NoopAnalytics {
    fn track(&self, _event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        Ok(())
    }
}
