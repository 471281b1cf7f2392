//! The per-case check: did the synthesized shortcut reach the page?

use crate::focus::WindowRef;
use crate::signal::PageSignal;

/// Everything the check compares, sampled after the keystroke delay.
#[derive(Debug, Clone)]
pub struct CheckSnapshot {
    /// OS-active window at check time
    pub active_window: WindowRef,
    /// Whether the page target is gone
    pub page_closed: bool,
    /// Page URL at check time (empty when the page is closed)
    pub current_url: String,
    /// Signal consumed from the mailbox, if any arrived
    pub signal: Option<PageSignal>,
}

/// Outcome of one check. Only [`CheckOutcome::Pass`] records success;
/// every other variant names the first condition that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// All four conditions held
    Pass,
    /// The active window is no longer the baseline window
    WindowChanged {
        /// Window that is active instead
        active: WindowRef,
    },
    /// The page was closed
    PageClosed,
    /// The keystroke navigated the page somewhere else
    UrlChanged {
        /// URL observed at check time
        url: String,
    },
    /// No cancelable keydown was reported since the last reset
    NoSignal,
}

impl CheckOutcome {
    /// Whether the combination reached the page
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Diagnostic for the failing condition, if any
    #[must_use]
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Self::Pass => None,
            Self::WindowChanged { active } => Some(format!(
                "window not active anymore (now {} [{}])",
                active.app_name, active.id
            )),
            Self::PageClosed => Some("page closed".to_string()),
            Self::UrlChanged { url } => Some(format!("url changed: {url}")),
            Self::NoSignal => Some("no event".to_string()),
        }
    }
}

/// Evaluate one snapshot against the baseline captured at the last
/// reset.
///
/// Conditions short-circuit in a fixed order, so the reported outcome is
/// always the first one that failed: window identity, page liveness,
/// page URL, then the cancelable signal. All comparisons are exact.
#[must_use]
pub fn evaluate(snapshot: &CheckSnapshot, baseline: &WindowRef, expected_url: &str) -> CheckOutcome {
    if !snapshot.active_window.same_identity(baseline) {
        return CheckOutcome::WindowChanged {
            active: snapshot.active_window.clone(),
        };
    }
    if snapshot.page_closed {
        return CheckOutcome::PageClosed;
    }
    if snapshot.current_url != expected_url {
        return CheckOutcome::UrlChanged {
            url: snapshot.current_url.clone(),
        };
    }
    match &snapshot.signal {
        Some(signal) if signal.cancelable => CheckOutcome::Pass,
        _ => CheckOutcome::NoSignal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://localhost:3000/";

    fn baseline() -> WindowRef {
        WindowRef::new("0x10", "msedge")
    }

    fn healthy_snapshot() -> CheckSnapshot {
        CheckSnapshot {
            active_window: baseline(),
            page_closed: false,
            current_url: URL.to_string(),
            signal: Some(PageSignal {
                cancelable: true,
                key: Some("a".to_string()),
            }),
        }
    }

    #[test]
    fn test_all_conditions_held() {
        let outcome = evaluate(&healthy_snapshot(), &baseline(), URL);
        assert!(outcome.is_pass());
        assert!(outcome.diagnostic().is_none());
    }

    #[test]
    fn test_window_change_wins_over_everything() {
        let mut snapshot = healthy_snapshot();
        snapshot.active_window = WindowRef::new("0x99", "some-other-app");
        snapshot.page_closed = true;
        snapshot.current_url = String::new();
        snapshot.signal = None;

        let outcome = evaluate(&snapshot, &baseline(), URL);
        assert!(matches!(outcome, CheckOutcome::WindowChanged { .. }));
    }

    #[test]
    fn test_closed_page_short_circuits_url_and_signal() {
        let mut snapshot = healthy_snapshot();
        snapshot.page_closed = true;
        snapshot.current_url = "http://elsewhere/".to_string();
        snapshot.signal = None;

        // Must report the page closure, not the stale URL or the
        // missing signal.
        let outcome = evaluate(&snapshot, &baseline(), URL);
        assert_eq!(outcome, CheckOutcome::PageClosed);
        assert_eq!(outcome.diagnostic().as_deref(), Some("page closed"));
    }

    #[test]
    fn test_url_change_reports_observed_url() {
        let mut snapshot = healthy_snapshot();
        snapshot.current_url = "http://localhost:3000/settings".to_string();

        let outcome = evaluate(&snapshot, &baseline(), URL);
        assert_eq!(
            outcome,
            CheckOutcome::UrlChanged {
                url: "http://localhost:3000/settings".to_string()
            }
        );
    }

    #[test]
    fn test_missing_signal_fails() {
        let mut snapshot = healthy_snapshot();
        snapshot.signal = None;
        assert_eq!(evaluate(&snapshot, &baseline(), URL), CheckOutcome::NoSignal);
    }

    #[test]
    fn test_non_cancelable_signal_fails() {
        let mut snapshot = healthy_snapshot();
        snapshot.signal = Some(PageSignal {
            cancelable: false,
            key: None,
        });
        assert_eq!(evaluate(&snapshot, &baseline(), URL), CheckOutcome::NoSignal);
    }

    #[test]
    fn test_url_comparison_is_exact() {
        let mut snapshot = healthy_snapshot();
        // Trailing-slash difference is a mismatch, no normalization.
        snapshot.current_url = "http://localhost:3000".to_string();
        assert!(matches!(
            evaluate(&snapshot, &baseline(), URL),
            CheckOutcome::UrlChanged { .. }
        ));
    }
}
