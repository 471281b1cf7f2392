//! The page-to-harness channel: the last console message the page
//! reported, parsed and held in a single-slot mailbox.

use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

/// A keydown report from the instrumented page.
///
/// The page logs one JSON object per keydown; `cancelable` is the DOM
/// event's flag and the only field the verifier depends on. A truthy
/// value means the browser dispatched the raw keydown to page script
/// instead of consuming it for a chrome-level shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSignal {
    /// DOM `cancelable` flag of the observed keydown
    pub cancelable: bool,
    /// Key the page saw, if it reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl PageSignal {
    /// Parse a console message's text payload.
    ///
    /// Anything that is not a JSON object with a `cancelable` field is
    /// treated as no signal at all, never as an error.
    #[must_use]
    pub fn from_console_text(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }

    /// Parse a console argument already materialized as a JSON value.
    /// Console string arguments are re-parsed as JSON text.
    #[must_use]
    pub fn from_console_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(text) => Self::from_console_text(text),
            other => serde_json::from_value(other.clone()).ok(),
        }
    }
}

/// Single-slot mailbox holding the most recent [`PageSignal`].
///
/// The console listener overwrites the slot from its own task; the test
/// loop clears it before injecting and consumes it at check time. The
/// race between listener writes and the fixed-delay sample is tolerated
/// because the slot is a one-shot flag reset before each attempt.
#[derive(Debug, Default)]
pub struct SignalMailbox {
    slot: Mutex<Option<PageSignal>>,
}

impl SignalMailbox {
    /// Create an empty mailbox
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot with a newer signal
    pub fn store(&self, signal: PageSignal) {
        *self.lock() = Some(signal);
    }

    /// Consume and clear the current signal
    pub fn take(&self) -> Option<PageSignal> {
        self.lock().take()
    }

    /// Reset the slot to empty
    pub fn clear(&self) {
        *self.lock() = None;
    }

    /// Whether a signal has arrived since the last clear
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<PageSignal>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cancelable_signal() -> PageSignal {
        PageSignal {
            cancelable: true,
            key: Some("a".to_string()),
        }
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn test_parse_well_formed_text() {
            let signal =
                PageSignal::from_console_text(r#"{"cancelable":true,"key":"a"}"#).unwrap();
            assert!(signal.cancelable);
            assert_eq!(signal.key.as_deref(), Some("a"));
        }

        #[test]
        fn test_parse_missing_key_field_is_fine() {
            let signal = PageSignal::from_console_text(r#"{"cancelable":false}"#).unwrap();
            assert!(!signal.cancelable);
            assert!(signal.key.is_none());
        }

        #[test]
        fn test_malformed_json_is_no_signal() {
            assert!(PageSignal::from_console_text("not json at all").is_none());
            assert!(PageSignal::from_console_text("{\"cancelable\":").is_none());
        }

        #[test]
        fn test_missing_cancelable_is_no_signal() {
            assert!(PageSignal::from_console_text(r#"{"key":"a"}"#).is_none());
        }

        #[test]
        fn test_value_string_is_reparsed_as_json() {
            let value = serde_json::Value::String(r#"{"cancelable":true}"#.to_string());
            assert!(PageSignal::from_console_value(&value).unwrap().cancelable);
        }

        #[test]
        fn test_value_object_is_deserialized_directly() {
            let value = serde_json::json!({"cancelable": false, "key": "Tab"});
            let signal = PageSignal::from_console_value(&value).unwrap();
            assert!(!signal.cancelable);
            assert_eq!(signal.key.as_deref(), Some("Tab"));
        }
    }

    mod mailbox_tests {
        use super::*;

        #[test]
        fn test_starts_empty() {
            let mailbox = SignalMailbox::new();
            assert!(!mailbox.is_set());
            assert!(mailbox.take().is_none());
        }

        #[test]
        fn test_store_then_take_consumes() {
            let mailbox = SignalMailbox::new();
            mailbox.store(cancelable_signal());
            assert!(mailbox.is_set());
            assert_eq!(mailbox.take(), Some(cancelable_signal()));
            assert!(!mailbox.is_set());
        }

        #[test]
        fn test_store_overwrites() {
            let mailbox = SignalMailbox::new();
            mailbox.store(PageSignal {
                cancelable: false,
                key: None,
            });
            mailbox.store(cancelable_signal());
            assert_eq!(mailbox.take(), Some(cancelable_signal()));
        }

        #[test]
        fn test_clear_resets() {
            let mailbox = SignalMailbox::new();
            mailbox.store(cancelable_signal());
            mailbox.clear();
            assert!(!mailbox.is_set());
        }
    }
}
