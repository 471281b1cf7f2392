//! The fixed list of key/modifier combinations a run probes.

use serde::{Deserialize, Serialize};

/// Lowercase letters then digits, the 36 symbols a run probes.
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz1234567890";

/// Modifier held while the key is tapped.
///
/// Serialized in the lowercase wire form the result consumers expect
/// (`"command"`, `"control"`, `"alt"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    /// Command (macOS action modifier)
    Command,
    /// Control (action modifier elsewhere)
    Control,
    /// Alt / Option
    Alt,
}

impl Modifier {
    /// The OS-conventional primary accelerator modifier for the host
    /// platform: Command on macOS, Control elsewhere.
    #[must_use]
    pub fn action() -> Self {
        if cfg!(target_os = "macos") {
            Self::Command
        } else {
            Self::Control
        }
    }

    /// Wire-form label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Control => "control",
            Self::Alt => "alt",
        }
    }
}

/// One key/modifier combination to probe. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Symbol from [`ALPHABET`]
    pub key: char,
    /// Modifier held while tapping
    pub modifier: Modifier,
}

impl TestCase {
    /// Create a test case
    #[must_use]
    pub const fn new(key: char, modifier: Modifier) -> Self {
        Self { key, modifier }
    }
}

/// The full deterministic suite: every alphabet symbol with the action
/// modifier, then every symbol with Alt. 72 entries, never shuffled.
#[must_use]
pub fn test_list(action: Modifier) -> Vec<TestCase> {
    ALPHABET
        .chars()
        .map(|key| TestCase::new(key, action))
        .chain(ALPHABET.chars().map(|key| TestCase::new(key, Modifier::Alt)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_has_36_symbols() {
        assert_eq!(ALPHABET.chars().count(), 36);
    }

    #[test]
    fn test_list_is_72_entries() {
        assert_eq!(test_list(Modifier::Control).len(), 72);
    }

    #[test]
    fn test_list_action_block_before_alt_block() {
        let cases = test_list(Modifier::Command);
        assert!(cases[..36].iter().all(|c| c.modifier == Modifier::Command));
        assert!(cases[36..].iter().all(|c| c.modifier == Modifier::Alt));
    }

    #[test]
    fn test_list_keeps_alphabet_order() {
        let cases = test_list(Modifier::Control);
        assert_eq!(cases[0].key, 'a');
        assert_eq!(cases[25].key, 'z');
        assert_eq!(cases[26].key, '1');
        assert_eq!(cases[35].key, '0');
        // Same key order repeats in the alt block.
        assert_eq!(cases[36].key, 'a');
        assert_eq!(cases[71].key, '0');
    }

    #[test]
    fn test_modifier_wire_form() {
        let json = serde_json::to_string(&TestCase::new('a', Modifier::Alt)).unwrap();
        assert_eq!(json, r#"{"key":"a","modifier":"alt"}"#);
    }

    #[test]
    fn test_action_modifier_is_platform_primary() {
        let action = Modifier::action();
        if cfg!(target_os = "macos") {
            assert_eq!(action, Modifier::Command);
        } else {
            assert_eq!(action, Modifier::Control);
        }
    }
}
