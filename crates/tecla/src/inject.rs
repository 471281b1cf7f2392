//! OS-level keyboard synthesis.
//!
//! Keystrokes are injected at the OS layer, not over CDP: the point is
//! to observe what the browser chrome does with a physical-looking
//! shortcut before page script ever sees it.

use crate::error::{TeclaError, TeclaResult};
use crate::suite::Modifier;
use enigo::{Direction, Enigo, Key, Keyboard, Settings};

/// Synthesizes keyboard input as if a human pressed it.
///
/// Fire-and-forget: callers never inspect what the environment did with
/// the keystroke, that is the verifier's job.
pub trait InputSource {
    /// Tap `key` with `modifier` held
    fn tap(&mut self, key: char, modifier: Modifier) -> TeclaResult<()>;

    /// Tap the Tab key with nothing held (handshake liveness probe)
    fn tab(&mut self) -> TeclaResult<()>;
}

/// Input source backed by the OS input facility.
pub struct EnigoInput {
    enigo: Enigo,
}

impl std::fmt::Debug for EnigoInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnigoInput").finish_non_exhaustive()
    }
}

impl EnigoInput {
    /// Connect to the OS input facility
    pub fn new() -> TeclaResult<Self> {
        let enigo =
            Enigo::new(&Settings::default()).map_err(|e| TeclaError::input(e.to_string()))?;
        Ok(Self { enigo })
    }

    fn modifier_key(modifier: Modifier) -> Key {
        match modifier {
            Modifier::Command => Key::Meta,
            Modifier::Control => Key::Control,
            Modifier::Alt => Key::Alt,
        }
    }
}

impl InputSource for EnigoInput {
    fn tap(&mut self, key: char, modifier: Modifier) -> TeclaResult<()> {
        let held = Self::modifier_key(modifier);
        self.enigo
            .key(held, Direction::Press)
            .map_err(|e| TeclaError::input(e.to_string()))?;
        let tapped = self
            .enigo
            .key(Key::Unicode(key), Direction::Click)
            .map_err(|e| TeclaError::input(e.to_string()));
        // Release the modifier even when the tap itself failed, or the
        // next injected case inherits a stuck modifier.
        self.enigo
            .key(held, Direction::Release)
            .map_err(|e| TeclaError::input(e.to_string()))?;
        tapped
    }

    fn tab(&mut self) -> TeclaResult<()> {
        self.enigo
            .key(Key::Tab, Direction::Click)
            .map_err(|e| TeclaError::input(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_key_mapping() {
        assert_eq!(EnigoInput::modifier_key(Modifier::Command), Key::Meta);
        assert_eq!(EnigoInput::modifier_key(Modifier::Control), Key::Control);
        assert_eq!(EnigoInput::modifier_key(Modifier::Alt), Key::Alt);
    }
}
