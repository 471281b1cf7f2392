//! Window focus oracle: which OS window is active right now.

use crate::error::{TeclaError, TeclaResult};

/// Identity snapshot of the OS-active window.
///
/// Captured once per reset and compared by identity on every check; the
/// harness never moves focus itself beyond the side effects of injected
/// input and browser actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRef {
    /// OS window identity
    pub id: String,
    /// Owning application, for diagnostics only
    pub app_name: String,
}

impl WindowRef {
    /// Create a window reference
    #[must_use]
    pub fn new(id: impl Into<String>, app_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            app_name: app_name.into(),
        }
    }

    /// Identity comparison; titles and geometry are irrelevant.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Queries the OS for the currently focused window.
pub trait FocusOracle {
    /// Snapshot the active window's identity
    fn active_window(&mut self) -> TeclaResult<WindowRef>;
}

/// Focus oracle backed by the platform window manager.
#[derive(Debug, Default)]
pub struct SystemFocusOracle;

impl SystemFocusOracle {
    /// Create the system oracle
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FocusOracle for SystemFocusOracle {
    fn active_window(&mut self) -> TeclaResult<WindowRef> {
        let window = active_win_pos_rs::get_active_window()
            .map_err(|()| TeclaError::focus("no active window reported by the OS"))?;
        Ok(WindowRef::new(window.window_id, window.app_name))
    }
}
