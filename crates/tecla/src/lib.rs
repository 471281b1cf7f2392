//! Tecla: a harness that probes which keyboard shortcuts the browser
//! chrome intercepts instead of delivering to the page.
//!
//! A run serves an instrumented page, launches one headful browser,
//! synthesizes every letter/digit with the platform action modifier and
//! with Alt at the OS level, and asks four questions after each tap: is
//! the browser window still active, is the page still open, is it still
//! on the start URL, and did it report a cancelable keydown? The answers
//! become one pass/fail record per combination.
//!
//! ```text
//! ┌──────────┐   OS keystrokes    ┌─────────────┐   console JSON   ┌─────────┐
//! │ Injector │ ─────────────────► │   Browser   │ ───────────────► │ Mailbox │
//! └──────────┘                    │ (headful)   │                  └────┬────┘
//!       ▲                         └──────┬──────┘                       │
//!       │                                │ CDP                          ▼
//! ┌─────┴────────────────────────────────┴──────────────────────────────────┐
//! │ Test loop: clear → tap → wait → snapshot window/page/url/signal → record │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod browser;
pub mod config;
pub mod error;
pub mod focus;
pub mod inject;
pub mod recorder;
pub mod runner;
pub mod server;
pub mod signal;
pub mod suite;
pub mod verify;

pub use browser::{BrowserDriver, CdpDriver, MockDriver};
pub use config::{BrowserChannel, BrowserFamily, HarnessConfig};
pub use error::{TeclaError, TeclaResult};
pub use focus::{FocusOracle, SystemFocusOracle, WindowRef};
pub use inject::{EnigoInput, InputSource};
pub use recorder::{results_file_name, CaseRecord, RunRecorder};
pub use runner::{Harness, SessionState};
pub use server::StaticServer;
pub use signal::{PageSignal, SignalMailbox};
pub use suite::{test_list, Modifier, TestCase, ALPHABET};
pub use verify::{evaluate, CheckOutcome, CheckSnapshot};
