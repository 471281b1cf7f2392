//! Run configuration.
//!
//! A run is fully determined by these values; there are no command-line
//! flags. The defaults reproduce the reference setup: a headful msedge
//! window against `http://localhost:3000/`, 250ms after each keystroke,
//! a 10-attempt tab handshake.

use crate::suite::Modifier;
use std::path::PathBuf;
use std::time::Duration;

/// Browser engine family driven by the run.
///
/// Only the chromium family is drivable over CDP; the others exist so a
/// result file can be labeled for cross-browser comparison when produced
/// by a different backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserFamily {
    /// Chromium and its branded channels
    Chromium,
    /// Firefox
    Firefox,
    /// WebKit
    Webkit,
}

impl BrowserFamily {
    /// Label used when no channel refines it
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Chromium => "chromium",
            Self::Firefox => "firefox",
            Self::Webkit => "webkit",
        }
    }
}

/// Specific chromium build to launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserChannel {
    /// Google Chrome stable
    Chrome,
    /// Google Chrome beta
    ChromeBeta,
    /// Google Chrome dev
    ChromeDev,
    /// Google Chrome canary
    ChromeCanary,
    /// Microsoft Edge stable
    Msedge,
    /// Microsoft Edge beta
    MsedgeBeta,
    /// Microsoft Edge dev
    MsedgeDev,
    /// Microsoft Edge canary
    MsedgeCanary,
}

impl BrowserChannel {
    /// Label embedded in the results file name
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::ChromeBeta => "chrome-beta",
            Self::ChromeDev => "chrome-dev",
            Self::ChromeCanary => "chrome-canary",
            Self::Msedge => "msedge",
            Self::MsedgeBeta => "msedge-beta",
            Self::MsedgeDev => "msedge-dev",
            Self::MsedgeCanary => "msedge-canary",
        }
    }

    /// Conventional executable name for the channel, resolved through
    /// PATH when no explicit `browser_path` override is set.
    #[must_use]
    pub const fn executable(self) -> &'static str {
        match self {
            Self::Chrome => "google-chrome",
            Self::ChromeBeta => "google-chrome-beta",
            Self::ChromeDev => "google-chrome-unstable",
            Self::ChromeCanary => "google-chrome-canary",
            Self::Msedge => "microsoft-edge",
            Self::MsedgeBeta => "microsoft-edge-beta",
            Self::MsedgeDev => "microsoft-edge-dev",
            Self::MsedgeCanary => "microsoft-edge-canary",
        }
    }
}

/// Configuration for one harness run
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Page URL every check compares against
    pub url: String,
    /// Static server port
    pub port: u16,
    /// Directory the static server exposes
    pub public_dir: PathBuf,
    /// Browser engine family
    pub family: BrowserFamily,
    /// Specific chromium build (ignored for other families)
    pub channel: Option<BrowserChannel>,
    /// Explicit browser executable, overriding channel resolution
    pub browser_path: Option<String>,
    /// Modifier used for the action half of the suite
    pub action_modifier: Modifier,
    /// Pause between injecting a keystroke and sampling state
    pub keystroke_delay: Duration,
    /// Pause between handshake tab presses
    pub handshake_delay: Duration,
    /// Tab presses before the handshake fails fatally
    pub handshake_attempts: u32,
    /// Platform label embedded in the results file name
    pub platform: String,
    /// Where to write the results file; `None` skips the file
    pub report_dir: Option<PathBuf>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            url: String::from("http://localhost:3000/"),
            port: 3000,
            public_dir: PathBuf::from("public"),
            family: BrowserFamily::Chromium,
            channel: Some(BrowserChannel::Msedge),
            browser_path: None,
            action_modifier: Modifier::action(),
            keystroke_delay: Duration::from_millis(250),
            handshake_delay: Duration::from_millis(50),
            handshake_attempts: 10,
            platform: std::env::consts::OS.to_string(),
            report_dir: Some(PathBuf::from(".")),
        }
    }
}

impl HarnessConfig {
    /// Create a config with the reference defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the browser channel
    #[must_use]
    pub const fn with_channel(mut self, channel: BrowserChannel) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Set an explicit browser executable
    #[must_use]
    pub fn with_browser_path(mut self, path: impl Into<String>) -> Self {
        self.browser_path = Some(path.into());
        self
    }

    /// Set the action modifier
    #[must_use]
    pub const fn with_action_modifier(mut self, modifier: Modifier) -> Self {
        self.action_modifier = modifier;
        self
    }

    /// Set both wait-then-sample delays
    #[must_use]
    pub const fn with_delays(mut self, keystroke: Duration, handshake: Duration) -> Self {
        self.keystroke_delay = keystroke;
        self.handshake_delay = handshake;
        self
    }

    /// Set the handshake attempt bound
    #[must_use]
    pub const fn with_handshake_attempts(mut self, attempts: u32) -> Self {
        self.handshake_attempts = attempts;
        self
    }

    /// Set the platform label
    #[must_use]
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Set where the results file is written
    #[must_use]
    pub fn with_report_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.report_dir = Some(dir.into());
        self
    }

    /// Skip the results file entirely
    #[must_use]
    pub fn without_report(mut self) -> Self {
        self.report_dir = None;
        self
    }

    /// Browser label for the results file: the channel when one refines
    /// the chromium family, the family otherwise.
    #[must_use]
    pub fn browser_label(&self) -> &'static str {
        match (self.family, self.channel) {
            (BrowserFamily::Chromium, Some(channel)) => channel.label(),
            (family, _) => family.label(),
        }
    }

    /// Executable the driver should launch, if the config names one.
    #[must_use]
    pub fn executable(&self) -> Option<String> {
        self.browser_path.clone().or_else(|| {
            match self.family {
                BrowserFamily::Chromium => self.channel.map(|c| c.executable().to_string()),
                // Non-chromium families are not drivable over CDP.
                _ => None,
            }
        })
    }
}
