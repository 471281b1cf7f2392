//! The test loop: inject, wait, check, record, recover.

use crate::browser::BrowserDriver;
use crate::config::HarnessConfig;
use crate::error::{TeclaError, TeclaResult};
use crate::focus::{FocusOracle, WindowRef};
use crate::inject::InputSource;
use crate::recorder::{CaseRecord, RunRecorder};
use crate::signal::SignalMailbox;
use crate::suite::{test_list, TestCase};
use crate::verify::{evaluate, CheckOutcome, CheckSnapshot};
use std::sync::Arc;

/// Live baseline produced by setup or recovery.
///
/// Each phase takes the current session and returns the one to use
/// next; a recovery replaces it wholesale instead of patching shared
/// bindings.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Window that must stay active for a case to pass
    pub baseline: WindowRef,
}

/// Drives one full pass over the fixed suite.
///
/// Generic over the browser driver, the input source and the focus
/// oracle so the whole loop runs against scripted doubles in tests.
#[derive(Debug)]
pub struct Harness<D, I, F> {
    driver: D,
    input: I,
    focus: F,
    mailbox: Arc<SignalMailbox>,
    config: HarnessConfig,
    recorder: RunRecorder,
}

impl<D, I, F> Harness<D, I, F>
where
    D: BrowserDriver,
    I: InputSource,
    F: FocusOracle,
{
    /// Assemble a harness around live or scripted components
    pub fn new(
        driver: D,
        input: I,
        focus: F,
        mailbox: Arc<SignalMailbox>,
        config: HarnessConfig,
    ) -> Self {
        Self {
            driver,
            input,
            focus,
            mailbox,
            config,
            recorder: RunRecorder::new(),
        }
    }

    /// Run the whole suite once and return the recorder.
    ///
    /// Soft failures are recorded and recovered from; the only error
    /// that propagates out of the loop itself is the fatal handshake
    /// bound (plus environment errors like a dead focus oracle).
    pub async fn run(mut self) -> TeclaResult<RunRecorder> {
        let version = self.driver.version().await?;
        let mut session = self.reset_env().await?;
        tracing::info!(version = %version, "setup done");

        for case in test_list(self.config.action_modifier) {
            session = self.run_case(case, session).await?;
        }

        println!("{}", self.recorder.summary_json()?);
        if let Some(dir) = self.config.report_dir.clone() {
            let path = self.recorder.write_report(
                &dir,
                self.config.browser_label(),
                &version,
                &self.config.platform,
            )?;
            tracing::info!(path = %path.display(), "results written");
        }

        self.driver.close().await?;
        Ok(self.recorder)
    }

    /// One case: clear the mailbox, inject, wait, check, record. A
    /// failed check triggers recovery for the next case; the failed
    /// case itself is never recomputed.
    async fn run_case(
        &mut self,
        case: TestCase,
        session: SessionState,
    ) -> TeclaResult<SessionState> {
        self.mailbox.clear();
        self.input.tap(case.key, case.modifier)?;
        tokio::time::sleep(self.config.keystroke_delay).await;

        let outcome = self.after_check(&session).await?;
        let record = CaseRecord::new(case, outcome.is_pass());
        println!("{}", serde_json::to_string(&record)?);
        self.recorder.push(record);

        if let Some(diagnostic) = outcome.diagnostic() {
            tracing::warn!(key = %case.key, modifier = case.modifier.label(), "{diagnostic}");
            return self.reset_env().await;
        }
        Ok(session)
    }

    /// Sample the environment and evaluate the four pass conditions.
    async fn after_check(&mut self, session: &SessionState) -> TeclaResult<CheckOutcome> {
        let active_window = self.focus.active_window()?;
        let page_closed = self.driver.page_closed().await;
        let current_url = if page_closed {
            String::new()
        } else {
            self.driver.page_url().await?
        };
        let snapshot = CheckSnapshot {
            active_window,
            page_closed,
            current_url,
            signal: self.mailbox.take(),
        };
        Ok(evaluate(&snapshot, &session.baseline, &self.config.url))
    }

    /// Recovery: one fresh page, a confirmed-live instrumented script,
    /// a recaptured window baseline. Also serves as initial setup.
    async fn reset_env(&mut self) -> TeclaResult<SessionState> {
        self.driver.open_page(&self.config.url).await?;
        self.tab_till_in_window().await?;
        let baseline = self.focus.active_window()?;
        tracing::debug!(window = %baseline.id, app = %baseline.app_name, "environment reset");
        Ok(SessionState { baseline })
    }

    /// Liveness handshake: tab until the page reports any keydown,
    /// proving its script is attached and keyboard-focused. Exceeding
    /// the bound aborts the whole run.
    async fn tab_till_in_window(&mut self) -> TeclaResult<()> {
        let mut attempts = 0;
        while !self.mailbox.is_set() {
            if attempts >= self.config.handshake_attempts {
                return Err(TeclaError::HandshakeFailed { attempts });
            }
            attempts += 1;
            self.input.tab()?;
            tokio::time::sleep(self.config.handshake_delay).await;
        }
        self.mailbox.clear();
        Ok(())
    }
}
