//! Browser control over the Chrome DevTools Protocol.
//!
//! One persistent browser instance per run, at most one page open at a
//! time. The driver is a trait so the test loop can run against a mock
//! without a browser on the machine.

use crate::config::HarnessConfig;
use crate::error::{TeclaError, TeclaResult};
use crate::signal::{PageSignal, SignalMailbox};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::js_protocol::runtime::EventConsoleApiCalled;
use chromiumoxide::Page;
use futures::StreamExt;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Browser operations the test loop needs.
///
/// `open_page` always leaves exactly one page open: any pages from a
/// previous reset are closed first, the new page is navigated and its
/// console is wired to the signal mailbox.
#[async_trait]
pub trait BrowserDriver: Send {
    /// Close any open pages, open one page at `url`, wait for the
    /// document to load and attach the console listener.
    async fn open_page(&mut self, url: &str) -> TeclaResult<()>;

    /// Whether the current page is gone (closed or target detached)
    async fn page_closed(&mut self) -> bool;

    /// URL the current page reports; empty when no page is open
    async fn page_url(&mut self) -> TeclaResult<String>;

    /// Browser version, for labeling the results file
    async fn version(&mut self) -> TeclaResult<String>;

    /// Full browser shutdown
    async fn close(&mut self) -> TeclaResult<()>;
}

/// Driver backed by a real chromium-family browser over CDP.
#[derive(Debug)]
pub struct CdpDriver {
    browser: Browser,
    handler_task: JoinHandle<()>,
    listener_task: Option<JoinHandle<()>>,
    page: Option<Page>,
    mailbox: Arc<SignalMailbox>,
}

impl CdpDriver {
    /// Launch a headful browser per the config.
    ///
    /// Headful is deliberate: the run measures what the chrome of a
    /// visible, focused window does with shortcuts, which a headless
    /// instance has no opinion about.
    pub async fn launch(
        config: &HarnessConfig,
        mailbox: Arc<SignalMailbox>,
    ) -> TeclaResult<Self> {
        let mut builder = BrowserConfig::builder().with_head();
        if let Some(executable) = config.executable() {
            builder = builder.chrome_executable(executable);
        }
        let browser_config = builder.build().map_err(TeclaError::browser_launch)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| TeclaError::browser_launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
            listener_task: None,
            page: None,
            mailbox,
        })
    }

    async fn attach_console_listener(&mut self, page: &Page) -> TeclaResult<()> {
        let mut events = page
            .event_listener::<EventConsoleApiCalled>()
            .await
            .map_err(|e| TeclaError::page(e.to_string()))?;
        let mailbox = self.mailbox.clone();
        self.listener_task = Some(tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if let Some(signal) = signal_from_event(event.as_ref()) {
                    mailbox.store(signal);
                }
            }
        }));
        Ok(())
    }
}

/// First console argument, parsed as a page signal. Messages that do
/// not carry one are ignored.
fn signal_from_event(event: &EventConsoleApiCalled) -> Option<PageSignal> {
    event
        .args
        .first()
        .and_then(|arg| arg.value.as_ref())
        .and_then(PageSignal::from_console_value)
}

#[async_trait]
impl BrowserDriver for CdpDriver {
    async fn open_page(&mut self, url: &str) -> TeclaResult<()> {
        if let Some(task) = self.listener_task.take() {
            task.abort();
        }
        self.page = None;
        let pages = self
            .browser
            .pages()
            .await
            .map_err(|e| TeclaError::page(e.to_string()))?;
        for page in pages {
            let _ = page.close().await;
        }

        let page = self
            .browser
            .new_page(url)
            .await
            .map_err(|e| TeclaError::navigation(url, e.to_string()))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| TeclaError::navigation(url, e.to_string()))?;

        self.attach_console_listener(&page).await?;
        self.page = Some(page);
        Ok(())
    }

    async fn page_closed(&mut self) -> bool {
        match &self.page {
            None => true,
            // A target that no longer answers is closed for our
            // purposes, whatever took it down.
            Some(page) => page.url().await.is_err(),
        }
    }

    async fn page_url(&mut self) -> TeclaResult<String> {
        match &self.page {
            None => Ok(String::new()),
            Some(page) => Ok(page
                .url()
                .await
                .map_err(|e| TeclaError::page(e.to_string()))?
                .unwrap_or_default()),
        }
    }

    async fn version(&mut self) -> TeclaResult<String> {
        let info = self
            .browser
            .version()
            .await
            .map_err(|e| TeclaError::page(e.to_string()))?;
        // "Chrome/121.0.6167.85" -> "121.0.6167.85"
        Ok(info
            .product
            .split('/')
            .next_back()
            .unwrap_or(info.product.as_str())
            .to_string())
    }

    async fn close(&mut self) -> TeclaResult<()> {
        if let Some(task) = self.listener_task.take() {
            task.abort();
        }
        if let Some(page) = self.page.take() {
            let _ = page.close().await;
        }
        self.browser
            .close()
            .await
            .map_err(|e| TeclaError::browser_launch(e.to_string()))?;
        self.handler_task.abort();
        Ok(())
    }
}

/// Scripted driver for running the loop without a browser.
#[derive(Debug, Default)]
pub struct MockDriver {
    /// URL the mock page currently reports
    pub url: String,
    /// Whether a page is open
    pub page_open: bool,
    /// Version label to report
    pub version_label: String,
    /// Method calls in order, for assertions
    pub call_history: Vec<String>,
}

impl MockDriver {
    /// Create a mock reporting the given version
    #[must_use]
    pub fn new(version_label: impl Into<String>) -> Self {
        Self {
            version_label: version_label.into(),
            ..Self::default()
        }
    }

    /// How many times `open_page` ran (setup plus recoveries)
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.call_history
            .iter()
            .filter(|c| c.starts_with("open_page"))
            .count()
    }
}

#[async_trait]
impl BrowserDriver for MockDriver {
    async fn open_page(&mut self, url: &str) -> TeclaResult<()> {
        self.call_history.push(format!("open_page:{url}"));
        self.url = url.to_string();
        self.page_open = true;
        Ok(())
    }

    async fn page_closed(&mut self) -> bool {
        !self.page_open
    }

    async fn page_url(&mut self) -> TeclaResult<String> {
        Ok(self.url.clone())
    }

    async fn version(&mut self) -> TeclaResult<String> {
        Ok(self.version_label.clone())
    }

    async fn close(&mut self) -> TeclaResult<()> {
        self.call_history.push("close".to_string());
        self.page_open = false;
        Ok(())
    }
}
