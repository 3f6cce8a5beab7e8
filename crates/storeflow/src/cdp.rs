// Chrome binding over CDP
//
// Implements the driver seam against a real Chrome/Chromium via
// chromiumoxide. One browser process, one page, owned by the lifecycle;
// every lookup is a fresh one-shot query (waiting happens in `Session`).

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchMouseEventParams, DispatchMouseEventType,
};
use chromiumoxide::element::Element as CdpElement;
use chromiumoxide::error::CdpError;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::Page;
use futures_util::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::driver::{Driver, Element, ElementHandle, Selector};
use crate::error::{Error, Result};
use crate::session::{BrowserLifecycle, Session, SessionConfig};

impl From<CdpError> for Error {
    fn from(err: CdpError) -> Self {
        Error::Driver(err.to_string())
    }
}

/// Launch configuration for the Chrome-backed session.
#[derive(Debug, Clone)]
pub struct ChromeConfig {
    /// Run without a visible window.
    pub headless: bool,
    /// Explicit Chrome/Chromium binary; autodetected when `None`.
    pub chrome_executable: Option<PathBuf>,
    /// Deterministic window size applied at launch.
    pub window_width: u32,
    /// See `window_width`.
    pub window_height: u32,
    /// Per-request CDP timeout.
    pub request_timeout: Duration,
    /// Wait configuration handed to the session.
    pub session: SessionConfig,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_executable: None,
            window_width: 1920,
            window_height: 1080,
            request_timeout: Duration::from_secs(30),
            session: SessionConfig::default(),
        }
    }
}

impl ChromeConfig {
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_chrome_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_executable = Some(path.into());
        self
    }

    pub fn with_session(mut self, session: SessionConfig) -> Self {
        self.session = session;
        self
    }
}

/// Opens and closes the one Chrome process of a test run.
pub struct ChromeLifecycle {
    config: ChromeConfig,
}

impl ChromeLifecycle {
    pub fn new(config: ChromeConfig) -> Self {
        Self { config }
    }
}

impl Default for ChromeLifecycle {
    fn default() -> Self {
        Self::new(ChromeConfig::default())
    }
}

#[async_trait]
impl BrowserLifecycle for ChromeLifecycle {
    async fn open(&self) -> Result<Session> {
        let mut builder = BrowserConfig::builder();
        if !self.config.headless {
            builder = builder.with_head();
        }
        if let Some(ref path) = self.config.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        builder = builder
            .window_size(self.config.window_width, self.config.window_height)
            .viewport(Viewport {
                width: self.config.window_width,
                height: self.config.window_height,
                device_scale_factor: Some(1.0),
                emulating_mobile: false,
                is_landscape: true,
                has_touch: false,
            })
            .request_timeout(self.config.request_timeout)
            .arg("--start-maximized")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--no-sandbox");

        let browser_config = builder
            .build()
            .map_err(|e| Error::LaunchFailed(format!("invalid browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| Error::LaunchFailed(e.to_string()))?;

        // Drive the CDP event stream for the lifetime of the session.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                debug!(?event, "browser event");
            }
            debug!("browser event handler exited");
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| Error::LaunchFailed(e.to_string()))?;

        info!(
            headless = self.config.headless,
            width = self.config.window_width,
            height = self.config.window_height,
            implicit_wait_ms = self.config.session.implicit_wait.as_millis() as u64,
            "chrome session open"
        );

        let driver = CdpDriver {
            browser: Mutex::new(Some(browser)),
            page,
            handler_task: Mutex::new(Some(handler_task)),
        };
        Ok(Session::new(Arc::new(driver), self.config.session))
    }

    async fn close(&self, session: Session) -> Result<()> {
        session.close_driver().await
    }
}

struct CdpDriver {
    browser: Mutex<Option<Browser>>,
    page: Page,
    handler_task: Mutex<Option<JoinHandle<()>>>,
}

impl CdpDriver {
    /// Renders a selector as either a CSS query or an XPath query.
    fn compile(selector: &Selector) -> Query {
        match selector {
            Selector::Css(s) => Query::Css(s.clone()),
            Selector::Id(s) => Query::Css(format!(r#"[id="{s}"]"#)),
            Selector::Name(s) => Query::Css(format!(r#"[name="{s}"]"#)),
            Selector::ClassName(s) => Query::Css(format!(".{s}")),
            Selector::XPath(s) => Query::XPath(s.clone()),
            Selector::LinkText(s) => Query::XPath(format!("//a[contains(text(),'{s}')]")),
        }
    }
}

enum Query {
    Css(String),
    XPath(String),
}

#[async_trait]
impl Driver for CdpDriver {
    async fn goto(&self, url: &str) -> Result<()> {
        self.page.goto(url).await?;
        let _ = self.page.wait_for_navigation().await;
        Ok(())
    }

    async fn query(&self, selector: &Selector) -> Result<Option<ElementHandle>> {
        Ok(self.query_all(selector).await?.into_iter().next())
    }

    async fn query_all(&self, selector: &Selector) -> Result<Vec<ElementHandle>> {
        let found = match Self::compile(selector) {
            Query::Css(css) => self.page.find_elements(css).await,
            Query::XPath(xpath) => self.page.find_xpaths(xpath).await,
        };
        let elements = match found {
            Ok(elements) => elements,
            // A page with no matching nodes is an empty result, not a
            // driver fault.
            Err(CdpError::NotFound) => Vec::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(elements
            .into_iter()
            .map(|element| {
                Arc::new(CdpElementHandle {
                    element,
                    page: self.page.clone(),
                }) as ElementHandle
            })
            .collect())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.page.url().await?.unwrap_or_default())
    }

    async fn close(&self) -> Result<()> {
        // The handler must keep driving the connection while the close
        // command goes out; it exits on its own once the connection drops.
        let outcome = match self.browser.lock().await.take() {
            Some(mut browser) => {
                if let Err(err) = browser.close().await {
                    warn!(error = %err, "graceful browser close failed, killing process");
                    let _ = browser.kill().await;
                    Err(Error::CloseFailed(err.to_string()))
                } else {
                    let _ = browser.wait().await;
                    info!("chrome session closed");
                    Ok(())
                }
            }
            None => Ok(()),
        };
        // Backstop for the failure path; a finished task ignores the abort.
        if let Some(task) = self.handler_task.lock().await.take() {
            task.abort();
        }
        outcome
    }
}

struct CdpElementHandle {
    element: CdpElement,
    page: Page,
}

#[async_trait]
impl Element for CdpElementHandle {
    async fn click(&self) -> Result<()> {
        self.element.scroll_into_view().await?;
        self.element.click().await?;
        Ok(())
    }

    async fn hover(&self) -> Result<()> {
        // Pointer-over without a press: move the mouse to the element's
        // clickable point so hover-revealed controls render.
        self.element.scroll_into_view().await?;
        let point = self.element.clickable_point().await?;
        let moved = DispatchMouseEventParams::builder()
            .r#type(DispatchMouseEventType::MouseMoved)
            .x(point.x)
            .y(point.y)
            .build()
            .map_err(|e| Error::Driver(e.to_string()))?;
        self.page.execute(moved).await?;
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<()> {
        self.element.scroll_into_view().await?;
        self.element.focus().await?;
        self.element.type_str(text).await?;
        Ok(())
    }

    async fn text(&self) -> Result<String> {
        Ok(self.element.inner_text().await?.unwrap_or_default())
    }

    async fn is_displayed(&self) -> Result<bool> {
        let returns = self
            .element
            .call_js_fn(
                "function() { \
                    return this.getClientRects().length > 0 \
                        && window.getComputedStyle(this).visibility !== 'hidden'; \
                }",
                false,
            )
            .await?;
        Ok(matches!(
            returns.result.value,
            Some(serde_json::Value::Bool(true))
        ))
    }

    async fn submit(&self) -> Result<()> {
        // requestSubmit (when present) runs the site's submit handlers,
        // which plain submit() would bypass.
        self.element
            .call_js_fn(
                "function() { \
                    const form = this.form || this; \
                    if (form.requestSubmit) { form.requestSubmit(); } \
                    else { form.submit(); } \
                }",
                false,
            )
            .await?;
        Ok(())
    }
}
