// Session - shared browser handle with bounded element waits
//
// One session is opened before all scenarios and closed after the last one;
// every page object holds a clone of the same `Session`. The original
// design kept the handle in a static field populated by framework hooks;
// here it is passed explicitly (lifecycle trait + scoped run helper), so
// there is no hidden global and teardown is guaranteed on every path.

use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::FutureExt;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::driver::{Driver, ElementHandle, Selector};
use crate::error::{Error, Result};

/// Default bound for element lookups, matching the original harness.
pub const DEFAULT_IMPLICIT_WAIT: Duration = Duration::from_secs(5);

/// Default polling interval for element lookups.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Wait configuration applied to every element lookup in a session.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// How long lookups retry before failing with element-not-found.
    pub implicit_wait: Duration,
    /// Delay between lookup attempts.
    pub poll_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            implicit_wait: DEFAULT_IMPLICIT_WAIT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl SessionConfig {
    /// Overrides the implicit wait bound.
    pub fn with_implicit_wait(mut self, wait: Duration) -> Self {
        self.implicit_wait = wait;
        self
    }

    /// Overrides the polling interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

/// The one live browser session of a test run.
///
/// Cheap to clone; all clones share the same underlying driver. Page
/// objects never own the session, they borrow into the run's single
/// lifecycle.
#[derive(Clone)]
pub struct Session {
    driver: Arc<dyn Driver>,
    config: SessionConfig,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(driver: Arc<dyn Driver>, config: SessionConfig) -> Self {
        Self { driver, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Navigates the session to `url`.
    pub async fn goto(&self, url: &str) -> Result<()> {
        debug!(url, "navigating");
        self.driver.goto(url).await
    }

    /// URL of the currently displayed page.
    pub async fn current_url(&self) -> Result<String> {
        self.driver.current_url().await
    }

    /// Resolves a selector, retrying until the element is present or the
    /// implicit wait elapses.
    pub async fn locate(&self, selector: &Selector) -> Result<ElementHandle> {
        let start = Instant::now();
        loop {
            if let Some(element) = self.driver.query(selector).await? {
                return Ok(element);
            }
            if start.elapsed() >= self.config.implicit_wait {
                return Err(Error::ElementNotFound {
                    selector: selector.to_string(),
                    waited_ms: self.config.implicit_wait.as_millis() as u64,
                });
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    /// Resolves all matches for a selector, in document order.
    ///
    /// Retries until at least one element matches or the implicit wait
    /// elapses, then returns whatever matched, possibly nothing. An empty
    /// result is the caller's signal, not an error; only the caller knows
    /// whether an empty listing is legitimate.
    pub async fn locate_all(&self, selector: &Selector) -> Result<Vec<ElementHandle>> {
        let start = Instant::now();
        loop {
            let elements = self.driver.query_all(selector).await?;
            if !elements.is_empty() || start.elapsed() >= self.config.implicit_wait {
                return Ok(elements);
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }

    /// One-shot resolve without waiting. Used by the expect API, which
    /// carries its own retry loop.
    pub async fn try_locate(&self, selector: &Selector) -> Result<Option<ElementHandle>> {
        self.driver.query(selector).await
    }

    pub(crate) async fn close_driver(&self) -> Result<()> {
        self.driver.close().await
    }
}

/// Opens and closes the one browser session of a run.
#[async_trait]
pub trait BrowserLifecycle: Send + Sync {
    /// Provisions a browser and returns the session handle. The session
    /// comes up in a deterministic viewport state with the bounded
    /// implicit wait already configured.
    async fn open(&self) -> Result<Session>;

    /// Terminates the browser and releases its resources. Safe to call
    /// even if `open` only partially succeeded.
    async fn close(&self, session: Session) -> Result<()>;
}

/// Runs `scenario` inside a scoped session: open, run, always close.
///
/// The session is released on the failure path too, so a failing scenario
/// never leaks a browser process. That includes panics: a scenario that
/// fails an `assert!` is caught, the session is closed, and the panic is
/// resumed afterwards. A close failure after a failed scenario is logged
/// rather than returned, to keep the scenario's own error as the reported
/// outcome.
pub async fn run_with_session<L, F, Fut, T>(lifecycle: &L, scenario: F) -> Result<T>
where
    L: BrowserLifecycle + ?Sized,
    F: FnOnce(Session) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let session = lifecycle.open().await?;
    let outcome = AssertUnwindSafe(scenario(session.clone())).catch_unwind().await;
    let closed = lifecycle.close(session).await;
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(panic) => {
            if let Err(close_err) = closed {
                warn!(error = %close_err, "browser close failed after scenario panic");
            }
            std::panic::resume_unwind(panic);
        }
    };
    match (outcome, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(close_err)) => Err(close_err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(close_err)) => {
            warn!(error = %close_err, "browser close failed after scenario error");
            Err(err)
        }
    }
}
