// Assertions - auto-retry assertions for scenario final checks
//
// Provides an expect() API that retries until the condition holds or a
// timeout elapses, so a check issued right after a navigation does not
// race the page's rendering.

use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::locator::Locator;

/// Default timeout for assertions (matches the session's implicit wait).
const DEFAULT_ASSERTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Default polling interval for assertions.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Creates an expectation for a locator with auto-retry behavior.
///
/// ```ignore
/// expect(checkout.validation_error()).to_be_visible().await?;
/// ```
pub fn expect(locator: Locator) -> Expectation {
    Expectation::new(locator)
}

/// Expectation wraps a locator and provides assertion methods with auto-retry.
pub struct Expectation {
    locator: Locator,
    timeout: Duration,
    poll_interval: Duration,
    negate: bool,
}

#[allow(clippy::wrong_self_convention)]
impl Expectation {
    fn new(locator: Locator) -> Self {
        Self {
            locator,
            timeout: DEFAULT_ASSERTION_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            negate: false,
        }
    }

    /// Sets a custom timeout for this assertion.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a custom poll interval for this assertion.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Negates the assertion.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = true;
        self
    }

    /// Asserts that the element is visible, retrying until it becomes
    /// visible or the timeout elapses.
    pub async fn to_be_visible(self) -> Result<()> {
        let selector = self.locator.selector().to_string();
        let negate = self.negate;
        self.poll(
            |locator| async move { locator.is_visible().await },
            move |timeout| {
                if negate {
                    format!(
                        "Expected element '{selector}' NOT to be visible, but it was visible after {timeout:?}"
                    )
                } else {
                    format!(
                        "Expected element '{selector}' to be visible, but it was not visible after {timeout:?}"
                    )
                }
            },
        )
        .await
    }

    /// Asserts that the element's text contains `expected`.
    pub async fn to_contain_text(self, expected: &str) -> Result<()> {
        let selector = self.locator.selector().to_string();
        let negate = self.negate;
        let needle = expected.to_string();
        let check = needle.clone();
        self.poll(
            move |locator| {
                let needle = check.clone();
                async move {
                    match locator.is_visible().await? {
                        true => Ok(locator.text().await?.contains(&needle)),
                        false => Ok(false),
                    }
                }
            },
            move |timeout| {
                let polarity = if negate { "NOT to" } else { "to" };
                format!(
                    "Expected element '{selector}' {polarity} contain text {needle:?} within {timeout:?}"
                )
            },
        )
        .await
    }

    /// Asserts that the element's text equals `expected` exactly.
    pub async fn to_have_text(self, expected: &str) -> Result<()> {
        let selector = self.locator.selector().to_string();
        let negate = self.negate;
        let wanted = expected.to_string();
        let check = wanted.clone();
        self.poll(
            move |locator| {
                let wanted = check.clone();
                async move {
                    match locator.is_visible().await? {
                        true => Ok(locator.text().await? == wanted),
                        false => Ok(false),
                    }
                }
            },
            move |timeout| {
                let polarity = if negate { "NOT to" } else { "to" };
                format!(
                    "Expected element '{selector}' {polarity} have text {wanted:?} within {timeout:?}"
                )
            },
        )
        .await
    }

    async fn poll<C, Fut, M>(self, condition: C, message: M) -> Result<()>
    where
        C: Fn(Locator) -> Fut,
        Fut: std::future::Future<Output = Result<bool>>,
        M: FnOnce(Duration) -> String,
    {
        let start = Instant::now();
        loop {
            let holds = condition(self.locator.clone()).await?;
            let matches = if self.negate { !holds } else { holds };
            if matches {
                return Ok(());
            }
            if start.elapsed() >= self.timeout {
                return Err(Error::AssertionTimeout(message(self.timeout)));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
