// Locator - lazy selector bound to the live session
//
// A locator stores only a selector spec and re-resolves it against the
// current page on every access, so a handle produced before a navigation
// can never be used stale afterwards.

use crate::driver::{ElementHandle, Selector};
use crate::error::Result;
use crate::session::Session;

/// A way to find one element on whatever page is currently displayed.
///
/// Lazy: nothing is queried until an accessor runs. Page objects hand out
/// locators (rather than resolved handles) wherever the caller is expected
/// to do its own asserting, e.g. the checkout validation-error region.
#[derive(Debug, Clone)]
pub struct Locator {
    session: Session,
    selector: Selector,
}

impl Locator {
    pub(crate) fn new(session: Session, selector: Selector) -> Self {
        Self { session, selector }
    }

    /// Returns the selector spec for this locator.
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Resolves to a live element handle, waiting up to the session's
    /// implicit wait bound.
    pub async fn resolve(&self) -> Result<ElementHandle> {
        self.session.locate(&self.selector).await
    }

    /// Whether a matching element currently exists and is displayed.
    ///
    /// One-shot, no waiting: an absent element is `false`, not an error.
    pub async fn is_visible(&self) -> Result<bool> {
        match self.session.try_locate(&self.selector).await? {
            Some(element) => element.is_displayed().await,
            None => Ok(false),
        }
    }

    /// Rendered text of the matching element.
    pub async fn text(&self) -> Result<String> {
        self.resolve().await?.text().await
    }

    /// Number of elements currently matching the selector.
    pub async fn count(&self) -> Result<usize> {
        Ok(self.session.locate_all(&self.selector).await?.len())
    }
}
