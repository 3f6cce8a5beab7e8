// Driver - the seam between page objects and the automation engine
//
// Page objects store selector specs, never resolved handles, and re-resolve
// on every access so nothing goes stale across navigations. The engine
// behind the seam only answers one-shot queries; the bounded implicit wait
// lives above it in `Session`, which keeps wait semantics identical across
// engines (real Chrome over CDP, or the scripted fake used in tests).

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

/// A selector spec scoped to one page.
///
/// The variants mirror the lookup strategies the target site is addressed
/// with; the exact selector strings are part of the site contract and are
/// kept verbatim in the page objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// CSS selector
    Css(String),
    /// XPath expression
    XPath(String),
    /// Element id attribute
    Id(String),
    /// Element name attribute
    Name(String),
    /// Single class name
    ClassName(String),
    /// Anchor matched by its visible text
    LinkText(String),
}

impl Selector {
    pub fn css(spec: impl Into<String>) -> Self {
        Selector::Css(spec.into())
    }

    pub fn xpath(spec: impl Into<String>) -> Self {
        Selector::XPath(spec.into())
    }

    pub fn id(spec: impl Into<String>) -> Self {
        Selector::Id(spec.into())
    }

    pub fn name(spec: impl Into<String>) -> Self {
        Selector::Name(spec.into())
    }

    pub fn class_name(spec: impl Into<String>) -> Self {
        Selector::ClassName(spec.into())
    }

    pub fn link_text(spec: impl Into<String>) -> Self {
        Selector::LinkText(spec.into())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Css(s) => write!(f, "css={s}"),
            Selector::XPath(s) => write!(f, "xpath={s}"),
            Selector::Id(s) => write!(f, "id={s}"),
            Selector::Name(s) => write!(f, "name={s}"),
            Selector::ClassName(s) => write!(f, "class={s}"),
            Selector::LinkText(s) => write!(f, "link-text={s}"),
        }
    }
}

/// A live handle to one element on the currently displayed page.
///
/// Handles are only valid while the page that produced them is displayed;
/// callers that outlive a navigation go back through [`Driver::query`].
#[async_trait]
pub trait Element: Send + Sync {
    /// Clicks the element.
    async fn click(&self) -> Result<()>;

    /// Moves the pointer over the element without clicking.
    ///
    /// Modeled as its own action because some controls (the header-cart
    /// "View cart" link) only become clickable after a pointer-over fires.
    async fn hover(&self) -> Result<()>;

    /// Types text into the element.
    async fn type_text(&self, text: &str) -> Result<()>;

    /// Returns the element's rendered text.
    async fn text(&self) -> Result<String>;

    /// Whether the element is currently rendered visibly.
    async fn is_displayed(&self) -> Result<bool>;

    /// Submits the form this element belongs to (or is).
    async fn submit(&self) -> Result<()>;
}

/// Shared, cheaply clonable element handle.
pub type ElementHandle = Arc<dyn Element>;

/// Capability contract the browser-automation engine implements.
///
/// Queries are one-shot: a missing element is `Ok(None)` / an empty list,
/// not an error. Retry-until-present is layered on top by
/// [`Session`](crate::session::Session).
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigates the session to the given URL.
    async fn goto(&self, url: &str) -> Result<()>;

    /// Finds the first element matching the selector on the current page.
    async fn query(&self, selector: &Selector) -> Result<Option<ElementHandle>>;

    /// Finds all elements matching the selector, in document order.
    async fn query_all(&self, selector: &Selector) -> Result<Vec<ElementHandle>>;

    /// URL of the currently displayed page.
    async fn current_url(&self) -> Result<String>;

    /// Tears down the underlying browser session.
    ///
    /// Must be safe to call after a partial failure.
    async fn close(&self) -> Result<()>;
}
