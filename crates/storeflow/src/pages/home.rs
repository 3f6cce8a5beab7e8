// Store landing page

use tracing::debug;

use crate::driver::Selector;
use crate::error::{Error, Result};
use crate::pages::{AccessoriesPage, CartPage};
use crate::session::Session;

/// Fixed entry URL of the storefront under test.
pub const STORE_URL: &str = "https://atid.store";

const ACCESSORIES_LINK: &str = "//a[contains(text(),'Accessories')]";
const HEADER_CART: &str = "ast-site-header-cart-li";
const VIEW_CART_TEXT: &str = "View cart";
const CART_COUNT_BADGE: &str = "//span[@class='count']";

/// The store landing page.
///
/// Valid while the browser is displaying the storefront home; entry point
/// of both scenario flows.
#[derive(Debug)]
pub struct HomePage {
    session: Session,
}

impl HomePage {
    /// Binds a home page object to the shared session. Does not navigate.
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Navigates directly to the store's entry URL and waits for the
    /// header cart to render.
    pub async fn open_store(&self) -> Result<()> {
        self.session.goto(STORE_URL).await?;
        self.session
            .locate(&Selector::class_name(HEADER_CART))
            .await?;
        debug!(url = STORE_URL, "store landing page ready");
        Ok(())
    }

    /// Opens the Accessories department.
    pub async fn go_to_accessories(&self) -> Result<AccessoriesPage> {
        self.session
            .locate(&Selector::xpath(ACCESSORIES_LINK))
            .await?
            .click()
            .await?;
        AccessoriesPage::attach(self.session.clone()).await
    }

    /// Opens the cart page.
    ///
    /// The "View cart" link only becomes clickable once the pointer is
    /// over the header cart, so this is an explicit hover-then-click, not
    /// a single click.
    pub async fn go_to_cart(&self) -> Result<CartPage> {
        self.session
            .locate(&Selector::class_name(HEADER_CART))
            .await?
            .hover()
            .await?;
        self.session
            .locate(&Selector::link_text(VIEW_CART_TEXT))
            .await?
            .click()
            .await?;
        CartPage::attach(self.session.clone()).await
    }

    /// Reads the cart badge and parses it as an item count.
    ///
    /// A badge that is absent or non-numeric is an error; this read is a
    /// test signal and must never default to zero.
    pub async fn cart_count(&self) -> Result<u32> {
        let badge = self
            .session
            .locate(&Selector::xpath(CART_COUNT_BADGE))
            .await?;
        let text = badge.text().await?;
        text.trim()
            .parse()
            .map_err(|source| Error::CartBadge { text, source })
    }
}
