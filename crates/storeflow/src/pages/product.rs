// Product detail page

use tracing::debug;

use crate::driver::Selector;
use crate::error::Result;
use crate::session::Session;

const ADD_TO_CART: &str = "add-to-cart";

/// One product's detail page.
#[derive(Debug)]
pub struct ProductPage {
    session: Session,
}

impl ProductPage {
    /// Waits for the add-to-cart control, then binds the page object.
    pub(crate) async fn attach(session: Session) -> Result<Self> {
        session.locate(&Selector::name(ADD_TO_CART)).await?;
        debug!("product detail page ready");
        Ok(Self { session })
    }

    /// Adds the displayed product to the cart.
    ///
    /// Cart-state effects are verified separately through
    /// [`HomePage::cart_count`](crate::pages::HomePage::cart_count).
    pub async fn add_to_cart(&self) -> Result<()> {
        self.session
            .locate(&Selector::name(ADD_TO_CART))
            .await?
            .click()
            .await
    }
}
