// Cart contents page

use tracing::debug;

use crate::driver::Selector;
use crate::error::Result;
use crate::pages::CheckoutPage;
use crate::session::Session;

const PROCEED_TO_CHECKOUT: &str = "wc-proceed-to-checkout";

/// The current cart contents.
#[derive(Debug)]
pub struct CartPage {
    session: Session,
}

impl CartPage {
    /// Waits for the checkout control, then binds the page object.
    pub(crate) async fn attach(session: Session) -> Result<Self> {
        session
            .locate(&Selector::class_name(PROCEED_TO_CHECKOUT))
            .await?;
        debug!("cart page ready");
        Ok(Self { session })
    }

    /// Activates the checkout control and opens the billing form.
    pub async fn proceed_to_checkout(&self) -> Result<CheckoutPage> {
        self.session
            .locate(&Selector::class_name(PROCEED_TO_CHECKOUT))
            .await?
            .click()
            .await?;
        CheckoutPage::attach(self.session.clone()).await
    }
}
