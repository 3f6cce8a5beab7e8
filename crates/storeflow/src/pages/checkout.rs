// Billing/checkout form page

use tracing::debug;

use crate::driver::Selector;
use crate::error::Result;
use crate::locator::Locator;
use crate::person::Person;
use crate::session::Session;

const CHECKOUT_FORM: &str = "checkout";
const BILLING_FIRST_NAME: &str = "billing_first_name";
const BILLING_LAST_NAME: &str = "billing_last_name";
const BILLING_ADDRESS: &str = "billing_address_1";
const BILLING_POSTCODE: &str = "billing_postcode";
const BILLING_CITY: &str = "billing_city";
const BILLING_PHONE: &str = "billing_phone";
const BILLING_EMAIL: &str = "billing_email";
const VALIDATION_ALERT: &str = "//ul[@role='alert']";

/// The billing/checkout form.
#[derive(Debug)]
pub struct CheckoutPage {
    session: Session,
}

impl CheckoutPage {
    /// Waits for the checkout form itself, then binds the page object.
    pub(crate) async fn attach(session: Session) -> Result<Self> {
        session.locate(&Selector::name(CHECKOUT_FORM)).await?;
        debug!("checkout form ready");
        Ok(Self { session })
    }

    /// Populates the seven billing fields from `person`, then submits the
    /// checkout form as one explicit terminal step.
    ///
    /// Submission goes through the form element itself, not through
    /// whichever field happens to carry a submit binding in the markup.
    pub async fn fill_form(&self, person: &Person) -> Result<()> {
        let fields: [(&str, &str); 7] = [
            (BILLING_FIRST_NAME, &person.first_name),
            (BILLING_LAST_NAME, &person.last_name),
            (BILLING_ADDRESS, &person.address),
            (BILLING_POSTCODE, &person.postcode),
            (BILLING_CITY, &person.city),
            (BILLING_PHONE, &person.phone),
            (BILLING_EMAIL, &person.email),
        ];
        for (id, value) in fields {
            self.session
                .locate(&Selector::id(id))
                .await?
                .type_text(value)
                .await?;
        }
        debug!(email = %person.email, "submitting checkout form");
        self.session
            .locate(&Selector::name(CHECKOUT_FORM))
            .await?
            .submit()
            .await
    }

    /// Locator for the validation-error alert region.
    ///
    /// Returns the handle only; asserting visibility or content is the
    /// orchestrator's job.
    pub fn validation_error(&self) -> Locator {
        Locator::new(self.session.clone(), Selector::xpath(VALIDATION_ALERT))
    }
}
