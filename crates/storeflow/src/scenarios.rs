// Scenarios - end-to-end flows composed from page objects
//
// This is the layer a test author writes: chain navigation methods, make
// one final assertion. Scenarios own no state beyond the page objects
// their navigation calls return.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::assertions::expect;
use crate::error::{Error, Result};
use crate::pages::HomePage;
use crate::person::Person;
use crate::session::Session;

/// Purchase flow: open the store, pick `quantity` random accessories one
/// after another, add each to the cart, then assert the cart badge counts
/// exactly `quantity` items.
///
/// After the first add-to-cart the browser shows a product detail page;
/// the second pick still resolves, because the detail page renders a
/// related-products listing with the same markup and product entries are
/// re-resolved on every access.
pub async fn purchase_random_accessories(session: &Session, quantity: u32) -> Result<()> {
    // A seeded-from-entropy rng rather than the thread-local one, so the
    // scenario future stays Send.
    purchase_random_accessories_with(session, quantity, &mut StdRng::from_entropy()).await
}

/// [`purchase_random_accessories`] with a caller-supplied random source.
pub async fn purchase_random_accessories_with<R>(
    session: &Session,
    quantity: u32,
    rng: &mut R,
) -> Result<()>
where
    R: Rng + ?Sized,
{
    let home = HomePage::new(session.clone());
    home.open_store().await?;

    let accessories = home.go_to_accessories().await?;
    for picked in 0..quantity {
        let product = accessories.select_random_product_with(rng).await?;
        product.add_to_cart().await?;
        info!(picked = picked + 1, quantity, "added random product to cart");
    }

    let count = home
        .cart_count()
        .await
        .map_err(|err| err.context("reading the cart badge after the purchase flow"))?;
    if count != quantity {
        return Err(Error::Assertion {
            context: "cart badge after purchase flow".into(),
            expected: quantity.to_string(),
            actual: count.to_string(),
        });
    }
    info!(count, "purchase flow complete");
    Ok(())
}

/// Invalid-checkout flow: add one random accessory to the cart, proceed to
/// checkout through the hover-revealed cart link, fill the billing form
/// from `person`, and assert that the site's validation-error region is
/// displayed.
///
/// `person` is expected to carry data the site rejects (e.g. a malformed
/// required field); the scenario fails if no validation error appears.
pub async fn checkout_expecting_validation_error(
    session: &Session,
    person: &Person,
) -> Result<()> {
    let home = HomePage::new(session.clone());
    home.open_store().await?;

    let accessories = home.go_to_accessories().await?;
    let product = accessories.select_random_product().await?;
    product.add_to_cart().await?;

    let cart = home.go_to_cart().await?;
    let checkout = cart.proceed_to_checkout().await?;
    checkout.fill_form(person).await?;

    expect(checkout.validation_error()).to_be_visible().await?;
    info!(email = %person.email, "validation error displayed as expected");
    Ok(())
}
