// Page objects - one per storefront page, chained by navigation methods
//
// Navigation protocol: each navigation method performs its action against
// the live page, then waits for the destination page's defining element
// before handing back the next page object. A page object you hold is
// therefore always ready for further interaction; constructing one never
// navigates by itself.
//
// Navigation graph: Home -> Accessories -> Product; Home -> Cart -> Checkout.

mod accessories;
mod cart;
mod checkout;
mod home;
mod product;

pub use accessories::AccessoriesPage;
pub use cart::CartPage;
pub use checkout::CheckoutPage;
pub use home::{HomePage, STORE_URL};
pub use product::ProductPage;
