//! storeflow: page-object end-to-end test harness for the atid.store storefront
//!
//! Automates the browse → select product → add to cart → checkout journey
//! and validates its observable outcomes (cart badge count, form-validation
//! error display) through a set of cooperating page objects.
//!
//! # Navigation protocol
//!
//! Each page object wraps one storefront page. A navigation method performs
//! its action and then waits for the destination page's defining element
//! before returning the next page object, so holding a page object always
//! means the page is ready for further interaction:
//!
//! ```ignore
//! use storeflow::{ChromeLifecycle, HomePage, run_with_session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let lifecycle = ChromeLifecycle::default();
//!     run_with_session(&lifecycle, |session| async move {
//!         let home = HomePage::new(session);
//!         home.open_store().await?;
//!         let accessories = home.go_to_accessories().await?;
//!         let product = accessories.select_random_product().await?;
//!         product.add_to_cart().await?;
//!         assert_eq!(home.cart_count().await?, 1);
//!         Ok(())
//!     })
//!     .await?;
//!     Ok(())
//! }
//! ```
//!
//! # Data-driven runs
//!
//! ```ignore
//! use storeflow::{read_people, scenarios};
//!
//! let people = read_people("testdata/people.json")?;
//! for person in &people {
//!     scenarios::checkout_expecting_validation_error(&session, person).await?;
//! }
//! ```
//!
//! The browser-automation engine sits behind the [`Driver`] trait; the
//! bundled [`ChromeLifecycle`] drives real Chrome over CDP, and tests can
//! substitute any in-process implementation.

mod assertions;
mod cdp;
mod driver;
mod error;
mod locator;
mod person;
mod session;

pub mod pages;
pub mod report;
pub mod scenarios;

// Re-export error types
pub use error::{Error, Result};

// Re-export the automation-collaborator seam
pub use driver::{Driver, Element, ElementHandle, Selector};

// Re-export session and lifecycle management
pub use session::{
    BrowserLifecycle, Session, SessionConfig, run_with_session, DEFAULT_IMPLICIT_WAIT,
    DEFAULT_POLL_INTERVAL,
};

// Re-export the Chrome binding
pub use cdp::{ChromeConfig, ChromeLifecycle};

// Re-export the assertions API
pub use assertions::expect;
pub use locator::Locator;

// Re-export data records
pub use person::{read_people, Person};

// Re-export page objects at the crate root
pub use pages::{AccessoriesPage, CartPage, CheckoutPage, HomePage, ProductPage, STORE_URL};
