// Scripted in-memory storefront used by the integration suites.
//
// Models the real site's observable behavior against the exact selectors
// the page objects use: the header cart badge, the hover-revealed
// "View cart" link, the accessories grid (also rendered as related
// products on a product detail page), add-to-cart incrementing the badge,
// and checkout-form validation that raises the alert region on bad input.

#![allow(dead_code)] // each test binary uses a different slice of this module

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use storeflow::{
    BrowserLifecycle, Driver, Element, ElementHandle, Error, Result, Selector, Session,
    SessionConfig,
};

const BILLING_FIELDS: [&str; 7] = [
    "billing_first_name",
    "billing_last_name",
    "billing_address_1",
    "billing_postcode",
    "billing_city",
    "billing_phone",
    "billing_email",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageKind {
    Blank,
    Home,
    Accessories,
    Product(usize),
    Cart,
    Checkout,
}

#[derive(Debug)]
struct StoreState {
    current: PageKind,
    cart: u32,
    products: Vec<String>,
    cart_hovered: bool,
    form: HashMap<&'static str, String>,
    form_submitted: bool,
    alert_visible: bool,
    badge_override: Option<String>,
    listing_delay_polls: u32,
}

/// Handle to the scripted storefront; clones share state.
#[derive(Clone)]
pub struct FakeStore {
    state: Arc<Mutex<StoreState>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::with_products(vec![
            "Anchor Bracelet".into(),
            "Boho Bangle".into(),
            "Hair Pin".into(),
            "Bead Necklace".into(),
        ])
    }

    pub fn with_products(products: Vec<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState {
                current: PageKind::Blank,
                cart: 0,
                products,
                cart_hovered: false,
                form: HashMap::new(),
                form_submitted: false,
                alert_visible: false,
                badge_override: None,
                listing_delay_polls: 0,
            })),
        }
    }

    pub fn with_empty_listing() -> Self {
        Self::with_products(Vec::new())
    }

    /// Makes the cart badge render arbitrary text instead of the count.
    pub fn set_badge_text(&self, text: impl Into<String>) {
        self.state.lock().badge_override = Some(text.into());
    }

    /// Delays the product listing: the first `polls` queries see an empty
    /// grid, as if the page were still rendering.
    pub fn delay_listing(&self, polls: u32) {
        self.state.lock().listing_delay_polls = polls;
    }

    /// Opens a session over this storefront.
    pub fn session(&self, config: SessionConfig) -> Session {
        Session::new(Arc::new(FakeDriver(self.clone())), config)
    }

    pub fn cart_count(&self) -> u32 {
        self.state.lock().cart
    }

    pub fn form_value(&self, field: &str) -> Option<String> {
        self.state.lock().form.get(field).cloned()
    }

    pub fn form_submitted(&self) -> bool {
        self.state.lock().form_submitted
    }

    pub fn alert_visible(&self) -> bool {
        self.state.lock().alert_visible
    }

    fn element(&self, role: Role) -> ElementHandle {
        Arc::new(FakeElement {
            state: Arc::clone(&self.state),
            role,
        })
    }
}

struct FakeDriver(FakeStore);

#[async_trait]
impl Driver for FakeDriver {
    async fn goto(&self, url: &str) -> Result<()> {
        if !url.starts_with("https://atid.store") {
            return Err(Error::Driver(format!("unexpected navigation target: {url}")));
        }
        let mut state = self.0.state.lock();
        state.current = PageKind::Home;
        state.cart_hovered = false;
        Ok(())
    }

    async fn query(&self, selector: &Selector) -> Result<Option<ElementHandle>> {
        Ok(self.query_all(selector).await?.into_iter().next())
    }

    async fn query_all(&self, selector: &Selector) -> Result<Vec<ElementHandle>> {
        let mut state = self.0.state.lock();
        let current = state.current;
        let on_site = current != PageKind::Blank;

        let found: Vec<Role> = match selector {
            // Site header, rendered on every page.
            Selector::XPath(x) if x == "//span[@class='count']" && on_site => vec![Role::Badge],
            Selector::XPath(x) if x == "//a[contains(text(),'Accessories')]" && on_site => {
                vec![Role::AccessoriesLink]
            }
            Selector::ClassName(c) if c == "ast-site-header-cart-li" && on_site => {
                vec![Role::HeaderCart]
            }
            // Revealed only while the pointer is over the header cart.
            Selector::LinkText(t) if t == "View cart" && state.cart_hovered => {
                vec![Role::ViewCart]
            }
            // Product grid on the listing page, and as related products on
            // a product detail page.
            Selector::XPath(x)
                if x == "//ul[@class='products columns-4']"
                    && matches!(current, PageKind::Accessories | PageKind::Product(_)) =>
            {
                if state.listing_delay_polls > 0 {
                    state.listing_delay_polls -= 1;
                    Vec::new()
                } else {
                    vec![Role::ProductGrid]
                }
            }
            Selector::XPath(x)
                if x == "//ul[@class='products columns-4']/li"
                    && matches!(current, PageKind::Accessories | PageKind::Product(_)) =>
            {
                if state.listing_delay_polls > 0 {
                    state.listing_delay_polls -= 1;
                    Vec::new()
                } else {
                    (0..state.products.len()).map(Role::ProductEntry).collect()
                }
            }
            Selector::Name(n) if n == "add-to-cart" && matches!(current, PageKind::Product(_)) => {
                vec![Role::AddToCart]
            }
            Selector::ClassName(c)
                if c == "wc-proceed-to-checkout" && current == PageKind::Cart =>
            {
                vec![Role::ProceedToCheckout]
            }
            Selector::Name(n) if n == "checkout" && current == PageKind::Checkout => {
                vec![Role::CheckoutForm]
            }
            Selector::Id(id) if current == PageKind::Checkout => BILLING_FIELDS
                .iter()
                .copied()
                .filter(|field| *field == id.as_str())
                .map(Role::BillingField)
                .collect(),
            Selector::XPath(x) if x == "//ul[@role='alert']" && state.alert_visible => {
                vec![Role::Alert]
            }
            _ => Vec::new(),
        };

        drop(state);
        Ok(found.into_iter().map(|role| self.0.element(role)).collect())
    }

    async fn current_url(&self) -> Result<String> {
        let state = self.0.state.lock();
        Ok(match state.current {
            PageKind::Blank => "about:blank".into(),
            PageKind::Home => "https://atid.store/".into(),
            PageKind::Accessories => "https://atid.store/product-category/accessories/".into(),
            PageKind::Product(i) => format!("https://atid.store/product/{i}/"),
            PageKind::Cart => "https://atid.store/cart/".into(),
            PageKind::Checkout => "https://atid.store/checkout/".into(),
        })
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Role {
    Badge,
    AccessoriesLink,
    HeaderCart,
    ViewCart,
    ProductGrid,
    ProductEntry(usize),
    AddToCart,
    ProceedToCheckout,
    CheckoutForm,
    BillingField(&'static str),
    Alert,
}

struct FakeElement {
    state: Arc<Mutex<StoreState>>,
    role: Role,
}

#[async_trait]
impl Element for FakeElement {
    async fn click(&self) -> Result<()> {
        let mut state = self.state.lock();
        match self.role {
            Role::AccessoriesLink => state.current = PageKind::Accessories,
            Role::ViewCart => {
                state.current = PageKind::Cart;
                state.cart_hovered = false;
            }
            Role::ProductEntry(index) => state.current = PageKind::Product(index),
            Role::AddToCart => state.cart += 1,
            Role::ProceedToCheckout => state.current = PageKind::Checkout,
            Role::HeaderCart | Role::CheckoutForm => {}
            Role::Badge | Role::ProductGrid | Role::BillingField(_) | Role::Alert => {
                return Err(Error::Driver(format!("{:?} is not clickable", self.role)));
            }
        }
        Ok(())
    }

    async fn hover(&self) -> Result<()> {
        if let Role::HeaderCart = self.role {
            self.state.lock().cart_hovered = true;
        }
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<()> {
        match self.role {
            Role::BillingField(field) => {
                self.state.lock().form.insert(field, text.to_string());
                Ok(())
            }
            _ => Err(Error::Driver(format!("{:?} does not accept text", self.role))),
        }
    }

    async fn text(&self) -> Result<String> {
        let state = self.state.lock();
        Ok(match self.role {
            Role::Badge => state
                .badge_override
                .clone()
                .unwrap_or_else(|| state.cart.to_string()),
            Role::Alert => "Billing details are invalid.".into(),
            Role::AccessoriesLink => "Accessories".into(),
            Role::ViewCart => "View cart".into(),
            Role::ProductEntry(index) => state.products[index].clone(),
            _ => String::new(),
        })
    }

    async fn is_displayed(&self) -> Result<bool> {
        let state = self.state.lock();
        Ok(match self.role {
            Role::Alert => state.alert_visible,
            Role::ViewCart => state.cart_hovered,
            _ => true,
        })
    }

    async fn submit(&self) -> Result<()> {
        match self.role {
            Role::CheckoutForm => {
                let mut state = self.state.lock();
                state.form_submitted = true;
                let complete = BILLING_FIELDS
                    .iter()
                    .all(|field| state.form.get(field).is_some_and(|v| !v.is_empty()));
                let email_ok = state
                    .form
                    .get("billing_email")
                    .is_some_and(|email| email.contains('@') && email.contains('.'));
                state.alert_visible = !(complete && email_ok);
                Ok(())
            }
            _ => Err(Error::Driver(format!("{:?} is not a form", self.role))),
        }
    }
}

/// Lifecycle over the fake storefront, with open/close accounting so the
/// scoped-release discipline is testable.
pub struct FakeLifecycle {
    store: FakeStore,
    config: SessionConfig,
    fail_open: bool,
    fail_close: bool,
    opened: AtomicU32,
    closed: AtomicU32,
}

impl FakeLifecycle {
    pub fn new(store: FakeStore, config: SessionConfig) -> Self {
        Self {
            store,
            config,
            fail_open: false,
            fail_close: false,
            opened: AtomicU32::new(0),
            closed: AtomicU32::new(0),
        }
    }

    pub fn failing_to_open(store: FakeStore, config: SessionConfig) -> Self {
        let mut lifecycle = Self::new(store, config);
        lifecycle.fail_open = true;
        lifecycle
    }

    pub fn failing_to_close(store: FakeStore, config: SessionConfig) -> Self {
        let mut lifecycle = Self::new(store, config);
        lifecycle.fail_close = true;
        lifecycle
    }

    pub fn opened(&self) -> u32 {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> u32 {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowserLifecycle for FakeLifecycle {
    async fn open(&self) -> Result<Session> {
        if self.fail_open {
            return Err(Error::LaunchFailed("no browser available".into()));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(self.store.session(self.config))
    }

    async fn close(&self, _session: Session) -> Result<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            return Err(Error::CloseFailed("browser process already gone".into()));
        }
        Ok(())
    }
}

/// Wait configuration tight enough for fast tests.
pub fn fast_config() -> SessionConfig {
    SessionConfig::default()
        .with_implicit_wait(std::time::Duration::from_millis(300))
        .with_poll_interval(std::time::Duration::from_millis(10))
}
