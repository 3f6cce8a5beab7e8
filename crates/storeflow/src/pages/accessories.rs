// Accessories product listing

use rand::Rng;
use tracing::debug;

use crate::driver::{ElementHandle, Selector};
use crate::error::{Error, Result};
use crate::pages::ProductPage;
use crate::session::Session;

const PRODUCT_GRID: &str = "//ul[@class='products columns-4']";
const PRODUCT_ENTRIES: &str = "//ul[@class='products columns-4']/li";

/// The accessories product listing.
#[derive(Debug)]
pub struct AccessoriesPage {
    session: Session,
}

impl AccessoriesPage {
    /// Waits for the product grid to render, then binds the page object.
    /// The grid (not its entries) is the defining element, so an empty
    /// listing still attaches and fails later with a distinct error.
    pub(crate) async fn attach(session: Session) -> Result<Self> {
        session.locate(&Selector::xpath(PRODUCT_GRID)).await?;
        debug!("accessories listing ready");
        Ok(Self { session })
    }

    /// Picks one of the currently rendered products uniformly at random
    /// and opens its detail page.
    pub async fn select_random_product(&self) -> Result<ProductPage> {
        let products = self.rendered_products().await?;
        let index = rand::thread_rng().gen_range(0..products.len());
        self.open_product(products, index).await
    }

    /// Same as [`select_random_product`](Self::select_random_product) with
    /// a caller-supplied random source, for deterministic runs.
    pub async fn select_random_product_with<R>(&self, rng: &mut R) -> Result<ProductPage>
    where
        R: Rng + ?Sized,
    {
        let products = self.rendered_products().await?;
        let index = rng.gen_range(0..products.len());
        self.open_product(products, index).await
    }

    /// Resolves the currently rendered product entries, failing distinctly
    /// when the listing is empty.
    async fn rendered_products(&self) -> Result<Vec<ElementHandle>> {
        let products = self
            .session
            .locate_all(&Selector::xpath(PRODUCT_ENTRIES))
            .await?;
        if products.is_empty() {
            return Err(Error::EmptyListing(
                "accessories product listing has no entries".into(),
            ));
        }
        Ok(products)
    }

    async fn open_product(
        &self,
        products: Vec<ElementHandle>,
        index: usize,
    ) -> Result<ProductPage> {
        debug!(index, total = products.len(), "opening product entry");
        products[index].click().await?;
        ProductPage::attach(self.session.clone()).await
    }
}
