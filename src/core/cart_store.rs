use crate::core::persistence::{load_cart, save_cart, DEFAULT_STORAGE_KEY};
use crate::domain::model::{Cart, CartLine, Product, ProductId, StockInfo};
use crate::domain::ports::{
    ConfigProvider, KeyValueStore, ProductCatalog, StockCheckPolicy, StockService,
};
use crate::utils::error::{CartError, Result};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    pub storage_key: String,
    pub stock_check: StockCheckPolicy,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            stock_check: StockCheckPolicy::default(),
        }
    }
}

impl StoreOptions {
    pub fn from_config<P: ConfigProvider + ?Sized>(config: &P) -> Self {
        Self {
            storage_key: config.storage_key().to_string(),
            stock_check: config.stock_check(),
        }
    }
}

/// Holds the shopper's cart and applies stock-validated mutations to it.
///
/// Mutations run one at a time: each holds the writer gate across its stock and
/// catalog lookups, so a mutation always starts from the previous one's result.
/// Readers take snapshots from the watch channel and never wait on the gate.
pub struct CartStore<C, S, K> {
    catalog: C,
    stock: S,
    storage: K,
    options: StoreOptions,
    state: watch::Sender<Arc<Cart>>,
    writer: Mutex<()>,
}

impl<C, S, K> CartStore<C, S, K>
where
    C: ProductCatalog,
    S: StockService,
    K: KeyValueStore,
{
    /// Opens the store, loading whatever cart was last committed to `storage`.
    pub fn open(catalog: C, stock: S, storage: K, options: StoreOptions) -> Self {
        let cart = load_cart(&storage, &options.storage_key);
        tracing::info!(
            "Cart store opened with {} lines (key '{}')",
            cart.len(),
            options.storage_key
        );
        let (state, _) = watch::channel(Arc::new(cart));

        Self {
            catalog,
            stock,
            storage,
            options,
            state,
            writer: Mutex::new(()),
        }
    }

    pub fn cart(&self) -> Arc<Cart> {
        self.state.borrow().clone()
    }

    /// Receives every committed cart. The channel closes when the store is closed.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Cart>> {
        self.state.subscribe()
    }

    pub async fn add_product(&self, product_id: ProductId) -> Result<Arc<Cart>> {
        let _writer = self.writer.lock().await;
        let current = self.cart();

        let stock = self.fetch_stock(product_id).await?;
        let candidate = current.amount_of(product_id).saturating_add(1);
        ensure_in_stock(product_id, candidate, &stock)?;

        let line = match current.line(product_id) {
            Some(line) => line.with_amount(candidate),
            None => CartLine::from_product(self.fetch_product(product_id).await?, 1),
        };

        self.commit(current.with_line(line))
    }

    pub async fn remove_product(&self, product_id: ProductId) -> Result<Arc<Cart>> {
        let _writer = self.writer.lock().await;
        let current = self.cart();

        if current.line(product_id).is_none() {
            return Err(CartError::ProductNotInCart { product_id });
        }

        self.commit(current.without(product_id))
    }

    /// Sets the quantity of `product_id` to `amount`, adding the product if needed.
    ///
    /// Which quantity is checked against stock depends on [`StockCheckPolicy`];
    /// the stored quantity is always the caller's `amount`.
    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: u32,
    ) -> Result<Arc<Cart>> {
        if amount == 0 {
            return Err(CartError::InvalidAmount { product_id, amount });
        }

        let _writer = self.writer.lock().await;
        let current = self.cart();

        let stock = self.fetch_stock(product_id).await?;
        let checked = match self.options.stock_check {
            StockCheckPolicy::NextUnit => current.amount_of(product_id).saturating_add(1),
            StockCheckPolicy::RequestedAmount => amount,
        };
        ensure_in_stock(product_id, checked, &stock)?;

        let line = match current.line(product_id) {
            Some(line) => line.with_amount(amount),
            None => CartLine::from_product(self.fetch_product(product_id).await?, amount),
        };

        self.commit(current.with_line(line))
    }

    /// Tears the store down. Subscribers observe their channel closing.
    pub fn close(self) -> Cart {
        let cart = self.cart();
        drop(self);
        Arc::try_unwrap(cart).unwrap_or_else(|shared| (*shared).clone())
    }

    fn commit(&self, next: Cart) -> Result<Arc<Cart>> {
        save_cart(&self.storage, &self.options.storage_key, &next)?;

        let next = Arc::new(next);
        self.state.send_replace(Arc::clone(&next));
        tracing::info!(
            "Cart committed: {} lines, {} items",
            next.len(),
            next.total_items()
        );
        Ok(next)
    }

    async fn fetch_stock(&self, product_id: ProductId) -> Result<StockInfo> {
        tracing::debug!("Fetching stock for product {}", product_id);
        self.stock
            .get_stock(product_id)
            .await
            .map_err(|source| CartError::Lookup { product_id, source })
    }

    async fn fetch_product(&self, product_id: ProductId) -> Result<Product> {
        tracing::debug!("Fetching catalog entry for product {}", product_id);
        self.catalog
            .get_product(product_id)
            .await
            .map_err(|source| CartError::Lookup { product_id, source })
    }
}

fn ensure_in_stock(product_id: ProductId, requested: u32, stock: &StockInfo) -> Result<()> {
    if requested > stock.amount {
        return Err(CartError::StockExceeded {
            product_id,
            requested,
            available: stock.amount,
        });
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::model::{Product, ProductId, StockInfo};
    use crate::domain::ports::{ProductCatalog, StockService};
    use crate::utils::error::ServiceError;
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    pub fn product(id: ProductId, title: &str, price: f64) -> Product {
        Product {
            id,
            title: title.to_string(),
            price,
            image_url: format!("https://img.example.com/{}.jpg", id),
        }
    }

    #[derive(Clone, Default)]
    pub struct MockCatalog {
        products: Arc<Mutex<HashMap<ProductId, Product>>>,
        calls: Arc<Mutex<usize>>,
    }

    impl MockCatalog {
        pub fn with(products: Vec<Product>) -> Self {
            Self {
                products: Arc::new(Mutex::new(
                    products.into_iter().map(|p| (p.id, p)).collect(),
                )),
                calls: Arc::new(Mutex::new(0)),
            }
        }

        pub async fn calls(&self) -> usize {
            *self.calls.lock().await
        }
    }

    #[async_trait]
    impl ProductCatalog for MockCatalog {
        async fn get_product(&self, product_id: ProductId) -> Result<Product, ServiceError> {
            *self.calls.lock().await += 1;
            tokio::task::yield_now().await;
            self.products
                .lock()
                .await
                .get(&product_id)
                .cloned()
                .ok_or(ServiceError::NotFound {
                    resource: "product",
                    id: product_id,
                })
        }
    }

    #[derive(Clone, Default)]
    pub struct MockStock {
        amounts: Arc<Mutex<HashMap<ProductId, u32>>>,
        failing: Arc<Mutex<HashSet<ProductId>>>,
    }

    impl MockStock {
        pub fn with(amounts: &[(ProductId, u32)]) -> Self {
            Self {
                amounts: Arc::new(Mutex::new(amounts.iter().copied().collect())),
                failing: Arc::new(Mutex::new(HashSet::new())),
            }
        }

        pub async fn fail_for(&self, product_id: ProductId) {
            self.failing.lock().await.insert(product_id);
        }
    }

    #[async_trait]
    impl StockService for MockStock {
        async fn get_stock(&self, product_id: ProductId) -> Result<StockInfo, ServiceError> {
            tokio::task::yield_now().await;
            if self.failing.lock().await.contains(&product_id) {
                return Err(ServiceError::UnexpectedStatus {
                    status: 503,
                    url: format!("http://stock.test/stock/{}", product_id),
                });
            }
            self.amounts
                .lock()
                .await
                .get(&product_id)
                .map(|amount| StockInfo {
                    product_id,
                    amount: *amount,
                })
                .ok_or(ServiceError::NotFound {
                    resource: "stock",
                    id: product_id,
                })
        }
    }
}
