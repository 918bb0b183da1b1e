use crate::core::cart_store::CartStore;
use crate::domain::model::{Cart, ProductId};
use crate::domain::ports::{KeyValueStore, NotificationSink, ProductCatalog, StockService};
use crate::utils::error::{CartOperation, Result};
use std::sync::Arc;

/// UI-facing wrapper around [`CartStore`]: operations never fail, failures are
/// reported to the notification sink instead.
pub struct NotifyingCart<C, S, K, N> {
    store: Arc<CartStore<C, S, K>>,
    sink: N,
}

impl<C, S, K, N> NotifyingCart<C, S, K, N>
where
    C: ProductCatalog,
    S: StockService,
    K: KeyValueStore,
    N: NotificationSink,
{
    pub fn new(store: Arc<CartStore<C, S, K>>, sink: N) -> Self {
        Self { store, sink }
    }

    pub fn cart(&self) -> Arc<Cart> {
        self.store.cart()
    }

    pub async fn add_product(&self, product_id: ProductId) {
        let result = self.store.add_product(product_id).await;
        self.report(CartOperation::Add, product_id, result);
    }

    pub async fn remove_product(&self, product_id: ProductId) {
        let result = self.store.remove_product(product_id).await;
        self.report(CartOperation::Remove, product_id, result);
    }

    pub async fn update_product_amount(&self, product_id: ProductId, amount: u32) {
        let result = self.store.update_product_amount(product_id, amount).await;
        self.report(CartOperation::UpdateAmount, product_id, result);
    }

    fn report(&self, operation: CartOperation, product_id: ProductId, result: Result<Arc<Cart>>) {
        if let Err(e) = result {
            tracing::warn!(
                "Cart operation {:?} on product {} failed ({:?}): {}",
                operation,
                product_id,
                e.kind(),
                e
            );
            self.sink.report_error(e.user_message(operation));
        }
    }
}
