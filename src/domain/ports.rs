use crate::domain::model::{Product, ProductId, StockInfo};
use crate::utils::error::{ServiceError, StorageError};
use crate::utils::logger::LogFormat;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn get_product(&self, product_id: ProductId) -> Result<Product, ServiceError>;
}

#[async_trait]
pub trait StockService: Send + Sync {
    async fn get_stock(&self, product_id: ProductId) -> Result<StockInfo, ServiceError>;
}

/// Durable string storage that outlives the process. Synchronous and local.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

pub trait NotificationSink: Send + Sync {
    fn report_error(&self, message: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn storage_path(&self) -> &str;
    fn storage_key(&self) -> &str;
    fn stock_check(&self) -> StockCheckPolicy;
    fn request_timeout_seconds(&self) -> Option<u64>;
    fn log_format(&self) -> LogFormat;
}

/// Which quantity `update_product_amount` validates against stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum StockCheckPolicy {
    /// Check one unit above what the cart already holds, as `add_product` does.
    #[default]
    NextUnit,
    /// Check the caller's target amount.
    RequestedAmount,
}

#[async_trait]
impl<T: ProductCatalog + ?Sized> ProductCatalog for Arc<T> {
    async fn get_product(&self, product_id: ProductId) -> Result<Product, ServiceError> {
        (**self).get_product(product_id).await
    }
}

#[async_trait]
impl<T: StockService + ?Sized> StockService for Arc<T> {
    async fn get_stock(&self, product_id: ProductId) -> Result<StockInfo, ServiceError> {
        (**self).get_stock(product_id).await
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

impl<T: NotificationSink + ?Sized> NotificationSink for Arc<T> {
    fn report_error(&self, message: &str) {
        (**self).report_error(message)
    }
}
