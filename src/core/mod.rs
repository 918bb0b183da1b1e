pub mod cart_store;
pub mod notifying;
pub mod persistence;

pub use crate::domain::model::{Cart, CartLine, Product, ProductId, StockInfo};
pub use crate::domain::ports::{
    ConfigProvider, KeyValueStore, NotificationSink, ProductCatalog, StockCheckPolicy,
    StockService,
};
pub use crate::utils::error::Result;
