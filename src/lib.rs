pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CartCommand, CliConfig};
pub use crate::config::TomlConfig;

pub use crate::adapters::{
    ConsoleNotificationSink, FileKeyValueStore, MemoryKeyValueStore, MemoryNotificationSink,
    StorefrontApi, TracingNotificationSink,
};
pub use crate::core::{
    cart_store::{CartStore, StoreOptions},
    notifying::NotifyingCart,
    persistence::DEFAULT_STORAGE_KEY,
};
pub use crate::domain::model::{Cart, CartLine, Product, ProductId, StockInfo};
pub use crate::domain::ports::StockCheckPolicy;
pub use crate::utils::error::{CartError, CartOperation, ErrorKind, Result, ServiceError};
pub use crate::utils::logger::LogFormat;
