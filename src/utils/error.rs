use crate::domain::model::ProductId;
use thiserror::Error;

pub const STOCK_EXCEEDED_MESSAGE: &str = "requested quantity exceeds available stock";

/// Failures raised by the catalog and stock collaborators.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: ProductId },

    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum CartError {
    #[error("Requested quantity {requested} of product {product_id} exceeds available stock {available}")]
    StockExceeded {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    #[error("Product {product_id} is not in the cart")]
    ProductNotInCart { product_id: ProductId },

    #[error("Lookup for product {product_id} failed: {source}")]
    Lookup {
        product_id: ProductId,
        #[source]
        source: ServiceError,
    },

    #[error("Amount {amount} is not valid for product {product_id}")]
    InvalidAmount { product_id: ProductId, amount: u32 },

    #[error("Could not persist cart: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    StockExceeded,
    ProductNotFound,
    LookupFailure,
    InvalidInput,
    Storage,
}

/// The three mutations a cart accepts; used to pick the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

impl CartOperation {
    pub fn failure_message(&self) -> &'static str {
        match self {
            CartOperation::Add => "product addition failed",
            CartOperation::Remove => "product removal failed",
            CartOperation::UpdateAmount => "quantity change failed",
        }
    }
}

impl CartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CartError::StockExceeded { .. } => ErrorKind::StockExceeded,
            CartError::ProductNotInCart { .. } => ErrorKind::ProductNotFound,
            CartError::Lookup { .. } => ErrorKind::LookupFailure,
            CartError::InvalidAmount { .. } => ErrorKind::InvalidInput,
            CartError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Message shown to the shopper when `operation` fails with this error.
    pub fn user_message(&self, operation: CartOperation) -> &'static str {
        match self.kind() {
            ErrorKind::StockExceeded => STOCK_EXCEEDED_MESSAGE,
            _ => operation.failure_message(),
        }
    }
}

pub type Result<T, E = CartError> = std::result::Result<T, E>;
