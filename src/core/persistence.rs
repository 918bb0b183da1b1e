use crate::domain::model::{Cart, CartLine};
use crate::domain::ports::KeyValueStore;
use crate::utils::error::StorageError;

pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Reads the persisted cart. Missing, unreadable or malformed values yield an empty cart.
pub fn load_cart<K: KeyValueStore + ?Sized>(storage: &K, key: &str) -> Cart {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!("No stored cart under '{}', starting empty", key);
            return Cart::new();
        }
        Err(e) => {
            tracing::warn!("Could not read stored cart '{}': {}", key, e);
            return Cart::new();
        }
    };

    match serde_json::from_str::<Vec<CartLine>>(&raw) {
        Ok(lines) => {
            let lines: Vec<CartLine> = lines.into_iter().filter(|line| line.amount > 0).collect();
            let cart = Cart::from(lines);
            tracing::debug!("Loaded {} cart lines from '{}'", cart.len(), key);
            cart
        }
        Err(e) => {
            tracing::warn!("Stored cart under '{}' is malformed, starting empty: {}", key, e);
            Cart::new()
        }
    }
}

pub fn save_cart<K: KeyValueStore + ?Sized>(
    storage: &K,
    key: &str,
    cart: &Cart,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(cart)?;
    storage.set(key, &json)
}
