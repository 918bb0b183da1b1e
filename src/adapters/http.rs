use crate::domain::model::{Product, ProductId, StockInfo};
use crate::domain::ports::{ConfigProvider, ProductCatalog, StockService};
use crate::utils::error::ServiceError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Storefront REST API serving `/products/{id}` and `/stock/{id}`.
#[derive(Debug, Clone)]
pub struct StorefrontApi {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl StorefrontApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn from_config<P: ConfigProvider + ?Sized>(config: &P) -> Self {
        let api = Self::new(config.api_base_url());
        match config.request_timeout_seconds() {
            Some(seconds) => api.with_timeout(Duration::from_secs(seconds)),
            None => api,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        path: &str,
        id: ProductId,
    ) -> Result<T, ServiceError> {
        let url = format!("{}/{}/{}", self.base_url, path, id);

        let mut request = self.client.get(&url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("Making API request to: {}", url);
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            return Err(ServiceError::NotFound { resource, id });
        }
        if !status.is_success() {
            return Err(ServiceError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ProductCatalog for StorefrontApi {
    async fn get_product(&self, product_id: ProductId) -> Result<Product, ServiceError> {
        self.get_json("product", "products", product_id).await
    }
}

#[async_trait]
impl StockService for StorefrontApi {
    async fn get_stock(&self, product_id: ProductId) -> Result<StockInfo, ServiceError> {
        self.get_json("stock", "stock", product_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_get_product_parses_storefront_payload() {
        let server = MockServer::start();
        let product_mock = server.mock(|when, then| {
            when.method(GET).path("/products/5");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "id": 5,
                    "title": "Shoe",
                    "price": 100,
                    "image": "x"
                }));
        });

        let api = StorefrontApi::new(server.base_url());
        let product = api.get_product(5).await.unwrap();

        product_mock.assert();
        assert_eq!(
            product,
            Product {
                id: 5,
                title: "Shoe".to_string(),
                price: 100.0,
                image_url: "x".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_get_stock_with_trailing_slash_base_url() {
        let server = MockServer::start();
        let stock_mock = server.mock(|when, then| {
            when.method(GET).path("/stock/2");
            then.status(200)
                .json_body(serde_json::json!({"id": 2, "amount": 7}));
        });

        let api = StorefrontApi::new(format!("{}/", server.base_url()));
        let stock = api.get_stock(2).await.unwrap();

        stock_mock.assert();
        assert_eq!(
            stock,
            StockInfo {
                product_id: 2,
                amount: 7
            }
        );
    }

    #[tokio::test]
    async fn test_not_found_maps_to_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/stock/9");
            then.status(404);
        });

        let api = StorefrontApi::new(server.base_url());
        let err = api.get_stock(9).await.unwrap_err();

        assert!(matches!(
            err,
            ServiceError::NotFound {
                resource: "stock",
                id: 9
            }
        ));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_unexpected_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/products/1");
            then.status(500);
        });

        let api = StorefrontApi::new(server.base_url());
        let err = api.get_product(1).await.unwrap_err();

        assert!(matches!(err, ServiceError::UnexpectedStatus { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/stock/1");
            then.status(200).body(r#"{"id": 1, "amount": -3}"#);
        });

        let api = StorefrontApi::new(server.base_url());
        let err = api.get_stock(1).await.unwrap_err();

        assert!(matches!(err, ServiceError::Decode(_)));
    }

    #[tokio::test]
    async fn test_request_timeout_is_a_network_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/stock/1");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(serde_json::json!({"id": 1, "amount": 1}));
        });

        let api = StorefrontApi::new(server.base_url()).with_timeout(Duration::from_millis(50));
        let err = api.get_stock(1).await.unwrap_err();

        assert!(matches!(err, ServiceError::Network(_)));
    }
}
