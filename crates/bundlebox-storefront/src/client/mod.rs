//! HTTP client for the Shopify Storefront GraphQL API.

mod cart;
mod endpoint;

use std::time::Duration;

use bundlebox_core::{AppConfig, ProductView, SelectedOption, VariantView};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::StorefrontError;
use crate::normalize::{normalize_product, normalize_variant};
use crate::queries;
use crate::rate_limit::retry_with_backoff;
use crate::types::{GraphqlResponse, ProductData, ProductVariants, StorefrontProduct};

#[cfg(test)]
use endpoint::{extract_domain, graphql_endpoint};

pub(super) const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Everything the client needs to reach one store.
#[derive(Clone)]
pub struct StorefrontSettings {
    pub store_domain: String,
    pub access_token: String,
    pub api_version: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub backoff_base_secs: u64,
    /// Metafield namespace the bundle app writes to.
    pub namespace: String,
}

impl std::fmt::Debug for StorefrontSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontSettings")
            .field("store_domain", &self.store_domain)
            .field("access_token", &"[redacted]")
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("backoff_base_secs", &self.backoff_base_secs)
            .field("namespace", &self.namespace)
            .finish()
    }
}

impl StorefrontSettings {
    /// # Errors
    ///
    /// Returns [`StorefrontError::MissingSetting`] when the store domain or
    /// access token is not configured.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, StorefrontError> {
        let store_domain = config
            .store_domain
            .clone()
            .ok_or_else(|| StorefrontError::MissingSetting("SHOPIFY_STORE_DOMAIN".to_owned()))?;
        let access_token = config.storefront_token.clone().ok_or_else(|| {
            StorefrontError::MissingSetting("SHOPIFY_STOREFRONT_TOKEN".to_owned())
        })?;
        Ok(Self {
            store_domain,
            access_token,
            api_version: config.storefront_api_version.clone(),
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            max_retries: config.max_retries,
            backoff_base_secs: config.retry_backoff_base_secs,
            namespace: config.bundle.namespace.clone(),
        })
    }
}

/// Storefront API client.
///
/// Throttling (429) and network failures are retried with exponential
/// backoff up to `max_retries` additional attempts. Everything else fails
/// on the first attempt.
pub struct StorefrontClient {
    pub(super) client: Client,
    pub(super) endpoint: String,
    pub(super) access_token: String,
    pub(super) namespace: String,
    pub(super) max_retries: u32,
    pub(super) backoff_base_secs: u64,
}

impl StorefrontClient {
    /// # Errors
    ///
    /// - [`StorefrontError::InvalidStoreDomain`] if the store domain does not
    ///   form a valid endpoint URL.
    /// - [`StorefrontError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(settings: &StorefrontSettings) -> Result<Self, StorefrontError> {
        let endpoint = endpoint::graphql_endpoint(&settings.store_domain, &settings.api_version)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&settings.user_agent)
            .build()?;
        Ok(Self {
            client,
            endpoint,
            access_token: settings.access_token.clone(),
            namespace: settings.namespace.clone(),
            max_retries: settings.max_retries,
            backoff_base_secs: settings.backoff_base_secs,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetches a product by handle, resolving the variant that matches
    /// `selected_options` along with the first variant.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::ProductNotFound`] if no product has `handle`.
    /// - Any transport, status, GraphQL, or decoding error from the call.
    pub async fn fetch_product(
        &self,
        handle: &str,
        selected_options: &[SelectedOption],
    ) -> Result<ProductView, StorefrontError> {
        let variables = json!({
            "handle": handle,
            "selectedOptions": selected_options,
            "namespace": self.namespace,
        });
        let data: ProductData<StorefrontProduct> = self
            .execute(queries::PRODUCT_OPERATION, &queries::product_query(), variables)
            .await?;
        let product = data
            .product
            .ok_or_else(|| StorefrontError::ProductNotFound {
                handle: handle.to_owned(),
            })?;
        tracing::debug!(
            handle,
            matched = product.selected_variant.is_some(),
            "fetched product"
        );
        Ok(normalize_product(product))
    }

    /// Fetches up to the first page of variants for `handle`, without
    /// metafields.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_product`].
    pub async fn fetch_variants(&self, handle: &str) -> Result<Vec<VariantView>, StorefrontError> {
        let data: ProductData<ProductVariants> = self
            .execute(
                queries::VARIANTS_OPERATION,
                &queries::variants_query(),
                json!({ "handle": handle }),
            )
            .await?;
        let product = data
            .product
            .ok_or_else(|| StorefrontError::ProductNotFound {
                handle: handle.to_owned(),
            })?;
        Ok(product
            .variants
            .nodes
            .into_iter()
            .map(normalize_variant)
            .collect())
    }

    /// POSTs one GraphQL operation and decodes its `data`.
    ///
    /// Any entry in `errors` fails the call, even when `data` is present.
    pub(super) async fn execute<T>(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
    ) -> Result<T, StorefrontError>
    where
        T: DeserializeOwned,
    {
        let body = json!({
            "query": query,
            "operationName": operation,
            "variables": variables,
        });

        let response: GraphqlResponse<T> =
            retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
                let body = &body;
                async move {
                    let response = self
                        .client
                        .post(&self.endpoint)
                        .header(reqwest::header::ACCEPT, "application/json")
                        .header(ACCESS_TOKEN_HEADER, &self.access_token)
                        .json(body)
                        .send()
                        .await?;
                    let status = response.status();

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        let retry_after_secs = response
                            .headers()
                            .get(reqwest::header::RETRY_AFTER)
                            .and_then(|v| v.to_str().ok())
                            .and_then(|s| s.parse::<u64>().ok())
                            .unwrap_or(60);
                        return Err(StorefrontError::RateLimited {
                            domain: endpoint::extract_domain(&self.endpoint),
                            retry_after_secs,
                        });
                    }

                    if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(StorefrontError::NotFound {
                            url: self.endpoint.clone(),
                        });
                    }

                    if !status.is_success() {
                        return Err(StorefrontError::UnexpectedStatus {
                            status: status.as_u16(),
                            url: self.endpoint.clone(),
                        });
                    }

                    let text = response.text().await?;
                    serde_json::from_str::<GraphqlResponse<T>>(&text).map_err(|e| {
                        StorefrontError::Deserialize {
                            context: format!("{operation} response"),
                            source: e,
                        }
                    })
                }
            })
            .await?;

        if !response.errors.is_empty() {
            let messages = response
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            tracing::warn!(operation, %messages, "storefront returned GraphQL errors");
            return Err(StorefrontError::Graphql {
                operation: operation.to_owned(),
                messages,
            });
        }

        response.data.ok_or_else(|| StorefrontError::Graphql {
            operation: operation.to_owned(),
            messages: "response has no data".to_owned(),
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
