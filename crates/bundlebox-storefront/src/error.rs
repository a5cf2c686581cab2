use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {domain} (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("GraphQL errors from {operation}: {messages}")]
    Graphql { operation: String, messages: String },

    #[error("product not found: {handle}")]
    ProductNotFound { handle: String },

    #[error("cart rejected the lines: {messages}")]
    CartUserErrors { messages: String },

    #[error("missing storefront setting: {0}")]
    MissingSetting(String),

    #[error("invalid store domain \"{store_domain}\": {reason}")]
    InvalidStoreDomain {
        store_domain: String,
        reason: String,
    },

    #[error("invalid request URL \"{url}\": {reason}")]
    InvalidRequestUrl { url: String, reason: String },
}
