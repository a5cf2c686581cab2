//! Storefront GraphQL endpoint construction.

use crate::error::StorefrontError;

/// Builds `https://{store}/api/{version}/graphql.json`.
///
/// `store_domain` may be a bare host (`shop.example.com`) or carry a scheme
/// and path (`https://shop.example.com/collections/all`); only the origin is
/// kept. An explicit `http://` scheme is preserved for local test servers.
pub(super) fn graphql_endpoint(
    store_domain: &str,
    api_version: &str,
) -> Result<String, StorefrontError> {
    let trimmed = store_domain.trim();
    if trimmed.is_empty() {
        return Err(StorefrontError::InvalidStoreDomain {
            store_domain: store_domain.to_owned(),
            reason: "store domain is empty".to_owned(),
        });
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };

    let url = reqwest::Url::parse(&with_scheme).map_err(|e| StorefrontError::InvalidStoreDomain {
        store_domain: store_domain.to_owned(),
        reason: e.to_string(),
    })?;
    let origin = url.origin();
    if !origin.is_tuple() {
        return Err(StorefrontError::InvalidStoreDomain {
            store_domain: store_domain.to_owned(),
            reason: "store domain has no host".to_owned(),
        });
    }

    Ok(format!(
        "{}/api/{api_version}/graphql.json",
        origin.ascii_serialization()
    ))
}

/// Hostname of `url`, or `url` itself if it does not parse.
pub(super) fn extract_domain(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}
