use super::*;

fn settings(store_domain: &str) -> StorefrontSettings {
    StorefrontSettings {
        store_domain: store_domain.to_owned(),
        access_token: "public-token".to_owned(),
        api_version: "2024-01".to_owned(),
        timeout_secs: 5,
        user_agent: "bundlebox-test/0.1".to_owned(),
        max_retries: 0,
        backoff_base_secs: 0,
        namespace: "simple_bundles".to_owned(),
    }
}

#[test]
fn graphql_endpoint_from_bare_domain() {
    assert_eq!(
        graphql_endpoint("shop.example.com", "2024-01").unwrap(),
        "https://shop.example.com/api/2024-01/graphql.json"
    );
}

#[test]
fn graphql_endpoint_strips_path() {
    assert_eq!(
        graphql_endpoint("https://shop.example.com/collections/all", "2024-04").unwrap(),
        "https://shop.example.com/api/2024-04/graphql.json"
    );
}

#[test]
fn graphql_endpoint_keeps_http_and_port() {
    assert_eq!(
        graphql_endpoint("http://127.0.0.1:8080", "2024-01").unwrap(),
        "http://127.0.0.1:8080/api/2024-01/graphql.json"
    );
}

#[test]
fn graphql_endpoint_rejects_empty_domain() {
    let err = graphql_endpoint("  ", "2024-01").unwrap_err();
    assert!(
        matches!(err, StorefrontError::InvalidStoreDomain { .. }),
        "expected InvalidStoreDomain, got: {err:?}"
    );
}

#[test]
fn graphql_endpoint_rejects_garbage() {
    assert!(graphql_endpoint("https://", "2024-01").is_err());
}

#[test]
fn extract_domain_strips_scheme_and_path() {
    assert_eq!(
        extract_domain("https://shop.example.com/api/2024-01/graphql.json"),
        "shop.example.com"
    );
    assert_eq!(extract_domain("not a url"), "not a url");
}

#[test]
fn client_new_builds_endpoint() {
    let client = StorefrontClient::new(&settings("shop.example.com")).unwrap();
    assert_eq!(
        client.endpoint(),
        "https://shop.example.com/api/2024-01/graphql.json"
    );
}

#[test]
fn settings_debug_redacts_token() {
    let debug = format!("{:?}", settings("shop.example.com"));
    assert!(debug.contains("[redacted]"));
    assert!(!debug.contains("public-token"));
}

#[test]
fn settings_from_app_config_requires_domain_and_token() {
    let mut config = AppConfig {
        env: bundlebox_core::Environment::Test,
        log_level: "info".to_owned(),
        store_domain: None,
        storefront_token: Some("tok".to_owned()),
        storefront_api_version: "2024-01".to_owned(),
        request_timeout_secs: 30,
        user_agent: "ua".to_owned(),
        max_retries: 3,
        retry_backoff_base_secs: 1,
        bundle: bundlebox_core::BundleSettings::default(),
    };
    let err = StorefrontSettings::from_app_config(&config).unwrap_err();
    assert!(matches!(err, StorefrontError::MissingSetting(ref v) if v == "SHOPIFY_STORE_DOMAIN"));

    config.store_domain = Some("shop.example.com".to_owned());
    config.storefront_token = None;
    let err = StorefrontSettings::from_app_config(&config).unwrap_err();
    assert!(
        matches!(err, StorefrontError::MissingSetting(ref v) if v == "SHOPIFY_STOREFRONT_TOKEN")
    );

    config.storefront_token = Some("tok".to_owned());
    let settings = StorefrontSettings::from_app_config(&config).unwrap();
    assert_eq!(settings.namespace, "simple_bundles");
    assert_eq!(settings.max_retries, 3);
}
