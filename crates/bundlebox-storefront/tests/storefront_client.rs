//! Integration tests for `StorefrontClient`.
//!
//! Each test stands up a `wiremock` server in place of the Storefront API
//! and checks both the request the client sends and how it maps the
//! response (or failure) into views and errors.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bundlebox_core::{BundleSettings, SelectedOption};
use bundlebox_options::{BundleOptionEngine, LineItemRequest};
use bundlebox_storefront::{
    resolve_variant, StorefrontClient, StorefrontError, StorefrontSettings, VariantResolution,
};

const GRAPHQL_PATH: &str = "/api/2024-01/graphql.json";

fn test_settings(server: &MockServer, max_retries: u32) -> StorefrontSettings {
    StorefrontSettings {
        store_domain: server.uri(),
        access_token: "public-token".to_owned(),
        api_version: "2024-01".to_owned(),
        timeout_secs: 5,
        user_agent: "bundlebox-test/0.1".to_owned(),
        max_retries,
        backoff_base_secs: 0,
        namespace: "simple_bundles".to_owned(),
    }
}

fn test_client(server: &MockServer) -> StorefrontClient {
    StorefrontClient::new(&test_settings(server, 0)).expect("failed to build test client")
}

fn variant_json(id: &str, size: &str, variant_options: Option<&str>) -> serde_json::Value {
    json!({
        "id": id,
        "title": size,
        "sku": "",
        "availableForSale": true,
        "price": {"amount": "30.00", "currencyCode": "USD"},
        "compareAtPrice": {"amount": "40.00", "currencyCode": "USD"},
        "selectedOptions": [{"name": "Size", "value": size}],
        "bundledVariants": {"value": "[{\"type\":\"Infinite options\"}]", "type": "json"},
        "variantOptions": variant_options.map(|v| json!({"value": v, "type": "json"})),
        "variantOptionsV2": null
    })
}

fn product_json(selected: Option<serde_json::Value>) -> serde_json::Value {
    json!({
        "data": {
            "product": {
                "id": "gid://shopify/Product/1",
                "title": "Build Your Own Box",
                "handle": "build-your-own-box",
                "vendor": "Bundle Co",
                "descriptionHtml": "<p>Pick your sizes.</p>",
                "options": [{"name": "Size", "values": ["S", "M"]}],
                "selectedVariant": selected,
                "variants": {
                    "nodes": [variant_json("gid://shopify/ProductVariant/1", "S", None)]
                }
            }
        }
    })
}

fn size_m() -> Vec<SelectedOption> {
    vec![SelectedOption {
        name: "Size".to_owned(),
        value: "M".to_owned(),
    }]
}

// ---------------------------------------------------------------------------
// fetch_product
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_product_sends_token_and_variables() {
    let server = MockServer::start().await;
    let options = r#"[{"optionName":"Sock","optionValues":"Ankle, Crew"}]"#;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("X-Shopify-Storefront-Access-Token", "public-token"))
        .and(body_partial_json(json!({
            "operationName": "Product",
            "variables": {
                "handle": "build-your-own-box",
                "selectedOptions": [{"name": "Size", "value": "M"}],
                "namespace": "simple_bundles"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json(Some(
            variant_json("gid://shopify/ProductVariant/2", "M", Some(options)),
        ))))
        .expect(1)
        .mount(&server)
        .await;

    let product = test_client(&server)
        .fetch_product("build-your-own-box", &size_m())
        .await
        .expect("fetch_product failed");

    assert_eq!(product.vendor.as_deref(), Some("Bundle Co"));
    let selected = product.selected_variant.as_ref().expect("selected variant");
    assert_eq!(selected.id, "gid://shopify/ProductVariant/2");
    assert!(selected.sku.is_none(), "empty sku should normalize to None");
    assert_eq!(selected.metafields.variant_options.as_deref(), Some(options));

    let engine = BundleOptionEngine::new(&selected.metafields, BundleSettings::default());
    assert_eq!(engine.encoded(), "Ankle");
}

#[tokio::test]
async fn unmatched_options_resolve_to_redirect() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json(None)))
        .mount(&server)
        .await;

    let product = test_client(&server)
        .fetch_product("build-your-own-box", &size_m())
        .await
        .expect("fetch_product failed");

    match resolve_variant(&product) {
        VariantResolution::RedirectToFirstVariant { selected_options } => {
            assert_eq!(selected_options[0].value, "S");
        }
        other => panic!("expected redirect, got: {other:?}"),
    }
}

#[tokio::test]
async fn null_product_is_product_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"product": null}})),
        )
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_product("missing", &[])
        .await
        .unwrap_err();
    assert!(
        matches!(err, StorefrontError::ProductNotFound { ref handle } if handle == "missing"),
        "expected ProductNotFound, got: {err:?}"
    );
}

#[tokio::test]
async fn graphql_errors_fail_the_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{"message": "Field 'nope' doesn't exist on type 'Product'"}]
        })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_product("build-your-own-box", &[])
        .await
        .unwrap_err();
    match err {
        StorefrontError::Graphql {
            operation,
            messages,
        } => {
            assert_eq!(operation, "Product");
            assert!(messages.contains("nope"));
        }
        other => panic!("expected Graphql error, got: {other:?}"),
    }
}

#[tokio::test]
async fn invalid_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch_product("build-your-own-box", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, StorefrontError::Deserialize { .. }));
}

// ---------------------------------------------------------------------------
// status handling and retries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_status_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = StorefrontClient::new(&test_settings(&server, 3)).unwrap();
    let err = client.fetch_variants("x").await.unwrap_err();
    assert!(matches!(err, StorefrontError::NotFound { .. }));
}

#[tokio::test]
async fn server_error_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_client(&server).fetch_variants("x").await.unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::UnexpectedStatus { status: 503, .. }
    ));
}

#[tokio::test]
async fn throttled_request_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "2"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"product": {"variants": {"nodes": [
                variant_json("gid://shopify/ProductVariant/1", "S", None),
                variant_json("gid://shopify/ProductVariant/2", "M", None)
            ]}}}
        })))
        .mount(&server)
        .await;

    let client = StorefrontClient::new(&test_settings(&server, 2)).unwrap();
    let variants = client.fetch_variants("build-your-own-box").await.unwrap();
    assert_eq!(variants.len(), 2);
    assert_eq!(variants[1].title, "M");
}

#[tokio::test]
async fn throttling_without_retries_reports_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let err = test_client(&server).fetch_variants("x").await.unwrap_err();
    assert!(
        matches!(
            err,
            StorefrontError::RateLimited {
                retry_after_secs: 7,
                ..
            }
        ),
        "expected RateLimited, got: {err:?}"
    );
}

// ---------------------------------------------------------------------------
// cart mutations
// ---------------------------------------------------------------------------

fn bundle_line() -> LineItemRequest {
    serde_json::from_value(json!({
        "merchandiseId": "gid://shopify/ProductVariant/2",
        "quantity": 1,
        "attributes": [
            {"key": "Sock", "value": "Crew"},
            {"key": "_bundle_selection", "value": "Crew"}
        ]
    }))
    .unwrap()
}

#[tokio::test]
async fn cart_create_sends_lines_with_attributes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "CartCreate",
            "variables": {"lines": [{
                "merchandiseId": "gid://shopify/ProductVariant/2",
                "attributes": [
                    {"key": "Sock", "value": "Crew"},
                    {"key": "_bundle_selection", "value": "Crew"}
                ]
            }]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"cartCreate": {
                "cart": {
                    "id": "gid://shopify/Cart/abc",
                    "checkoutUrl": "https://shop.example.com/cart/c/abc",
                    "totalQuantity": 1
                },
                "userErrors": []
            }}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cart = test_client(&server)
        .cart_create(&[bundle_line()])
        .await
        .expect("cart_create failed");
    assert_eq!(cart.id, "gid://shopify/Cart/abc");
    assert_eq!(cart.total_quantity, 1);
}

#[tokio::test]
async fn cart_user_errors_are_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "CartLinesAdd",
            "variables": {"cartId": "gid://shopify/Cart/abc"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"cartLinesAdd": {
                "cart": null,
                "userErrors": [{
                    "field": ["lines", "0", "merchandiseId"],
                    "message": "The merchandise is sold out."
                }]
            }}
        })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .cart_lines_add("gid://shopify/Cart/abc", &[bundle_line()])
        .await
        .unwrap_err();
    match err {
        StorefrontError::CartUserErrors { messages } => {
            assert_eq!(
                messages,
                "lines.0.merchandiseId: The merchandise is sold out."
            );
        }
        other => panic!("expected CartUserErrors, got: {other:?}"),
    }
}
