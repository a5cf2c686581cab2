//! GraphQL documents sent to the Storefront API.
//!
//! The product query asks for the three bundle metafields on both the
//! selected variant and the first variant; the variants query is the
//! deferred, larger follow-up and skips them.

const VARIANT_FIELDS: &str = r"
    availableForSale
    compareAtPrice { amount currencyCode }
    id
    price { amount currencyCode }
    selectedOptions { name value }
    sku
    title
";

const METAFIELD_FIELDS: &str = r#"
    bundledVariants: metafield(namespace: $namespace, key: "bundled_variants") { value type }
    variantOptions: metafield(namespace: $namespace, key: "variant_options") { value type }
    variantOptionsV2: metafield(namespace: $namespace, key: "variant_options_v2") { value type }
"#;

pub const PRODUCT_OPERATION: &str = "Product";
pub const VARIANTS_OPERATION: &str = "ProductVariants";
pub const CART_CREATE_OPERATION: &str = "CartCreate";
pub const CART_LINES_ADD_OPERATION: &str = "CartLinesAdd";

/// Number of variants the deferred query asks for.
pub const VARIANTS_PAGE_SIZE: u32 = 250;

#[must_use]
pub fn product_query() -> String {
    format!(
        r"query {PRODUCT_OPERATION}($handle: String!, $selectedOptions: [SelectedOptionInput!]!, $namespace: String!) {{
  product(handle: $handle) {{
    id
    title
    vendor
    handle
    descriptionHtml
    options {{ name values }}
    selectedVariant: variantBySelectedOptions(selectedOptions: $selectedOptions) {{
      {VARIANT_FIELDS}
      {METAFIELD_FIELDS}
    }}
    variants(first: 1) {{
      nodes {{
        {VARIANT_FIELDS}
        {METAFIELD_FIELDS}
      }}
    }}
  }}
}}"
    )
}

#[must_use]
pub fn variants_query() -> String {
    format!(
        r"query {VARIANTS_OPERATION}($handle: String!) {{
  product(handle: $handle) {{
    variants(first: {VARIANTS_PAGE_SIZE}) {{
      nodes {{
        {VARIANT_FIELDS}
      }}
    }}
  }}
}}"
    )
}

const CART_PAYLOAD_FIELDS: &str = r"
    cart { id checkoutUrl totalQuantity }
    userErrors { field message }
";

#[must_use]
pub fn cart_create_mutation() -> String {
    format!(
        r"mutation {CART_CREATE_OPERATION}($lines: [CartLineInput!]!) {{
  cartCreate(input: {{ lines: $lines }}) {{
    {CART_PAYLOAD_FIELDS}
  }}
}}"
    )
}

#[must_use]
pub fn cart_lines_add_mutation() -> String {
    format!(
        r"mutation {CART_LINES_ADD_OPERATION}($cartId: ID!, $lines: [CartLineInput!]!) {{
  cartLinesAdd(cartId: $cartId, lines: $lines) {{
    {CART_PAYLOAD_FIELDS}
  }}
}}"
    )
}
