//! Cart mutations.

use bundlebox_options::LineItemRequest;
use serde_json::json;

use super::StorefrontClient;
use crate::error::StorefrontError;
use crate::queries;
use crate::types::{CartCreateData, CartLinesAddData, CartPayload, CartSummary};

impl StorefrontClient {
    /// Creates a new cart holding `lines`.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::CartUserErrors`] if Shopify rejects the lines.
    /// - Any transport, status, GraphQL, or decoding error from the call.
    pub async fn cart_create(
        &self,
        lines: &[LineItemRequest],
    ) -> Result<CartSummary, StorefrontError> {
        let data: CartCreateData = self
            .execute(
                queries::CART_CREATE_OPERATION,
                &queries::cart_create_mutation(),
                json!({ "lines": lines }),
            )
            .await?;
        let cart = cart_from_payload(queries::CART_CREATE_OPERATION, data.cart_create)?;
        tracing::info!(cart_id = %cart.id, total_quantity = cart.total_quantity, "cart created");
        Ok(cart)
    }

    /// Adds `lines` to an existing cart.
    ///
    /// # Errors
    ///
    /// Same as [`Self::cart_create`].
    pub async fn cart_lines_add(
        &self,
        cart_id: &str,
        lines: &[LineItemRequest],
    ) -> Result<CartSummary, StorefrontError> {
        let data: CartLinesAddData = self
            .execute(
                queries::CART_LINES_ADD_OPERATION,
                &queries::cart_lines_add_mutation(),
                json!({ "cartId": cart_id, "lines": lines }),
            )
            .await?;
        let cart = cart_from_payload(queries::CART_LINES_ADD_OPERATION, data.cart_lines_add)?;
        tracing::info!(cart_id = %cart.id, total_quantity = cart.total_quantity, "cart lines added");
        Ok(cart)
    }
}

fn cart_from_payload(
    operation: &str,
    payload: Option<CartPayload>,
) -> Result<CartSummary, StorefrontError> {
    let payload = payload.ok_or_else(|| StorefrontError::Graphql {
        operation: operation.to_owned(),
        messages: "mutation returned no payload".to_owned(),
    })?;

    if !payload.user_errors.is_empty() {
        let messages = payload
            .user_errors
            .iter()
            .map(|e| match &e.field {
                Some(field) if !field.is_empty() => format!("{}: {}", field.join("."), e.message),
                _ => e.message.clone(),
            })
            .collect::<Vec<_>>()
            .join("; ");
        tracing::warn!(operation, %messages, "cart mutation rejected");
        return Err(StorefrontError::CartUserErrors { messages });
    }

    payload.cart.ok_or_else(|| StorefrontError::Graphql {
        operation: operation.to_owned(),
        messages: "mutation returned no cart".to_owned(),
    })
}
