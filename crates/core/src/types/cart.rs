//! Cart line records.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::id::ProductId;
use super::options::SelectedOptions;
use super::product::Product;

/// Opaque per-line token.
///
/// Used as a display/list key only. Two lines are "the same line" when their
/// product and options match; the token never takes part in that comparison.
/// New tokens are UUIDs, but any scalar read back from a saved cart is kept
/// as-is, so carts saved with numeric tokens still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LineId(String);

impl LineId {
    /// Generate a fresh random token.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for LineId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Token {
            Text(String),
            Unsigned(u64),
            Signed(i64),
            Float(f64),
        }

        let token = match Token::deserialize(deserializer)? {
            Token::Text(text) => text,
            Token::Unsigned(n) => n.to_string(),
            Token::Signed(n) => n.to_string(),
            Token::Float(n) => n.to_string(),
        };
        Ok(Self(token))
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One product + options entry in a cart.
///
/// Serialized as `{ id, quantity, productId, product, selectedOptions }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(default = "LineId::generate")]
    pub id: LineId,
    /// Always at least 1 while the line is in a cart.
    pub quantity: u32,
    pub product_id: ProductId,
    /// Product as it was when the line was created. Later catalog price
    /// changes do not reach existing lines.
    pub product: Product,
    #[serde(default)]
    pub selected_options: SelectedOptions,
}

impl CartLine {
    /// Start a new line for `product`.
    #[must_use]
    pub fn new(product: Product, quantity: u32, selected_options: SelectedOptions) -> Self {
        Self {
            id: LineId::generate(),
            quantity,
            product_id: product.id,
            product,
            selected_options,
        }
    }

    /// Whether this line is the one identified by `product_id` + `options`.
    #[must_use]
    pub fn matches(&self, product_id: ProductId, options: &SelectedOptions) -> bool {
        self.product_id == product_id && &self.selected_options == options
    }

    /// Snapshot price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{"Id": 1, "name": "Lamp", "price": 19.5, "images": [], "brand": "Acme"}"#;

    fn line(id: &str) -> CartLine {
        let raw = format!(
            r#"{{{id}"quantity": 2, "productId": 1, "product": {SNAPSHOT}, "selectedOptions": {{}}}}"#
        );
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_generated_tokens_are_unique() {
        assert_ne!(LineId::generate(), LineId::generate());
    }

    #[test]
    fn test_numeric_token_is_kept_as_text() {
        assert_eq!(line(r#""id": 1718000000000.123, "#).id.as_str(), "1718000000000.123");
        assert_eq!(line(r#""id": 42, "#).id.as_str(), "42");
        assert_eq!(line(r#""id": "abc", "#).id.as_str(), "abc");
    }

    #[test]
    fn test_missing_token_is_generated() {
        let parsed = line("");
        assert!(!parsed.id.as_str().is_empty());
        assert_eq!(parsed.quantity, 2);
        assert_eq!(parsed.line_total(), Decimal::new(39, 0));
    }

    #[test]
    fn test_token_serializes_as_string() {
        let value = serde_json::to_value(line(r#""id": 7, "#)).unwrap();
        assert_eq!(value["id"], "7");
    }
}
