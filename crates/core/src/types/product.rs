//! Catalog records.
//!
//! Field names follow the catalog fixtures (`Id`, `inStock`, ...), which is
//! also the shape persisted inside cart line snapshots.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID.
    #[serde(rename = "Id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
    /// Current unit price in the store currency.
    pub price: Decimal,
    /// Pre-discount price, when the product is on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    /// Image URLs, first is the primary image.
    #[serde(default)]
    pub images: Vec<String>,
    /// Brand / vendor.
    pub brand: String,
    /// Category name (matches [`Category::name`]).
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// Average review rating, 0-5.
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub stock_quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
}

impl Product {
    /// Primary image URL, if the product has any images.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether the product is discounted relative to its original price.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.original_price.is_some_and(|original| original > self.price)
    }
}

/// A catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category ID.
    #[serde(rename = "Id")]
    pub id: CategoryId,
    /// Display name; products reference categories by this name.
    pub name: String,
    /// Number of products listed under the category.
    pub product_count: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "Id": 3,
        "name": "Trail Runner",
        "description": "Lightweight running shoe",
        "price": "89.99",
        "originalPrice": "119.99",
        "images": ["https://img.example/trail-1.jpg"],
        "brand": "Stride",
        "category": "Footwear",
        "rating": 4.6,
        "reviewCount": 212,
        "inStock": true,
        "stockQuantity": 14
    }"#;

    #[test]
    fn test_deserialize_fixture_shape() {
        let product: Product = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.price, Decimal::new(8999, 2));
        assert_eq!(product.primary_image(), Some("https://img.example/trail-1.jpg"));
        assert!(product.is_on_sale());
        assert_eq!(product.subcategory, None);
    }

    #[test]
    fn test_serialize_uses_capitalized_id() {
        let product: Product = serde_json::from_str(FIXTURE).unwrap();
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["Id"], 3);
        assert_eq!(value["inStock"], true);
        assert!(value.get("sku").is_none());
    }

    #[test]
    fn test_cart_snapshot_without_catalog_fields() {
        let product: Product = serde_json::from_str(
            r#"{"Id": 8, "name": "Yoga Mat", "price": 34.99, "images": [], "brand": "Flow"}"#,
        )
        .unwrap();
        assert_eq!(product.price, Decimal::new(3499, 2));
        assert!(product.category.is_empty());
        assert!(!product.in_stock);
    }
}
