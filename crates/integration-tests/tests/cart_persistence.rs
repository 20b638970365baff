//! File-backed cart persistence across manager instances.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use shopflow_core::{ProductId, SelectedOptions};
use shopflow_storefront::cart::{
    CartManager, CartStorage, DEFAULT_CART_KEY, FileStorage, RecordingNotifier,
};
use shopflow_integration_tests::TestContext;

fn slot_path(ctx: &TestContext) -> std::path::PathBuf {
    ctx.data_dir().join(format!("{DEFAULT_CART_KEY}.json"))
}

// ============================================================================
// Round Trips
// ============================================================================

#[tokio::test]
async fn test_cart_survives_reopen() {
    let ctx = TestContext::new();
    let shirt = ctx.product(5).await.unwrap();
    let options = SelectedOptions::new().with("Size", "M").with("Color", "Blue");

    {
        let mut cart = ctx.storefront.open_cart();
        cart.add(&shirt, 2, options.clone());
    }

    // Same options in a different insertion order match the saved line.
    let reordered = SelectedOptions::new().with("Color", "Blue").with("Size", "M");
    let cart = ctx.storefront.open_cart();
    assert_eq!(cart.item_count(shirt.id, &reordered), 2);
    assert_eq!(cart.lines()[0].product, shirt);
}

#[tokio::test]
async fn test_snapshot_price_is_persisted() {
    let ctx = TestContext::new();
    let mut product = ctx.product(1).await.unwrap();
    let snapshot_price = product.price;

    {
        let mut cart = ctx.storefront.open_cart();
        cart.add(&product, 1, SelectedOptions::new());
    }

    // A later price change in the catalog does not reach the saved line.
    product.price = snapshot_price + Decimal::ONE;
    let mut cart = ctx.storefront.open_cart();
    cart.add(&product, 1, SelectedOptions::new());

    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.total_price(), snapshot_price * Decimal::from(2));
}

#[tokio::test]
async fn test_clear_deletes_the_slot() {
    let ctx = TestContext::new();
    let product = ctx.product(2).await.unwrap();

    let mut cart = ctx.storefront.open_cart();
    cart.add_one(&product);
    assert!(slot_path(&ctx).exists());

    cart.clear();
    assert!(!slot_path(&ctx).exists());
    assert!(ctx.storefront.open_cart().is_empty());
}

// ============================================================================
// Hydration Recovery
// ============================================================================

#[test]
fn test_corrupt_slot_hydrates_empty() {
    let ctx = TestContext::new();
    std::fs::write(slot_path(&ctx), "{\"not\": \"an array\"}").unwrap();

    let cart = ctx.storefront.open_cart();
    assert!(cart.is_empty());
    assert_eq!(cart.total_items(), 0);
}

#[test]
fn test_opening_does_not_overwrite_saved_cart() {
    let ctx = TestContext::new();
    let saved = serde_json::json!([{
        "id": "6f1c2b8e-5a1d-4c3e-9f7a-2b4d6e8f0a1c",
        "quantity": 4,
        "productId": 9,
        "product": {
            "Id": 9,
            "name": "Pour-Over Kettle",
            "price": "39.00",
            "brand": "Hearth",
            "category": "Home & Kitchen",
            "inStock": true
        },
        "selectedOptions": {}
    }])
    .to_string();
    std::fs::write(slot_path(&ctx), &saved).unwrap();

    let notices = RecordingNotifier::new();
    let cart = CartManager::open(
        FileStorage::new(ctx.data_dir()),
        DEFAULT_CART_KEY,
        notices.clone(),
    );

    assert_eq!(cart.item_count(ProductId::new(9), &SelectedOptions::new()), 4);
    assert!(notices.notices().is_empty());
    assert_eq!(
        FileStorage::new(ctx.data_dir())
            .get(DEFAULT_CART_KEY)
            .unwrap()
            .as_deref(),
        Some(saved.as_str())
    );
}
