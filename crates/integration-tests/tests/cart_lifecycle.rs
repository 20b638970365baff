//! Cart operations against the live catalog.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use shopflow_core::{ProductId, SelectedOptions};
use shopflow_storefront::cart::{
    CartManager, CartNotice, DEFAULT_CART_KEY, MemoryStorage, RecordingNotifier,
};
use shopflow_integration_tests::TestContext;

fn memory_cart() -> (CartManager<MemoryStorage, RecordingNotifier>, RecordingNotifier) {
    let notices = RecordingNotifier::new();
    let cart = CartManager::open(MemoryStorage::new(), DEFAULT_CART_KEY, notices.clone());
    (cart, notices)
}

#[tokio::test]
async fn test_add_update_remove() {
    let ctx = TestContext::new();
    let product = ctx.product(1).await.unwrap();
    let price = product.price;
    let none = SelectedOptions::new();
    let (mut cart, notices) = memory_cart();

    cart.add(&product, 2, none.clone());
    assert_eq!(cart.total_items(), 2);
    assert_eq!(cart.total_price(), price * Decimal::from(2));

    cart.add(&product, 3, none.clone());
    assert_eq!(cart.item_count(product.id, &none), 5);
    assert_eq!(cart.total_price(), price * Decimal::from(5));

    assert!(cart.update_quantity(product.id, 1, &none));
    assert_eq!(cart.total_price(), price);

    assert!(cart.remove(product.id, &none));
    assert!(cart.is_empty());
    assert_eq!(cart.total_items(), 0);

    assert_eq!(
        notices.take(),
        vec![
            CartNotice::ItemAdded {
                product_name: product.name.clone(),
                quantity: 2
            },
            // The merged line's total, not the amount just added.
            CartNotice::QuantityUpdated {
                product_name: product.name.clone(),
                new_quantity: 5
            },
            CartNotice::ItemRemoved {
                product_id: product.id
            },
        ]
    );
}

#[tokio::test]
async fn test_option_variants_are_separate_lines() {
    let ctx = TestContext::new();
    let shirt = ctx.product(5).await.unwrap();
    let small = SelectedOptions::new().with("Size", "S");
    let large = SelectedOptions::new().with("Size", "L");
    let (mut cart, _) = memory_cart();

    cart.add(&shirt, 1, small.clone());
    cart.add(&shirt, 2, large.clone());

    assert_eq!(cart.lines().len(), 2);
    assert_eq!(cart.total_items(), 3);

    assert!(cart.remove(shirt.id, &small));
    assert_eq!(cart.item_count(shirt.id, &large), 2);
    assert!(!cart.remove(shirt.id, &small));
}

#[tokio::test]
async fn test_unknown_line_is_not_created() {
    let ctx = TestContext::new();
    let product = ctx.product(3).await.unwrap();
    let (mut cart, notices) = memory_cart();
    cart.add_one(&product);
    notices.take();

    assert!(!cart.update_quantity(ProductId::new(42), 3, &SelectedOptions::new()));
    assert!(!cart.remove(ProductId::new(42), &SelectedOptions::new()));
    assert_eq!(cart.lines().len(), 1);
    assert!(notices.notices().is_empty());
}

#[tokio::test]
async fn test_summary_crosses_free_shipping_threshold() {
    let ctx = TestContext::new();
    let tee = ctx.product(6).await.unwrap();
    assert_eq!(tee.price, Decimal::new(2400, 2));
    let none = SelectedOptions::new();
    let (mut cart, _) = memory_cart();

    cart.add_one(&tee);
    let summary = cart.summary();
    assert!(!summary.ships_free());
    assert_eq!(summary.shipping, Decimal::new(999, 2));
    assert_eq!(summary.amount_to_free_shipping(), Some(Decimal::new(26, 0)));

    // $48 is still under the threshold.
    cart.update_quantity(tee.id, 2, &none);
    assert!(!cart.summary().ships_free());

    cart.update_quantity(tee.id, 3, &none);
    let summary = cart.summary();
    assert!(summary.ships_free());
    assert_eq!(summary.tax, Decimal::new(576, 2));
    assert_eq!(summary.charged_total(), Decimal::new(7776, 2));
}
