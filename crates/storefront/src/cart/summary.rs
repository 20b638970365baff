//! Order summary pricing shown beside the cart and at checkout.

use rust_decimal::Decimal;
use shopflow_core::Price;

/// Subtotals strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Flat shipping charge below the threshold ($9.99).
pub const FLAT_SHIPPING: Decimal = Decimal::from_parts(999, 0, 0, false, 2);

/// Sales tax rate applied to the subtotal (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Derived pricing for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSummary {
    /// Sum of line totals at snapshot prices.
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    /// `subtotal + shipping + tax`, unrounded.
    pub total: Decimal,
}

impl OrderSummary {
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal) -> Self {
        let shipping = if subtotal > FREE_SHIPPING_THRESHOLD {
            Decimal::ZERO
        } else {
            FLAT_SHIPPING
        };
        let tax = subtotal * TAX_RATE;

        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    #[must_use]
    pub fn ships_free(&self) -> bool {
        self.shipping.is_zero()
    }

    /// How much more the shopper needs to spend to ship free, if anything.
    #[must_use]
    pub fn amount_to_free_shipping(&self) -> Option<Decimal> {
        (!self.ships_free()).then(|| FREE_SHIPPING_THRESHOLD - self.subtotal)
    }

    /// Grand total rounded to cents, the amount actually charged.
    #[must_use]
    pub fn charged_total(&self) -> Decimal {
        Price::usd(self.total).rounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(FREE_SHIPPING_THRESHOLD, Decimal::new(50, 0));
        assert_eq!(FLAT_SHIPPING, Decimal::new(999, 2));
        assert_eq!(TAX_RATE, Decimal::new(8, 2));
    }

    #[test]
    fn test_small_order_pays_shipping() {
        let summary = OrderSummary::from_subtotal(Decimal::new(20, 0));
        assert_eq!(summary.shipping, Decimal::new(999, 2));
        assert_eq!(summary.tax, Decimal::new(160, 2));
        assert_eq!(summary.total, Decimal::new(3159, 2));
        assert_eq!(summary.amount_to_free_shipping(), Some(Decimal::new(30, 0)));
    }

    #[test]
    fn test_exactly_fifty_still_pays_shipping() {
        let summary = OrderSummary::from_subtotal(Decimal::new(50, 0));
        assert!(!summary.ships_free());
        assert_eq!(summary.amount_to_free_shipping(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_large_order_ships_free() {
        let summary = OrderSummary::from_subtotal(Decimal::new(10_000, 2));
        assert!(summary.ships_free());
        assert_eq!(summary.amount_to_free_shipping(), None);
        assert_eq!(summary.total, Decimal::new(108, 0));
    }

    #[test]
    fn test_charged_total_rounds_to_cents() {
        // 12.34 * 1.08 + 9.99 = 23.3172
        let summary = OrderSummary::from_subtotal(Decimal::new(1234, 2));
        assert_eq!(summary.charged_total(), Decimal::new(2332, 2));
    }
}
