//! Checkout: turn the cart into a placed order.
//!
//! Validation here is limited to required-field checks on the shipping and
//! payment forms. No payment is processed and card details never leave this
//! module; the order only records the payment method.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use shopflow_core::{NewOrder, Order, OrderItem, OrderStatus, ShippingAddress};

use crate::cart::{CartManager, CartNotifier, CartStorage};
use crate::repository::{OrderRepository, RepositoryError};

/// Payment method recorded on every order.
pub const PAYMENT_METHOD: &str = "Credit Card";

/// Default destination country.
pub const DEFAULT_COUNTRY: &str = "USA";

/// Checkout failures, shown to the shopper as warnings.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("Your cart is empty")]
    EmptyCart,

    /// A required form field was left blank.
    #[error("Please fill in the required field: {0}")]
    MissingField(&'static str),

    /// The order could not be created.
    #[error("Failed to place order: {0}")]
    Repository(#[from] RepositoryError),
}

/// Shipping form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl Default for ShippingInfo {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

impl ShippingInfo {
    /// Check every required field is non-blank. Phone is optional.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::MissingField` naming the first blank field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        require(&[
            ("first name", self.first_name.as_str()),
            ("last name", self.last_name.as_str()),
            ("email", self.email.as_str()),
            ("address", self.address.as_str()),
            ("city", self.city.as_str()),
            ("state", self.state.as_str()),
            ("zip code", self.zip_code.as_str()),
        ])
    }

    fn to_address(&self) -> ShippingAddress {
        let country = if self.country.trim().is_empty() {
            DEFAULT_COUNTRY.to_string()
        } else {
            self.country.trim().to_string()
        };

        ShippingAddress {
            street: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            zip_code: self.zip_code.trim().to_string(),
            country,
        }
    }
}

/// Payment form. Card number and CVV are kept secret and redacted from `Debug`.
#[derive(Debug)]
pub struct PaymentInfo {
    pub card_number: SecretString,
    pub expiry_date: String,
    pub cvv: SecretString,
    pub cardholder_name: String,
}

impl PaymentInfo {
    /// Check every required field is non-blank.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::MissingField` naming the first blank field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        require(&[
            ("card number", self.card_number.expose_secret()),
            ("expiry date", self.expiry_date.as_str()),
            ("CVV", self.cvv.expose_secret()),
            ("cardholder name", self.cardholder_name.as_str()),
        ])
    }
}

fn require(fields: &[(&'static str, &str)]) -> Result<(), CheckoutError> {
    fields
        .iter()
        .find(|(_, value)| value.trim().is_empty())
        .map_or(Ok(()), |&(name, _)| Err(CheckoutError::MissingField(name)))
}

/// Build the order request for the current cart contents.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` if the cart has no lines.
pub fn build_order<S: CartStorage, N: CartNotifier>(
    cart: &CartManager<S, N>,
    shipping: &ShippingInfo,
) -> Result<NewOrder, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let items = cart
        .lines()
        .iter()
        .map(|line| OrderItem {
            product_id: line.product_id,
            quantity: line.quantity,
            selected_options: line.selected_options.clone(),
        })
        .collect();

    Ok(NewOrder {
        items,
        total: cart.summary().charged_total(),
        status: OrderStatus::Processing,
        shipping_address: shipping.to_address(),
        payment_method: PAYMENT_METHOD.to_string(),
    })
}

/// Validate the shipping form, then the payment form, then create the order
/// and clear the cart.
///
/// The cart is only cleared once the order exists; on any error it is left
/// untouched so the shopper can retry.
///
/// # Errors
///
/// Returns `CheckoutError` if the cart is empty, a form is incomplete, or the
/// order repository rejects the order.
#[tracing::instrument(skip_all, fields(lines = cart.lines().len()))]
pub async fn place_order<S, N, R>(
    cart: &mut CartManager<S, N>,
    orders: &R,
    shipping: &ShippingInfo,
    payment: &PaymentInfo,
) -> Result<Order, CheckoutError>
where
    S: CartStorage,
    N: CartNotifier,
    R: OrderRepository,
{
    shipping.validate()?;
    payment.validate()?;
    let request = build_order(cart, shipping)?;

    let order = orders.create(request).await?;
    cart.clear();

    tracing::info!(order_id = %order.id, total = %order.total, "Order placed");
    Ok(order)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use shopflow_core::{Product, ProductId, SelectedOptions};

    use super::*;
    use crate::cart::{DEFAULT_CART_KEY, MemoryStorage, RecordingNotifier};
    use crate::repository::{InMemoryOrderRepository, Latency};

    fn shipping() -> ShippingInfo {
        ShippingInfo {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: String::new(),
            address: " 12 Analytical Way ".to_string(),
            city: "London".to_string(),
            state: "LDN".to_string(),
            zip_code: "10001".to_string(),
            country: String::new(),
        }
    }

    fn payment() -> PaymentInfo {
        PaymentInfo {
            card_number: SecretString::from("4242424242424242"),
            expiry_date: "12/30".to_string(),
            cvv: SecretString::from("123"),
            cardholder_name: "Ada Lovelace".to_string(),
        }
    }

    fn product(id: i32, price: Decimal) -> Product {
        serde_json::from_value(serde_json::json!({
            "Id": id,
            "name": format!("Item {id}"),
            "price": price.to_string(),
            "brand": "Acme",
            "category": "Electronics",
            "inStock": true
        }))
        .unwrap()
    }

    fn cart() -> CartManager<MemoryStorage, RecordingNotifier> {
        CartManager::open(MemoryStorage::new(), DEFAULT_CART_KEY, RecordingNotifier::new())
    }

    #[test]
    fn test_shipping_validation_names_first_blank_field() {
        assert!(shipping().validate().is_ok());

        let mut info = shipping();
        info.city = "   ".to_string();
        info.email = String::new();
        assert!(matches!(info.validate(), Err(CheckoutError::MissingField("email"))));
    }

    #[test]
    fn test_payment_validation() {
        assert!(payment().validate().is_ok());

        let mut info = payment();
        info.cvv = SecretString::from("");
        assert!(matches!(info.validate(), Err(CheckoutError::MissingField("CVV"))));
    }

    #[test]
    fn test_payment_debug_redacts_card() {
        let debug = format!("{:?}", payment());
        assert!(!debug.contains("4242424242424242"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_build_order_from_cart() {
        let mut cart = cart();
        cart.add(&product(1, Decimal::new(10, 0)), 2, SelectedOptions::new().with("Size", "M"));

        let order = build_order(&cart, &shipping()).unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].product_id, ProductId::new(1));
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.items[0].selected_options.get("Size"), Some("M"));
        // 20 + 9.99 shipping + 1.60 tax
        assert_eq!(order.total, Decimal::new(3159, 2));
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.payment_method, PAYMENT_METHOD);
        assert_eq!(order.shipping_address.street, "12 Analytical Way");
        assert_eq!(order.shipping_address.country, DEFAULT_COUNTRY);
    }

    #[test]
    fn test_build_order_rejects_empty_cart() {
        assert!(matches!(
            build_order(&cart(), &shipping()),
            Err(CheckoutError::EmptyCart)
        ));
    }

    #[tokio::test]
    async fn test_place_order_clears_cart() {
        let orders = InMemoryOrderRepository::new(Vec::new(), Latency::none());
        let mut cart = cart();
        cart.add(&product(5, Decimal::new(60, 0)), 1, SelectedOptions::new());

        let order = place_order(&mut cart, &orders, &shipping(), &payment())
            .await
            .unwrap();

        assert_eq!(order.tracking_number, "TRK001");
        // Over the threshold: free shipping, 8% tax
        assert_eq!(order.total, Decimal::new(6480, 2));
        assert!(cart.is_empty());
        assert_eq!(cart.storage().get(DEFAULT_CART_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_forms_are_checked_before_the_cart() {
        let orders = InMemoryOrderRepository::new(Vec::new(), Latency::none());
        let mut empty = cart();

        let mut info = shipping();
        info.first_name = String::new();
        let err = place_order(&mut empty, &orders, &info, &payment())
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::MissingField("first name")));

        let mut card = payment();
        card.card_number = SecretString::from(" ");
        let err = place_order(&mut empty, &orders, &shipping(), &card)
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::MissingField("card number")));

        let err = place_order(&mut empty, &orders, &shipping(), &payment())
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[tokio::test]
    async fn test_failed_validation_keeps_cart() {
        let orders = InMemoryOrderRepository::new(Vec::new(), Latency::none());
        let mut cart = cart();
        cart.add(&product(5, Decimal::new(60, 0)), 1, SelectedOptions::new());

        let mut info = shipping();
        info.zip_code = String::new();
        let err = place_order(&mut cart, &orders, &info, &payment())
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::MissingField("zip code")));
        assert_eq!(cart.total_items(), 1);
        assert!(orders.get_all().await.unwrap().is_empty());
    }
}
