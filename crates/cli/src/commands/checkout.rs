//! Checkout command.
//!
//! # Usage
//!
//! ```bash
//! shopflow checkout \
//!     --first-name Ada --last-name Lovelace --email ada@example.com \
//!     --address "12 Analytical Way" --city London --state LDN --zip-code 10001 \
//!     --card-number 4242424242424242 --expiry-date 12/30 --cvv 123 \
//!     --cardholder-name "Ada Lovelace"
//! ```
//!
//! Card number and CVV may also come from `SHOPFLOW_CARD_NUMBER` and
//! `SHOPFLOW_CARD_CVV` to keep them out of shell history.

use clap::Args;
use secrecy::SecretString;
use shopflow_storefront::Storefront;
use shopflow_storefront::checkout::{DEFAULT_COUNTRY, PaymentInfo, ShippingInfo, place_order};

use super::money;

#[derive(Args)]
pub struct CheckoutArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    /// Street address
    #[arg(long)]
    address: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    state: String,
    #[arg(long)]
    zip_code: String,
    #[arg(long, default_value = DEFAULT_COUNTRY)]
    country: String,

    #[arg(long, env = "SHOPFLOW_CARD_NUMBER", hide_env_values = true)]
    card_number: String,
    /// Card expiry as MM/YY
    #[arg(long)]
    expiry_date: String,
    #[arg(long, env = "SHOPFLOW_CARD_CVV", hide_env_values = true)]
    cvv: String,
    #[arg(long)]
    cardholder_name: String,
}

impl CheckoutArgs {
    fn into_forms(self) -> (ShippingInfo, PaymentInfo) {
        let shipping = ShippingInfo {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            country: self.country,
        };
        let payment = PaymentInfo {
            card_number: SecretString::from(self.card_number),
            expiry_date: self.expiry_date,
            cvv: SecretString::from(self.cvv),
            cardholder_name: self.cardholder_name,
        };
        (shipping, payment)
    }
}

#[allow(clippy::print_stdout)]
pub async fn run(storefront: &Storefront, args: CheckoutArgs) -> shopflow_storefront::Result<()> {
    let (shipping, payment) = args.into_forms();
    let mut cart = storefront.open_cart_with(super::cart::ConsoleNotifier);

    let order = place_order(&mut cart, storefront.orders(), &shipping, &payment).await?;

    println!("Order placed successfully!");
    println!("  Order:     #{}", order.id);
    println!("  Total:     {}", money(order.total));
    println!("  Tracking:  {}", order.tracking_number);
    println!("  Delivery:  {} (estimated)", order.estimated_delivery);
    Ok(())
}
