//! Cart commands.
//!
//! The cart lives in a file slot under `SHOPFLOW_DATA_DIR`, so it survives
//! between invocations.
//!
//! # Usage
//!
//! ```bash
//! shopflow cart add 5 --quantity 2 --option Size=M --option Color=Blue
//! shopflow cart update 5 3 --option Color=Blue --option Size=M
//! shopflow cart remove 5 --option Size=M --option Color=Blue
//! shopflow cart show
//! shopflow cart clear
//! ```

use clap::Subcommand;
use shopflow_core::ProductId;
use shopflow_storefront::cart::{CartManager, CartNotice, CartNotifier, CartStorage, NoticeKind};
use shopflow_storefront::repository::ProductRepository;
use shopflow_storefront::{AppError, Storefront};

use super::{money, parse_option, selected_options};

#[derive(Subcommand)]
pub enum CartAction {
    /// Show cart contents and order summary
    Show,
    /// Add a product to the cart
    Add {
        product_id: ProductId,
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
        /// Product option as NAME=VALUE (repeatable)
        #[arg(short, long = "option", value_parser = parse_option)]
        options: Vec<(String, String)>,
    },
    /// Remove a line from the cart
    Remove {
        product_id: ProductId,
        /// Product option as NAME=VALUE (repeatable)
        #[arg(short, long = "option", value_parser = parse_option)]
        options: Vec<(String, String)>,
    },
    /// Set a line's quantity; 0 removes it
    Update {
        product_id: ProductId,
        quantity: u32,
        /// Product option as NAME=VALUE (repeatable)
        #[arg(short, long = "option", value_parser = parse_option)]
        options: Vec<(String, String)>,
    },
    /// Empty the cart
    Clear,
}

/// Prints cart notices as status lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl CartNotifier for ConsoleNotifier {
    #[allow(clippy::print_stdout)]
    fn notify(&self, notice: &CartNotice) {
        let marker = match notice.kind() {
            NoticeKind::Success => "✓",
            NoticeKind::Info => "i",
        };
        println!("{marker} {}", notice.message());
    }
}

pub async fn run(storefront: &Storefront, action: CartAction) -> shopflow_storefront::Result<()> {
    let mut cart = storefront.open_cart_with(ConsoleNotifier);

    match action {
        CartAction::Show => print_cart(&cart),
        CartAction::Add {
            product_id,
            quantity,
            options,
        } => {
            let product = storefront.products().get_by_id(product_id).await?;
            if !product.in_stock {
                return Err(AppError::BadRequest(format!(
                    "{} is out of stock",
                    product.name
                )));
            }
            cart.add(&product, quantity, selected_options(options));
        }
        CartAction::Remove {
            product_id,
            options,
        } => {
            if !cart.remove(product_id, &selected_options(options)) {
                return Err(missing_line(product_id));
            }
        }
        CartAction::Update {
            product_id,
            quantity,
            options,
        } => {
            if !cart.update_quantity(product_id, quantity, &selected_options(options)) {
                return Err(missing_line(product_id));
            }
            print_cart(&cart);
        }
        CartAction::Clear => cart.clear(),
    }
    Ok(())
}

fn missing_line(product_id: ProductId) -> AppError {
    AppError::NotFound(format!(
        "Cart line for product {product_id} with those options"
    ))
}

#[allow(clippy::print_stdout)]
fn print_cart<S: CartStorage, N: CartNotifier>(cart: &CartManager<S, N>) {
    if cart.is_empty() {
        println!("Your cart is empty");
        return;
    }

    for line in cart.lines() {
        let options = if line.selected_options.is_empty() {
            String::new()
        } else {
            format!(" [{}]", line.selected_options)
        };
        println!(
            "{:>4}  {}{options}  {} x {} = {}",
            line.product_id,
            line.product.name,
            line.quantity,
            money(line.product.price),
            money(line.line_total()),
        );
    }

    let summary = cart.summary();
    println!();
    println!("  Items:    {}", cart.total_items());
    println!("  Subtotal: {}", money(summary.subtotal));
    if summary.ships_free() {
        println!("  Shipping: FREE");
    } else {
        println!("  Shipping: {}", money(summary.shipping));
    }
    println!("  Tax:      {}", money(summary.tax));
    println!("  Total:    {}", money(summary.total));
    if let Some(remaining) = summary.amount_to_free_shipping() {
        println!("  Add {} more for free shipping", money(remaining));
    }
}
