//! Subcommand implementations.

pub mod cart;
pub mod categories;
pub mod checkout;
pub mod orders;
pub mod products;

use rust_decimal::Decimal;
use shopflow_core::{Price, Product, SelectedOptions};

/// Parse a `Name=Value` product option.
pub fn parse_option(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let (name, value) = (name.trim(), value.trim());
    if name.is_empty() || value.is_empty() {
        return Err(format!("option name and value must be non-empty, got '{raw}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Collect parsed `--option` flags into a selection.
pub fn selected_options(pairs: Vec<(String, String)>) -> SelectedOptions {
    pairs.into_iter().collect()
}

pub fn money(amount: Decimal) -> String {
    Price::usd(amount).display()
}

/// One-line catalog listing entry.
#[allow(clippy::print_stdout)]
pub fn print_product_row(product: &Product) {
    let stock = if product.in_stock { "" } else { "  (out of stock)" };
    println!(
        "{:>4}  {:<32} {:>10}  {:.1}*  {}{stock}",
        product.id,
        product.name,
        money(product.price),
        product.rating,
        product.category,
    );
}

#[allow(clippy::print_stdout)]
pub fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("No products found");
        return;
    }
    for product in products {
        print_product_row(product);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_option() {
        assert_eq!(
            parse_option("Color = Red"),
            Ok(("Color".to_string(), "Red".to_string()))
        );
        assert!(parse_option("Color").is_err());
        assert!(parse_option("=Red").is_err());
    }

    #[test]
    fn test_selected_options_last_value_wins() {
        let options = selected_options(vec![
            ("Size".to_string(), "S".to_string()),
            ("Size".to_string(), "M".to_string()),
        ]);
        assert_eq!(options.len(), 1);
        assert_eq!(options.get("Size"), Some("M"));
    }
}
