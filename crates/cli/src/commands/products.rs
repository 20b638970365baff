//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! shopflow products list --category Clothing --max-price 50
//! shopflow products show 3
//! shopflow products search "wireless"
//! shopflow products featured
//! shopflow products related 3
//! ```

use clap::Subcommand;
use rust_decimal::Decimal;
use shopflow_core::{Product, ProductId};
use shopflow_storefront::Storefront;
use shopflow_storefront::repository::{ProductFilter, ProductRepository};

use super::{money, print_products};

#[derive(Subcommand)]
pub enum ProductAction {
    /// List products, optionally filtered
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        subcategory: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        min_price: Option<Decimal>,
        #[arg(long)]
        max_price: Option<Decimal>,
        #[arg(long)]
        min_rating: Option<f32>,
        /// Only products that are in stock
        #[arg(long)]
        in_stock: bool,
    },
    /// Show one product
    Show { id: ProductId },
    /// Search name, description, category, and brand
    Search { query: String },
    /// Highly rated products
    Featured,
    /// Products in the same category
    Related { id: ProductId },
}

pub async fn run(storefront: &Storefront, action: ProductAction) -> shopflow_storefront::Result<()> {
    let products = storefront.products();

    match action {
        ProductAction::List {
            category,
            subcategory,
            brand,
            min_price,
            max_price,
            min_rating,
            in_stock,
        } => {
            let filter = ProductFilter {
                category,
                subcategory,
                min_price,
                max_price,
                min_rating,
                brand,
                in_stock: in_stock.then_some(true),
            };
            let listed = if filter == ProductFilter::default() {
                products.get_all().await?
            } else {
                products.get_filtered(&filter).await?
            };
            print_products(&listed);
        }
        ProductAction::Show { id } => print_detail(&products.get_by_id(id).await?),
        ProductAction::Search { query } => print_products(&products.search(&query).await?),
        ProductAction::Featured => print_products(&products.get_featured().await?),
        ProductAction::Related { id } => print_products(&products.get_related(id).await?),
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_detail(product: &Product) {
    println!("{} (#{})", product.name, product.id);
    println!("  Brand:    {}", product.brand);
    match &product.subcategory {
        Some(sub) => println!("  Category: {} / {sub}", product.category),
        None => println!("  Category: {}", product.category),
    }
    match product.original_price.filter(|_| product.is_on_sale()) {
        Some(was) => println!("  Price:    {} (was {})", money(product.price), money(was)),
        None => println!("  Price:    {}", money(product.price)),
    }
    println!(
        "  Rating:   {:.1} ({} reviews)",
        product.rating, product.review_count
    );
    if product.in_stock {
        println!("  Stock:    {} available", product.stock_quantity);
    } else {
        println!("  Stock:    out of stock");
    }
    if let Some(sku) = &product.sku {
        println!("  SKU:      {sku}");
    }
    if !product.description.is_empty() {
        println!();
        println!("  {}", product.description);
    }
}
