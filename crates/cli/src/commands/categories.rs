//! Category browsing commands.

use clap::Subcommand;
use shopflow_core::CategoryId;
use shopflow_storefront::Storefront;
use shopflow_storefront::repository::{CategoryRepository, ProductRepository};

use super::print_products;

#[derive(Subcommand)]
pub enum CategoryAction {
    /// List categories with product counts
    List,
    /// Show a category and its products
    Show { id: CategoryId },
}

#[allow(clippy::print_stdout)]
pub async fn run(storefront: &Storefront, action: CategoryAction) -> shopflow_storefront::Result<()> {
    match action {
        CategoryAction::List => {
            for category in storefront.categories().get_all().await? {
                println!(
                    "{:>4}  {:<24} {} products",
                    category.id, category.name, category.product_count
                );
            }
        }
        CategoryAction::Show { id } => {
            let category = storefront.categories().get_by_id(id).await?;
            println!("{} ({} products)", category.name, category.product_count);
            let products = storefront
                .products()
                .get_by_category(&category.name)
                .await?;
            print_products(&products);
        }
    }
    Ok(())
}
