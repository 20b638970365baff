//! Order history commands.
//!
//! Orders live in the `shopflow-orders` slot under `SHOPFLOW_DATA_DIR`, so a
//! checkout or status change is visible to later runs.
//!
//! # Usage
//!
//! ```bash
//! shopflow orders list --status shipped --sort total --ascending
//! shopflow orders show 2
//! shopflow orders status 3 cancelled
//! ```

use clap::{Subcommand, ValueEnum};
use shopflow_core::{Order, OrderId, OrderStatus};
use shopflow_storefront::Storefront;
use shopflow_storefront::repository::{OrderQuery, OrderRepository, OrderSort};

use super::money;

#[derive(Subcommand)]
pub enum OrderAction {
    /// List orders, newest first by default
    List {
        /// Only orders with this status
        #[arg(long)]
        status: Option<OrderStatus>,
        #[arg(long, value_enum, default_value_t = SortKey::Date)]
        sort: SortKey,
        /// Sort ascending instead of descending
        #[arg(long)]
        ascending: bool,
    },
    /// Show an order with its tracking history
    Show { id: OrderId },
    /// Change an order's status
    Status { id: OrderId, status: OrderStatus },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    Date,
    Total,
    Status,
}

impl From<SortKey> for OrderSort {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Date => Self::Date,
            SortKey::Total => Self::Total,
            SortKey::Status => Self::Status,
        }
    }
}

#[allow(clippy::print_stdout)]
pub async fn run(storefront: &Storefront, action: OrderAction) -> shopflow_storefront::Result<()> {
    let orders = storefront.orders();

    match action {
        OrderAction::List {
            status,
            sort,
            ascending,
        } => {
            let all = orders.get_all().await?;
            let counts = OrderQuery::status_counts(&all)
                .into_iter()
                .map(|(status, count)| format!("{status}: {count}"))
                .collect::<Vec<_>>()
                .join(", ");

            let query = OrderQuery {
                status,
                sort: sort.into(),
                descending: !ascending,
            };
            let listed = query.apply(all);
            if listed.is_empty() {
                println!("No orders found");
            }
            for order in &listed {
                println!(
                    "#{:<4} {}  {:<10} {:>3} items  {:>10}  {}",
                    order.id,
                    order.order_date,
                    order.status,
                    order.item_count(),
                    money(order.total),
                    order.tracking_number,
                );
            }
            println!();
            println!("{counts}");
        }
        OrderAction::Show { id } => print_order(&orders.get_by_id(id).await?),
        OrderAction::Status { id, status } => {
            let order = orders.update_status(id, status).await?;
            println!("Order #{} is now {}", order.id, order.status);
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_order(order: &Order) {
    let address = &order.shipping_address;
    println!("Order #{} ({})", order.id, order.status);
    println!("  Placed:    {}", order.order_date);
    println!("  Delivery:  {} (estimated)", order.estimated_delivery);
    println!("  Tracking:  {}", order.tracking_number);
    println!("  Payment:   {}", order.payment_method);
    println!(
        "  Ship to:   {}, {}, {} {}, {}",
        address.street, address.city, address.state, address.zip_code, address.country
    );
    println!("  Total:     {}", money(order.total));

    println!();
    for item in &order.items {
        if item.selected_options.is_empty() {
            println!("  {} x product {}", item.quantity, item.product_id);
        } else {
            println!(
                "  {} x product {} [{}]",
                item.quantity, item.product_id, item.selected_options
            );
        }
    }

    if !order.tracking_updates.is_empty() {
        println!();
        for update in &order.tracking_updates {
            println!("  {}  {:<20} {}", update.date, update.status, update.location);
        }
    }
}
