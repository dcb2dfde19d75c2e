//! # Seed Data Generator
//!
//! Populates the database with demo stock for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p dukan-db --bin seed
//!
//! # Specify database path
//! cargo run -p dukan-db --bin seed -- --db ./data/dukan.db
//! ```
//!
//! ## Generated Stock
//! A small grocery catalog with a spread of situations:
//! - perishables expiring within the next week (near-expiry report)
//! - lots at or below the default low-stock threshold
//! - non-perishables without an expiration date
//! - a handful of recorded sales so profit figures are non-zero

use chrono::{Duration, Utc};
use std::env;
use tracing_subscriber::EnvFilter;

use dukan_core::{ProductLot, SaleRecord};
use dukan_db::repository::product::generate_lot_id;
use dukan_db::repository::sale::generate_sale_id;
use dukan_db::{Database, DbConfig};

/// Demo catalog: (name, quantity, buy cents, sell cents, expiry offset days).
///
/// Offsets are relative to the day the seed runs; None means no expiration.
const CATALOG: &[(&str, i64, i64, i64, Option<i64>)] = &[
    ("Milk 1L", 12, 100, 150, Some(3)),
    ("Yogurt 500g", 8, 80, 120, Some(5)),
    ("Eggs Dozen", 20, 250, 350, Some(14)),
    ("White Cheese 250g", 4, 180, 260, Some(6)),
    ("Flatbread Pack", 15, 50, 80, Some(2)),
    ("Chicken Breast 1kg", 6, 450, 650, Some(4)),
    ("Tomatoes 1kg", 10, 70, 110, Some(5)),
    ("Cucumbers 1kg", 9, 60, 95, Some(5)),
    ("Apples 1kg", 14, 120, 180, Some(21)),
    ("Rice 5kg", 7, 900, 1250, None),
    ("Sugar 1kg", 25, 110, 160, None),
    ("Sunflower Oil 1L", 11, 280, 380, None),
    ("Tea 500g", 3, 350, 500, None),
    ("Canned Beans", 30, 90, 140, Some(365)),
    ("Dish Soap", 2, 130, 200, None),
];

/// Demo sales recorded against the catalog: (name, units sold).
///
/// Each entry becomes a sale row with price snapshots taken from the
/// catalog, and the matching lot quantity is reduced by the units sold.
const DEMO_SALES: &[(&str, i64)] = &[
    ("Milk 1L", 3),
    ("Flatbread Pack", 5),
    ("Rice 5kg", 1),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./dukan_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Dukan Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./dukan_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Dukan Seed Data Generator");
    println!("=========================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database (runs migrations, seeds the settings row)
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    let (total, applied) = dukan_db::migrations::migration_status(db.pool()).await?;
    println!("Connected, migrations applied ({}/{})", applied, total);

    // Check existing stock
    let existing = db.products().count().await?;
    if existing > 0 {
        println!("Database already has {} lots", existing);
        println!("Skipping seed to avoid duplicates.");
        println!("Delete the database file to regenerate.");
        return Ok(());
    }

    println!("Seeding demo stock...");

    let now = Utc::now();
    let today = now.date_naive();
    let mut seeded = 0;
    let mut lots: Vec<ProductLot> = Vec::with_capacity(CATALOG.len());

    for &(name, quantity, buy_cents, sell_cents, expiry_offset) in CATALOG {
        let lot = ProductLot {
            id: generate_lot_id(),
            name: name.to_string(),
            quantity,
            buy_price_cents: buy_cents,
            sell_price_cents: sell_cents,
            expiration_date: expiry_offset.map(|days| today + Duration::days(days)),
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = db.products().insert(&lot).await {
            eprintln!("Failed to insert {}: {}", name, e);
            continue;
        }

        seeded += 1;
        lots.push(lot);
    }

    println!("Recording demo sales...");

    let mut sales_recorded = 0;

    for &(name, sold) in DEMO_SALES {
        let lot = match lots.iter().find(|l| l.name == name) {
            Some(lot) => lot,
            None => continue,
        };

        let sale = SaleRecord {
            id: generate_sale_id(),
            product_id: Some(lot.id.clone()),
            quantity_sold: sold,
            unit_price_cents: lot.sell_price_cents,
            unit_cost_cents: lot.buy_price_cents,
            total_cents: lot.sell_price_cents * sold,
            profit_cents: (lot.sell_price_cents - lot.buy_price_cents) * sold,
            sale_date: now,
        };

        if let Err(e) = db.sales().insert(&sale).await {
            eprintln!("Failed to record sale of {}: {}", name, e);
            continue;
        }

        // Keep the stock count consistent with the recorded sale
        db.products()
            .update_quantity_and_prices(
                &lot.id,
                lot.quantity - sold,
                lot.buy_price_cents,
                lot.sell_price_cents,
            )
            .await?;

        sales_recorded += 1;
    }

    let settings = db.settings().get().await?;

    println!();
    println!("Seeded {} lots, {} sales", seeded, sales_recorded);
    println!(
        "Settings: rate {} IQD/USD, low-stock threshold {}",
        settings.usd_to_iqd_rate, settings.low_stock_threshold
    );

    let low = db.products().low_stock(settings.low_stock_threshold).await?;
    println!("  Low stock now: {} lots", low.len());

    let soon = db.products().expiring_before(today + Duration::days(7)).await?;
    println!("  Expiring within 7 days: {} lots", soon.len());

    let profit = db.sales().total_profit().await?;
    println!("  Recorded profit: {} minor units", profit);

    println!();
    println!("Seed complete!");

    db.close().await;

    Ok(())
}
