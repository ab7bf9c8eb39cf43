//! # Seed Data Generator
//!
//! Populates a database with demo data for development: a small product
//! catalog, one admin, one cashier, the emergency-access code, and a sample
//! sale.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p atlas-db --bin seed
//!
//! # Specify a database path
//! cargo run -p atlas-db --bin seed -- --db ./data/atlas.db
//! ```

use std::env;

use atlas_core::{Cashier, NewStaff, PaymentMethod, StaffCredentials, TransactionDraft, TransactionItem};
use atlas_db::services::{ProductService, StaffService, TransactionService};
use atlas_db::services::product::ProductImport;
use atlas_db::{Store, StoreConfig};
use tracing_subscriber::EnvFilter;

/// Demo catalog: (name, category, price_buy, price_sell, stock, unit)
const SAMPLE_PRODUCTS: &[(&str, &str, i64, i64, i64, &str)] = &[
    ("Palm Sugar Latte", "Beverages", 8000, 18000, 50, "cup"),
    ("Chocolate Croissant", "Pastry", 10000, 22000, 25, "pcs"),
    ("Jasmine Tea", "Beverages", 4000, 12000, 100, "cup"),
    ("Sugar Donut", "Pastry", 3000, 8000, 40, "pcs"),
    ("Bottled Water", "Beverages", 2000, 5000, 80, "btl"),
    ("Cheese Toast", "Snacks", 6000, 15000, 30, "pcs"),
    ("Espresso", "Beverages", 5000, 14000, 60, "cup"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./atlas_dev.db");

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
                println!("Atlas POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./atlas_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Atlas POS Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let store = Store::connect(StoreConfig::new(&db_path)).await?;
    println!("✓ Store ready");

    let products = ProductService::new(store.clone());
    let staff = StaffService::new(store.clone());
    let transactions = TransactionService::new(store.clone());

    if !products.get_all().await?.is_empty() {
        println!("⚠ Database already has products; skipping seed.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Products: bulk import exercises the partial-success path.
    let records: Vec<ProductImport> = SAMPLE_PRODUCTS
        .iter()
        .map(|(name, category, price_buy, price_sell, stock, unit)| ProductImport {
            id: None,
            name: name.to_string(),
            category: Some(category.to_string()),
            price_buy: *price_buy,
            price_sell: *price_sell,
            stock: *stock,
            unit: Some(unit.to_string()),
            created_at: None,
            updated_at: None,
        })
        .collect();

    let outcome = products.import_bulk(records).await;
    println!(
        "✓ Products imported: {} inserted, {} skipped",
        outcome.inserted, outcome.skipped
    );
    for error in &outcome.errors {
        eprintln!("  skipped: {}", error);
    }

    // Staff: one admin, one cashier.
    let admin = staff
        .add(NewStaff {
            name: "Owner".to_string(),
            credentials: StaffCredentials::Admin {
                email: "owner@example.com".to_string(),
                password: "change-me".to_string(),
            },
        })
        .await?;
    println!("✓ Admin created: {} <owner@example.com>", admin.name);

    let cashier_user = staff
        .add(NewStaff {
            name: "Demo Cashier".to_string(),
            credentials: StaffCredentials::Cashier {
                pin: "1234".to_string(),
            },
        })
        .await?;
    println!("✓ Cashier created: {} (PIN 1234)", cashier_user.name);

    if staff.seed_emergency_code("atlas-rescue").await? {
        println!("✓ Emergency access code seeded");
    }

    // One demo sale so reports have something to show.
    let catalog = products.get_all().await?;
    if let Some(first) = catalog.first() {
        let sale = transactions
            .add(
                TransactionDraft {
                    items: vec![TransactionItem {
                        product_id: first.id.clone(),
                        product_name: first.name.clone(),
                        quantity: 2,
                        price: first.price_sell,
                        cost_price: first.price_buy,
                    }],
                    total_amount: first.price_sell * 2,
                    total_cost: first.price_buy * 2,
                    payment_method: PaymentMethod::Cash,
                    amount_paid: first.price_sell * 2,
                    discount: None,
                    notes: Some("seed data".to_string()),
                },
                &Cashier::from(&cashier_user),
            )
            .await?;
        println!("✓ Demo sale committed: {}", sale.id);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
