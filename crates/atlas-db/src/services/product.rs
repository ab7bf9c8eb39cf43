//! # Product Ledger
//!
//! CRUD and validation over the `products` collection. Write-time rules:
//! names non-empty, prices and stock never negative.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use atlas_core::validation::{validate_name, validate_price, validate_stock};
use atlas_core::{NewProduct, Product};

use crate::error::ServiceResult;
use crate::ids;
use crate::schema::collections;
use crate::store::Store;

// =============================================================================
// Bulk Import Types
// =============================================================================

/// A product record as found in an external seed/import file.
///
/// Relaxed shape: id and timestamps may be absent and are assigned during
/// import, matching hand-written JSON seed files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImport {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price_buy: i64,
    pub price_sell: i64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Result of a best-effort bulk import.
///
/// A failing record is skipped and recorded here; the batch always runs to
/// the end. `errors` holds one message per skipped record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportOutcome {
    pub inserted: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

// =============================================================================
// Product Service
// =============================================================================

/// The product ledger.
#[derive(Debug, Clone)]
pub struct ProductService {
    store: Store,
}

impl ProductService {
    pub fn new(store: Store) -> Self {
        ProductService { store }
    }

    /// Returns every product. Order is unspecified; the UI sorts.
    pub async fn get_all(&self) -> ServiceResult<Vec<Product>> {
        Ok(self.store.get_all(collections::PRODUCTS).await?)
    }

    /// Returns the product with the given id, if any.
    pub async fn get_by_id(&self, id: &str) -> ServiceResult<Option<Product>> {
        Ok(self.store.get_by_id(collections::PRODUCTS, id).await?)
    }

    /// Creates a product. Assigns id and timestamps.
    pub async fn add(&self, data: NewProduct) -> ServiceResult<Product> {
        validate_name("name", &data.name)?;
        validate_price("priceBuy", data.price_buy)?;
        validate_price("priceSell", data.price_sell)?;
        validate_stock(data.stock)?;

        let now = Utc::now();
        let product = Product {
            id: ids::entity_id(),
            name: data.name,
            category: data.category,
            price_buy: data.price_buy,
            price_sell: data.price_sell,
            stock: data.stock,
            unit: data.unit,
            created_at: now,
            updated_at: Some(now),
        };

        debug!(id = %product.id, name = %product.name, "Adding product");
        self.store.insert(collections::PRODUCTS, &product).await?;

        Ok(product)
    }

    /// Updates a product in place. Re-validates and refreshes `updatedAt`;
    /// returns the stored record.
    pub async fn update(&self, mut product: Product) -> ServiceResult<Product> {
        validate_name("name", &product.name)?;
        validate_price("priceBuy", product.price_buy)?;
        validate_price("priceSell", product.price_sell)?;
        validate_stock(product.stock)?;

        product.updated_at = Some(Utc::now());

        debug!(id = %product.id, "Updating product");
        self.store.upsert(collections::PRODUCTS, &product).await?;

        Ok(product)
    }

    /// Deletes a product by id. Deleting a missing id is a no-op.
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        debug!(id = %id, "Deleting product");
        Ok(self.store.delete_by_id(collections::PRODUCTS, id).await?)
    }

    /// Best-effort bulk import for seeding and demo data.
    ///
    /// Records missing an id or createdAt get them assigned. A record that
    /// fails validation or insertion (e.g. a duplicate id) is skipped and
    /// reported in the outcome; the rest of the batch continues.
    pub async fn import_bulk(&self, records: Vec<ProductImport>) -> ImportOutcome {
        let mut outcome = ImportOutcome::default();

        for record in records {
            let label = record.name.clone();
            match self.import_one(record).await {
                Ok(()) => outcome.inserted += 1,
                Err(err) => {
                    warn!(product = %label, error = %err, "Skipping product during import");
                    outcome.skipped += 1;
                    outcome.errors.push(format!("{}: {}", label, err));
                }
            }
        }

        debug!(
            inserted = outcome.inserted,
            skipped = outcome.skipped,
            "Bulk import finished"
        );
        outcome
    }

    async fn import_one(&self, record: ProductImport) -> ServiceResult<()> {
        validate_name("name", &record.name)?;
        validate_price("priceBuy", record.price_buy)?;
        validate_price("priceSell", record.price_sell)?;
        validate_stock(record.stock)?;

        let product = Product {
            id: record.id.unwrap_or_else(ids::entity_id),
            name: record.name,
            category: record.category,
            price_buy: record.price_buy,
            price_sell: record.price_sell,
            stock: record.stock,
            unit: record.unit,
            created_at: record.created_at.unwrap_or_else(Utc::now),
            updated_at: record.updated_at,
        };

        self.store.insert(collections::PRODUCTS, &product).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
