//! # Transaction Recorder
//!
//! The one operation that must touch multiple entities atomically: a
//! checkout validates the whole cart against live stock, decrements every
//! affected product, then commits the immutable transaction record.
//!
//! ## Commit Ordering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Write Path                          │
//! │                                                                     │
//! │  1. Validate draft (items, quantities, cash tendered)               │
//! │  2. Read every referenced product ONCE; quantities for duplicate    │
//! │     cart lines are summed before the stock check                    │
//! │       ├── missing id        → ProductNotFound   (nothing written)   │
//! │       └── stock < quantity  → InsufficientStock (nothing written)   │
//! │  3. Persist every decremented product                               │
//! │  4. Persist the transaction record LAST                             │
//! │                                                                     │
//! │  A failure before step 3 writes nothing. A failure between 3 and 4  │
//! │  leaves only stock deltas, recoverable by re-reading stock; it can  │
//! │  never leave an orphaned transaction record.                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, info};

use atlas_core::validation::{validate_price, validate_quantity};
use atlas_core::{Cashier, CoreError, PaymentMethod, Product, Transaction, TransactionDraft, ValidationError};

use crate::error::ServiceResult;
use crate::ids;
use crate::schema::collections;
use crate::store::Store;

/// The transaction recorder over the append-only sales ledger.
#[derive(Debug, Clone)]
pub struct TransactionService {
    store: Store,
}

impl TransactionService {
    pub fn new(store: Store) -> Self {
        TransactionService { store }
    }

    /// Returns every transaction, newest first.
    pub async fn get_all(&self) -> ServiceResult<Vec<Transaction>> {
        let mut transactions: Vec<Transaction> =
            self.store.get_all(collections::TRANSACTIONS).await?;
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(transactions)
    }

    /// Commits a sale: validates the draft, decrements stock, writes the
    /// transaction record, and returns it for receipt display.
    pub async fn add(&self, draft: TransactionDraft, cashier: &Cashier) -> ServiceResult<Transaction> {
        if draft.items.is_empty() {
            return Err(ValidationError::Required {
                field: "items".to_string(),
            }
            .into());
        }
        for item in &draft.items {
            validate_quantity(item.quantity)?;
            validate_price("price", item.price)?;
            validate_price("costPrice", item.cost_price)?;
        }

        if draft.payment_method == PaymentMethod::Cash && draft.amount_paid < draft.total_amount {
            return Err(CoreError::InsufficientPayment {
                total: draft.total_amount,
                paid: draft.amount_paid,
            }
            .into());
        }

        // One consistent read per product; two cart lines for the same
        // product must be covered by stock together, not individually.
        let mut requested: BTreeMap<String, i64> = BTreeMap::new();
        for item in &draft.items {
            *requested.entry(item.product_id.clone()).or_insert(0) += item.quantity;
        }

        let now = Utc::now();
        let mut decremented: Vec<Product> = Vec::with_capacity(requested.len());

        for (product_id, quantity) in &requested {
            let product: Option<Product> =
                self.store.get_by_id(collections::PRODUCTS, product_id).await?;

            let Some(mut product) = product else {
                return Err(CoreError::ProductNotFound(product_id.to_string()).into());
            };

            if product.stock < *quantity {
                return Err(CoreError::InsufficientStock {
                    name: product.name,
                    available: product.stock,
                    requested: *quantity,
                }
                .into());
            }

            product.stock -= quantity;
            product.updated_at = Some(now);
            decremented.push(product);
        }

        // Every line passed; apply the decrements.
        for product in &decremented {
            debug!(id = %product.id, stock = product.stock, "Committing stock decrement");
            self.store.upsert(collections::PRODUCTS, product).await?;
        }

        let transaction = Transaction {
            id: ids::receipt_id(),
            items: draft.items,
            total_amount: draft.total_amount,
            total_cost: draft.total_cost,
            payment_method: draft.payment_method,
            amount_paid: draft.amount_paid,
            change: draft.amount_paid - draft.total_amount,
            discount: draft.discount,
            notes: draft.notes,
            created_at: now,
            cashier_id: cashier.id.clone(),
            cashier_name: cashier.name.clone(),
        };

        self.store
            .insert(collections::TRANSACTIONS, &transaction)
            .await?;

        info!(
            id = %transaction.id,
            total = transaction.total_amount,
            items = transaction.items.len(),
            cashier = %transaction.cashier_name,
            "Transaction committed"
        );

        Ok(transaction)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
