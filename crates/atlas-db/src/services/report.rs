//! # Report Service
//!
//! Read-only derived views over the transaction ledger: period filters,
//! revenue/profit summaries, and the best-sellers ranking. Pure folds; this
//! service never writes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use atlas_core::{BestSeller, ReportSummary, Transaction};

use crate::error::ServiceResult;
use crate::services::transaction::TransactionService;
use crate::store::Store;

/// Sales reporting over committed transactions.
#[derive(Debug, Clone)]
pub struct ReportService {
    transactions: TransactionService,
}

impl ReportService {
    pub fn new(store: Store) -> Self {
        ReportService {
            transactions: TransactionService::new(store),
        }
    }

    /// Returns transactions whose `createdAt` falls inside the inclusive
    /// period, newest first.
    pub async fn transactions_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ServiceResult<Vec<Transaction>> {
        let all = self.transactions.get_all().await?;
        Ok(all
            .into_iter()
            .filter(|t| t.created_at >= start && t.created_at <= end)
            .collect())
    }

    /// Aggregates revenue, profit, and volume for the period.
    pub async fn summary(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ServiceResult<ReportSummary> {
        let transactions = self.transactions_between(start, end).await?;

        let mut summary = ReportSummary::default();
        for t in &transactions {
            summary.revenue += t.total_amount;
            summary.profit += t.total_amount - t.total_cost;
            summary.transaction_count += 1;
            summary.items_sold_count += t.items.iter().map(|i| i.quantity).sum::<i64>();
        }

        Ok(summary)
    }

    /// Ranks products by quantity sold in the period, descending, truncated
    /// to `limit`.
    pub async fn best_sellers(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: usize,
    ) -> ServiceResult<Vec<BestSeller>> {
        let transactions = self.transactions_between(start, end).await?;

        let mut sold: BTreeMap<String, BestSeller> = BTreeMap::new();
        for t in &transactions {
            for item in &t.items {
                sold.entry(item.product_id.clone())
                    .and_modify(|b| b.quantity_sold += item.quantity)
                    .or_insert_with(|| BestSeller {
                        product_id: item.product_id.clone(),
                        product_name: item.product_name.clone(),
                        quantity_sold: item.quantity,
                    });
            }
        }

        let mut ranking: Vec<BestSeller> = sold.into_values().collect();
        ranking.sort_by(|a, b| b.quantity_sold.cmp(&a.quantity_sold));
        ranking.truncate(limit);

        Ok(ranking)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::product::ProductService;
    use crate::store::StoreConfig;
    use atlas_core::{Cashier, NewProduct, PaymentMethod, TransactionDraft, TransactionItem};
    use chrono::Duration;

    struct Fixture {
        products: ProductService,
        transactions: TransactionService,
        reports: ReportService,
    }

    async fn fixture() -> Fixture {
        let store = Store::connect(StoreConfig::in_memory()).await.unwrap();
        Fixture {
            products: ProductService::new(store.clone()),
            transactions: TransactionService::new(store.clone()),
            reports: ReportService::new(store),
        }
    }

    async fn sell(fx: &Fixture, name: &str, quantity: i64, price: i64, cost: i64) {
        let product = fx
            .products
            .add(NewProduct {
                name: name.to_string(),
                category: None,
                price_buy: cost,
                price_sell: price,
                stock: 100,
                unit: None,
            })
            .await
            .unwrap();

        fx.transactions
            .add(
                TransactionDraft {
                    items: vec![TransactionItem {
                        product_id: product.id,
                        product_name: name.to_string(),
                        quantity,
                        price,
                        cost_price: cost,
                    }],
                    total_amount: price * quantity,
                    total_cost: cost * quantity,
                    payment_method: PaymentMethod::Cash,
                    amount_paid: price * quantity,
                    discount: None,
                    notes: None,
                },
                &Cashier {
                    id: "U-1".to_string(),
                    name: "Ayu".to_string(),
                },
            )
            .await
            .unwrap();
    }

    fn whole_day() -> (DateTime<Utc>, DateTime<Utc>) {
        let now = Utc::now();
        (now - Duration::hours(1), now + Duration::hours(1))
    }

    #[tokio::test]
    async fn test_summary_aggregates_revenue_and_profit() {
        let fx = fixture().await;

        sell(&fx, "Iced Tea", 2, 1000, 400).await; // revenue 2000, cost 800
        sell(&fx, "Donut", 3, 500, 200).await; // revenue 1500, cost 600

        let (start, end) = whole_day();
        let summary = fx.reports.summary(start, end).await.unwrap();

        assert_eq!(summary.revenue, 3500);
        assert_eq!(summary.profit, 3500 - 1400);
        assert_eq!(summary.transaction_count, 2);
        assert_eq!(summary.items_sold_count, 5);
    }

    #[tokio::test]
    async fn test_summary_respects_period_bounds() {
        let fx = fixture().await;
        sell(&fx, "Iced Tea", 1, 1000, 400).await;

        let past_start = Utc::now() - Duration::days(7);
        let past_end = Utc::now() - Duration::days(6);
        let summary = fx.reports.summary(past_start, past_end).await.unwrap();

        assert_eq!(summary, ReportSummary::default());
    }

    #[tokio::test]
    async fn test_best_sellers_ranked_and_truncated() {
        let fx = fixture().await;

        sell(&fx, "Iced Tea", 5, 1000, 400).await;
        sell(&fx, "Donut", 9, 500, 200).await;
        sell(&fx, "Croissant", 2, 2000, 900).await;

        let (start, end) = whole_day();
        let ranking = fx.reports.best_sellers(start, end, 2).await.unwrap();

        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].product_name, "Donut");
        assert_eq!(ranking[0].quantity_sold, 9);
        assert_eq!(ranking[1].product_name, "Iced Tea");
    }
}
