use crate::domain::model::{
    normalize_price, stock_from_quantity, ImportStatus, MarketSnapshot, PriceUpdate, StockUpdate,
    SyncPlan, SyncReport, WatchRemnant,
};
use crate::domain::ports::{Marketplace, Pipeline, StockSource};
use crate::utils::error::Result;
use std::collections::HashSet;

/// Build stock updates for every listed offer.
///
/// Offers present in the inventory sheet get the mapped count; offers
/// the sheet no longer mentions are zeroed out so stale listings stop
/// selling. Zero-filled offers are appended in sorted order.
pub fn create_stocks(remnants: &[WatchRemnant], offer_ids: &[String]) -> Vec<StockUpdate> {
    let mut remaining: HashSet<&str> = offer_ids.iter().map(String::as_str).collect();
    let mut stocks = Vec::new();

    for watch in remnants {
        if remaining.remove(watch.code.as_str()) {
            let stock = stock_from_quantity(&watch.quantity).unwrap_or_else(|| {
                tracing::warn!(
                    "Unparseable quantity '{}' for offer {}, treating as 0",
                    watch.quantity,
                    watch.code
                );
                0
            });
            stocks.push(StockUpdate {
                offer_id: watch.code.clone(),
                stock,
            });
        }
    }

    let mut leftover: Vec<&str> = remaining.into_iter().collect();
    leftover.sort_unstable();
    for offer_id in leftover {
        stocks.push(StockUpdate {
            offer_id: offer_id.to_string(),
            stock: 0,
        });
    }

    stocks
}

/// Build price updates for offers that appear in both data sets.
pub fn create_prices(remnants: &[WatchRemnant], offer_ids: &[String]) -> Vec<PriceUpdate> {
    let listed: HashSet<&str> = offer_ids.iter().map(String::as_str).collect();

    remnants
        .iter()
        .filter(|watch| listed.contains(watch.code.as_str()))
        .map(|watch| PriceUpdate::new(watch.code.clone(), normalize_price(&watch.price)))
        .collect()
}

/// The full sync flow: Ozon offer list + retail inventory in, chunked
/// stock/price imports out.
pub struct SyncPipeline<M: Marketplace, S: StockSource> {
    marketplace: M,
    source: S,
    stock_chunk_size: usize,
    price_chunk_size: usize,
}

impl<M: Marketplace, S: StockSource> SyncPipeline<M, S> {
    pub fn new(marketplace: M, source: S, stock_chunk_size: usize, price_chunk_size: usize) -> Self {
        Self {
            marketplace,
            source,
            stock_chunk_size,
            price_chunk_size,
        }
    }

    fn tally(statuses: &[ImportStatus], report: &mut SyncReport) {
        for status in statuses {
            if status.updated && status.errors.is_empty() {
                report.items_updated += 1;
            } else {
                report.items_failed += 1;
                tracing::warn!(
                    "Import rejected for offer {}: {:?}",
                    status.offer_id,
                    status.errors
                );
            }
        }
    }
}

#[async_trait::async_trait]
impl<M: Marketplace, S: StockSource> Pipeline for SyncPipeline<M, S> {
    async fn extract(&self) -> Result<MarketSnapshot> {
        let offer_ids = self.marketplace.offer_ids().await?;
        tracing::info!("Found {} offers on the marketplace", offer_ids.len());

        let remnants = self.source.fetch_remnants().await?;
        tracing::info!("Downloaded {} inventory rows", remnants.len());

        Ok(MarketSnapshot {
            offer_ids,
            remnants,
        })
    }

    async fn transform(&self, snapshot: MarketSnapshot) -> Result<SyncPlan> {
        let stocks = create_stocks(&snapshot.remnants, &snapshot.offer_ids);
        let prices = create_prices(&snapshot.remnants, &snapshot.offer_ids);

        tracing::debug!(
            "Prepared {} stock updates and {} price updates",
            stocks.len(),
            prices.len()
        );

        Ok(SyncPlan { stocks, prices })
    }

    async fn load(&self, plan: SyncPlan) -> Result<SyncReport> {
        let mut report = SyncReport {
            stocks_sent: plan.stocks.len(),
            stocks_in_stock: plan.stocks.iter().filter(|s| s.stock != 0).count(),
            prices_sent: plan.prices.len(),
            ..SyncReport::default()
        };

        for chunk in plan.stocks.chunks(self.stock_chunk_size) {
            let statuses = self.marketplace.push_stocks(chunk).await?;
            Self::tally(&statuses, &mut report);
        }

        for chunk in plan.prices.chunks(self.price_chunk_size) {
            let statuses = self.marketplace.push_prices(chunk).await?;
            Self::tally(&statuses, &mut report);
        }

        Ok(report)
    }
}
