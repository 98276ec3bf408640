use crate::domain::model::{
    ImportStatus, MarketSnapshot, PriceUpdate, StockUpdate, SyncPlan, SyncReport, WatchRemnant,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Seller-side marketplace API (Ozon in production).
#[async_trait]
pub trait Marketplace: Send + Sync {
    /// List the offer ids of every product already on the marketplace.
    async fn offer_ids(&self) -> Result<Vec<String>>;

    /// Submit one batch of stock counts.
    async fn push_stocks(&self, stocks: &[StockUpdate]) -> Result<Vec<ImportStatus>>;

    /// Submit one batch of prices.
    async fn push_prices(&self, prices: &[PriceUpdate]) -> Result<Vec<ImportStatus>>;
}

/// Retail site that publishes the current watch inventory.
#[async_trait]
pub trait StockSource: Send + Sync {
    async fn fetch_remnants(&self) -> Result<Vec<WatchRemnant>>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn stock_url(&self) -> &str;
    fn client_id(&self) -> &str;
    fn seller_token(&self) -> &str;
    fn page_limit(&self) -> u32;
    fn stock_chunk_size(&self) -> usize;
    fn price_chunk_size(&self) -> usize;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<MarketSnapshot>;
    async fn transform(&self, snapshot: MarketSnapshot) -> Result<SyncPlan>;
    async fn load(&self, plan: SyncPlan) -> Result<SyncReport>;
}
