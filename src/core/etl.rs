use crate::domain::model::SyncReport;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

pub struct SyncEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SyncEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<SyncReport> {
        tracing::info!("Starting sync...");

        tracing::info!("Extracting marketplace offers and retail inventory...");
        let snapshot = self.pipeline.extract().await?;
        let offers_listed = snapshot.offer_ids.len();
        let remnants_parsed = snapshot.remnants.len();

        tracing::info!("Preparing stock and price updates...");
        let plan = self.pipeline.transform(snapshot).await?;

        tracing::info!(
            "Uploading {} stock updates and {} price updates...",
            plan.stocks.len(),
            plan.prices.len()
        );
        let mut report = self.pipeline.load(plan).await?;
        report.offers_listed = offers_listed;
        report.remnants_parsed = remnants_parsed;

        tracing::info!(
            "Sync finished: {} updated, {} rejected, {} offers in stock",
            report.items_updated,
            report.items_failed,
            report.stocks_in_stock
        );

        Ok(report)
    }
}
