use clap::Parser;
use ozon_watch_sync::domain::ports::ConfigProvider;
use ozon_watch_sync::utils::{logger, validation::Validate};
use ozon_watch_sync::{CliConfig, OzonClient, SyncEngine, SyncPipeline, TimeworldSource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting ozon-watch-sync");
    if config.verbose {
        // Credentials stay out of the logs.
        tracing::debug!(
            "api_base: {}, stock_url: {}, page_limit: {}, chunks: {}/{}",
            config.api_base,
            config.stock_url,
            config.page_limit,
            config.stock_chunk_size,
            config.price_chunk_size
        );
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let marketplace = OzonClient::new(
        config.api_base(),
        config.client_id(),
        config.seller_token(),
        config.page_limit(),
    );
    let source = TimeworldSource::new(config.stock_url());
    let pipeline = SyncPipeline::new(
        marketplace,
        source,
        config.stock_chunk_size(),
        config.price_chunk_size(),
    );

    let engine = SyncEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => {
            tracing::info!("✅ Sync completed successfully!");
            println!("✅ Sync completed successfully!");
            println!(
                "📦 {} offers listed, {} inventory rows, {} stock updates ({} in stock), {} price updates",
                report.offers_listed,
                report.remnants_parsed,
                report.stocks_sent,
                report.stocks_in_stock,
                report.prices_sent
            );
            if report.items_failed > 0 {
                println!(
                    "⚠️ {} items were rejected by the marketplace (see log)",
                    report.items_failed
                );
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Sync failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ozon_watch_sync::utils::error::ErrorSeverity::Low => 0,
                ozon_watch_sync::utils::error::ErrorSeverity::Medium => 2,
                ozon_watch_sync::utils::error::ErrorSeverity::High => 1,
                ozon_watch_sync::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
