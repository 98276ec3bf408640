use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "ozon-watch-sync")]
#[command(about = "Sync Casio watch stock counts and prices to the Ozon marketplace")]
pub struct CliConfig {
    /// Ozon client identifier
    #[arg(long, env = "CLIENT_ID", hide_env_values = true)]
    pub client_id: String,

    /// Ozon Seller API key
    #[arg(long, env = "SELLER_TOKEN", hide_env_values = true)]
    pub seller_token: String,

    #[arg(long, default_value = "https://api-seller.ozon.ru")]
    pub api_base: String,

    /// URL of the retailer's inventory archive (zip with an .xls inside)
    #[arg(long, default_value = "https://timeworld.ru/upload/files/ostatki.zip")]
    pub stock_url: String,

    /// Page size for the product-list endpoint
    #[arg(long, default_value = "1000")]
    pub page_limit: u32,

    /// Batch size for stock imports
    #[arg(long, default_value = "100")]
    pub stock_chunk_size: usize,

    /// Batch size for price imports
    #[arg(long, default_value = "900")]
    pub price_chunk_size: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn stock_url(&self) -> &str {
        &self.stock_url
    }

    fn client_id(&self) -> &str {
        &self.client_id
    }

    fn seller_token(&self) -> &str {
        &self.seller_token
    }

    fn page_limit(&self) -> u32 {
        self.page_limit
    }

    fn stock_chunk_size(&self) -> usize {
        self.stock_chunk_size
    }

    fn price_chunk_size(&self) -> usize {
        self.price_chunk_size
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("client_id", &self.client_id)?;
        validate_non_empty_string("seller_token", &self.seller_token)?;
        validate_url("api_base", &self.api_base)?;
        validate_url("stock_url", &self.stock_url)?;
        validate_positive_number("page_limit", self.page_limit as usize, 1)?;
        validate_positive_number("stock_chunk_size", self.stock_chunk_size, 1)?;
        validate_positive_number("price_chunk_size", self.price_chunk_size, 1)?;
        Ok(())
    }
}
