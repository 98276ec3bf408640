use crate::domain::model::{ImportStatus, PriceUpdate, StockUpdate};
use crate::domain::ports::Marketplace;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Client for the Ozon Seller API.
///
/// Every request carries the `Client-Id` and `Api-Key` headers; the API
/// itself is plain JSON over POST.
pub struct OzonClient {
    client: Client,
    api_base: String,
    client_id: String,
    seller_token: String,
    page_limit: u32,
}

#[derive(Serialize)]
struct ProductListRequest<'a> {
    filter: ProductFilter,
    last_id: &'a str,
    limit: u32,
}

#[derive(Serialize)]
struct ProductFilter {
    visibility: &'static str,
}

#[derive(Deserialize)]
struct ProductListResponse {
    result: ProductListResult,
}

#[derive(Deserialize)]
struct ProductListResult {
    items: Vec<ProductItem>,
    total: usize,
    #[serde(default)]
    last_id: String,
}

#[derive(Deserialize)]
struct ProductItem {
    offer_id: String,
}

#[derive(Serialize)]
struct StocksRequest<'a> {
    stocks: &'a [StockUpdate],
}

#[derive(Serialize)]
struct PricesRequest<'a> {
    prices: &'a [PriceUpdate],
}

#[derive(Deserialize)]
struct ImportResponse {
    result: Vec<ImportStatus>,
}

impl OzonClient {
    pub fn new(api_base: &str, client_id: &str, seller_token: &str, page_limit: u32) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            client_id: client_id.to_string(),
            seller_token: seller_token.to_string(),
            page_limit,
        }
    }

    async fn product_list_page(&self, last_id: &str) -> Result<ProductListResult> {
        let url = format!("{}/v2/product/list", self.api_base);
        let payload = ProductListRequest {
            filter: ProductFilter { visibility: "ALL" },
            last_id,
            limit: self.page_limit,
        };

        tracing::debug!("Requesting product list page (last_id: '{}')", last_id);
        let response = self
            .client
            .post(&url)
            .header("Client-Id", &self.client_id)
            .header("Api-Key", &self.seller_token)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        let body: ProductListResponse = response.json().await?;
        Ok(body.result)
    }

    async fn import<T: Serialize + Sync>(
        &self,
        endpoint: &str,
        payload: &T,
    ) -> Result<Vec<ImportStatus>> {
        let url = format!("{}{}", self.api_base, endpoint);
        let response = self
            .client
            .post(&url)
            .header("Client-Id", &self.client_id)
            .header("Api-Key", &self.seller_token)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;

        let body: ImportResponse = response.json().await?;
        Ok(body.result)
    }
}

#[async_trait]
impl Marketplace for OzonClient {
    async fn offer_ids(&self) -> Result<Vec<String>> {
        let mut offer_ids = Vec::new();
        let mut last_id = String::new();

        loop {
            let page = self.product_list_page(&last_id).await?;
            let page_len = page.items.len();
            offer_ids.extend(page.items.into_iter().map(|item| item.offer_id));

            tracing::debug!("Collected {} of {} offers", offer_ids.len(), page.total);

            // Empty page guard: a misbehaving server must not loop us forever.
            if offer_ids.len() >= page.total || page_len == 0 {
                break;
            }
            last_id = page.last_id;
        }

        Ok(offer_ids)
    }

    async fn push_stocks(&self, stocks: &[StockUpdate]) -> Result<Vec<ImportStatus>> {
        self.import("/v1/product/import/stocks", &StocksRequest { stocks })
            .await
    }

    async fn push_prices(&self, prices: &[PriceUpdate]) -> Result<Vec<ImportStatus>> {
        self.import("/v1/product/import/prices", &PricesRequest { prices })
            .await
    }
}
