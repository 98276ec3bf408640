use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// One row of the retailer's inventory sheet.
///
/// `quantity` stays raw because the sheet mixes plain numbers with
/// markers like ">10".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchRemnant {
    pub code: String,
    pub quantity: String,
    pub price: String,
}

/// Stock item for the Ozon `/v1/product/import/stocks` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockUpdate {
    pub offer_id: String,
    pub stock: i64,
}

/// Price item for the Ozon `/v1/product/import/prices` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceUpdate {
    pub auto_action_enabled: String,
    pub currency_code: String,
    pub offer_id: String,
    pub old_price: String,
    pub price: String,
}

impl PriceUpdate {
    pub fn new(offer_id: String, price: String) -> Self {
        Self {
            auto_action_enabled: "UNKNOWN".to_string(),
            currency_code: "RUB".to_string(),
            offer_id,
            old_price: "0".to_string(),
            price,
        }
    }
}

/// Per-item outcome reported by the Ozon import endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportStatus {
    #[serde(default)]
    pub product_id: Option<i64>,
    pub offer_id: String,
    pub updated: bool,
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}

/// Everything the extract phase gathers from the two external systems.
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
    pub offer_ids: Vec<String>,
    pub remnants: Vec<WatchRemnant>,
}

/// Payloads the transform phase prepares for upload.
#[derive(Debug, Clone)]
pub struct SyncPlan {
    pub stocks: Vec<StockUpdate>,
    pub prices: Vec<PriceUpdate>,
}

/// Counters summarizing one completed run.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub offers_listed: usize,
    pub remnants_parsed: usize,
    pub stocks_sent: usize,
    pub stocks_in_stock: usize,
    pub prices_sent: usize,
    pub items_updated: usize,
    pub items_failed: usize,
}

fn non_digit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^0-9]").unwrap())
}

/// Normalize a price string from the inventory sheet.
///
/// The sheet formats prices like `5'990.00 руб.`; Ozon expects `5990`.
/// The fractional part is dropped, every non-digit stripped.
pub fn normalize_price(raw: &str) -> String {
    let integral = raw.split('.').next().unwrap_or("");
    non_digit_re().replace_all(integral, "").into_owned()
}

/// Map a raw quantity cell to a stock count.
///
/// The sheet caps large counts as ">10" (exported as 100 units) and
/// uses "1" for display pieces that cannot be sold.
pub fn stock_from_quantity(quantity: &str) -> Option<i64> {
    match quantity.trim() {
        ">10" => Some(100),
        "1" => Some(0),
        other => other.parse().ok(),
    }
}
