use async_trait::async_trait;
use httpmock::prelude::*;
use ozon_watch_sync::domain::model::WatchRemnant;
use ozon_watch_sync::domain::ports::StockSource;
use ozon_watch_sync::utils::error::{ErrorSeverity, Result};
use ozon_watch_sync::{OzonClient, SyncEngine, SyncPipeline};

struct FixedSource {
    remnants: Vec<WatchRemnant>,
}

#[async_trait]
impl StockSource for FixedSource {
    async fn fetch_remnants(&self) -> Result<Vec<WatchRemnant>> {
        Ok(self.remnants.clone())
    }
}

fn remnant(code: &str, quantity: &str, price: &str) -> WatchRemnant {
    WatchRemnant {
        code: code.to_string(),
        quantity: quantity.to_string(),
        price: price.to_string(),
    }
}

fn product_list_mock(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(POST)
            .path("/v2/product/list")
            .header("Client-Id", "client123")
            .header("Api-Key", "token123");
        then.status(200).json_body(serde_json::json!({
            "result": {
                "items": [
                    {"product_id": 1, "offer_id": "136748"},
                    {"product_id": 2, "offer_id": "136749"},
                    {"product_id": 3, "offer_id": "136750"},
                    {"product_id": 4, "offer_id": "136751"}
                ],
                "total": 4,
                "last_id": ""
            }
        }));
    })
}

#[tokio::test]
async fn scraped_values_reach_the_marketplace_unchanged() {
    let server = MockServer::start();

    let list_mock = product_list_mock(&server);

    // The submitted bodies must carry exactly the scraped values: ">10"
    // becomes 100, "1" becomes 0, prices lose separators and currency,
    // and the offer missing from the sheet (136751) is zeroed out.
    let stocks_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/product/import/stocks")
            .header("Client-Id", "client123")
            .header("Api-Key", "token123")
            .json_body(serde_json::json!({
                "stocks": [
                    {"offer_id": "136748", "stock": 100},
                    {"offer_id": "136749", "stock": 0},
                    {"offer_id": "136750", "stock": 3},
                    {"offer_id": "136751", "stock": 0}
                ]
            }));
        then.status(200).json_body(serde_json::json!({
            "result": [
                {"product_id": 1, "offer_id": "136748", "updated": true, "errors": []},
                {"product_id": 2, "offer_id": "136749", "updated": true, "errors": []},
                {"product_id": 3, "offer_id": "136750", "updated": true, "errors": []},
                {"product_id": 4, "offer_id": "136751", "updated": true, "errors": []}
            ]
        }));
    });

    let prices_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/product/import/prices")
            .json_body(serde_json::json!({
                "prices": [
                    {
                        "auto_action_enabled": "UNKNOWN",
                        "currency_code": "RUB",
                        "offer_id": "136748",
                        "old_price": "0",
                        "price": "5990"
                    },
                    {
                        "auto_action_enabled": "UNKNOWN",
                        "currency_code": "RUB",
                        "offer_id": "136749",
                        "old_price": "0",
                        "price": "7450"
                    },
                    {
                        "auto_action_enabled": "UNKNOWN",
                        "currency_code": "RUB",
                        "offer_id": "136750",
                        "old_price": "0",
                        "price": "12300"
                    }
                ]
            }));
        then.status(200).json_body(serde_json::json!({
            "result": [
                {"product_id": 1, "offer_id": "136748", "updated": true, "errors": []},
                {"product_id": 2, "offer_id": "136749", "updated": true, "errors": []},
                {"product_id": 3, "offer_id": "136750", "updated": true, "errors": []}
            ]
        }));
    });

    let source = FixedSource {
        remnants: vec![
            remnant("136748", ">10", "5'990.00 руб."),
            remnant("136749", "1", "7'450.00 руб."),
            remnant("136750", "3", "12'300.00 руб."),
            // not listed on Ozon, must not be submitted at all
            remnant("999999", "9", "1'111.00 руб."),
        ],
    };

    let marketplace = OzonClient::new(&server.base_url(), "client123", "token123", 1000);
    let pipeline = SyncPipeline::new(marketplace, source, 100, 900);
    let engine = SyncEngine::new(pipeline);

    let report = engine.run().await.unwrap();

    list_mock.assert();
    stocks_mock.assert();
    prices_mock.assert();

    assert_eq!(report.offers_listed, 4);
    assert_eq!(report.remnants_parsed, 4);
    assert_eq!(report.stocks_sent, 4);
    assert_eq!(report.stocks_in_stock, 2);
    assert_eq!(report.prices_sent, 3);
    assert_eq!(report.items_updated, 7);
    assert_eq!(report.items_failed, 0);
}

#[tokio::test]
async fn uploads_are_chunked() -> anyhow::Result<()> {
    let server = MockServer::start();

    let list_mock = product_list_mock(&server);

    // chunk size 3 splits four stock updates into 3 + 1
    let first_chunk = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/product/import/stocks")
            .json_body(serde_json::json!({
                "stocks": [
                    {"offer_id": "136748", "stock": 100},
                    {"offer_id": "136749", "stock": 0},
                    {"offer_id": "136750", "stock": 3}
                ]
            }));
        then.status(200)
            .json_body(serde_json::json!({"result": []}));
    });
    let second_chunk = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/product/import/stocks")
            .json_body(serde_json::json!({
                "stocks": [{"offer_id": "136751", "stock": 0}]
            }));
        then.status(200)
            .json_body(serde_json::json!({"result": []}));
    });
    let prices_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/product/import/prices");
        then.status(200)
            .json_body(serde_json::json!({"result": []}));
    });

    let source = FixedSource {
        remnants: vec![
            remnant("136748", ">10", "5'990.00 руб."),
            remnant("136749", "1", "7'450.00 руб."),
            remnant("136750", "3", "12'300.00 руб."),
        ],
    };

    let marketplace = OzonClient::new(&server.base_url(), "client123", "token123", 1000);
    let pipeline = SyncPipeline::new(marketplace, source, 3, 900);
    let engine = SyncEngine::new(pipeline);

    let report = engine.run().await?;

    list_mock.assert();
    first_chunk.assert();
    second_chunk.assert();
    prices_mock.assert();
    assert_eq!(report.stocks_sent, 4);
    Ok(())
}

#[tokio::test]
async fn rejected_items_are_counted() {
    let server = MockServer::start();

    let _list_mock = product_list_mock(&server);
    let _stocks_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/product/import/stocks");
        then.status(200).json_body(serde_json::json!({
            "result": [
                {"product_id": 1, "offer_id": "136748", "updated": true, "errors": []},
                {
                    "product_id": 2,
                    "offer_id": "136749",
                    "updated": false,
                    "errors": [{"code": "TOO_MANY_REQUESTS"}]
                }
            ]
        }));
    });
    let _prices_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/product/import/prices");
        then.status(200)
            .json_body(serde_json::json!({"result": []}));
    });

    let source = FixedSource {
        remnants: vec![
            remnant("136748", "2", "5'990.00 руб."),
            remnant("136749", "2", "7'450.00 руб."),
        ],
    };

    let marketplace = OzonClient::new(&server.base_url(), "client123", "token123", 1000);
    let pipeline = SyncPipeline::new(marketplace, source, 100, 900);
    let engine = SyncEngine::new(pipeline);

    let report = engine.run().await.unwrap();

    assert_eq!(report.items_updated, 1);
    assert_eq!(report.items_failed, 1);
}

#[tokio::test]
async fn marketplace_failure_aborts_the_run() {
    let server = MockServer::start();

    let list_mock = server.mock(|when, then| {
        when.method(POST).path("/v2/product/list");
        then.status(500);
    });

    let source = FixedSource { remnants: vec![] };
    let marketplace = OzonClient::new(&server.base_url(), "client123", "token123", 1000);
    let pipeline = SyncPipeline::new(marketplace, source, 100, 900);
    let engine = SyncEngine::new(pipeline);

    let err = engine.run().await.unwrap_err();

    list_mock.assert();
    assert_eq!(err.severity(), ErrorSeverity::Medium);
}
