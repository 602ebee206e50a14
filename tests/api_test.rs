//! Integration tests for the txboard HTTP API

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};
use txboard::{handlers, AppConfig, ConfirmationService, ServiceContainer};

const ADDRESS: &str = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e";

fn test_config(seed_count: usize) -> AppConfig {
    AppConfig {
        confirmation_delay_ms: 60_000,
        seed_count,
        ..AppConfig::default()
    }
}

fn setup(config: AppConfig) -> (web::Data<ServiceContainer>, ConfirmationService) {
    let (container, service) = ServiceContainer::in_memory(config);
    (web::Data::new(container), service)
}

macro_rules! test_app {
    ($data:expr) => {
        test::init_service(
            App::new()
                .app_data($data.clone())
                .configure(handlers::configure),
        )
        .await
    };
}

#[actix_rt::test]
async fn test_health() {
    let (data, _service) = setup(test_config(10));
    let app = test_app!(data);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
    assert!(body["message"].as_str().unwrap().contains("running"));
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[actix_rt::test]
async fn test_init_seeds_once() {
    let (data, _service) = setup(test_config(100));
    let app = test_app!(data);

    let req = test::TestRequest::post().uri("/api/init").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 100);
    let distribution = &body["statusDistribution"];
    let total = distribution["confirmed"].as_u64().unwrap()
        + distribution["pending"].as_u64().unwrap()
        + distribution["failed"].as_u64().unwrap();
    assert_eq!(total, 100);

    let req = test::TestRequest::post().uri("/api/init").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 100);
    assert!(body["message"].as_str().unwrap().contains("Skipping seed"));
    assert!(body.get("statusDistribution").is_none());
}

#[actix_rt::test]
async fn test_create_and_fetch_transaction() {
    let (data, _service) = setup(test_config(10));
    let app = test_app!(data);

    let req = test::TestRequest::post()
        .uri("/api/transactions")
        .set_json(json!({
            "toAddress": ADDRESS,
            "amount": "1.25",
            "gasLimit": "21000",
            "gasPrice": "0.00000002"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    let tx = &body["data"];
    assert_eq!(tx["status"], "pending");
    assert_eq!(tx["toAddress"], ADDRESS);
    assert_eq!(tx["amount"], "1.25");
    assert_eq!(tx["fee"], "0.00042000");
    assert_eq!(tx["hash"].as_str().unwrap().len(), 66);
    assert_eq!(tx["fromAddress"].as_str().unwrap().len(), 42);

    let id = tx["id"].as_str().unwrap().to_string();
    let req = test::TestRequest::get()
        .uri(&format!("/api/transactions/{}", id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["hash"], tx["hash"]);
}

#[actix_rt::test]
async fn test_create_rejects_invalid_input() {
    let (data, _service) = setup(test_config(10));
    let app = test_app!(data);

    let req = test::TestRequest::post()
        .uri("/api/transactions")
        .set_json(json!({ "toAddress": "0x123", "amount": "1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "validation_error");

    let req = test::TestRequest::post()
        .uri("/api/transactions")
        .set_json(json!({ "toAddress": ADDRESS, "amount": "-3" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Missing required field
    let req = test::TestRequest::post()
        .uri("/api/transactions")
        .set_json(json!({ "amount": "1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_unknown_transaction_is_not_found() {
    let (data, _service) = setup(test_config(10));
    let app = test_app!(data);

    let req = test::TestRequest::get()
        .uri("/api/transactions/6f1c2b7e-0a4d-4c1e-9a51-6f0b3f1f2f10")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        "Transaction with ID 6f1c2b7e-0a4d-4c1e-9a51-6f0b3f1f2f10 not found"
    );

    let req = test::TestRequest::get()
        .uri("/api/transactions/not-a-uuid")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_list_paginates_and_filters() {
    let (data, _service) = setup(test_config(40));
    let app = test_app!(data);

    let req = test::TestRequest::post().uri("/api/init").to_request();
    test::call_service(&app, req).await;

    // Unpaged listing returns everything, newest first
    let req = test::TestRequest::get().uri("/api/transactions").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 40);
    assert!(body.get("pagination").is_none());

    let req = test::TestRequest::get()
        .uri("/api/transactions?page=3&pageSize=15")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["pagination"]["page"], 3);
    assert_eq!(body["pagination"]["totalItems"], 40);
    assert_eq!(body["pagination"]["totalPages"], 3);

    let req = test::TestRequest::get()
        .uri("/api/transactions?status=failed")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|tx| tx["status"] == "failed"));

    let req = test::TestRequest::get()
        .uri("/api/transactions?sortField=amount&sortDirection=asc")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let amounts: Vec<f64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|tx| tx["amount"].as_str().unwrap().parse().unwrap())
        .collect();
    assert!(amounts.windows(2).all(|w| w[0] <= w[1]));

    // Whitespace search is applied as typed and matches nothing
    let req = test::TestRequest::get()
        .uri("/api/transactions?search=%20")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let req = test::TestRequest::get()
        .uri("/api/transactions?status=bogus")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_stats_reflect_store() {
    let (data, _service) = setup(test_config(10));
    let app = test_app!(data);

    let req = test::TestRequest::get().uri("/api/stats").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["totalTransactions"], 0);
    assert_eq!(body["data"]["successRate"], "0.00");

    for amount in ["1.5", "2.5"] {
        let req = test::TestRequest::post()
            .uri("/api/transactions")
            .set_json(json!({ "toAddress": ADDRESS, "amount": amount }))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get().uri("/api/stats").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let stats = &body["data"];
    assert_eq!(stats["totalTransactions"], 2);
    assert_eq!(stats["totalVolume"], "4.00000000");
    assert_eq!(stats["averageAmount"], "2.00000000");
    assert_eq!(stats["pendingCount"], 2);
    assert_eq!(stats["confirmedCount"], 0);
}

#[actix_rt::test]
async fn test_created_transaction_settles_in_background() {
    let config = AppConfig {
        confirmation_delay_ms: 20,
        confirmation_success_rate: 1.0,
        ..AppConfig::default()
    };
    let (data, mut service) = setup(config);
    service.start().await.unwrap();
    let app = test_app!(data);

    let req = test::TestRequest::post()
        .uri("/api/transactions")
        .set_json(json!({ "toAddress": ADDRESS, "amount": "0.5" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    tokio::time::sleep(std::time::Duration::from_millis(300)).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/transactions/{}", id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "confirmed");

    service.stop().await;
}
