//! End-to-end tests of the reqwest-backed client against a local axum backend.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use expensy_frontend::services::api::{ApiClient, ApiError};
use expensy_frontend::services::category_theme::CategoryTheme;
use expensy_frontend::services::config::ApiConfig;
use expensy_frontend::state::{CategoryStore, FormStatus, TransactionForm};
use serde_json::{json, Value};
use shared::{Category, CreateRecordPayload, TransactionType};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

type Received = Arc<Mutex<Vec<Value>>>;

async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn client(base_url: &str, timeout_ms: u64) -> ApiClient {
    ApiClient::from_config(&ApiConfig {
        base_url: base_url.to_string(),
        timeout_ms,
    })
    .unwrap()
}

async fn categories() -> Json<Value> {
    Json(json!({
        "count": 2,
        "next": null,
        "previous": null,
        "results": [
            {"id": 1, "name": "Hogar"},
            {"id": 2, "name": "Comidas y bebidas", "alt_name": "Food"}
        ]
    }))
}

async fn create_record(State(received): State<Received>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    received.lock().unwrap().push(body);
    (StatusCode::CREATED, Json(json!({"id": 101})))
}

fn backend(received: Received) -> Router {
    Router::new()
        .route("/api/categories/", get(categories))
        .route("/api/records/", post(create_record))
        .with_state(received)
}

#[tokio::test]
async fn test_get_categories_over_http() {
    let base_url = spawn_backend(backend(Received::default())).await;

    let categories = client(&base_url, 5_000).get_categories().await.unwrap();

    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0], Category::new(1, "Hogar"));
    assert_eq!(categories[1].alt_name.as_deref(), Some("Food"));
}

#[tokio::test]
async fn test_server_error_message_over_http() {
    let router = Router::new().route(
        "/api/categories/",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": "database unavailable"})),
            )
        }),
    );
    let base_url = spawn_backend(router).await;

    let err = client(&base_url, 5_000).get_categories().await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.message(), "database unavailable");
}

#[tokio::test]
async fn test_plain_text_error_uses_status_text() {
    let router = Router::new().route("/api/categories/", get(|| async { (StatusCode::NOT_FOUND, "nope") }));
    let base_url = spawn_backend(router).await;

    let err = client(&base_url, 5_000).get_categories().await.unwrap_err();

    assert_eq!(err, ApiError::Http { message: "Not Found".to_string(), status: 404 });
}

#[tokio::test]
async fn test_create_record_sends_source() {
    let received = Received::default();
    let base_url = spawn_backend(backend(received.clone())).await;

    let created = client(&base_url, 5_000)
        .create_record(CreateRecordPayload {
            description: "Cena".to_string(),
            amount: -30.0,
            date: "2024-12-01".to_string(),
            category: 2,
        })
        .await
        .unwrap();

    assert_eq!(created.id, Some(101));
    let bodies = received.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["source"], "ingreso manual");
    assert_eq!(bodies[0]["description"], "Cena");
}

#[tokio::test]
async fn test_empty_success_body() {
    let router = Router::new().route("/api/records/", post(|| async { StatusCode::NO_CONTENT }));
    let base_url = spawn_backend(router).await;

    let created = client(&base_url, 5_000)
        .create_record(CreateRecordPayload {
            description: "Cena".to_string(),
            amount: -30.0,
            date: "2024-12-01".to_string(),
            category: 2,
        })
        .await
        .unwrap();

    assert_eq!(created.id, None);
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}/api", addr), 5_000)
        .get_categories()
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::Network);
    assert_eq!(err.status(), Some(0));
}

#[tokio::test]
async fn test_configured_timeout_is_enforced() {
    let router = Router::new().route(
        "/api/categories/",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({"results": []}))
        }),
    );
    let base_url = spawn_backend(router).await;

    let err = client(&base_url, 200).get_categories().await.unwrap_err();

    assert_eq!(err, ApiError::Timeout { timeout_ms: 200 });
}

#[tokio::test]
async fn test_form_and_store_against_backend() {
    let received = Received::default();
    let base_url = spawn_backend(backend(received.clone())).await;
    let api_client = client(&base_url, 5_000);

    let mut store = CategoryStore::new(api_client.clone(), Arc::new(CategoryTheme::spanish_defaults()));
    store.fetch_categories().await.unwrap();
    assert_eq!(store.categories.len(), 2);

    let mut form = TransactionForm::new(api_client);
    form.initialize().await.unwrap();
    form.set_transaction_type(TransactionType::Expense);
    form.set_description("Almuerzo");
    form.set_amount("18.75");
    form.set_date("2024-12-02");
    form.set_category("Comidas y bebidas");

    assert!(form.submit().await);
    assert_eq!(form.status(), &FormStatus::Success);

    let bodies = received.lock().unwrap();
    assert_eq!(bodies[0]["amount"], -18.75);
    assert_eq!(bodies[0]["category"], 2);
    assert_eq!(bodies[0]["date"], "2024-12-02");
}
