//! Tests de la superficie HTTP: serialización de errores y contratos de
//! los DTOs, sin base de datos de por medio.

use axum::body::Body;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use cargo_tracking::dto::shipment_dto::{ListShipmentsQuery, UpdateShipmentRequest};
use cargo_tracking::services::delivery_gate::pin_rejection;
use cargo_tracking::utils::errors::{not_found_error, AppError};
use cargo_tracking::utils::validation::validate_not_empty;

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_not_found_error_body() {
    let app = Router::new().route(
        "/shipments/:id",
        get(|| async { Err::<Json<()>, AppError>(not_found_error("Shipment", "42")) }),
    );

    let request = Request::builder()
        .uri("/shipments/42")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "Shipment with id '42' not found");
}

#[tokio::test]
async fn test_pin_required_error_body() {
    let app = Router::new().route(
        "/shipments/:id",
        put(|| async { Err::<Json<()>, AppError>(pin_rejection(true)) }),
    );

    let request = Request::builder()
        .method("PUT")
        .uri("/shipments/1")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "PIN_REQUIRED");
    assert_eq!(body["pinCreated"], true);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_validation_error_body() {
    let app = Router::new().route(
        "/shipments",
        post(|| async {
            let mut errors = validator::ValidationErrors::new();
            if let Err(e) = validate_not_empty("") {
                errors.add("barcode", e);
            }
            Err::<Json<()>, AppError>(errors.into())
        }),
    );

    let request = Request::builder()
        .method("POST")
        .uri("/shipments")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_update_request_accepts_admin_bypass_alias() {
    let app = Router::new().route(
        "/shipments/:id",
        put(|Json(request): Json<UpdateShipmentRequest>| async move {
            Json(json!({
                "admin": request.admin,
                "adminBypass": request.admin_bypass,
                "pin": request.pin,
            }))
        }),
    );

    let request = Request::builder()
        .method("PUT")
        .uri("/shipments/1")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "adminBypass": true, "pin": "1234" }).to_string(),
        ))
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["adminBypass"], true);
    assert_eq!(body["admin"], false);
    assert_eq!(body["pin"], "1234");
}

#[tokio::test]
async fn test_list_query_parses_camel_case_dates() {
    let app = Router::new().route(
        "/shipments",
        get(
            |axum::extract::Query(query): axum::extract::Query<ListShipmentsQuery>| async move {
                Json(json!({
                    "dateFrom": query.date_from,
                    "dateTo": query.date_to,
                    "page": query.page,
                    "limit": query.limit,
                }))
            },
        ),
    );

    let request = Request::builder()
        .uri("/shipments?dateFrom=2026-08-01&dateTo=2026-08-31&page=2&limit=1")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dateFrom"], "2026-08-01");
    assert_eq!(body["dateTo"], "2026-08-31");
    assert_eq!(body["page"], 2);
    assert_eq!(body["limit"], 1);
}
