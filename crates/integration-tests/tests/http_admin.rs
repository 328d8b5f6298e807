//! Admin login and protected endpoints through the full router.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::json;
use sqlx::PgPool;

use shinewell_core::ProductId;
use shinewell_integration_tests::{send, test_app};
use shinewell_server::services::AdminAuthService;

const PASSWORD: &str = "correct horse battery";

fn request(method: Method, uri: &str, cookie: Option<&str>, body: &serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", "203.0.113.20");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Create the ops admin and return a logged-in session cookie.
async fn login_as_ops(pool: &PgPool, app: &axum::Router) -> String {
    AdminAuthService::new(pool)
        .create_admin("ops@shinewell.example", "Ops Team", PASSWORD)
        .await
        .unwrap();
    let login = json!({"email": "ops@shinewell.example", "password": PASSWORD});
    let (status, cookie, _) =
        send(app, request(Method::POST, "/api/admin/login", None, &login)).await;
    assert_eq!(status, StatusCode::OK);
    cookie.unwrap()
}

#[sqlx::test(migrator = "shinewell_server::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_login_grants_access_until_logout(pool: PgPool) {
    AdminAuthService::new(&pool)
        .create_admin("ops@shinewell.example", "Ops Team", PASSWORD)
        .await
        .unwrap();
    let app = test_app(pool);

    let login = json!({"email": "OPS@shinewell.example", "password": PASSWORD});
    let (status, cookie, body) =
        send(&app, request(Method::POST, "/api/admin/login", None, &login)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["admin"]["email"], "ops@shinewell.example");
    let cookie = cookie.unwrap();
    assert!(cookie.starts_with("shinewell_session="));

    let (status, _, body) = send(
        &app,
        request(Method::GET, "/api/orders", Some(&cookie), &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, _, _) = send(
        &app,
        request(Method::POST, "/api/admin/logout", Some(&cookie), &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = send(
        &app,
        request(Method::GET, "/api/admin/session", Some(&cookie), &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrator = "shinewell_server::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_wrong_password_is_rejected(pool: PgPool) {
    AdminAuthService::new(&pool)
        .create_admin("ops@shinewell.example", "Ops Team", PASSWORD)
        .await
        .unwrap();
    let app = test_app(pool);

    let login = json!({"email": "ops@shinewell.example", "password": "wrong password!"});
    let (status, cookie, body) =
        send(&app, request(Method::POST, "/api/admin/login", None, &login)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
    assert!(cookie.is_none());
}

#[sqlx::test(migrator = "shinewell_server::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_public_order_then_admin_status_change(pool: PgPool) {
    AdminAuthService::new(&pool)
        .create_admin("ops@shinewell.example", "Ops Team", PASSWORD)
        .await
        .unwrap();
    let app = test_app(pool);

    let order = json!({
        "customerName": "Dana Reyes",
        "storeName": "Corner Mart",
        "address": "12 Harbor Rd",
        "phone": "555-0101",
        "email": "dana@cornermart.com",
        "products": [{"productId": "p1", "productName": "Glass Cleaner", "quantity": "3"}]
    });
    let (status, _, body) = send(&app, request(Method::POST, "/api/orders", None, &order)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order created successfully");
    let order_id = body["id"].as_str().unwrap().to_owned();

    let login = json!({"email": "ops@shinewell.example", "password": PASSWORD});
    let (_, cookie, _) = send(&app, request(Method::POST, "/api/admin/login", None, &login)).await;
    let cookie = cookie.unwrap();

    let update = json!({"id": order_id, "status": "cancelled"});
    let (status, _, body) = send(
        &app,
        request(Method::PUT, "/api/orders", Some(&cookie), &update),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order updated successfully");

    let (status, _, body) = send(
        &app,
        request(Method::GET, "/api/customers", Some(&cookie), &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["ordersCount"], 1);
    assert_eq!(body[0]["email"], "dana@cornermart.com");

    let delete_uri = format!("/api/orders?id={order_id}");
    let (status, _, _) = send(
        &app,
        request(Method::DELETE, &delete_uri, Some(&cookie), &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, body) = send(
        &app,
        request(Method::DELETE, &delete_uri, Some(&cookie), &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Order not found");
}

#[sqlx::test(migrator = "shinewell_server::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_unknown_email_is_rejected_like_wrong_password(pool: PgPool) {
    let app = test_app(pool);

    let login = json!({"email": "nobody@shinewell.example", "password": PASSWORD});
    let (status, cookie, body) =
        send(&app, request(Method::POST, "/api/admin/login", None, &login)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
    assert!(cookie.is_none());
}

#[sqlx::test(migrator = "shinewell_server::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_admin_adds_and_removes_product(pool: PgPool) {
    let app = test_app(pool.clone());
    let cookie = login_as_ops(&pool, &app).await;

    let product = json!({
        "name": "  Glass Cleaner ",
        "description": "Streak-free shine",
        "category": "Glass",
        "price": "4.99",
        "image": "   ",
        "tags": ["glass", " "]
    });
    let (status, _, body) = send(
        &app,
        request(Method::POST, "/api/products", Some(&cookie), &product),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Product added successfully");
    let product_id = body["id"].as_str().unwrap().to_owned();

    let (status, _, body) =
        send(&app, request(Method::GET, "/api/products", None, &json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["_id"], product_id.as_str());
    assert_eq!(body[0]["name"], "Glass Cleaner");
    assert_eq!(body[0]["image"], "/placeholder.svg?height=200&width=300");
    assert_eq!(body[0]["price"], 4.99);
    assert_eq!(body[0]["tags"], json!(["glass"]));
    assert_eq!(body[0]["isActive"], true);

    let delete_uri = format!("/api/products?id={product_id}");
    let (status, _, body) = send(
        &app,
        request(Method::DELETE, &delete_uri, Some(&cookie), &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product deleted successfully");

    let (_, _, body) = send(&app, request(Method::GET, "/api/products", None, &json!({}))).await;
    assert_eq!(body, json!([]));
}

#[sqlx::test(migrator = "shinewell_server::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_product_create_requires_category(pool: PgPool) {
    let app = test_app(pool.clone());
    let cookie = login_as_ops(&pool, &app).await;

    let product = json!({"name": "Glass Cleaner", "description": "Streak-free shine"});
    let (status, _, body) = send(
        &app,
        request(Method::POST, "/api/products", Some(&cookie), &product),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Category is required");
}

#[sqlx::test(migrator = "shinewell_server::db::MIGRATOR")]
#[ignore = "Requires PostgreSQL (DATABASE_URL)"]
async fn test_product_delete_errors(pool: PgPool) {
    let app = test_app(pool.clone());
    let cookie = login_as_ops(&pool, &app).await;

    let unknown = format!("/api/products?id={}", ProductId::generate());
    let cases = [
        ("/api/products", StatusCode::BAD_REQUEST, "Product ID is required"),
        ("/api/products?id=", StatusCode::BAD_REQUEST, "Product ID is required"),
        ("/api/products?id=abc", StatusCode::BAD_REQUEST, "Invalid product ID format"),
        (unknown.as_str(), StatusCode::NOT_FOUND, "Product not found"),
    ];
    for (uri, expected_status, expected_error) in cases {
        let (status, _, body) = send(
            &app,
            request(Method::DELETE, uri, Some(&cookie), &json!({})),
        )
        .await;
        assert_eq!(status, expected_status, "{uri}");
        assert_eq!(body["error"], expected_error, "{uri}");
    }
}
