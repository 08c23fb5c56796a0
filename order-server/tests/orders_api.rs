//! Order creation and lifecycle against the real router.

mod common;

use common::{seed_customer, seed_product, spawn};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn create_order_computes_totals_and_snapshots_prices() {
    let server = spawn().await;
    let customer = seed_customer(&server, "Asha Verma").await;
    let product = seed_product(&server, "Teak chair", 1000.0).await;

    let (status, order) = server
        .post(
            "/api/orders",
            json!({
                "customer": customer,
                "items": [{"product": product, "quantity": 3}],
                "tax": 100.0,
                "discount": 50.0,
                "advancePayment": 3050.0,
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{order}");
    assert_eq!(order["subtotal"], json!(3000.0));
    assert_eq!(order["total"], json!(3050.0));
    assert_eq!(order["items"][0]["price"], json!(1000.0));
    assert_eq!(order["items"][0]["subtotal"], json!(3000.0));
    assert_eq!(order["paymentStatus"], json!("Paid"));
    assert_eq!(order["status"], json!("Pending"));

    let number = order["orderNumber"].as_str().unwrap();
    assert!(number.starts_with("ORD-"), "unexpected number {number}");

    // Later price changes never touch the stored order
    let (status, _) = server
        .put(
            &format!("/api/products/{product}"),
            json!({"price": 9999.0}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let order_id = order["id"].as_str().unwrap();
    let (_, fetched) = server.get(&format!("/api/orders/{order_id}")).await;
    assert_eq!(fetched["items"][0]["price"], json!(1000.0));
    assert_eq!(fetched["subtotal"], json!(3000.0));
}

#[tokio::test]
async fn payment_status_derivation() {
    let server = spawn().await;
    let customer = seed_customer(&server, "Ben Okoye").await;
    let product = seed_product(&server, "Oak table", 1000.0).await;

    // advance 1000 of 3050 -> Partial
    let (_, order) = server
        .post(
            "/api/orders",
            json!({
                "customer": customer,
                "items": [{"product": product, "quantity": 3}],
                "tax": 100.0,
                "discount": 50.0,
                "advancePayment": 1000.0,
            }),
        )
        .await;
    assert_eq!(order["paymentStatus"], json!("Partial"));

    // no advance -> Pending
    let (_, order) = server
        .post(
            "/api/orders",
            json!({
                "customer": customer,
                "items": [{"product": product, "quantity": 1}],
            }),
        )
        .await;
    assert_eq!(order["paymentStatus"], json!("Pending"));

    // no advance but a caller-supplied status is honored
    let (_, order) = server
        .post(
            "/api/orders",
            json!({
                "customer": customer,
                "items": [{"product": product, "quantity": 1}],
                "paymentStatus": "Refunded",
            }),
        )
        .await;
    assert_eq!(order["paymentStatus"], json!("Refunded"));
}

#[tokio::test]
async fn missing_product_aborts_whole_order() {
    let server = spawn().await;
    let customer = seed_customer(&server, "Carla Mendes").await;
    let product = seed_product(&server, "Walnut desk", 500.0).await;

    let (status, body) = server
        .post(
            "/api/orders",
            json!({
                "customer": customer,
                "items": [
                    {"product": product, "quantity": 1},
                    {"product": "products:doesnotexist", "quantity": 2},
                ],
            }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("doesnotexist"), "error names the id: {error}");

    // Nothing was persisted
    let (_, orders) = server.get("/api/orders").await;
    assert_eq!(orders.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn list_filters_by_status_and_customer() {
    let server = spawn().await;
    let customer_a = seed_customer(&server, "Dev Patel").await;
    let customer_b = seed_customer(&server, "Elsa Koch").await;
    let product = seed_product(&server, "Pine bed", 800.0).await;

    let (_, order_a) = server
        .post(
            "/api/orders",
            json!({"customer": customer_a, "items": [{"product": product, "quantity": 1}]}),
        )
        .await;
    let (_, _order_b) = server
        .post(
            "/api/orders",
            json!({"customer": customer_b, "items": [{"product": product, "quantity": 2}]}),
        )
        .await;

    // Move order A to Confirmed
    let order_a_id = order_a["id"].as_str().unwrap();
    let (status, updated) = server
        .put(&format!("/api/orders/{order_a_id}"), json!({"status": "Confirmed"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], json!("Confirmed"));
    // The number survived the update untouched
    assert_eq!(updated["orderNumber"], order_a["orderNumber"]);

    let (_, by_status) = server.get("/api/orders?status=Confirmed").await;
    assert_eq!(by_status.as_array().unwrap().len(), 1);

    let (_, by_customer) = server
        .get(&format!("/api/orders?customerId={customer_b}"))
        .await;
    assert_eq!(by_customer.as_array().unwrap().len(), 1);

    let (_, all) = server.get("/api/orders").await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn delete_order() {
    let server = spawn().await;
    let customer = seed_customer(&server, "Finn Larsen").await;
    let product = seed_product(&server, "Cedar cabinet", 1200.0).await;

    let (_, order) = server
        .post(
            "/api/orders",
            json!({"customer": customer, "items": [{"product": product, "quantity": 1}]}),
        )
        .await;
    let id = order["id"].as_str().unwrap();

    let (status, body) = server.delete(&format!("/api/orders/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Order deleted successfully"));

    let (status, _) = server.get(&format!("/api/orders/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = server.delete(&format!("/api/orders/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rejects_bad_quantities_and_missing_customer() {
    let server = spawn().await;
    let product = seed_product(&server, "Birch shelf", 300.0).await;

    let (status, _) = server
        .post(
            "/api/orders",
            json!({"customer": "", "items": [{"product": product, "quantity": 1}]}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let customer = seed_customer(&server, "Gita Rao").await;
    let (status, body) = server
        .post(
            "/api/orders",
            json!({"customer": customer, "items": [{"product": product, "quantity": 0}]}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("quantity"));
}
