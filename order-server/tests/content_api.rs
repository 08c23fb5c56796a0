//! Storefront content routes: feedback, FAQs, contact, gallery metadata,
//! plus the store-unavailable guard.

mod common;

use common::{spawn, spawn_disconnected};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn feedback_visibility_toggle_roundtrips() {
    let server = spawn().await;

    let (status, created) = server
        .post(
            "/api/feedback",
            json!({"name": "Ira Novak", "rating": 5, "feedback": "Beautiful table."}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["data"]["isVisible"], json!(true));
    let id = created["data"]["id"].as_str().unwrap();

    let (_, toggled) = server
        .patch(&format!("/api/feedback/{id}/visibility"), None)
        .await;
    assert_eq!(toggled["data"]["isVisible"], json!(false));

    let (_, toggled_back) = server
        .patch(&format!("/api/feedback/{id}/visibility"), None)
        .await;
    assert_eq!(toggled_back["data"]["isVisible"], json!(true));
}

#[tokio::test]
async fn feedback_rating_bounds_enforced() {
    let server = spawn().await;

    for rating in [0, 6] {
        let (status, _) = server
            .post(
                "/api/feedback",
                json!({"name": "Jo", "rating": rating, "feedback": "hm"}),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "rating {rating}");
    }
}

#[tokio::test]
async fn feedback_reply_sets_reply_and_timestamp() {
    let server = spawn().await;

    let (_, created) = server
        .post(
            "/api/feedback",
            json!({"name": "Kofi Adjei", "rating": 4, "feedback": "Solid work."}),
        )
        .await;
    let id = created["data"]["id"].as_str().unwrap();

    let (status, replied) = server
        .post(
            &format!("/api/feedback/{id}/reply"),
            json!({"reply": "Thank you!"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replied["data"]["adminReply"], json!("Thank you!"));
    assert!(replied["data"]["repliedAt"].is_string());
}

#[tokio::test]
async fn feedback_photos_only_lists_visible_entries_with_images() {
    let server = spawn().await;

    // Visible with image
    server
        .post(
            "/api/feedback",
            json!({"name": "A", "rating": 5, "feedback": "x", "imageUrl": "http://localhost:5000/uploads/feedback/a.jpg"}),
        )
        .await;
    // Visible without image
    server
        .post(
            "/api/feedback",
            json!({"name": "B", "rating": 5, "feedback": "y"}),
        )
        .await;
    // Hidden with image
    let (_, hidden) = server
        .post(
            "/api/feedback",
            json!({"name": "C", "rating": 5, "feedback": "z", "imageUrl": "http://localhost:5000/uploads/feedback/c.jpg"}),
        )
        .await;
    let hidden_id = hidden["data"]["id"].as_str().unwrap();
    server
        .patch(&format!("/api/feedback/{hidden_id}/visibility"), None)
        .await;

    let (status, photos) = server.get("/api/feedback/photos").await;
    assert_eq!(status, StatusCode::OK);
    let entries = photos["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], json!("A"));
}

#[tokio::test]
async fn faq_listing_hides_inactive_unless_asked() {
    let server = spawn().await;

    let (status, _) = server
        .post(
            "/api/faqs",
            json!({"question": "Do you deliver?", "answer": "Yes.", "order": 1}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, inactive) = server
        .post(
            "/api/faqs",
            json!({"question": "Old question?", "answer": "Old.", "isActive": false}),
        )
        .await;
    assert_eq!(inactive["data"]["isActive"], json!(false));

    let (_, public) = server.get("/api/faqs").await;
    assert_eq!(public["data"].as_array().unwrap().len(), 1);

    let (_, admin) = server.get("/api/faqs?all=true").await;
    assert_eq!(admin["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn faq_crud_roundtrip() {
    let server = spawn().await;

    let (_, created) = server
        .post(
            "/api/faqs",
            json!({"question": "Warranty?", "answer": "Two years."}),
        )
        .await;
    let id = created["data"]["id"].as_str().unwrap();

    let (_, fetched) = server.get(&format!("/api/faqs/{id}")).await;
    assert_eq!(fetched["data"]["answer"], json!("Two years."));

    let (_, updated) = server
        .put(&format!("/api/faqs/{id}"), json!({"answer": "Three years."}))
        .await;
    assert_eq!(updated["data"]["answer"], json!("Three years."));
    assert_eq!(updated["data"]["question"], json!("Warranty?"));

    let (status, body) = server.delete(&format!("/api/faqs/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("FAQ deleted successfully"));

    let (status, _) = server.get(&format!("/api/faqs/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn contact_read_flag_is_idempotent() {
    let server = spawn().await;

    let (status, created) = server
        .post(
            "/api/contact",
            json!({
                "name": "Lena Fischer",
                "subject": "Custom Order",
                "message": "Can you build a corner desk?",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["isRead"], json!(false));
    let id = created["data"]["id"].as_str().unwrap();

    for _ in 0..2 {
        let (status, marked) = server
            .patch(
                &format!("/api/contact/{id}/read"),
                Some(json!({"isRead": true})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(marked["data"]["isRead"], json!(true));
    }

    let (_, unread) = server
        .patch(
            &format!("/api/contact/{id}/read"),
            Some(json!({"isRead": false})),
        )
        .await;
    assert_eq!(unread["data"]["isRead"], json!(false));
}

#[tokio::test]
async fn contact_requires_subject_and_message() {
    let server = spawn().await;
    let (status, body) = server
        .post("/api/contact", json!({"name": "Max", "subject": "", "message": "hi"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("subject"));
}

#[tokio::test]
async fn gallery_metadata_crud_and_legacy_image_key() {
    let server = spawn().await;

    let (status, created) = server
        .post(
            "/api/gallery",
            json!({"title": "Showroom", "image": "http://localhost:5000/uploads/gallery/a.jpg", "order": 2}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    // The legacy `image` key fills imageUrl
    assert!(
        created["imageUrl"].as_str().unwrap().ends_with("a.jpg"),
        "{created}"
    );
    let id = created["id"].as_str().unwrap();

    let (status, _) = server.post("/api/gallery", json!({"title": "No url"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, updated) = server
        .put(&format!("/api/gallery/{id}"), json!({"category": "Sofa"}))
        .await;
    assert_eq!(updated["category"], json!("Sofa"));

    let (status, body) = server.delete(&format!("/api/gallery/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Gallery image deleted successfully"));
}

#[tokio::test]
async fn api_answers_503_while_store_is_down() {
    let server = spawn_disconnected().await;

    let (status, body) = server.get("/api/products").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("Database not connected"));

    // Non-API routes still answer
    let (status, body) = server.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Furniture Order Management API"));
}

#[tokio::test]
async fn root_and_health() {
    let server = spawn().await;

    let (status, body) = server.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Furniture Order Management API"));

    let (status, body) = server.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["database"], json!("ok"));
}
