//! Multipart upload routes: gallery upload and feedback-with-image.

mod common;

use common::{TINY_PNG, multipart_body, spawn};
use http::StatusCode;
use serde_json::json;

fn count_files(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir).map(|rd| rd.count()).unwrap_or(0)
}

#[tokio::test]
async fn gallery_upload_stores_file_and_returns_url() {
    let server = spawn().await;
    let gallery_dir = server.state.config.uploads_dir().join("gallery");

    let body = multipart_body(
        "XBOUNDARY",
        &[("image", Some(("chair.png", "image/png")), TINY_PNG)],
    );
    let (status, response) = server
        .post_multipart("/api/gallery/upload", "XBOUNDARY", body)
        .await;

    assert_eq!(status, StatusCode::CREATED, "{response}");
    let url = response["imageUrl"].as_str().unwrap();
    assert!(url.contains("/uploads/gallery/gallery-"), "{url}");
    assert!(url.ends_with(".png"), "{url}");
    assert_eq!(count_files(&gallery_dir), 1);
}

#[tokio::test]
async fn non_image_upload_is_rejected_before_any_write() {
    let server = spawn().await;
    let gallery_dir = server.state.config.uploads_dir().join("gallery");

    // Declared as PDF
    let body = multipart_body(
        "XBOUNDARY",
        &[("image", Some(("doc.pdf", "application/pdf")), b"%PDF-1.4 fake")],
    );
    let (status, response) = server
        .post_multipart("/api/gallery/upload", "XBOUNDARY", body)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"].as_str().unwrap().contains("image files"));

    // Declared as PNG but not decodable
    let body = multipart_body(
        "XBOUNDARY",
        &[("image", Some(("fake.png", "image/png")), b"not a png at all")],
    );
    let (status, _) = server
        .post_multipart("/api/gallery/upload", "XBOUNDARY", body)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing reached the disk
    assert_eq!(count_files(&gallery_dir), 0);
}

#[tokio::test]
async fn upload_without_file_field_is_rejected() {
    let server = spawn().await;

    let body = multipart_body("XBOUNDARY", &[("title", None, b"just text")]);
    let (status, response) = server
        .post_multipart("/api/gallery/upload", "XBOUNDARY", body)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], json!("No file uploaded"));
}

#[tokio::test]
async fn feedback_with_image_stores_photo_and_entry() {
    let server = spawn().await;
    let feedback_dir = server.state.config.uploads_dir().join("feedback");

    let body = multipart_body(
        "XBOUNDARY",
        &[
            ("name", None, b"Mia Keller"),
            ("feedback", None, b"The bed frame is gorgeous."),
            ("rating", None, b"4"),
            ("productName", None, b"Pine bed"),
            ("image", Some(("photo.png", "image/png")), TINY_PNG),
        ],
    );
    let (status, response) = server
        .post_multipart("/api/feedback/with-image", "XBOUNDARY", body)
        .await;

    assert_eq!(status, StatusCode::CREATED, "{response}");
    let entry = &response["data"];
    assert_eq!(entry["name"], json!("Mia Keller"));
    assert_eq!(entry["rating"], json!(4));
    assert!(
        entry["imageUrl"]
            .as_str()
            .unwrap()
            .contains("/uploads/feedback/feedback-"),
        "{entry}"
    );
    assert_eq!(count_files(&feedback_dir), 1);
}

#[tokio::test]
async fn feedback_with_image_defaults_rating_and_allows_no_photo() {
    let server = spawn().await;

    let body = multipart_body(
        "XBOUNDARY",
        &[
            ("name", None, b"Noor Haddad"),
            ("feedback", None, b"Five stars implied."),
            ("rating", None, b"not-a-number"),
        ],
    );
    let (status, response) = server
        .post_multipart("/api/feedback/with-image", "XBOUNDARY", body)
        .await;

    assert_eq!(status, StatusCode::CREATED, "{response}");
    assert_eq!(response["data"]["rating"], json!(5));
    assert!(response["data"]["imageUrl"].is_null());
}

#[tokio::test]
async fn feedback_with_bad_image_persists_nothing() {
    let server = spawn().await;
    let feedback_dir = server.state.config.uploads_dir().join("feedback");

    let body = multipart_body(
        "XBOUNDARY",
        &[
            ("name", None, b"Omar Aziz"),
            ("feedback", None, b"Photo attached."),
            ("rating", None, b"5"),
            ("image", Some(("virus.exe", "application/octet-stream")), b"MZ..."),
        ],
    );
    let (status, _) = server
        .post_multipart("/api/feedback/with-image", "XBOUNDARY", body)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(count_files(&feedback_dir), 0);
    let (_, all) = server.get("/api/feedback").await;
    assert_eq!(all["data"].as_array().unwrap().len(), 0);
}
