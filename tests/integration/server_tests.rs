//! Integration tests for the HTTP service over a documents directory

use crate::common::TestFixture;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use sheetdiff::server::create_router;
use sheetdiff::Comparator;
use std::sync::Arc;
use tower::ServiceExt;

async fn get(fixture: &TestFixture, uri: &str) -> (StatusCode, String) {
    let app = create_router(
        Arc::new(fixture.source.clone()),
        Comparator::new(2).unwrap(),
    );
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_page_contains_report_and_escaped_diffs() {
    let fixture = TestFixture::new().unwrap();
    fixture
        .write_document(
            "old",
            &[("Sheet1", &[&["<b>bold</b>"]]), ("Gone", &[&["x"]])],
        )
        .unwrap();
    fixture
        .write_document("new", &[("Sheet1", &[&["<i>italic</i>"]])])
        .unwrap();

    let (status, body) = get(&fixture, "/compare/old/new").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<td>Gone</td><td>only in old</td>"));
    assert!(body.contains("<h2>Sheet1</h2>"));
    assert!(!body.contains("<b>bold</b>"));
    assert!(!body.contains("<i>italic</i>"));
    assert!(body.contains("&lt;"));
    assert!(!body.contains("<h2>Gone</h2>"));
}

#[tokio::test]
async fn test_reordered_sheets_still_render() {
    let fixture = TestFixture::new().unwrap();
    fixture
        .write_document("old", &[("A", &[&["1"]]), ("B", &[&["2"]])])
        .unwrap();
    fixture
        .write_document("new", &[("B", &[&["2"]]), ("A", &[&["1"]])])
        .unwrap();

    let (status, body) = get(&fixture, "/compare/old/new").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Same set: true, same order: false"));
    let a = body.find("<h2>A</h2>").unwrap();
    let b = body.find("<h2>B</h2>").unwrap();
    assert!(a < b);
}

#[tokio::test]
async fn test_fetch_failure_returns_error_text() {
    let fixture = TestFixture::new().unwrap();
    fixture.write_document("old", &[("A", &[&["1"]])]).unwrap();

    let (status, body) = get(&fixture, "/compare/old/nothere").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.starts_with("Unable to retrieve document 'nothere'"));
}

#[tokio::test]
async fn test_unknown_route() {
    let fixture = TestFixture::new().unwrap();
    let (status, _) = get(&fixture, "/compare/only-one").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
