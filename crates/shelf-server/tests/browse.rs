use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use shelf_corpus::Corpus;
use shelf_server::{AppState, create_router};
use tower::ServiceExt;

const NOT_FOUND: &str = "目录不存在";

const CORPUS: &str = r#"{
    "namespaces": ["bytes", "strings", "crypto"],
    "tree": {
        "bytes": {"leafA": "68656c6c6f"},
        "strings": {
            "intro": "2320537472696e6773",
            "Builder": {"example": "6869"},
            "Reader": {}
        },
        "crypto": {"aes": {"x": "64617461"}, "broken": {"bad": "zz"}}
    }
}"#;

fn app_with(json: &str) -> Router {
    let corpus = Arc::new(Corpus::from_json(json).unwrap());
    let state = AppState::new(corpus, None, "localhost:8080".to_owned(), "test".to_owned());
    create_router(Arc::new(state))
}

fn app() -> Router {
    app_with(CORPUS)
}

async fn send(app: Router, method: &str, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::HOST, "h")
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn body_string(resp: Response<Body>) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn get(uri: &str) -> (StatusCode, String) {
    let resp = send(app(), "GET", uri).await;
    let status = resp.status();
    (status, body_string(resp).await)
}

#[tokio::test]
async fn index_lists_namespaces_in_registry_order() {
    let resp = send(app_with(r#"{"namespaces": ["bytes", "strings"], "tree": {}}"#), "GET", "/").await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[header::CONTENT_TYPE],
        "text/html; charset=utf-8"
    );
    assert_eq!(
        body_string(resp).await,
        r#"<a href="http://h/bytes">bytes</a><br/><a href="http://h/strings">strings</a><br/>"#
    );
}

#[tokio::test]
async fn namespace_root_renders_leaf_content() {
    let (status, body) = get("/bytes").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("<!doctype html>"));
    assert!(body.contains("leafA\nhello"));
    assert!(body.contains(r#"<a href="http://h">Parent</a>"#));
}

#[tokio::test]
async fn namespace_root_with_and_without_trailing_slash_match() {
    for id in ["bytes", "strings", "crypto"] {
        let (_, bare) = get(&format!("/{id}")).await;
        let (_, slashed) = get(&format!("/{id}/")).await;

        assert_eq!(bare, slashed);
    }
}

#[tokio::test]
async fn links_precede_content() {
    let (status, body) = get("/strings").await;

    let builder = body.find(r#"<a href="http://h/strings/Builder">Builder</a>"#).unwrap();
    let reader = body.find(r#"<a href="http://h/strings/Reader">Reader</a>"#).unwrap();
    let intro = body.find("intro").unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(builder < reader);
    assert!(reader < intro);
}

#[tokio::test]
async fn relative_path_descends_into_namespace() {
    let (status, body) = get("/crypto/aes").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("x\ndata"));
    assert!(body.contains(r#"<a href="http://h/crypto">Parent</a>"#));
}

#[tokio::test]
async fn nested_node_links_extend_request_path() {
    let (_, body) = get("/strings/Builder").await;

    assert!(body.contains("example\nhi"));
    assert!(body.contains(r#"<a href="http://h/strings">Parent</a>"#));
}

#[tokio::test]
async fn unknown_namespace_is_not_found() {
    let (status, body) = get("/unknown").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, NOT_FOUND);
}

#[tokio::test]
async fn error_body_is_plain_text() {
    let resp = send(app(), "GET", "/unknown").await;

    assert_eq!(
        resp.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
}

#[tokio::test]
async fn percent_encoded_segments_are_decoded() {
    let app = app_with(r#"{"tree": {"文档": {"Read Me": {"x": "6869"}}}}"#);

    let resp = send(app, "GET", "/%E6%96%87%E6%A1%A3/Read%20Me").await;
    let body = body_string(resp).await;

    assert!(body.contains("x\nhi"));
    assert!(body.contains(r#"<a href="http://h/文档">Parent</a>"#));
}

#[tokio::test]
async fn unknown_segment_is_not_found() {
    let (_, body) = get("/crypto/des").await;

    assert_eq!(body, NOT_FOUND);
}

#[tokio::test]
async fn invalid_hex_is_not_found() {
    let (status, body) = get("/crypto/broken").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, NOT_FOUND);
}

#[tokio::test]
async fn leaf_target_is_not_found() {
    let (_, body) = get("/bytes/leafA").await;

    assert_eq!(body, NOT_FOUND);
}

#[tokio::test]
async fn non_get_methods_are_rejected_everywhere() {
    for method in ["POST", "PUT", "DELETE", "PATCH"] {
        for uri in ["/", "/bytes", "/unknown"] {
            let resp = send(app(), method, uri).await;

            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(body_string(resp).await, "404 not found");
        }
    }
}

#[tokio::test]
async fn query_string_is_ignored() {
    let (status, body) = get("/bytes?page=2").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("leafA\nhello"));
}

#[tokio::test]
async fn base_url_overrides_host_header() {
    let corpus = Arc::new(Corpus::from_json(CORPUS).unwrap());
    let state = AppState::new(
        corpus,
        Some("https://docs.example.com".to_owned()),
        "localhost:8080".to_owned(),
        "test".to_owned(),
    );
    let resp = send(create_router(Arc::new(state)), "GET", "/").await;

    assert!(
        body_string(resp)
            .await
            .starts_with(r#"<a href="https://docs.example.com/bytes">bytes</a><br/>"#)
    );
}

#[tokio::test]
async fn etag_round_trip_returns_not_modified() {
    let resp = send(app(), "GET", "/bytes").await;
    let etag = resp.headers()[header::ETAG].clone();

    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/bytes")
                .header(header::HOST, "h")
                .header(header::IF_NONE_MATCH, etag)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
}

#[tokio::test]
async fn security_headers_are_set() {
    let resp = send(app(), "GET", "/").await;

    assert_eq!(resp.headers()["x-content-type-options"], "nosniff");
    assert_eq!(resp.headers()["x-frame-options"], "DENY");
    assert!(resp.headers().contains_key("content-security-policy"));
}
