use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tfidf_server::build_app;
use tower::ServiceExt;

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn index_cat_dog(app: &Router) {
    let (status, _) = post_json(
        app.clone(),
        "/index",
        json!({ "documents": ["the cat sat", "the dog sat"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn root_reports_liveness() {
    let app = build_app();
    let (status, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Backend is up and running!");
}

#[tokio::test]
async fn index_returns_postings_and_matrix() {
    let app = build_app();
    let (status, body) = post_json(
        app,
        "/index",
        json!({ "documents": ["the cat sat", "the dog sat"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["index"]["cat"], json!([0]));
    assert_eq!(body["index"]["sat"], json!([0, 1]));
    let matrix = body["tfidf"].as_object().unwrap();
    assert_eq!(matrix["cat"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn search_ranks_by_cosine() {
    let app = build_app();
    index_cat_dog(&app).await;
    let (status, body) =
        post_json(app, "/search", json!({ "query": "cat", "metric": "cosine" })).await;
    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["doc_id"], 0);
    assert_eq!(results[0]["content"], "the cat sat");
    assert!(results[0]["score"].as_f64().unwrap() > results[1]["score"].as_f64().unwrap());
}

#[tokio::test]
async fn search_ranks_by_euclidean() {
    let app = build_app();
    index_cat_dog(&app).await;
    let (status, body) =
        post_json(app, "/search", json!({ "query": "cat", "metric": "euclidean" })).await;
    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results[0]["doc_id"], 0);
    assert!(results[0]["score"].as_f64().unwrap() < results[1]["score"].as_f64().unwrap());
}

#[tokio::test]
async fn search_before_index_is_rejected() {
    let app = build_app();
    let (status, body) =
        post_json(app, "/search", json!({ "query": "cat", "metric": "cosine" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "no documents indexed yet");
}

#[tokio::test]
async fn search_after_indexing_nothing_is_rejected() {
    let app = build_app();
    let (status, _) = post_json(app.clone(), "/index", json!({ "documents": [] })).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) =
        post_json(app, "/search", json!({ "query": "cat", "metric": "cosine" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unsupported_metric_is_rejected() {
    let app = build_app();
    index_cat_dog(&app).await;
    let (status, body) =
        post_json(app, "/search", json!({ "query": "cat", "metric": "manhattan" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "unsupported metric: manhattan");
}

#[tokio::test]
async fn view_index_requires_a_built_corpus() {
    let app = build_app();
    let (status, _) = get(app.clone(), "/view-index").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    index_cat_dog(&app).await;
    let (status, body) = get(app, "/view-index").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["documents"].as_array().unwrap().len(), 2);
    assert!(body["idf"].as_object().unwrap().contains_key("sat"));
    assert!(body["tfidf"].as_object().unwrap().contains_key("dog"));
}

#[tokio::test]
async fn upload_accepts_txt_and_rejects_others() {
    let app = build_app();
    let boundary = "testboundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"files\"; filename=\"notes.txt\"\r\n\
         Content-Type: text/plain\r\n\r\n\
         hello cats\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"files\"; filename=\"image.png\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n\
         not text\r\n\
         --{boundary}--\r\n"
    );
    let req = Request::post("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["filename"], "notes.txt");
    assert_eq!(entries[0]["content"], "hello cats");
    assert_eq!(entries[1]["filename"], "image.png");
    assert_eq!(entries[1]["error"], "Only .txt files allowed");
}
