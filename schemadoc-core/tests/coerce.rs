use axum::response::IntoResponse;
use http::{HeaderMap, HeaderValue, StatusCode};
use http_body_util::BodyExt;
use schemadoc_core::{coerce, impl_record, Payload, Reply};
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Serialize)]
struct Point {
    x: i64,
    y: i64,
    label: String,
}

impl_record!(Point { x, y });

#[derive(Serialize, JsonSchema)]
struct Pet {
    id: u64,
    name: String,
    tags: Vec<String>,
}

#[derive(Serialize)]
struct Scalar(u8);

impl_record!(Scalar {});

fn pet() -> Pet {
    Pet {
        id: 1,
        name: "Rex".into(),
        tags: vec!["good".into()],
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ── coerce ──────────────────────────────────────────────────────────────────

#[test]
fn record_keeps_declared_fields_only() {
    let point = Point {
        x: 1,
        y: 2,
        label: "origin".into(),
    };
    let value = coerce(Payload::record(point)).unwrap();
    assert_eq!(value, json!({ "x": 1, "y": 2 }));
}

#[test]
fn model_becomes_its_dict() {
    let value = coerce(Payload::model(pet())).unwrap();
    assert_eq!(value, json!({ "id": 1, "name": "Rex", "tags": ["good"] }));
}

#[test]
fn plain_values_are_identity() {
    for value in [json!(3), json!("text"), json!([1, 2]), json!({ "k": "v" }), Value::Null] {
        assert_eq!(coerce(Payload::from(value.clone())).unwrap(), value);
    }
}

#[test]
fn record_that_is_not_an_object_fails() {
    let err = coerce(Payload::record(Scalar(3))).unwrap_err();
    assert!(err.to_string().contains("expected an object"));
}

// ── Reply ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn reply_from_payload_only() {
    let response = Reply::from(Payload::model(pet())).into_response();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    assert_eq!(body_json(response).await["name"], "Rex");
}

#[tokio::test]
async fn reply_with_status() {
    let reply: Reply = (Payload::model(pet()), StatusCode::CREATED).into();
    assert!(reply.headers().is_none());

    let response = reply.into_response();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn reply_with_headers_in_second_position() {
    let mut headers = HeaderMap::new();
    headers.insert("x-request-id", HeaderValue::from_static("abc"));

    let response = Reply::from((Payload::plain(json!({ "ok": true })), headers)).into_response();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-request-id").unwrap(), "abc");
}

#[tokio::test]
async fn reply_with_status_and_headers() {
    let mut headers = HeaderMap::new();
    headers.insert("location", HeaderValue::from_static("/pets/1"));

    let point = Point {
        x: 4,
        y: 5,
        label: "ignored".into(),
    };
    let response =
        Reply::from((Payload::record(point), StatusCode::ACCEPTED, headers)).into_response();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(response.headers().get("location").unwrap(), "/pets/1");
    assert_eq!(body_json(response).await, json!({ "x": 4, "y": 5 }));
}

#[tokio::test]
async fn reply_coercion_failure_is_500() {
    let response = Reply::from(Payload::record(Scalar(1))).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(response).await["error"].is_string());
}
