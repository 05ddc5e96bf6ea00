use axum::body::Body;
use axum::Json;
use http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use schemadoc_core::{get, post, DataSource, DocRouter};
use schemadoc_openapi::{OpenApiConfig, SchemaDoc, UiAssets};
use schemars::JsonSchema;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Owner of a pet.
#[derive(JsonSchema)]
#[allow(dead_code)]
struct PetOwner {
    display_name: String,
}

async fn list_owners() -> Json<Value> {
    Json(json!([{ "display_name": "Ada" }]))
}

async fn create_owner(Json(body): Json<Value>) -> Json<Value> {
    Json(body)
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn app_router() -> DocRouter {
    DocRouter::new()
        .route(
            "/pet_owners",
            get(list_owners).doc("List owners.").response::<PetOwner>(200),
        )
        .route(
            "/pet_owners/new",
            post(create_owner).request::<PetOwner>(DataSource::Json),
        )
        .route("/internal", get(list_owners).hidden())
}

async fn send(router: axum::Router, request: Request<Body>) -> (StatusCode, String, HeaderMap) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap(), headers)
}

async fn get_response(router: axum::Router, path: &str) -> (StatusCode, String, HeaderMap) {
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    send(router, request).await
}

/// Fetch an HTML page with escaped slashes in attribute values decoded.
async fn get_page(router: axum::Router, path: &str) -> (StatusCode, String, HeaderMap) {
    let (status, page, headers) = get_response(router, path).await;
    (status, page.replace("&#x2f;", "/"), headers)
}

// ── JSON document ───────────────────────────────────────────────────────────

#[tokio::test]
async fn openapi_json_endpoint() {
    let doc = SchemaDoc::new("petstore", OpenApiConfig::new());
    let router = doc.init_app(app_router());

    let (status, body, headers) = get_response(router, "/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers.get("content-type").unwrap().to_str().unwrap(),
        "application/json"
    );

    let spec: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(spec["openapi"], "3.0.3");
    assert_eq!(spec["info"]["title"], "petstore");
    assert_eq!(spec["paths"]["/pet_owners"]["get"]["summary"], "List owners.");
    assert!(spec["paths"]["/pet_owners/new"]["post"]["requestBody"].is_object());
}

#[tokio::test]
async fn documentation_routes_are_hidden() {
    let doc = SchemaDoc::new("petstore", OpenApiConfig::new());
    let (_, body, _) = get_response(doc.init_app(app_router()), "/openapi.json").await;

    let spec: Value = serde_json::from_str(&body).unwrap();
    let paths = spec["paths"].as_object().unwrap();
    assert_eq!(paths.keys().collect::<Vec<_>>(), ["/pet_owners", "/pet_owners/new"]);
}

#[tokio::test]
async fn configured_title_wins_over_app_name() {
    let doc = SchemaDoc::new("petstore", OpenApiConfig::new().with_title("Pets API"));
    assert_eq!(doc.title(), "Pets API");

    let (_, body, _) = get_response(doc.init_app(app_router()), "/openapi.json").await;
    let spec: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(spec["info"]["title"], "Pets API");
}

#[tokio::test]
async fn custom_openapi_path() {
    let doc = SchemaDoc::new(
        "petstore",
        OpenApiConfig::new().with_openapi_path(Some("/api/spec.json")),
    );
    let router = doc.init_app(app_router());

    let (status, _, _) = get_response(router.clone(), "/api/spec.json").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, _) = get_response(router.clone(), "/openapi.json").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, page, _) = get_page(router, "/docs").await;
    assert!(page.contains(r#"url: "/api/spec.json""#));
}

// ── UIs ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn swagger_ui_page() {
    let doc = SchemaDoc::new("petstore", OpenApiConfig::new());
    let (status, page, headers) = get_page(doc.init_app(app_router()), "/docs").await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert!(page.contains("<title>petstore</title>"));
    assert!(page.contains("swagger-ui/3.47.1/swagger-ui-bundle.js"));
    assert!(page.contains("swagger-ui/3.47.1/swagger-ui.min.css"));
    assert!(page.contains(r#"url: "/openapi.json""#));
}

#[tokio::test]
async fn redoc_page() {
    let doc = SchemaDoc::new("petstore", OpenApiConfig::new());
    let (status, page, _) = get_page(doc.init_app(app_router()), "/redocs").await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains(r#"<redoc spec-url="/openapi.json"></redoc>"#));
    assert!(page.contains("redoc.standalone.js"));
}

#[tokio::test]
async fn configured_assets_are_used() {
    let assets = UiAssets {
        swagger_js_url: "/static/sw.js".into(),
        swagger_css_url: "/static/sw.css".into(),
        redoc_js_url: "/static/redoc.js".into(),
    };
    let doc = SchemaDoc::new("petstore", OpenApiConfig::new().with_assets(assets));
    let router = doc.init_app(app_router());

    let (_, swagger, _) = get_page(router.clone(), "/docs").await;
    assert!(swagger.contains(r#"<script src="/static/sw.js"></script>"#));
    assert!(swagger.contains(r#"href="/static/sw.css""#));

    let (_, redoc, _) = get_page(router, "/redocs").await;
    assert!(redoc.contains(r#"<script src="/static/redoc.js"></script>"#));
}

#[tokio::test]
async fn title_is_escaped() {
    let doc = SchemaDoc::new("petstore", OpenApiConfig::new().with_title("<Pets & Co>"));
    let (_, page, _) = get_response(doc.init_app(app_router()), "/redocs").await;
    assert!(page.contains("<title>&lt;Pets &amp; Co&gt;</title>"));
}

#[tokio::test]
async fn template_syntax_in_title_is_not_expanded() {
    let doc = SchemaDoc::new("petstore", OpenApiConfig::new().with_title("{{ openapi_path }}"));
    let (_, page, _) = get_page(doc.init_app(app_router()), "/docs").await;
    assert!(page.contains("<title>{{ openapi_path }}</title>"));
    assert!(page.contains(r#"url: "/openapi.json""#));
}

#[tokio::test]
async fn asset_urls_cannot_break_out_of_attributes() {
    let assets = UiAssets {
        swagger_js_url: r#"/static/sw.js" onload="alert(1)"#.into(),
        ..UiAssets::default()
    };
    let doc = SchemaDoc::new("petstore", OpenApiConfig::new().with_assets(assets));
    let (status, page, _) = get_page(doc.init_app(app_router()), "/docs").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!page.contains(r#"" onload=""#));
    assert!(page.contains("&quot; onload=&quot;"));
}

#[tokio::test]
async fn disabled_ui_paths() {
    let doc = SchemaDoc::new(
        "petstore",
        OpenApiConfig::new()
            .with_swagger_ui_path(None)
            .with_redoc_ui_path(Some("/reference")),
    );
    let router = doc.init_app(app_router());

    assert_eq!(get_response(router.clone(), "/docs").await.0, StatusCode::NOT_FOUND);
    assert_eq!(get_response(router.clone(), "/redocs").await.0, StatusCode::NOT_FOUND);
    assert_eq!(get_response(router, "/reference").await.0, StatusCode::OK);
}

#[tokio::test]
async fn disabling_openapi_path_disables_everything() {
    let doc = SchemaDoc::new("petstore", OpenApiConfig::new().with_openapi_path(None));
    let router = doc.init_app(app_router());

    for path in ["/openapi.json", "/docs", "/redocs"] {
        assert_eq!(
            get_response(router.clone(), path).await.0,
            StatusCode::NOT_FOUND,
            "{path} should not be served"
        );
    }
    assert_eq!(get_response(router, "/pet_owners").await.0, StatusCode::OK);
}

// ── Casing mode ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn casing_mode_converts_application_bodies() {
    let doc = SchemaDoc::new("petstore", OpenApiConfig::new().with_convert_casing(true));
    let router = doc.init_app(app_router());

    let (_, body, _) = get_response(router.clone(), "/pet_owners").await;
    let owners: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(owners, json!([{ "displayName": "Ada" }]));

    let request = Request::builder()
        .method("POST")
        .uri("/pet_owners/new")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"displayName":"Bob"}"#))
        .unwrap();
    let (_, body, _) = send(router, request).await;
    let created: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(created, json!({ "displayName": "Bob" }));
}

#[tokio::test]
async fn casing_mode_leaves_document_paths_alone() {
    let doc = SchemaDoc::new("petstore", OpenApiConfig::new().with_convert_casing(true));
    let (_, body, _) = get_response(doc.init_app(app_router()), "/openapi.json").await;

    let spec: Value = serde_json::from_str(&body).unwrap();
    let schema = &spec["paths"]["/pet_owners"]["get"]["responses"]["200"]["content"]
        ["application/json"]["schema"];
    assert!(schema["properties"]["displayName"].is_object());
    assert!(spec["paths"].get("/petOwners").is_none());
}

#[test]
fn document_is_available_outside_http() {
    let doc = SchemaDoc::new("petstore", OpenApiConfig::new());
    let router = app_router();
    let value = doc.document_value(router.table()).unwrap();
    assert!(value["paths"]["/pet_owners"]["get"].is_object());
    assert!(value["paths"].get("/internal").is_none());
}
