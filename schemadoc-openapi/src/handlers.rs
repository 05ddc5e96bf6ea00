use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, MethodRouter};
use axum::{Json, Router};
use http::Method;
use schemadoc_core::{hide_route, CasedBody, HttpError, Route, RouteMeta, RouteTable};
use std::sync::Arc;

use crate::ext::SchemaDoc;
use crate::templates;

/// Hidden route records for the documentation endpoints `doc` will serve.
pub(crate) fn doc_route_records(doc: &SchemaDoc) -> Vec<Route> {
    let config = doc.config();
    let Some(openapi_path) = &config.openapi_path else {
        return Vec::new();
    };

    let meta = Arc::new(hide_route(RouteMeta::new()));
    let mut records = vec![Route::new(openapi_path.as_str(), "openapi", &[Method::GET], meta.clone())];
    if let Some(path) = &config.swagger_ui_path {
        records.push(Route::new(path.as_str(), "swagger_ui", &[Method::GET], meta.clone()));
    }
    if let Some(path) = &config.redoc_ui_path {
        records.push(Route::new(path.as_str(), "redoc_ui", &[Method::GET], meta));
    }
    records
}

/// Build the router serving the JSON document and the two UIs.
///
/// The document is rebuilt from `table` on every request.
pub(crate) fn docs_routes<S>(doc: SchemaDoc, table: Arc<RouteTable>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let config = doc.config().clone();
    let Some(openapi_path) = config.openapi_path.clone() else {
        return Router::new();
    };

    let title = doc.title().to_string();
    let mut router = Router::<S>::new().route(
        &openapi_path,
        get(move || {
            let doc = doc.clone();
            let table = table.clone();
            async move { openapi_json(&doc, &table) }
        }),
    );

    if let Some(path) = &config.swagger_ui_path {
        let page = templates::swagger_ui(&title, &openapi_path, &config.assets);
        router = router.route(path, html_page(page));
    }

    if let Some(path) = &config.redoc_ui_path {
        let page = templates::redoc_ui(&title, &openapi_path, &config.assets);
        router = router.route(path, html_page(page));
    }

    router
}

/// Serve a page rendered at startup. A render failure is logged once and
/// answered with a 500.
fn html_page<S>(page: Result<String, minijinja::Error>) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    let page = page.map_err(|err| {
        tracing::error!(error = %err, "failed to render documentation page");
        err.to_string()
    });
    get(move || {
        let page = page.clone();
        async move {
            match page {
                Ok(html) => Html(html).into_response(),
                Err(message) => HttpError::Internal(message).into_response(),
            }
        }
    })
}

fn openapi_json(doc: &SchemaDoc, table: &RouteTable) -> Response {
    match doc.document_value(table) {
        Ok(value) => {
            let mut response = Json(value).into_response();
            // Schemas are already in wire casing.
            response.extensions_mut().insert(CasedBody);
            response
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to build OpenAPI document");
            HttpError::Internal(err.to_string()).into_response()
        }
    }
}
