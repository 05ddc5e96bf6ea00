use axum::middleware::from_fn_with_state;
use axum::Router;
use schemadoc_core::{casing_middleware, DocRouter, RouteTable};
use serde_json::Value;
use std::sync::Arc;

use crate::builder::{build_document, OpenApiConfig};
use crate::document::OpenApiDocument;
use crate::error::SchemaError;
use crate::handlers::{doc_route_records, docs_routes};

/// Extension that documents a [`DocRouter`] and serves the result.
///
/// # Example
///
/// ```ignore
/// use schemadoc_openapi::{OpenApiConfig, SchemaDoc};
///
/// let doc = SchemaDoc::new("petstore", OpenApiConfig::new().with_version("1.0.0"));
/// let app: axum::Router = doc.init_app(
///     DocRouter::new().route("/pets", get(list_pets).response::<PetList>(200)),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SchemaDoc {
    config: Arc<OpenApiConfig>,
}

impl SchemaDoc {
    /// Create the extension. `app_name` becomes the title when the config has none.
    pub fn new(app_name: &str, mut config: OpenApiConfig) -> Self {
        if config.title.is_none() {
            config.title = Some(app_name.to_string());
        }
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &OpenApiConfig {
        &self.config
    }

    pub fn title(&self) -> &str {
        self.config.title.as_deref().unwrap_or_default()
    }

    /// Build the document for `routes`.
    pub fn document(&self, routes: &RouteTable) -> Result<OpenApiDocument, SchemaError> {
        build_document(&self.config, routes)
    }

    /// Build the document for `routes` as JSON.
    pub fn document_value(&self, routes: &RouteTable) -> Result<Value, SchemaError> {
        self.document(routes)?.to_value()
    }

    /// Register the documentation routes on `app` and return the final router.
    ///
    /// The documentation routes are recorded as hidden. With casing
    /// conversion on, the casing middleware wraps every route.
    pub fn init_app<S>(&self, app: DocRouter<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let (router, mut table) = app.into_parts();
        table.extend(doc_route_records(self));
        tracing::info!(
            title = self.title(),
            routes = table.len(),
            openapi_path = ?self.config.openapi_path,
            "documentation routes installed"
        );

        let mut router = router.merge(docs_routes(self.clone(), Arc::new(table)));
        let serialization = self.config.serialization;
        if serialization.convert_casing {
            router = router.layer(from_fn_with_state(serialization, casing_middleware));
        }
        router
    }
}
