//! A thin wrapper over `axum::Router` that records documentation metadata.
//!
//! ```ignore
//! let app = DocRouter::new()
//!     .route(
//!         "/pets/<int:pet_id>",
//!         get(get_pet)
//!             .doc("Fetch a pet.")
//!             .response::<Pet>(200)
//!             .response::<ApiError>(404),
//!     );
//! ```

use axum::handler::Handler;
use axum::routing::{MethodFilter, MethodRouter};
use axum::Router;
use http::Method;
use schemars::JsonSchema;
use std::sync::Arc;

use crate::meta::{DataSource, RouteMeta};
use crate::route::{axum_path, Route, RouteTable};

/// A handler registered for one or more methods, plus its metadata.
pub struct RouteDef<S = ()> {
    methods: Vec<Method>,
    method_router: MethodRouter<S>,
    endpoint: Option<String>,
    meta: RouteMeta,
}

/// Register `handler` for every method in `methods`.
///
/// Methods axum cannot route (e.g. custom extension methods) are still
/// recorded in the route table.
pub fn route_def<H, T, S>(methods: &[Method], handler: H) -> RouteDef<S>
where
    H: Handler<T, S>,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    let mut method_router = MethodRouter::new();
    for method in methods {
        match MethodFilter::try_from(method.clone()) {
            Ok(filter) => method_router = method_router.on(filter, handler.clone()),
            Err(_) => tracing::warn!(%method, "method cannot be routed by axum; documenting only"),
        }
    }

    RouteDef {
        methods: methods.to_vec(),
        method_router,
        endpoint: None,
        meta: RouteMeta::new(),
    }
}

macro_rules! method_shortcut {
    ($name:ident, $method:expr) => {
        #[doc = concat!("Shortcut for [`route_def`] with `", stringify!($name), "` only.")]
        pub fn $name<H, T, S>(handler: H) -> RouteDef<S>
        where
            H: Handler<T, S>,
            T: 'static,
            S: Clone + Send + Sync + 'static,
        {
            route_def(&[$method], handler)
        }
    };
}

method_shortcut!(get, Method::GET);
method_shortcut!(post, Method::POST);
method_shortcut!(put, Method::PUT);
method_shortcut!(patch, Method::PATCH);
method_shortcut!(delete, Method::DELETE);

impl<S> RouteDef<S> {
    /// Endpoint name; defaults to the route rule.
    pub fn endpoint(mut self, name: impl Into<String>) -> Self {
        self.endpoint = Some(name.into());
        self
    }

    /// Doc string: first line is the summary, the rest the description.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.meta = self.meta.doc(doc);
        self
    }

    pub fn response<M: JsonSchema>(mut self, status: u16) -> Self {
        self.meta = self.meta.response::<M>(status);
        self
    }

    pub fn request<M: JsonSchema>(mut self, source: DataSource) -> Self {
        self.meta = self.meta.request::<M>(source);
        self
    }

    pub fn querystring<M: JsonSchema>(mut self) -> Self {
        self.meta = self.meta.querystring::<M>();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.meta = self.meta.hidden();
        self
    }

    /// Replace the metadata wholesale.
    pub fn meta(mut self, meta: RouteMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn route_meta(&self) -> &RouteMeta {
        &self.meta
    }
}

/// `axum::Router` plus the table of documented routes registered on it.
pub struct DocRouter<S = ()> {
    router: Router<S>,
    table: RouteTable,
}

impl<S> DocRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            table: RouteTable::new(),
        }
    }

    /// Register `def` under `rule` (`/items/<int:item_id>` syntax).
    pub fn route(mut self, rule: &str, def: RouteDef<S>) -> Self {
        let path = axum_path(rule);
        let endpoint = def.endpoint.unwrap_or_else(|| rule.to_string());
        tracing::debug!(rule, %path, endpoint = %endpoint, "registering documented route");

        self.router = self.router.route(&path, def.method_router);
        self.table
            .push(Route::new(rule, endpoint, &def.methods, Arc::new(def.meta)));
        self
    }

    /// Merge an undocumented axum router; its routes do not appear in the table.
    pub fn merge(mut self, other: Router<S>) -> Self {
        self.router = self.router.merge(other);
        self
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn into_parts(self) -> (Router<S>, RouteTable) {
        (self.router, self.table)
    }
}

impl<S> Default for DocRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
