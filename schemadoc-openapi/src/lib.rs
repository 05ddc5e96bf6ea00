//! OpenAPI 3.0 documentation for schemadoc routers.
//!
//! [`build_document`] walks a [`RouteTable`](schemadoc_core::RouteTable),
//! turns every declared model into a schema fragment and collects shared
//! sub-schemas under `components.schemas`. [`SchemaDoc`] serves the result
//! as JSON next to Swagger UI and ReDoc pages.

mod builder;
mod document;
mod error;
mod ext;
mod handlers;
pub mod schema;
mod templates;

pub use builder::{build_document, OpenApiConfig, UiAssets};
pub use document::{
    Components, Info, MediaType, OpenApiDocument, ParamLocation, Parameter, PathItem, Paths,
    RequestBody, ResponseObject, Server, SharedPathItem, Tag, OPENAPI_VERSION,
};
pub use error::SchemaError;
pub use ext::SchemaDoc;
pub use schema::REF_PREFIX;
