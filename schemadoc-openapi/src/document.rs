use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::rc::Rc;

use crate::error::SchemaError;

/// OpenAPI version emitted in every document.
pub const OPENAPI_VERSION: &str = "3.0.3";

/// A Path Item shared by every verb registered for the same route.
pub type SharedPathItem = Rc<RefCell<PathItem>>;

/// `paths[path][verb]`, both levels in registration order.
pub type Paths = IndexMap<String, IndexMap<String, SharedPathItem>>;

/// The generated OpenAPI document.
#[derive(Debug, Clone, Serialize)]
pub struct OpenApiDocument {
    pub openapi: String,
    pub info: Info,
    pub components: Components,
    pub paths: Paths,
    pub tags: Vec<Tag>,
    pub servers: Vec<Server>,
}

impl OpenApiDocument {
    pub fn to_value(&self) -> Result<Value, SchemaError> {
        Ok(serde_json::to_value(self)?)
    }

    /// The Path Item registered for `verb` (lowercase) under `path`.
    pub fn operation(&self, path: &str, verb: &str) -> Option<&SharedPathItem> {
        self.paths.get(path)?.get(verb)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Info {
    pub title: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Components {
    pub schemas: Map<String, Value>,
}

/// Documentation of one route, shared across its verbs.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathItem {
    pub parameters: Vec<Parameter>,
    pub responses: IndexMap<String, ResponseObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Query,
    Path,
}

#[derive(Debug, Clone, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParamLocation,
    /// Absent for path parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

impl Parameter {
    pub fn query(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            location: ParamLocation::Query,
            schema: Some(schema),
        }
    }

    pub fn path(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: ParamLocation::Path,
            schema: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseObject {
    pub content: IndexMap<String, MediaType>,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestBody {
    pub content: IndexMap<String, MediaType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MediaType {
    pub schema: Value,
}

impl MediaType {
    /// A single-entry content map: `{ media_type: { schema } }`.
    pub fn content(media_type: &str, schema: Value) -> IndexMap<String, MediaType> {
        IndexMap::from([(media_type.to_string(), MediaType { schema })])
    }
}

/// OpenAPI tag object, copied verbatim from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// OpenAPI server object, copied verbatim from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

impl Server {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
