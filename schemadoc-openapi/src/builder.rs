use schemadoc_core::{
    ConfigError, ConfigValue, FromConfigValue, ModelType, Route, RouteTable, SchemaDocConfig,
    SerializationConfig,
};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::rc::Rc;

use crate::document::{
    Components, Info, MediaType, OpenApiDocument, Parameter, PathItem, Paths, RequestBody,
    ResponseObject, Server, SharedPathItem, Tag, OPENAPI_VERSION,
};
use crate::error::SchemaError;
use crate::schema::{generate, split_definitions, REF_PREFIX};

const SWAGGER_JS_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/swagger-ui/3.47.1/swagger-ui-bundle.js";
const SWAGGER_CSS_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/swagger-ui/3.47.1/swagger-ui.min.css";
const REDOC_JS_URL: &str = "https://cdn.jsdelivr.net/npm/redoc@next/bundles/redoc.standalone.js";

/// Script and stylesheet URLs loaded by the documentation UIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiAssets {
    pub swagger_js_url: String,
    pub swagger_css_url: String,
    pub redoc_js_url: String,
}

impl Default for UiAssets {
    fn default() -> Self {
        Self {
            swagger_js_url: SWAGGER_JS_URL.to_string(),
            swagger_css_url: SWAGGER_CSS_URL.to_string(),
            redoc_js_url: REDOC_JS_URL.to_string(),
        }
    }
}

/// Configuration for the generated document and the documentation routes.
///
/// Setting `openapi_path` to `None` disables every documentation route,
/// the UIs included.
#[derive(Debug, Clone)]
pub struct OpenApiConfig {
    /// Document title; [`SchemaDoc`](crate::SchemaDoc) falls back to the app name.
    pub title: Option<String>,
    pub version: String,
    pub tags: Vec<Tag>,
    pub servers: Vec<Server>,
    pub openapi_path: Option<String>,
    pub swagger_ui_path: Option<String>,
    pub redoc_ui_path: Option<String>,
    pub assets: UiAssets,
    pub serialization: SerializationConfig,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            title: None,
            version: "0.1.0".to_string(),
            tags: Vec::new(),
            servers: Vec::new(),
            openapi_path: Some("/openapi.json".to_string()),
            swagger_ui_path: Some("/docs".to_string()),
            redoc_ui_path: Some("/redocs".to_string()),
            assets: UiAssets::default(),
            serialization: SerializationConfig::default(),
        }
    }
}

impl OpenApiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_server(mut self, server: Server) -> Self {
        self.servers.push(server);
        self
    }

    pub fn with_openapi_path(mut self, path: Option<&str>) -> Self {
        self.openapi_path = path.map(str::to_string);
        self
    }

    pub fn with_swagger_ui_path(mut self, path: Option<&str>) -> Self {
        self.swagger_ui_path = path.map(str::to_string);
        self
    }

    pub fn with_redoc_ui_path(mut self, path: Option<&str>) -> Self {
        self.redoc_ui_path = path.map(str::to_string);
        self
    }

    pub fn with_assets(mut self, assets: UiAssets) -> Self {
        self.assets = assets;
        self
    }

    pub fn with_convert_casing(mut self, enabled: bool) -> Self {
        self.serialization = self.serialization.with_convert_casing(enabled);
        self
    }

    /// Read the `schemadoc.*` keys of `config` over the defaults.
    ///
    /// A path key set to `null` disables that route.
    pub fn from_config(config: &SchemaDocConfig) -> Result<Self, ConfigError> {
        let mut out = Self::default();

        if let Some(title) = config.get_opt::<String>("schemadoc.title")? {
            out.title = Some(title);
        }
        if let Some(version) = config.get_opt::<String>("schemadoc.version")? {
            out.version = version;
        }
        if let Some(path) = config.get_opt::<Option<String>>("schemadoc.openapi-path")? {
            out.openapi_path = path;
        }
        if let Some(path) = config.get_opt::<Option<String>>("schemadoc.swagger-ui-path")? {
            out.swagger_ui_path = path;
        }
        if let Some(path) = config.get_opt::<Option<String>>("schemadoc.redoc-ui-path")? {
            out.redoc_ui_path = path;
        }
        if let Some(enabled) = config.get_opt::<bool>("schemadoc.convert-casing")? {
            out.serialization = out.serialization.with_convert_casing(enabled);
        }
        if let Some(tags) = config.get_opt::<Vec<Tag>>("schemadoc.tags")? {
            out.tags = tags;
        }
        if let Some(servers) = config.get_opt::<Vec<Server>>("schemadoc.servers")? {
            out.servers = servers;
        }
        if let Some(url) = config.get_opt::<String>("schemadoc.swagger.js.url")? {
            out.assets.swagger_js_url = url;
        }
        if let Some(url) = config.get_opt::<String>("schemadoc.swagger.css.url")? {
            out.assets.swagger_css_url = url;
        }
        if let Some(url) = config.get_opt::<String>("schemadoc.redoc.js.url")? {
            out.assets.redoc_js_url = url;
        }

        Ok(out)
    }
}

fn required_field(value: &ConfigValue, key: &str, field: &str) -> Result<String, ConfigError> {
    let field_key = format!("{key}.{field}");
    match value.field(field) {
        Some(v) => String::from_config_value(v, &field_key),
        None => Err(ConfigError::NotFound(field_key)),
    }
}

fn optional_field(value: &ConfigValue, key: &str, field: &str) -> Result<Option<String>, ConfigError> {
    match value.field(field) {
        Some(v) => Option::<String>::from_config_value(v, &format!("{key}.{field}")),
        None => Ok(None),
    }
}

/// A tag is either a bare name or a `{ name, description }` mapping.
impl FromConfigValue for Tag {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        match value {
            ConfigValue::String(name) => Ok(Tag::new(name.clone())),
            ConfigValue::Map(_) => Ok(Tag {
                name: required_field(value, key, "name")?,
                description: optional_field(value, key, "description")?,
            }),
            _ => Err(ConfigError::TypeMismatch {
                key: key.to_string(),
                expected: "tag",
            }),
        }
    }
}

/// A server is either a bare URL or a `{ url, description }` mapping.
impl FromConfigValue for Server {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        match value {
            ConfigValue::String(url) => Ok(Server::new(url.clone())),
            ConfigValue::Map(_) => Ok(Server {
                url: required_field(value, key, "url")?,
                description: optional_field(value, key, "description")?,
            }),
            _ => Err(ConfigError::TypeMismatch {
                key: key.to_string(),
                expected: "server",
            }),
        }
    }
}

/// Generate, split and merge: the fragment goes back to the caller, its
/// definitions into `schemas`. Later definitions overwrite earlier ones.
fn fragment_for(
    model: &ModelType,
    serialization: &SerializationConfig,
    schemas: &mut Map<String, Value>,
) -> Result<Value, SchemaError> {
    let (definitions, fragment) = split_definitions(generate(model, REF_PREFIX, serialization)?);
    for (name, definition) in definitions {
        schemas.insert(name, definition);
    }
    Ok(fragment)
}

fn path_item(
    route: &Route,
    serialization: &SerializationConfig,
    schemas: &mut Map<String, Value>,
) -> Result<PathItem, SchemaError> {
    let meta = route.meta();
    let mut item = PathItem::default();

    if let Some((summary, description)) = meta.summary_and_description() {
        item.summary = Some(summary);
        item.description = Some(description);
    }

    for (status, model) in &meta.responses {
        let schema = fragment_for(model, serialization, schemas)?;
        let description = model.description().unwrap_or_default();
        item.responses.insert(
            status.clone(),
            ResponseObject {
                content: MediaType::content("application/json", schema),
                description,
            },
        );
    }

    if let Some(request) = &meta.request {
        let schema = fragment_for(&request.model, serialization, schemas)?;
        item.request_body = Some(RequestBody {
            content: MediaType::content(request.source.media_type(), schema),
        });
    }

    if let Some(model) = &meta.querystring {
        let schema = fragment_for(model, serialization, schemas)?;
        match schema.get("properties").and_then(Value::as_object) {
            Some(properties) => item.parameters.extend(
                properties
                    .iter()
                    .map(|(name, property)| Parameter::query(name.clone(), property.clone())),
            ),
            None => tracing::warn!(
                rule = route.rule(),
                model = %model.name(),
                "query-string model has no properties; no query parameters documented"
            ),
        }
    }

    item.parameters
        .extend(route.path_params().into_iter().map(Parameter::path));

    Ok(item)
}

/// Assemble the document for every non-hidden route of `routes`.
///
/// Each route gets one Path Item, shared by all of its documented verbs.
pub fn build_document(
    config: &OpenApiConfig,
    routes: &RouteTable,
) -> Result<OpenApiDocument, SchemaError> {
    let mut schemas = Map::new();
    let mut paths = Paths::new();

    for route in routes {
        if route.meta().is_hidden() {
            tracing::debug!(rule = route.rule(), "skipping hidden route");
            continue;
        }

        let item: SharedPathItem = Rc::new(RefCell::new(path_item(
            route,
            &config.serialization,
            &mut schemas,
        )?));

        let verbs = paths.entry(route.openapi_path()).or_default();
        for method in route.documented_methods() {
            verbs.insert(method.as_str().to_lowercase(), Rc::clone(&item));
        }
        tracing::debug!(rule = route.rule(), endpoint = route.endpoint(), "documented route");
    }

    Ok(OpenApiDocument {
        openapi: OPENAPI_VERSION.to_string(),
        info: Info {
            title: config.title.clone().unwrap_or_default(),
            version: config.version.clone(),
        },
        components: Components { schemas },
        paths,
        tags: config.tags.clone(),
        servers: config.servers.clone(),
    })
}
