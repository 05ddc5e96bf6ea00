use indexmap::IndexMap;
use schemars::{JsonSchema, Schema, SchemaGenerator};
use std::borrow::Cow;

/// Type-erased handle on a validation model.
///
/// Holds the model's schema name and a function that produces its root
/// schema from a configured [`SchemaGenerator`]. The model's fields are never
/// inspected directly.
#[derive(Clone, Copy)]
pub struct ModelType {
    name: fn() -> Cow<'static, str>,
    root_schema: fn(SchemaGenerator) -> Schema,
}

impl ModelType {
    pub fn of<M: JsonSchema>() -> Self {
        Self {
            name: M::schema_name,
            root_schema: root_schema_for::<M>,
        }
    }

    pub fn name(&self) -> Cow<'static, str> {
        (self.name)()
    }

    /// Run `generator` for this model and return the root schema, including
    /// the definitions of every referenced sub-schema.
    pub fn root_schema(&self, generator: SchemaGenerator) -> Schema {
        (self.root_schema)(generator)
    }

    /// The model's declared description: its doc comment, or the
    /// `#[schemars(description = "...")]` override when one is given.
    ///
    /// Read from the root schema, so it survives whatever shape the
    /// documented fragment takes.
    pub fn description(&self) -> Option<String> {
        self.root_schema(SchemaGenerator::default())
            .get("description")
            .and_then(|description| description.as_str())
            .map(str::to_owned)
    }
}

fn root_schema_for<M: JsonSchema>(generator: SchemaGenerator) -> Schema {
    generator.into_root_schema_for::<M>()
}

impl std::fmt::Debug for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ModelType").field(&self.name()).finish()
    }
}

/// Where a request body is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Json,
    Form,
}

impl DataSource {
    /// Media type used for the request body in the OpenAPI document.
    pub fn media_type(&self) -> &'static str {
        match self {
            DataSource::Json => "application/json",
            DataSource::Form => "application/x-www-form-urlencoded",
        }
    }
}

/// Request body model and the source it is read from.
#[derive(Debug, Clone, Copy)]
pub struct RequestSpec {
    pub model: ModelType,
    pub source: DataSource,
}

/// Documentation metadata attached to a route handler at registration time.
///
/// Every field has an absence default: not hidden, no doc string, no
/// response models, no request body, no query-string model.
#[derive(Debug, Clone, Default)]
pub struct RouteMeta {
    pub hidden: bool,
    pub doc: Option<String>,
    /// Response models keyed by status code, in declaration order.
    pub responses: IndexMap<String, ModelType>,
    pub request: Option<RequestSpec>,
    pub querystring: Option<ModelType>,
}

impl RouteMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Declare the response model for `status`. Declaring the same status
    /// again replaces the model but keeps its original position.
    pub fn response<M: JsonSchema>(self, status: u16) -> Self {
        self.response_model(status.to_string(), ModelType::of::<M>())
    }

    pub fn response_model(mut self, status: impl Into<String>, model: ModelType) -> Self {
        self.responses.insert(status.into(), model);
        self
    }

    pub fn request<M: JsonSchema>(mut self, source: DataSource) -> Self {
        self.request = Some(RequestSpec {
            model: ModelType::of::<M>(),
            source,
        });
        self
    }

    pub fn querystring<M: JsonSchema>(mut self) -> Self {
        self.querystring = Some(ModelType::of::<M>());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Split the doc string into `(summary, description)`.
    ///
    /// The first line is the summary, the remaining lines joined by `\n`
    /// are the description (empty for a one-line doc). `None` when there is
    /// no doc string or it is empty.
    pub fn summary_and_description(&self) -> Option<(String, String)> {
        let doc = self.doc.as_deref()?;
        let mut lines = doc.lines();
        let summary = lines.next()?;
        let description = lines.collect::<Vec<_>>().join("\n");
        Some((summary.to_string(), description))
    }
}

/// Mark a route as hidden from the generated document.
pub fn hide_route(meta: RouteMeta) -> RouteMeta {
    meta.hidden()
}
