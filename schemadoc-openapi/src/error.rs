/// Failure while generating a schema fragment or assembling the document.
#[derive(Debug)]
pub enum SchemaError {
    /// A schema or the document could not be converted to JSON.
    Serialize(serde_json::Error),
    /// The generator produced something other than a JSON object for a model.
    NotAnObject(String),
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::Serialize(err) => write!(f, "schema serialization failed: {err}"),
            SchemaError::NotAnObject(model) => {
                write!(f, "schema for model '{model}' is not a JSON object")
            }
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SchemaError::Serialize(err) => Some(err),
            SchemaError::NotAnObject(_) => None,
        }
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Serialize(err)
    }
}
