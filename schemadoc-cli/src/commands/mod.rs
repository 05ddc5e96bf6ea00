pub mod routes;
pub mod schema;

use schemadoc_openapi::SchemaError;

/// Failure of a CLI command.
#[derive(Debug)]
pub enum CliError {
    Schema(SchemaError),
    Json(serde_json::Error),
    Io(std::io::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Schema(err) => write!(f, "failed to build the OpenAPI document: {err}"),
            CliError::Json(err) => write!(f, "failed to encode the OpenAPI document: {err}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Schema(err) => Some(err),
            CliError::Json(err) => Some(err),
            CliError::Io(err) => Some(err),
        }
    }
}

impl From<SchemaError> for CliError {
    fn from(err: SchemaError) -> Self {
        CliError::Schema(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Json(err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err)
    }
}
