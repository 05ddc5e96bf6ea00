//! # schemadoc-cli
//!
//! Command-line helpers an application wires into its own binary:
//!
//! | Command | Description |
//! |---------|-------------|
//! | `schema` | Print the OpenAPI document, or write it to a file |
//! | `routes` | List the documented routes and their metadata |
//!
//! Both commands work on the route table of an application's
//! [`DocRouter`](schemadoc_core::DocRouter), without starting a server.

pub mod commands;

pub use commands::routes::{render_routes, run_routes};
pub use commands::schema::{render_schema, run_schema, SchemaArgs};
pub use commands::CliError;
