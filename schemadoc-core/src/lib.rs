//! Core building blocks for schemadoc.
//!
//! This crate owns everything the OpenAPI assembler reads or relies on:
//!
//! - [`casing`]: snake_case / camelCase key conversion over JSON values
//! - [`coerce`] and [`reply`]: turning handler results into plain JSON
//! - [`meta`] and [`route`]: explicit per-route metadata and the route table
//! - [`router`]: an axum `Router` wrapper that records route metadata
//! - [`serialization`]: the casing mode and its request/response middleware
//! - [`config`]: YAML + environment configuration loading

pub mod casing;
pub mod coerce;
pub mod config;
pub mod error;
pub mod layers;
pub mod meta;
pub mod reply;
pub mod route;
pub mod router;
pub mod serialization;

pub use coerce::{coerce, CoerceError, Payload, Record};
pub use config::{ConfigError, ConfigValue, FromConfigValue, SchemaDocConfig};
pub use error::HttpError;
pub use layers::{default_trace, init_tracing};
pub use meta::{hide_route, DataSource, ModelType, RequestSpec, RouteMeta};
pub use reply::{Reply, StatusOrHeaders};
pub use route::{Route, RouteTable};
pub use router::{delete, get, patch, post, put, route_def, DocRouter, RouteDef};
pub use serialization::{casing_middleware, CasedBody, SerializationConfig};

pub use schemars;
