//! A small pet store documented with schemadoc.
//!
//! Routes are declared on a [`DocRouter`] together with their models; the
//! OpenAPI document, Swagger UI and ReDoc pages are added by [`SchemaDoc`].

pub mod handlers;
pub mod models;
pub mod state;

use axum::Router;
use schemadoc_core::{default_trace, delete, get, post, ConfigError, DataSource, DocRouter, SchemaDocConfig};
use schemadoc_openapi::{OpenApiConfig, SchemaDoc};

use crate::handlers::{create_pet, create_pet_from_form, delete_pet, get_pet, health, list_pets};
use crate::models::{ApiError, Health, ListQuery, NewPet, Pet, PetForm, PetList};
pub use crate::state::PetStore;

/// Name used as the document title when the configuration has none.
pub const APP_NAME: &str = "petstore";

/// Every documented route of the store.
pub fn routes() -> DocRouter<PetStore> {
    DocRouter::new()
        .route(
            "/pets",
            get(list_pets)
                .endpoint("list_pets")
                .doc("List pets.\nOptionally filtered by tag and capped by limit.")
                .querystring::<ListQuery>()
                .response::<PetList>(200),
        )
        .route(
            "/pets/new",
            post(create_pet)
                .endpoint("create_pet")
                .doc("Register a pet.")
                .request::<NewPet>(DataSource::Json)
                .response::<Pet>(201),
        )
        .route(
            "/pets/form",
            post(create_pet_from_form)
                .endpoint("create_pet_from_form")
                .doc("Register a pet from an HTML form.")
                .request::<PetForm>(DataSource::Form)
                .response::<Pet>(201),
        )
        .route(
            "/pets/<int:pet_id>",
            get(get_pet)
                .endpoint("get_pet")
                .doc("Fetch one pet.")
                .response::<Pet>(200)
                .response::<ApiError>(404),
        )
        .route(
            "/pets/<int:pet_id>",
            delete(delete_pet)
                .endpoint("delete_pet")
                .doc("Remove a pet.")
                .response::<Pet>(200)
                .response::<ApiError>(404),
        )
        .route(
            "/health",
            get(health)
                .endpoint("health")
                .response::<Health>(200)
                .hidden(),
        )
}

/// Build the documentation extension from `config`.
pub fn schema_doc(config: &SchemaDocConfig) -> Result<SchemaDoc, ConfigError> {
    Ok(SchemaDoc::new(APP_NAME, OpenApiConfig::from_config(config)?))
}

/// The complete application: store routes, documentation routes and tracing.
pub fn app(doc: &SchemaDoc, store: PetStore) -> Router {
    doc.init_app(routes())
        .layer(default_trace())
        .with_state(store)
}
