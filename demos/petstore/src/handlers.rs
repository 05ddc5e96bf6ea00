use axum::extract::{Path, Query, State};
use axum::{Form, Json};
use http::header::LOCATION;
use http::{HeaderMap, HeaderValue, StatusCode};
use schemadoc_core::{Payload, Reply};

use crate::models::{ApiError, Health, ListQuery, NewPet, PetForm, PetList};
use crate::state::PetStore;

fn not_found(pet_id: u64) -> Reply {
    tracing::debug!(pet_id, "pet not found");
    (
        Payload::model(ApiError::new(format!("pet {pet_id} not found"))),
        StatusCode::NOT_FOUND,
    )
        .into()
}

fn created(pet: crate::models::Pet) -> Reply {
    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/pets/{}", pet.id)) {
        headers.insert(LOCATION, location);
    }
    tracing::info!(pet_id = pet.id, name = %pet.name, "pet registered");
    (Payload::model(pet), StatusCode::CREATED, headers).into()
}

pub async fn list_pets(State(store): State<PetStore>, Query(query): Query<ListQuery>) -> Reply {
    let (pets, total_count) = store.list(query.tag.as_deref(), query.limit).await;
    Payload::model(PetList { pets, total_count }).into()
}

pub async fn get_pet(State(store): State<PetStore>, Path(pet_id): Path<u64>) -> Reply {
    match store.get(pet_id).await {
        Some(pet) => Payload::model(pet).into(),
        None => not_found(pet_id),
    }
}

pub async fn create_pet(State(store): State<PetStore>, Json(new_pet): Json<NewPet>) -> Reply {
    created(store.insert(new_pet).await)
}

pub async fn create_pet_from_form(State(store): State<PetStore>, Form(form): Form<PetForm>) -> Reply {
    let new_pet = NewPet {
        name: form.name,
        tag: form.tag,
        owner_info: None,
    };
    created(store.insert(new_pet).await)
}

pub async fn delete_pet(State(store): State<PetStore>, Path(pet_id): Path<u64>) -> Reply {
    match store.remove(pet_id).await {
        Some(pet) => Payload::model(pet).into(),
        None => not_found(pet_id),
    }
}

pub async fn health(State(store): State<PetStore>) -> Reply {
    Payload::record(Health {
        status: "ok",
        pet_count: store.count().await,
        store_generation: store.generation(),
    })
    .into()
}
