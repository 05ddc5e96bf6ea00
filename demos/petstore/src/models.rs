use schemadoc_core::impl_record;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Contact details of a pet's owner.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct OwnerInfo {
    pub display_name: String,
    pub phone_number: Option<String>,
}

/// A pet in the store.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct Pet {
    pub id: u64,
    pub name: String,
    pub tag: Option<String>,
    pub owner_info: Option<OwnerInfo>,
}

/// Fields accepted when registering a pet.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct NewPet {
    pub name: String,
    pub tag: Option<String>,
    pub owner_info: Option<OwnerInfo>,
}

/// Form submission for a pet; owners are not accepted here.
#[derive(Clone, Debug, Deserialize, JsonSchema)]
pub struct PetForm {
    pub name: String,
    pub tag: Option<String>,
}

/// A page of pets.
#[derive(Clone, Debug, Serialize, JsonSchema)]
pub struct PetList {
    pub pets: Vec<Pet>,
    pub total_count: usize,
}

/// Error payload.
#[derive(Clone, Debug, Serialize, JsonSchema)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, JsonSchema)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub tag: Option<String>,
}

/// Liveness report.
#[derive(Clone, Debug, Serialize, JsonSchema)]
pub struct Health {
    pub status: &'static str,
    pub pet_count: usize,
    /// Internal counter, left out of the reply.
    #[schemars(skip)]
    pub store_generation: u64,
}

impl_record!(Health { status, pet_count });
