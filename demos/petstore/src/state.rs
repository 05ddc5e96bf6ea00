use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{NewPet, Pet};

/// In-memory pet storage shared by all handlers.
#[derive(Clone, Default)]
pub struct PetStore {
    pets: Arc<RwLock<Vec<Pet>>>,
    next_id: Arc<AtomicU64>,
}

impl PetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with a couple of pets.
    pub fn seeded() -> Self {
        let pets = vec![
            Pet {
                id: 1,
                name: "Rex".into(),
                tag: Some("dog".into()),
                owner_info: None,
            },
            Pet {
                id: 2,
                name: "Tom".into(),
                tag: Some("cat".into()),
                owner_info: None,
            },
        ];
        Self {
            next_id: Arc::new(AtomicU64::new(pets.len() as u64)),
            pets: Arc::new(RwLock::new(pets)),
        }
    }

    pub async fn list(&self, tag: Option<&str>, limit: Option<usize>) -> (Vec<Pet>, usize) {
        let pets = self.pets.read().await;
        let matching: Vec<Pet> = pets
            .iter()
            .filter(|pet| tag.is_none() || pet.tag.as_deref() == tag)
            .cloned()
            .collect();
        let total = matching.len();
        let page = matching.into_iter().take(limit.unwrap_or(usize::MAX)).collect();
        (page, total)
    }

    pub async fn get(&self, id: u64) -> Option<Pet> {
        self.pets.read().await.iter().find(|pet| pet.id == id).cloned()
    }

    pub async fn insert(&self, new_pet: NewPet) -> Pet {
        let pet = Pet {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            name: new_pet.name,
            tag: new_pet.tag,
            owner_info: new_pet.owner_info,
        };
        self.pets.write().await.push(pet.clone());
        pet
    }

    pub async fn remove(&self, id: u64) -> Option<Pet> {
        let mut pets = self.pets.write().await;
        let index = pets.iter().position(|pet| pet.id == id)?;
        Some(pets.remove(index))
    }

    pub async fn count(&self) -> usize {
        self.pets.read().await.len()
    }

    /// Number of pets ever registered.
    pub fn generation(&self) -> u64 {
        self.next_id.load(Ordering::SeqCst)
    }
}
