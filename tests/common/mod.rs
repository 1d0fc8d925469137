//! Shared fixtures for form-store tests.
//!
//! - `memory_store()` - store over an in-memory key/value map, "today" fixed
//! - `complete_store()` - a draft with every tab at 100%
//! - sample officer/station/staff/defendant records

#![allow(dead_code)]

use botanica::errors::AppError;
use botanica::form::SubmissionFormStore;
use botanica::models::entity::{Defendant, Officer, StaffMember, Station};
use botanica::models::submission::{ContentType, Determination, DrugBagPatch, FormField};
use botanica::persistence::{DraftStorage, MemoryDraftStorage};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const TODAY: &str = "2024-01-01";

pub fn fixed_today() -> String {
    TODAY.to_string()
}

// ============================================================================
// STORES
// ============================================================================

/// Store over a fresh in-memory map. The map handle is returned so tests can
/// inspect what was persisted or build a second store over the same map.
pub fn memory_store() -> (MemoryDraftStorage, SubmissionFormStore) {
    let storage = MemoryDraftStorage::new();
    let store = store_over(&storage);
    (storage, store)
}

pub fn store_over(storage: &MemoryDraftStorage) -> SubmissionFormStore {
    SubmissionFormStore::new(Box::new(storage.clone())).with_today(fixed_today)
}

/// Storage whose every call fails.
pub struct BrokenStorage;

impl DraftStorage for BrokenStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, AppError> {
        Err(AppError::Io(std::io::Error::other("disk unplugged")))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), AppError> {
        Err(AppError::Io(std::io::Error::other("disk unplugged")))
    }

    fn remove(&self, _key: &str) -> Result<(), AppError> {
        Err(AppError::Io(std::io::Error::other("disk unplugged")))
    }
}

// ============================================================================
// RECORDS
// ============================================================================

pub fn officer(id: i64, first: &str, last: &str) -> Officer {
    Officer {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        rank: "Constable".to_string(),
        service_number: format!("SN{id:04}"),
        station_id: Some(1),
    }
}

pub fn station(id: i64, name: &str) -> Station {
    Station {
        id,
        name: name.to_string(),
        address: "1 Harbour Road".to_string(),
        phone: String::new(),
    }
}

pub fn staff(id: i64, first: &str, last: &str, position: &str) -> StaffMember {
    StaffMember {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@lab.test", first.to_lowercase()),
        position: position.to_string(),
    }
}

pub fn defendant(id: i64, first: &str, last: &str) -> Defendant {
    Defendant {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        date_of_birth: None,
    }
}

pub fn complete_bag_patch(tag: &str, determination: Determination) -> DrugBagPatch {
    DrugBagPatch {
        content_type: Some(ContentType::PlantMaterial),
        seal_tag_numbers: Some(format!("{tag}-O")),
        new_seal_tag_numbers: Some(format!("{tag}-R")),
        gross_weight: Some("12.5".to_string()),
        net_weight: Some("10.0".to_string()),
        determination: Some(determination),
        ..DrugBagPatch::default()
    }
}

/// Fill every tab to 100% on an existing store.
pub fn fill_complete(store: &mut SubmissionFormStore) {
    store.update_field(FormField::CaseNumber, "BOT-2024-001");
    store.update_field(FormField::SecurityMovementEnvelope, "SME-778");
    store.set_selected_officer(Some(officer(11, "Mele", "Fifita")));
    store.set_selected_station(Some(station(3, "Central")));
    store.set_selected_botanist(Some(staff(21, "Iris", "Moana", "Approved Botanist")));
    store.set_selected_finance_officer(Some(staff(22, "Tevita", "Lui", "Finance Officer")));
    store.set_selected_defendants(vec![defendant(31, "John", "Doe")]);
    let index = store.add_drug_bag();
    store.update_drug_bag(index, complete_bag_patch("T1", Determination::CannabisSativa));
    store.update_field(FormField::BotanistNotes, "Cystolithic trichomes present");
}

pub fn complete_store() -> (MemoryDraftStorage, SubmissionFormStore) {
    let (storage, mut store) = memory_store();
    fill_complete(&mut store);
    (storage, store)
}
