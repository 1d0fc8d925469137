//! Draft persistence: a single JSON blob under one well-known key.
//!
//! Every failure here is soft. Callers get `false`/`None` and a log line, the
//! in-memory draft stays authoritative.

pub mod storage;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::entity::{Defendant, Officer, StaffMember, Station};
use crate::models::submission::{Section, SubmissionDraft, ViewMode};

pub use storage::{DraftStorage, FileDraftStorage, MemoryDraftStorage};

pub const DRAFT_KEY: &str = "submission_form_draft";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectedOfficers {
    pub requesting: Option<Officer>,
    pub submitting: Option<Officer>,
}

/// Shape of the persisted blob. Top-level keys are camelCase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedDraft {
    pub form_data: SubmissionDraft,
    pub selected_officers: SelectedOfficers,
    pub selected_station: Option<Station>,
    pub selected_botanist: Option<StaffMember>,
    pub selected_finance_officer: Option<StaffMember>,
    pub selected_defendants: Vec<Defendant>,
    pub current_view: ViewMode,
    pub active_section: Section,
    /// Milliseconds since the Unix epoch at save time.
    pub timestamp: i64,
}

pub struct DraftPersistence {
    storage: Box<dyn DraftStorage>,
    key: String,
}

impl DraftPersistence {
    pub fn new(storage: Box<dyn DraftStorage>) -> Self {
        Self::with_key(storage, DRAFT_KEY)
    }

    pub fn with_key(storage: Box<dyn DraftStorage>, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
        }
    }

    /// Serialize and write the draft. Returns whether the write went through.
    pub fn save(&self, draft: &PersistedDraft) -> bool {
        let json = match serde_json::to_string(draft) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Draft persistence: failed to serialize draft: {e}");
                return false;
            }
        };
        match self.storage.set(&self.key, &json) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Draft persistence: failed to write '{}': {e}", self.key);
                false
            }
        }
    }

    /// Read back a draft, tolerating partial or stale shapes.
    pub fn load(&self) -> Option<PersistedDraft> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Draft persistence: failed to read '{}': {e}", self.key);
                return None;
            }
        };
        decode_persisted(&raw)
    }

    pub fn clear(&self) -> bool {
        match self.storage.remove(&self.key) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Draft persistence: failed to remove '{}': {e}", self.key);
                false
            }
        }
    }
}

/// Parse a stored blob. It must be a JSON object; each known key is merged onto
/// the defaults on its own, and keys that do not fit are dropped.
pub fn decode_persisted(raw: &str) -> Option<PersistedDraft> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("Draft persistence: stored draft is not valid JSON: {e}");
            return None;
        }
    };
    let Value::Object(fields) = value else {
        log::warn!("Draft persistence: stored draft is not an object, ignoring");
        return None;
    };

    let mut restored = PersistedDraft::default();
    for (key, value) in fields {
        match key.as_str() {
            "formData" => restored.form_data = merge_form_data(value),
            "selectedOfficers" => take(&key, value, &mut restored.selected_officers),
            "selectedStation" => take(&key, value, &mut restored.selected_station),
            "selectedBotanist" => take(&key, value, &mut restored.selected_botanist),
            "selectedFinanceOfficer" => take(&key, value, &mut restored.selected_finance_officer),
            "selectedDefendants" => take(&key, value, &mut restored.selected_defendants),
            "currentView" => take(&key, value, &mut restored.current_view),
            "activeSection" => take(&key, value, &mut restored.active_section),
            "timestamp" => take(&key, value, &mut restored.timestamp),
            _ => log::debug!("Draft persistence: ignoring unknown key '{key}'"),
        }
    }
    Some(restored)
}

fn take<T: DeserializeOwned>(key: &str, value: Value, slot: &mut T) {
    match serde_json::from_value(value) {
        Ok(v) => *slot = v,
        Err(e) => log::debug!("Draft persistence: dropping '{key}': {e}"),
    }
}

fn merge_form_data(value: Value) -> SubmissionDraft {
    let defaults = SubmissionDraft::default();
    let Value::Object(mut incoming) = value else {
        return defaults;
    };
    hoist_legacy_notes(&mut incoming);

    let Ok(Value::Object(mut merged)) = serde_json::to_value(&defaults) else {
        return defaults;
    };
    for (key, value) in incoming {
        if !merged.contains_key(&key) {
            continue;
        }
        let previous = merged.insert(key.clone(), value);
        if serde_json::from_value::<SubmissionDraft>(Value::Object(merged.clone())).is_err() {
            log::debug!("Draft persistence: dropping formData.{key}");
            if let Some(previous) = previous {
                merged.insert(key, previous);
            }
        }
    }
    serde_json::from_value(Value::Object(merged)).unwrap_or(defaults)
}

/// Older drafts stored the shared notes on `bags[0].botanist_notes`. A
/// top-level value only wins when it is a non-empty string.
fn hoist_legacy_notes(form: &mut Map<String, Value>) {
    let has_notes = form
        .get("botanist_notes")
        .and_then(Value::as_str)
        .is_some_and(|notes| !notes.trim().is_empty());
    if has_notes {
        return;
    }
    let legacy = form
        .get("bags")
        .and_then(|bags| bags.get(0))
        .and_then(|bag| bag.get("botanist_notes"))
        .and_then(Value::as_str)
        .map(str::to_string);
    if let Some(notes) = legacy {
        form.insert("botanist_notes".to_string(), Value::String(notes));
    }
}
