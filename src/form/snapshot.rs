use serde::Serialize;

use crate::models::submission::{SelectedEntities, Section, SubmissionDraft, ViewMode};
use crate::progress::FormProgress;
use crate::validation::ValidationErrors;

use super::store::SubmissionFormStore;

/// Serializable read model of the whole form, as served to the UI.
#[derive(Debug, Clone, Serialize)]
pub struct FormSnapshot {
    pub draft: SubmissionDraft,
    pub selected: SelectedEntities,
    pub active_section: Section,
    pub view: ViewMode,
    pub errors: ValidationErrors,
    pub progress: FormProgress,
    pub can_submit: bool,
    pub is_dirty: bool,
    pub is_submitting: bool,
    pub autosave_pending: bool,
    pub last_saved: Option<String>,
}

impl FormSnapshot {
    pub fn of(store: &SubmissionFormStore) -> Self {
        Self {
            draft: store.draft().clone(),
            selected: store.selected().clone(),
            active_section: store.active_section(),
            view: store.view(),
            errors: store.errors().clone(),
            progress: store.progress(),
            can_submit: store.can_submit(),
            is_dirty: store.is_dirty(),
            is_submitting: store.is_submitting(),
            autosave_pending: store.autosave_pending(),
            last_saved: store.last_saved().map(|t| t.to_rfc3339()),
        }
    }
}
