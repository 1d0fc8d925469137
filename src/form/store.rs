use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::certificate::{project_certificate, CertificatePreview};
use crate::models::entity::{Defendant, Officer, RelatedEntity, StaffMember, Station};
use crate::models::submission::{
    today_iso, DrugBagDraft, DrugBagPatch, FormField, Section, SelectedEntities,
    SubmissionCreateRequest, SubmissionDraft, SubmissionRecord, ViewMode,
};
use crate::persistence::{DraftPersistence, DraftStorage, PersistedDraft, SelectedOfficers};
use crate::progress::{required_case_fields_filled, FormProgress};
use crate::validation::{validate_submission, ValidationErrors};

use super::autosave::AutoSaveTimer;
use super::snapshot::FormSnapshot;

/// State container behind the submission wizard.
///
/// Owns the draft, the selected-entity cache, tab/view state, validation
/// errors and the auto-save timer. Progress, the certificate preview and
/// `can_submit` are computed from the draft on every call.
pub struct SubmissionFormStore {
    draft: SubmissionDraft,
    selected: SelectedEntities,
    active_section: Section,
    view: ViewMode,
    errors: ValidationErrors,
    is_submitting: bool,
    is_dirty: bool,
    last_saved: Option<DateTime<Utc>>,
    autosave: AutoSaveTimer,
    persistence: DraftPersistence,
    today: fn() -> String,
    disposed: bool,
}

/// Set an id field and its cached entity together.
fn select<E: RelatedEntity>(entity: Option<E>, id: &mut Option<i64>, cached: &mut Option<E>) {
    *id = entity.as_ref().map(|e| e.id());
    *cached = entity;
}

impl SubmissionFormStore {
    pub fn new(storage: Box<dyn DraftStorage>) -> Self {
        Self::with_persistence(DraftPersistence::new(storage))
    }

    pub fn with_persistence(persistence: DraftPersistence) -> Self {
        Self {
            draft: SubmissionDraft::empty(&today_iso()),
            selected: SelectedEntities::default(),
            active_section: Section::default(),
            view: ViewMode::default(),
            errors: ValidationErrors::new(),
            is_submitting: false,
            is_dirty: false,
            last_saved: None,
            autosave: AutoSaveTimer::default(),
            persistence,
            today: today_iso,
            disposed: false,
        }
    }

    pub fn with_autosave_interval(mut self, interval: Duration) -> Self {
        self.autosave.set_interval(interval);
        self
    }

    /// Replace the date source used for "today". A still-empty draft is
    /// re-seeded with the new date; an edited or loaded draft is kept.
    pub fn with_today(mut self, today: fn() -> String) -> Self {
        if self.draft == SubmissionDraft::empty(&(self.today)()) {
            self.draft = SubmissionDraft::empty(&today());
        }
        self.today = today;
        self
    }

    // ── Read access ────────────────────────────────────────────────

    pub fn draft(&self) -> &SubmissionDraft {
        &self.draft
    }

    pub fn selected(&self) -> &SelectedEntities {
        &self.selected
    }

    pub fn active_section(&self) -> Section {
        self.active_section
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    pub fn autosave_deadline(&self) -> Option<Instant> {
        self.autosave.deadline()
    }

    pub fn autosave_pending(&self) -> bool {
        self.autosave.pending()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn progress(&self) -> FormProgress {
        FormProgress::of(&self.draft)
    }

    pub fn certificate(&self) -> CertificatePreview {
        project_certificate(&self.draft, &self.selected)
    }

    /// No validation errors, not mid-submit, and the three required case
    /// fields filled. Tab progress is gated separately by the caller.
    pub fn can_submit(&self) -> bool {
        self.errors.is_empty() && !self.is_submitting && required_case_fields_filled(&self.draft)
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot::of(self)
    }

    // ── Dirty tracking ─────────────────────────────────────────────

    fn mark_dirty(&mut self) {
        self.is_dirty = true;
        if !self.disposed {
            self.autosave.schedule(Instant::now());
        }
    }

    fn mark_clean(&mut self) {
        self.is_dirty = false;
        self.last_saved = Some(Utc::now());
    }

    // ── Field edits ────────────────────────────────────────────────

    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        if field == FormField::Received && self.draft.assessment_date == (self.today)() {
            self.draft.assessment_date = value.clone();
            self.errors.remove(FormField::AssessmentDate.path());
        }
        *field.slot(&mut self.draft) = value;
        self.errors.remove(field.path());
        self.mark_dirty();
    }

    pub fn set_selected_requesting_officer(&mut self, officer: Option<Officer>) {
        select(officer, &mut self.draft.requesting_officer_id, &mut self.selected.requesting_officer);
        self.errors.remove("requesting_officer_id");
        self.mark_dirty();
    }

    /// The submitting officer.
    pub fn set_selected_officer(&mut self, officer: Option<Officer>) {
        select(officer, &mut self.draft.submitting_officer_id, &mut self.selected.submitting_officer);
        self.errors.remove("submitting_officer_id");
        self.mark_dirty();
    }

    pub fn set_selected_station(&mut self, station: Option<Station>) {
        select(station, &mut self.draft.station_id, &mut self.selected.station);
        self.errors.remove("station_id");
        self.mark_dirty();
    }

    pub fn set_selected_botanist(&mut self, botanist: Option<StaffMember>) {
        select(botanist, &mut self.draft.approved_botanist_id, &mut self.selected.botanist);
        self.errors.remove("approved_botanist_id");
        self.mark_dirty();
    }

    pub fn set_selected_finance_officer(&mut self, officer: Option<StaffMember>) {
        select(officer, &mut self.draft.finance_officer_id, &mut self.selected.finance_officer);
        self.errors.remove("finance_officer_id");
        self.mark_dirty();
    }

    /// Replace the whole defendant list; ids follow the list order.
    pub fn set_selected_defendants(&mut self, defendants: Vec<Defendant>) {
        self.draft.defendant_ids = defendants.iter().map(|d| d.id).collect();
        self.selected.defendants = defendants;
        self.errors.remove("defendant_ids");
        self.mark_dirty();
    }

    // ── Bags ───────────────────────────────────────────────────────
    //
    // Out-of-range indices leave the list untouched and return false.

    /// Append an empty bag and return its index.
    pub fn add_drug_bag(&mut self) -> usize {
        self.draft.bags.push(DrugBagDraft::default());
        self.mark_dirty();
        self.draft.bags.len() - 1
    }

    pub fn remove_drug_bag(&mut self, index: usize) -> bool {
        if index >= self.draft.bags.len() {
            return false;
        }
        self.draft.bags.remove(index);
        // Bag error paths are positional.
        self.errors.remove_prefix("bags.");
        self.mark_dirty();
        true
    }

    pub fn update_drug_bag(&mut self, index: usize, patch: DrugBagPatch) -> bool {
        let Some(bag) = self.draft.bags.get_mut(index) else {
            return false;
        };
        for field in patch.touched_fields() {
            self.errors.remove(&format!("bags.{index}.{field}"));
        }
        patch.apply(bag);
        self.mark_dirty();
        true
    }

    pub fn reorder_drug_bags(&mut self, from: usize, to: usize) -> bool {
        let len = self.draft.bags.len();
        if from >= len || to >= len {
            return false;
        }
        if from == to {
            return true;
        }
        let bag = self.draft.bags.remove(from);
        self.draft.bags.insert(to, bag);
        self.errors.remove_prefix("bags.");
        self.mark_dirty();
        true
    }

    // ── UI state ───────────────────────────────────────────────────

    pub fn set_active_section(&mut self, section: Section) {
        self.active_section = section;
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.is_submitting = submitting;
    }

    // ── Validation ─────────────────────────────────────────────────

    /// Replace the error map with a fresh run over the case fields and every
    /// bag. Returns whether the draft is clean.
    pub fn validate_form(&mut self) -> bool {
        self.errors = validate_submission(&self.draft);
        if !self.errors.is_empty() {
            log::debug!("Submission form has {} invalid field(s)", self.errors.len());
        }
        self.errors.is_empty()
    }

    // ── Persistence ────────────────────────────────────────────────

    fn to_persisted(&self) -> PersistedDraft {
        PersistedDraft {
            form_data: self.draft.clone(),
            selected_officers: SelectedOfficers {
                requesting: self.selected.requesting_officer.clone(),
                submitting: self.selected.submitting_officer.clone(),
            },
            selected_station: self.selected.station.clone(),
            selected_botanist: self.selected.botanist.clone(),
            selected_finance_officer: self.selected.finance_officer.clone(),
            selected_defendants: self.selected.defendants.clone(),
            current_view: self.view,
            active_section: self.active_section,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Write the draft now. Cancels any pending auto-save. Failures are
    /// logged by the persistence layer and leave the draft dirty.
    pub fn save_draft(&mut self) -> bool {
        self.autosave.cancel();
        let saved = self.persistence.save(&self.to_persisted());
        if saved {
            self.mark_clean();
        }
        saved
    }

    /// Restore a previously saved draft. Returns false when nothing usable
    /// was stored.
    pub fn load_draft(&mut self) -> bool {
        let Some(persisted) = self.persistence.load() else {
            return false;
        };

        self.draft = persisted.form_data;
        self.selected = SelectedEntities {
            requesting_officer: persisted.selected_officers.requesting,
            submitting_officer: persisted.selected_officers.submitting,
            station: persisted.selected_station,
            botanist: persisted.selected_botanist,
            finance_officer: persisted.selected_finance_officer,
            defendants: persisted.selected_defendants,
        };
        self.selected.reconcile(&self.draft);
        self.view = persisted.current_view;
        self.active_section = persisted.active_section;
        self.errors.clear();
        self.autosave.cancel();
        self.is_dirty = false;
        self.last_saved = DateTime::from_timestamp_millis(persisted.timestamp).filter(|_| persisted.timestamp > 0);

        log::info!("Restored submission draft '{}'", self.draft.case_number);
        true
    }

    pub fn clear_draft(&mut self) {
        self.autosave.cancel();
        self.persistence.clear();
    }

    /// Replace the whole draft and cache with an existing submission. The
    /// result is clean: this is a load, not an edit.
    pub fn load_from_submission(&mut self, record: &SubmissionRecord) {
        let bags: Vec<DrugBagDraft> = record.bags.iter().map(|b| b.to_draft()).collect();

        let assessment_date = bags
            .iter()
            .find_map(|b| b.assessment_date.clone())
            .or_else(|| Some(record.received.clone()).filter(|r| !r.trim().is_empty()))
            .unwrap_or_else(|| (self.today)());
        let botanist_notes = record
            .bags
            .iter()
            .filter_map(|b| b.assessment.as_ref())
            .find_map(|a| a.botanist_notes.clone().filter(|n| !n.trim().is_empty()))
            .unwrap_or_default();

        self.draft = SubmissionDraft {
            case_number: record.case_number.clone(),
            received: record.received.clone(),
            security_movement_envelope: record.security_movement_envelope.clone(),
            internal_comment: record.internal_comment.clone().unwrap_or_default(),
            requesting_officer_id: record.requesting_officer,
            submitting_officer_id: record.submitting_officer,
            station_id: record.station,
            approved_botanist_id: record.approved_botanist,
            finance_officer_id: record.finance_officer,
            defendant_ids: record.defendants.clone(),
            assessment_date,
            botanist_notes,
            bags,
        };
        self.selected = SelectedEntities {
            requesting_officer: record.requesting_officer_details.clone(),
            submitting_officer: record.submitting_officer_details.clone(),
            station: record.station_details.clone(),
            botanist: record.approved_botanist_details.clone(),
            finance_officer: record.finance_officer_details.clone(),
            defendants: record.defendants_details.clone(),
        };
        self.selected.reconcile(&self.draft);

        self.active_section = Section::default();
        self.view = ViewMode::default();
        self.errors.clear();
        self.is_submitting = false;
        self.autosave.cancel();
        self.is_dirty = false;

        log::info!("Loaded submission {} ({}) for editing", record.id, record.case_number);
    }

    /// Back to the empty defaults; the persisted draft is removed too.
    pub fn reset_form(&mut self) {
        self.draft = SubmissionDraft::empty(&(self.today)());
        self.selected = SelectedEntities::default();
        self.active_section = Section::default();
        self.view = ViewMode::default();
        self.errors.clear();
        self.is_submitting = false;
        self.is_dirty = false;
        self.last_saved = None;
        self.clear_draft();
    }

    /// Called once the external create/update call succeeded.
    pub fn mark_submitted(&mut self) {
        log::info!("Submission '{}' accepted, clearing draft", self.draft.case_number);
        self.reset_form();
    }

    pub fn submission_create_request(&self, is_draft: bool) -> SubmissionCreateRequest {
        SubmissionCreateRequest {
            case_number: self.draft.case_number.trim().to_string(),
            received: self.draft.received.trim().to_string(),
            security_movement_envelope: self.draft.security_movement_envelope.trim().to_string(),
            requesting_officer: self.draft.requesting_officer_id,
            submitting_officer: self.draft.submitting_officer_id,
            defendants: self.draft.defendant_ids.clone(),
            is_draft,
        }
    }

    // ── Auto-save ──────────────────────────────────────────────────

    /// Fire the auto-save if its deadline has passed. Returns whether a
    /// save was written.
    pub fn tick_autosave(&mut self, now: Instant) -> bool {
        if self.disposed || !self.autosave.fire_if_due(now) {
            return false;
        }
        log::debug!("Auto-saving submission draft");
        self.save_draft()
    }

    /// Cancel the pending auto-save. Must be called when the session ends.
    pub fn dispose(&mut self) {
        self.autosave.cancel();
        self.disposed = true;
    }
}
