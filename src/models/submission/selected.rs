use serde::{Deserialize, Serialize};

use crate::models::entity::{Defendant, Officer, RelatedEntity, StaffMember, Station};
use super::types::SubmissionDraft;

/// Denormalized copies of the records picked for the current draft.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectedEntities {
    pub requesting_officer: Option<Officer>,
    pub submitting_officer: Option<Officer>,
    pub station: Option<Station>,
    pub botanist: Option<StaffMember>,
    pub finance_officer: Option<StaffMember>,
    pub defendants: Vec<Defendant>,
}

fn agrees<E: RelatedEntity>(cached: &Option<E>, id: Option<i64>) -> bool {
    match cached {
        Some(entity) => Some(entity.id()) == id,
        None => true,
    }
}

fn keep_if_agrees<E: RelatedEntity>(cached: &mut Option<E>, id: Option<i64>) {
    if !agrees(cached, id) {
        *cached = None;
    }
}

impl SelectedEntities {
    /// True when every cached entity matches the id held by the draft.
    /// A missing cache entry is allowed (records loaded without details).
    pub fn consistent_with(&self, draft: &SubmissionDraft) -> bool {
        agrees(&self.requesting_officer, draft.requesting_officer_id)
            && agrees(&self.submitting_officer, draft.submitting_officer_id)
            && agrees(&self.station, draft.station_id)
            && agrees(&self.botanist, draft.approved_botanist_id)
            && agrees(&self.finance_officer, draft.finance_officer_id)
            && self.defendants.iter().all(|d| draft.defendant_ids.contains(&d.id))
    }

    /// Drop cached entries that disagree with the draft's ids.
    pub fn reconcile(&mut self, draft: &SubmissionDraft) {
        keep_if_agrees(&mut self.requesting_officer, draft.requesting_officer_id);
        keep_if_agrees(&mut self.submitting_officer, draft.submitting_officer_id);
        keep_if_agrees(&mut self.station, draft.station_id);
        keep_if_agrees(&mut self.botanist, draft.approved_botanist_id);
        keep_if_agrees(&mut self.finance_officer, draft.finance_officer_id);
        self.defendants.retain(|d| draft.defendant_ids.contains(&d.id));
    }
}
