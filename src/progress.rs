//! Per-tab completion percentages. Pure functions of the draft.

use serde::Serialize;

use crate::models::submission::{ContentType, Determination, DrugBagDraft, Section, SubmissionDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormProgress {
    pub case_details: u8,
    pub officers: u8,
    pub assessment: u8,
}

impl FormProgress {
    pub fn of(draft: &SubmissionDraft) -> Self {
        Self {
            case_details: case_details_progress(draft),
            officers: officers_progress(draft),
            assessment: assessment_progress(draft),
        }
    }

    pub fn for_section(&self, section: Section) -> u8 {
        match section {
            Section::CaseDetails => self.case_details,
            Section::Officers => self.officers,
            Section::Assessment => self.assessment,
        }
    }

    /// A tab only counts as complete at exactly 100.
    pub fn is_complete(&self, section: Section) -> bool {
        self.for_section(section) == 100
    }

    pub fn all_complete(&self) -> bool {
        self.case_details == 100 && self.officers == 100 && self.assessment == 100
    }
}

/// `round(completed / required * 100)`; zero required counts as 0%.
pub fn percentage(completed: usize, required: usize) -> u8 {
    if required == 0 {
        return 0;
    }
    let pct = (completed as f64 / required as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Case number, received date and envelope number all non-blank.
pub fn required_case_fields_filled(draft: &SubmissionDraft) -> bool {
    filled(&draft.case_number) && filled(&draft.received) && filled(&draft.security_movement_envelope)
}

pub fn case_details_progress(draft: &SubmissionDraft) -> u8 {
    let checks = [
        filled(&draft.case_number),
        filled(&draft.received),
        filled(&draft.security_movement_envelope),
    ];
    percentage(checks.iter().filter(|c| **c).count(), checks.len())
}

/// Requesting officer is optional and not counted.
pub fn officers_progress(draft: &SubmissionDraft) -> u8 {
    let checks = [
        draft.submitting_officer_id.is_some(),
        draft.station_id.is_some(),
        draft.approved_botanist_id.is_some(),
        draft.finance_officer_id.is_some(),
    ];
    percentage(checks.iter().filter(|c| **c).count(), checks.len())
}

fn bag_checks(bag: &DrugBagDraft) -> [bool; 4] {
    [
        bag.content_type != ContentType::Unspecified,
        filled(&bag.seal_tag_numbers),
        filled(&bag.new_seal_tag_numbers),
        bag.determination != Determination::Pending,
    ]
}

/// Two fixed slots (assessment date, at least one bag), four per bag, and one
/// for the botanist notes. All slots weigh the same.
pub fn assessment_progress(draft: &SubmissionDraft) -> u8 {
    let mut required = 2;
    let mut completed = 0;

    if filled(&draft.assessment_date) {
        completed += 1;
    }
    if !draft.bags.is_empty() {
        completed += 1;
    }
    for bag in &draft.bags {
        let checks = bag_checks(bag);
        required += checks.len();
        completed += checks.iter().filter(|c| **c).count();
    }

    required += 1;
    if filled(&draft.botanist_notes) {
        completed += 1;
    }

    percentage(completed, required)
}
