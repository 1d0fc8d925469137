//! Two schemas: the case fields and each bag. Errors are keyed by dotted field
//! path (`case_number`, `bags.2.content_type`) and never returned as `Err`.

pub mod rules;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::submission::{ContentType, DrugBagDraft, SubmissionDraft};
use rules::{parse_weight, validate_iso_date, validate_optional, validate_required, validate_weight};

const CASE_NUMBER_MAX: usize = 50;
const ENVELOPE_MAX: usize = 50;
const COMMENT_MAX: usize = 2000;
const NOTES_MAX: usize = 5000;
const TAG_MAX: usize = 100;
const REFERENCE_MAX: usize = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.entry(path.into()).or_default().push(message.into());
    }

    fn add_opt(&mut self, path: impl Into<String>, message: Option<String>) {
        if let Some(msg) = message {
            self.add(path, msg);
        }
    }

    pub fn remove(&mut self, path: &str) -> Option<Vec<String>> {
        self.0.remove(path)
    }

    /// Drop every error whose path starts with `prefix`.
    pub fn remove_prefix(&mut self, prefix: &str) {
        self.0.retain(|path, _| !path.starts_with(prefix));
    }

    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.0.get(path).map(Vec::as_slice)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        for (path, messages) in other.0 {
            self.0.entry(path).or_default().extend(messages);
        }
    }
}

/// Case-identifying fields and the officer/defendant references.
pub fn validate_case(draft: &SubmissionDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    errors.add_opt("case_number", validate_required(&draft.case_number, "Case number", CASE_NUMBER_MAX));
    errors.add_opt("received", validate_iso_date(&draft.received, "Received date"));
    errors.add_opt(
        "security_movement_envelope",
        validate_required(&draft.security_movement_envelope, "Security movement envelope", ENVELOPE_MAX),
    );
    errors.add_opt("internal_comment", validate_optional(&draft.internal_comment, "Internal comment", COMMENT_MAX));
    errors.add_opt("botanist_notes", validate_optional(&draft.botanist_notes, "Botanist notes", NOTES_MAX));

    if !draft.assessment_date.trim().is_empty() {
        errors.add_opt("assessment_date", validate_iso_date(&draft.assessment_date, "Assessment date"));
    }

    if draft.submitting_officer_id.is_none() {
        errors.add("submitting_officer_id", "Submitting officer is required");
    }
    match draft.station_id {
        None => errors.add("station_id", "Station is required"),
        Some(id) if id <= 0 => errors.add("station_id", "Station reference is invalid"),
        Some(_) => {}
    }
    for (path, id) in [
        ("requesting_officer_id", draft.requesting_officer_id),
        ("submitting_officer_id", draft.submitting_officer_id),
    ] {
        if matches!(id, Some(i) if i <= 0) {
            errors.add(path, "Officer reference is invalid");
        }
    }

    if draft.defendant_ids.iter().any(|id| *id <= 0) {
        errors.add("defendant_ids", "Defendant reference is invalid");
    }
    let mut seen = std::collections::HashSet::new();
    if !draft.defendant_ids.iter().all(|id| seen.insert(*id)) {
        errors.add("defendant_ids", "The same defendant is listed more than once");
    }

    errors
}

/// One bag, with paths prefixed `bags.<index>.`.
pub fn validate_bag(index: usize, bag: &DrugBagDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    let path = |field: &str| format!("bags.{index}.{field}");

    if bag.content_type == ContentType::Unspecified {
        errors.add(path("content_type"), "Content type is required");
    }
    errors.add_opt(
        path("seal_tag_numbers"),
        validate_required(&bag.seal_tag_numbers, "Original tag numbers", TAG_MAX),
    );
    errors.add_opt(
        path("new_seal_tag_numbers"),
        validate_required(&bag.new_seal_tag_numbers, "Resealed tag numbers", TAG_MAX),
    );
    if let Some(reference) = &bag.property_reference {
        errors.add_opt(path("property_reference"), validate_optional(reference, "Property reference", REFERENCE_MAX));
    }
    errors.add_opt(path("gross_weight"), validate_weight(&bag.gross_weight, "Gross weight"));
    errors.add_opt(path("net_weight"), validate_weight(&bag.net_weight, "Net weight"));

    if let (Some(gross), Some(net)) = (parse_weight(&bag.gross_weight), parse_weight(&bag.net_weight)) {
        if net > gross {
            errors.add(path("net_weight"), "Net weight cannot exceed gross weight");
        }
    }
    if let Some(date) = &bag.assessment_date {
        errors.add_opt(path("assessment_date"), validate_iso_date(date, "Assessment date"));
    }

    errors
}

/// Full draft: case errors and every bag's errors, always both.
pub fn validate_submission(draft: &SubmissionDraft) -> ValidationErrors {
    let mut errors = validate_case(draft);
    for (index, bag) in draft.bags.iter().enumerate() {
        errors.extend(validate_bag(index, bag));
    }
    errors
}
