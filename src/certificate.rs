//! Read-only certificate preview built from the draft and the selected-entity
//! cache. Recomputed on every call; invoice and certificate renderers call it
//! repeatedly while the user types.

use serde::Serialize;

use crate::models::entity::RelatedEntity;
use crate::models::submission::{DrugBagDraft, SelectedEntities, SubmissionDraft};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificatePreview {
    pub case_number: String,
    pub received: String,
    pub assessment_date: String,
    pub security_movement_envelope: String,
    pub requesting_officer: Option<String>,
    pub submitting_officer: Option<String>,
    pub submitting_officer_service_number: Option<String>,
    pub station: Option<String>,
    pub station_address: Option<String>,
    pub botanist: Option<String>,
    pub botanist_position: Option<String>,
    pub defendants: Vec<String>,
    pub bags: Vec<CertificateBagLine>,
    pub botanist_notes: String,
    pub cannabis_present: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificateBagLine {
    pub label: String,
    pub content_type: String,
    pub seal_tag_numbers: String,
    pub new_seal_tag_numbers: String,
    pub property_reference: Option<String>,
    pub gross_weight: String,
    pub net_weight: String,
    pub determination: String,
    pub is_cannabis: bool,
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn bag_line(index: usize, bag: &DrugBagDraft) -> CertificateBagLine {
    CertificateBagLine {
        label: format!("Bag #{}", index + 1),
        content_type: bag.content_type.label().to_string(),
        seal_tag_numbers: bag.seal_tag_numbers.trim().to_string(),
        new_seal_tag_numbers: bag.new_seal_tag_numbers.trim().to_string(),
        property_reference: bag.property_reference.as_deref().and_then(non_blank),
        gross_weight: bag.gross_weight.trim().to_string(),
        net_weight: bag.net_weight.trim().to_string(),
        determination: bag.determination.label().to_string(),
        is_cannabis: bag.determination.is_cannabis(),
    }
}

pub fn project_certificate(draft: &SubmissionDraft, selected: &SelectedEntities) -> CertificatePreview {
    let submitting = selected.submitting_officer.as_ref();
    let station = selected.station.as_ref();
    let botanist = selected.botanist.as_ref();

    CertificatePreview {
        case_number: draft.case_number.trim().to_string(),
        received: draft.received.clone(),
        assessment_date: draft.assessment_date.clone(),
        security_movement_envelope: draft.security_movement_envelope.trim().to_string(),
        requesting_officer: selected.requesting_officer.as_ref().map(|o| o.display_name()),
        submitting_officer: submitting.map(|o| o.display_name()),
        submitting_officer_service_number: submitting.and_then(|o| non_blank(&o.service_number)),
        station: station.map(|s| s.display_name()),
        station_address: station.and_then(|s| non_blank(&s.address)),
        botanist: botanist.map(|b| b.display_name()),
        botanist_position: botanist.and_then(|b| non_blank(&b.position)),
        defendants: selected.defendants.iter().map(|d| d.display_name()).collect(),
        bags: draft.bags.iter().enumerate().map(|(i, bag)| bag_line(i, bag)).collect(),
        botanist_notes: draft.botanist_notes.trim().to_string(),
        cannabis_present: draft.bags.iter().any(|bag| bag.determination.is_cannabis()),
    }
}
