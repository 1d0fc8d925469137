use serde::{Deserialize, Serialize};

use crate::models::entity::{Defendant, Officer, StaffMember, Station};
use super::types::{ContentType, Determination, DrugBagDraft};

/// A submission as returned by the backend, used to seed the form for editing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionRecord {
    pub id: i64,
    pub case_number: String,
    pub received: String,
    pub security_movement_envelope: String,
    pub internal_comment: Option<String>,
    pub requesting_officer: Option<i64>,
    pub requesting_officer_details: Option<Officer>,
    pub submitting_officer: Option<i64>,
    pub submitting_officer_details: Option<Officer>,
    pub station: Option<i64>,
    pub station_details: Option<Station>,
    pub approved_botanist: Option<i64>,
    pub approved_botanist_details: Option<StaffMember>,
    pub finance_officer: Option<i64>,
    pub finance_officer_details: Option<StaffMember>,
    pub defendants: Vec<i64>,
    pub defendants_details: Vec<Defendant>,
    pub bags: Vec<BagRecord>,
    pub is_draft: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BagRecord {
    pub id: Option<i64>,
    pub content_type: ContentType,
    pub seal_tag_numbers: String,
    pub new_seal_tag_numbers: String,
    pub property_reference: Option<String>,
    pub gross_weight: Option<WeightValue>,
    pub net_weight: Option<WeightValue>,
    pub assessment: Option<AssessmentRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentRecord {
    pub determination: Option<Determination>,
    pub assessment_date: Option<String>,
    pub botanist_notes: Option<String>,
}

/// The backend may send weights as JSON numbers or as decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeightValue {
    Number(f64),
    Text(String),
}

impl WeightValue {
    pub fn to_input(&self) -> String {
        match self {
            WeightValue::Number(n) => n.to_string(),
            WeightValue::Text(s) => s.clone(),
        }
    }
}

impl BagRecord {
    pub fn to_draft(&self) -> DrugBagDraft {
        let assessment = self.assessment.as_ref();
        DrugBagDraft {
            id: self.id,
            content_type: self.content_type,
            seal_tag_numbers: self.seal_tag_numbers.clone(),
            new_seal_tag_numbers: self.new_seal_tag_numbers.clone(),
            property_reference: self.property_reference.clone(),
            gross_weight: self.gross_weight.as_ref().map(WeightValue::to_input).unwrap_or_default(),
            net_weight: self.net_weight.as_ref().map(WeightValue::to_input).unwrap_or_default(),
            determination: assessment.and_then(|a| a.determination).unwrap_or_default(),
            assessment_date: assessment.and_then(|a| a.assessment_date.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_accept_numbers_and_strings() {
        let bag: BagRecord = serde_json::from_value(serde_json::json!({
            "id": 4,
            "content_type": "plant",
            "gross_weight": 12.5,
            "net_weight": "10.25",
        }))
        .unwrap();

        let draft = bag.to_draft();
        assert_eq!(draft.gross_weight, "12.5");
        assert_eq!(draft.net_weight, "10.25");
        assert_eq!(draft.determination, Determination::Pending);
    }

    #[test]
    fn nested_assessment_is_flattened() {
        let bag: BagRecord = serde_json::from_value(serde_json::json!({
            "content_type": "seeds",
            "assessment": {
                "determination": "cannabis_indica",
                "assessment_date": "2024-04-02"
            }
        }))
        .unwrap();

        let draft = bag.to_draft();
        assert_eq!(draft.content_type, ContentType::Seeds);
        assert_eq!(draft.determination, Determination::CannabisIndica);
        assert_eq!(draft.assessment_date.as_deref(), Some("2024-04-02"));
    }
}
