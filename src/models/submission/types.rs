use serde::{Deserialize, Serialize};

/// What was found inside a sealed bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    #[default]
    Unspecified,
    Plant,
    PlantMaterial,
    Seeds,
    Stalks,
    Resin,
    Oil,
    Other,
}

impl ContentType {
    pub fn label(self) -> &'static str {
        match self {
            ContentType::Unspecified => "Not specified",
            ContentType::Plant => "Plant",
            ContentType::PlantMaterial => "Plant material",
            ContentType::Seeds => "Seeds",
            ContentType::Stalks => "Stalks",
            ContentType::Resin => "Resin",
            ContentType::Oil => "Oil",
            ContentType::Other => "Other",
        }
    }
}

/// Botanical identification outcome for a bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Determination {
    #[default]
    Pending,
    CannabisSativa,
    CannabisIndica,
    CannabisHybrid,
    NotCannabis,
    Inconclusive,
}

impl Determination {
    pub fn is_cannabis(self) -> bool {
        matches!(
            self,
            Determination::CannabisSativa
                | Determination::CannabisIndica
                | Determination::CannabisHybrid
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Determination::Pending => "Pending",
            Determination::CannabisSativa => "Cannabis sativa",
            Determination::CannabisIndica => "Cannabis indica",
            Determination::CannabisHybrid => "Cannabis (hybrid)",
            Determination::NotCannabis => "Not cannabis",
            Determination::Inconclusive => "Inconclusive",
        }
    }
}

/// One sealed sample unit inside the draft. Weights stay as typed text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DrugBagDraft {
    pub id: Option<i64>,
    pub content_type: ContentType,
    pub seal_tag_numbers: String,
    pub new_seal_tag_numbers: String,
    pub property_reference: Option<String>,
    pub gross_weight: String,
    pub net_weight: String,
    pub determination: Determination,
    pub assessment_date: Option<String>,
}

/// Shallow partial update for a bag; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrugBagPatch {
    pub content_type: Option<ContentType>,
    pub seal_tag_numbers: Option<String>,
    pub new_seal_tag_numbers: Option<String>,
    pub property_reference: Option<String>,
    pub gross_weight: Option<String>,
    pub net_weight: Option<String>,
    pub determination: Option<Determination>,
    pub assessment_date: Option<String>,
}

impl DrugBagPatch {
    /// Field names this patch touches, as used in validation paths.
    pub fn touched_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.content_type.is_some() {
            fields.push("content_type");
        }
        if self.seal_tag_numbers.is_some() {
            fields.push("seal_tag_numbers");
        }
        if self.new_seal_tag_numbers.is_some() {
            fields.push("new_seal_tag_numbers");
        }
        if self.property_reference.is_some() {
            fields.push("property_reference");
        }
        if self.gross_weight.is_some() {
            fields.push("gross_weight");
        }
        if self.net_weight.is_some() {
            fields.push("net_weight");
        }
        if self.determination.is_some() {
            fields.push("determination");
        }
        if self.assessment_date.is_some() {
            fields.push("assessment_date");
        }
        fields
    }

    pub fn apply(self, bag: &mut DrugBagDraft) {
        if let Some(v) = self.content_type {
            bag.content_type = v;
        }
        if let Some(v) = self.seal_tag_numbers {
            bag.seal_tag_numbers = v;
        }
        if let Some(v) = self.new_seal_tag_numbers {
            bag.new_seal_tag_numbers = v;
        }
        // An empty reference clears it.
        if let Some(v) = self.property_reference {
            bag.property_reference = if v.trim().is_empty() { None } else { Some(v) };
        }
        if let Some(v) = self.gross_weight {
            bag.gross_weight = v;
        }
        if let Some(v) = self.net_weight {
            bag.net_weight = v;
        }
        if let Some(v) = self.determination {
            bag.determination = v;
        }
        if let Some(v) = self.assessment_date {
            bag.assessment_date = if v.trim().is_empty() { None } else { Some(v) };
        }
    }
}

/// The in-progress submission form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionDraft {
    pub case_number: String,
    pub received: String,
    pub security_movement_envelope: String,
    pub internal_comment: String,
    pub requesting_officer_id: Option<i64>,
    pub submitting_officer_id: Option<i64>,
    pub station_id: Option<i64>,
    pub approved_botanist_id: Option<i64>,
    pub finance_officer_id: Option<i64>,
    pub defendant_ids: Vec<i64>,
    pub assessment_date: String,
    /// Submission-wide notes from the botanist. Older drafts kept these on
    /// the first bag; they are hoisted on load.
    pub botanist_notes: String,
    pub bags: Vec<DrugBagDraft>,
}

impl SubmissionDraft {
    /// Empty draft with `received` and `assessment_date` set to `today`.
    pub fn empty(today: &str) -> Self {
        Self {
            case_number: String::new(),
            received: today.to_string(),
            security_movement_envelope: String::new(),
            internal_comment: String::new(),
            requesting_officer_id: None,
            submitting_officer_id: None,
            station_id: None,
            approved_botanist_id: None,
            finance_officer_id: None,
            defendant_ids: Vec::new(),
            assessment_date: today.to_string(),
            botanist_notes: String::new(),
            bags: Vec::new(),
        }
    }
}

impl Default for SubmissionDraft {
    fn default() -> Self {
        Self::empty(&today_iso())
    }
}

/// Scalar fields editable through `update_field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    CaseNumber,
    Received,
    SecurityMovementEnvelope,
    InternalComment,
    AssessmentDate,
    BotanistNotes,
}

impl FormField {
    /// Key used for this field in `ValidationErrors`.
    pub fn path(self) -> &'static str {
        match self {
            FormField::CaseNumber => "case_number",
            FormField::Received => "received",
            FormField::SecurityMovementEnvelope => "security_movement_envelope",
            FormField::InternalComment => "internal_comment",
            FormField::AssessmentDate => "assessment_date",
            FormField::BotanistNotes => "botanist_notes",
        }
    }

    pub fn slot(self, draft: &mut SubmissionDraft) -> &mut String {
        match self {
            FormField::CaseNumber => &mut draft.case_number,
            FormField::Received => &mut draft.received,
            FormField::SecurityMovementEnvelope => &mut draft.security_movement_envelope,
            FormField::InternalComment => &mut draft.internal_comment,
            FormField::AssessmentDate => &mut draft.assessment_date,
            FormField::BotanistNotes => &mut draft.botanist_notes,
        }
    }
}

/// Wizard tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    CaseDetails,
    Officers,
    Assessment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Form,
    Certificate,
}

/// Payload for the external create API. Bags travel separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionCreateRequest {
    pub case_number: String,
    pub received: String,
    pub security_movement_envelope: String,
    pub requesting_officer: Option<i64>,
    pub submitting_officer: Option<i64>,
    pub defendants: Vec<i64>,
    pub is_draft: bool,
}

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn today_iso() -> String {
    chrono::Local::now().date_naive().format(ISO_DATE_FORMAT).to_string()
}
