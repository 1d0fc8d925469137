use std::collections::HashSet;

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::entity::Defendant;
use crate::models::submission::{FormField, Section, ViewMode};
use super::{lock, FormState};

#[derive(Deserialize)]
pub struct FieldUpdate {
    pub field: FormField,
    pub value: String,
}

#[derive(Deserialize)]
pub struct SectionBody {
    pub section: Section,
}

#[derive(Deserialize)]
pub struct ViewBody {
    pub view: ViewMode,
}

fn parse_selection<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| AppError::BadRequest(format!("Invalid selection: {e}")))
}

/// POST /fields - set one scalar field.
pub async fn update_field(
    state: FormState,
    body: web::Json<FieldUpdate>,
) -> Result<HttpResponse, AppError> {
    let FieldUpdate { field, value } = body.into_inner();
    let mut form = lock(&state);
    form.update_field(field, value);
    Ok(HttpResponse::Ok().json(form.snapshot()))
}

/// PUT /selected/{kind} - pick (or clear with `null`) a related record.
pub async fn set_selected(
    state: FormState,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let kind = path.into_inner();
    let value = body.into_inner();
    let mut form = lock(&state);

    match kind.as_str() {
        "requesting_officer" => form.set_selected_requesting_officer(parse_selection(value)?),
        "submitting_officer" => form.set_selected_officer(parse_selection(value)?),
        "station" => form.set_selected_station(parse_selection(value)?),
        "botanist" => form.set_selected_botanist(parse_selection(value)?),
        "finance_officer" => form.set_selected_finance_officer(parse_selection(value)?),
        _ => return Err(AppError::NotFound),
    }

    Ok(HttpResponse::Ok().json(form.snapshot()))
}

/// PUT /defendants - replace the defendant list. Duplicates are refused here.
pub async fn set_defendants(
    state: FormState,
    body: web::Json<Vec<Defendant>>,
) -> Result<HttpResponse, AppError> {
    let defendants = body.into_inner();
    let mut seen = HashSet::new();
    if let Some(dup) = defendants.iter().find(|d| !seen.insert(d.id)) {
        return Err(AppError::BadRequest(format!("Defendant {} is listed more than once", dup.id)));
    }

    let mut form = lock(&state);
    form.set_selected_defendants(defendants);
    Ok(HttpResponse::Ok().json(form.snapshot()))
}

/// PUT /section
pub async fn set_section(
    state: FormState,
    body: web::Json<SectionBody>,
) -> Result<HttpResponse, AppError> {
    let mut form = lock(&state);
    form.set_active_section(body.section);
    Ok(HttpResponse::Ok().json(form.snapshot()))
}

/// PUT /view
pub async fn set_view(
    state: FormState,
    body: web::Json<ViewBody>,
) -> Result<HttpResponse, AppError> {
    let mut form = lock(&state);
    form.set_view(body.view);
    Ok(HttpResponse::Ok().json(form.snapshot()))
}
