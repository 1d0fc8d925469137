use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::submission::SubmissionRecord;
use super::{lock, FormState};

#[derive(Deserialize)]
pub struct SubmittingBody {
    pub submitting: bool,
}

#[derive(Deserialize)]
pub struct CreateRequestQuery {
    pub is_draft: Option<bool>,
}

/// GET / - current form state with derived progress.
pub async fn snapshot(state: FormState) -> Result<HttpResponse, AppError> {
    let form = lock(&state);
    Ok(HttpResponse::Ok().json(form.snapshot()))
}

/// POST /validate - run both schemas; 422 when the draft is not submittable.
pub async fn validate(state: FormState) -> Result<HttpResponse, AppError> {
    let mut form = lock(&state);
    let valid = form.validate_form();
    let body = serde_json::json!({
        "valid": valid,
        "errors": form.errors(),
        "can_submit": form.can_submit(),
    });
    if valid {
        Ok(HttpResponse::Ok().json(body))
    } else {
        Ok(HttpResponse::UnprocessableEntity().json(body))
    }
}

/// POST /save - explicit "Save Draft".
pub async fn save(state: FormState) -> Result<HttpResponse, AppError> {
    let mut form = lock(&state);
    let saved = form.save_draft();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "saved": saved,
        "form": form.snapshot(),
    })))
}

/// POST /restore - reload the persisted draft, if any.
pub async fn restore(state: FormState) -> Result<HttpResponse, AppError> {
    let mut form = lock(&state);
    if !form.load_draft() {
        return Err(AppError::NotFound);
    }
    Ok(HttpResponse::Ok().json(form.snapshot()))
}

/// POST /load - seed the form from an existing submission record.
pub async fn load(
    state: FormState,
    body: web::Json<SubmissionRecord>,
) -> Result<HttpResponse, AppError> {
    let record = body.into_inner();
    let mut form = lock(&state);
    form.load_from_submission(&record);
    Ok(HttpResponse::Ok().json(form.snapshot()))
}

/// POST /reset - cancel: empty the form and drop the persisted draft.
pub async fn reset(state: FormState) -> Result<HttpResponse, AppError> {
    let mut form = lock(&state);
    form.reset_form();
    Ok(HttpResponse::Ok().json(form.snapshot()))
}

/// PUT /submitting - the UI flags an in-flight create/update call.
pub async fn set_submitting(
    state: FormState,
    body: web::Json<SubmittingBody>,
) -> Result<HttpResponse, AppError> {
    let mut form = lock(&state);
    form.set_submitting(body.submitting);
    Ok(HttpResponse::Ok().json(form.snapshot()))
}

/// POST /submitted - the external create call succeeded.
pub async fn submitted(state: FormState) -> Result<HttpResponse, AppError> {
    let mut form = lock(&state);
    form.mark_submitted();
    Ok(HttpResponse::Ok().json(form.snapshot()))
}

/// GET /certificate - live certificate preview.
pub async fn certificate(state: FormState) -> Result<HttpResponse, AppError> {
    let form = lock(&state);
    Ok(HttpResponse::Ok().json(form.certificate()))
}

/// GET /create-request?is_draft= - payload for the external create API.
pub async fn create_request(
    state: FormState,
    query: web::Query<CreateRequestQuery>,
) -> Result<HttpResponse, AppError> {
    let form = lock(&state);
    let is_draft = query.is_draft.unwrap_or(true);
    Ok(HttpResponse::Ok().json(form.submission_create_request(is_draft)))
}
