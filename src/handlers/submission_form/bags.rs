use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::submission::DrugBagPatch;
use super::{lock, FormState};

#[derive(Deserialize)]
pub struct ReorderBody {
    pub from: usize,
    pub to: usize,
}

/// POST /bags - append an empty bag.
pub async fn add(state: FormState) -> Result<HttpResponse, AppError> {
    let mut form = lock(&state);
    let index = form.add_drug_bag();
    Ok(HttpResponse::Created().json(serde_json::json!({
        "index": index,
        "form": form.snapshot(),
    })))
}

/// PATCH /bags/{index} - shallow merge into one bag.
pub async fn update(
    state: FormState,
    path: web::Path<usize>,
    body: web::Json<DrugBagPatch>,
) -> Result<HttpResponse, AppError> {
    let index = path.into_inner();
    let mut form = lock(&state);
    if !form.update_drug_bag(index, body.into_inner()) {
        return Err(AppError::NotFound);
    }
    Ok(HttpResponse::Ok().json(form.snapshot()))
}

/// DELETE /bags/{index}
pub async fn remove(
    state: FormState,
    path: web::Path<usize>,
) -> Result<HttpResponse, AppError> {
    let index = path.into_inner();
    let mut form = lock(&state);
    if !form.remove_drug_bag(index) {
        return Err(AppError::NotFound);
    }
    Ok(HttpResponse::Ok().json(form.snapshot()))
}

/// POST /bags/reorder - move one bag to a new position.
pub async fn reorder(
    state: FormState,
    body: web::Json<ReorderBody>,
) -> Result<HttpResponse, AppError> {
    let ReorderBody { from, to } = body.into_inner();
    let mut form = lock(&state);
    if !form.reorder_drug_bags(from, to) {
        return Err(AppError::NotFound);
    }
    Ok(HttpResponse::Ok().json(form.snapshot()))
}
