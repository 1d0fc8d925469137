pub mod bags;
pub mod fields;
pub mod lifecycle;

use std::sync::{Mutex, MutexGuard};

use actix_web::{
    web, Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

use crate::form::SubmissionFormStore;

/// Shared form session as registered in `App::app_data`.
pub type FormState = web::Data<Mutex<SubmissionFormStore>>;

pub(crate) fn lock(state: &FormState) -> MutexGuard<'_, SubmissionFormStore> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

/// Reject mutation requests that are not `application/json`. Browsers cannot
/// send cross-origin JSON with cookies through a plain form POST.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == actix_web::http::Method::POST
        || method == actix_web::http::Method::PUT
        || method == actix_web::http::Method::PATCH
        || method == actix_web::http::Method::DELETE
    {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let body = serde_json::json!({
                "error": "Content-Type must be application/json for mutation requests"
            });
            let response = HttpResponse::BadRequest().json(body);
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Routes for the submission form, mounted under `/api/submission-form`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::get().to(lifecycle::snapshot))
            .route("/fields", web::post().to(fields::update_field))
            .route("/selected/{kind}", web::put().to(fields::set_selected))
            .route("/defendants", web::put().to(fields::set_defendants))
            .route("/section", web::put().to(fields::set_section))
            .route("/view", web::put().to(fields::set_view))
            // /bags/reorder BEFORE /bags/{index}
            .route("/bags", web::post().to(bags::add))
            .route("/bags/reorder", web::post().to(bags::reorder))
            .route("/bags/{index}", web::patch().to(bags::update))
            .route("/bags/{index}", web::delete().to(bags::remove))
            .route("/validate", web::post().to(lifecycle::validate))
            .route("/save", web::post().to(lifecycle::save))
            .route("/restore", web::post().to(lifecycle::restore))
            .route("/load", web::post().to(lifecycle::load))
            .route("/reset", web::post().to(lifecycle::reset))
            .route("/submitting", web::put().to(lifecycle::set_submitting))
            .route("/submitted", web::post().to(lifecycle::submitted))
            .route("/certificate", web::get().to(lifecycle::certificate))
            .route("/create-request", web::get().to(lifecycle::create_request)),
    );
}
