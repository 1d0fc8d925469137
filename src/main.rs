use std::sync::Mutex;

use actix_web::{App, HttpServer, middleware, web};

use botanica::config::AppConfig;
use botanica::form::{scheduler, SubmissionFormStore};
use botanica::handlers;
use botanica::persistence::FileDraftStorage;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // A missing .env is fine; the environment may already be set.
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();
    std::fs::create_dir_all(&config.data_dir)?;

    let storage = FileDraftStorage::new(&config.data_dir);
    let mut store = SubmissionFormStore::new(Box::new(storage))
        .with_autosave_interval(config.autosave_interval);
    if store.load_draft() {
        log::info!("Recovered submission draft from {}", config.data_dir.display());
    } else {
        log::info!("No saved submission draft, starting empty");
    }

    let state = web::Data::new(Mutex::new(store));
    scheduler::spawn_autosave_ticker(state.clone(), config.autosave_tick);

    log::info!(
        "Starting server at http://{} (auto-save every {}s)",
        config.bind_addr,
        config.autosave_interval.as_secs()
    );

    let app_state = state.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(app_state.clone())
            .service(
                web::scope("/api/submission-form")
                    .configure(handlers::submission_form::configure),
            )
            .default_service(web::to(|| async {
                actix_web::HttpResponse::NotFound()
                    .json(serde_json::json!({ "error": "Not found" }))
            }))
    })
    .bind(&config.bind_addr)?
    .run()
    .await?;

    // Flush unsaved edits before the timer goes away.
    let mut form = state.lock().unwrap_or_else(|e| e.into_inner());
    if form.is_dirty() {
        form.save_draft();
    }
    form.dispose();
    log::info!("Submission form session disposed");
    Ok(())
}
