use std::sync::Mutex;
use std::time::{Duration, Instant};

use actix_web::web;

use super::store::SubmissionFormStore;

/// Drive the form's auto-save timer from a background interval. The store
/// decides whether its deadline has passed; this loop only asks.
pub fn spawn_autosave_ticker(store: web::Data<Mutex<SubmissionFormStore>>, every: Duration) {
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let mut form = store.lock().unwrap_or_else(|e| e.into_inner());
            if form.is_disposed() {
                log::info!("Auto-save ticker stopping: form session disposed");
                break;
            }
            if form.tick_autosave(Instant::now()) {
                log::debug!("Auto-save wrote submission draft");
            }
        }
    });
}
