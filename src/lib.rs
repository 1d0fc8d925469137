pub mod certificate;
pub mod config;
pub mod errors;
pub mod form;
pub mod handlers;
pub mod models;
pub mod persistence;
pub mod progress;
pub mod validation;
