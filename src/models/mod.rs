pub mod entity;
pub mod submission;
