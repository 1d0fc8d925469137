pub mod autosave;
pub mod scheduler;
pub mod snapshot;
pub mod store;

pub use autosave::{AutoSaveTimer, DEFAULT_AUTOSAVE_INTERVAL};
pub use snapshot::FormSnapshot;
pub use store::SubmissionFormStore;
