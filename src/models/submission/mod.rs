pub mod record;
pub mod selected;
pub mod types;

pub use record::*;
pub use selected::*;
pub use types::*;
