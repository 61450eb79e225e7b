pub mod constants;
pub mod types;
pub mod errors;
pub mod program_ids;

pub use constants::*;
pub use types::*;
pub use program_ids::*;
