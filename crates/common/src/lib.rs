pub mod observability;
pub mod types;
pub mod utils;
