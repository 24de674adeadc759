//! Service layer for the student score roster.
//! - Owns the in-memory roster and its business rules.
//! - Exposes framework-independent operations and a typed error enum.

pub mod errors;
pub mod roster;
