//! Roster module: domain types, storage abstraction, and business service.
//!
//! The roster is an ordered, in-memory list of students; nothing is persisted.

pub mod domain;
pub mod repository;
pub mod scoring;
pub mod seed;
pub mod service;
pub mod store;

pub use domain::{DerivedScore, RosterStatistics, StudentInput, StudentRecord};
pub use repository::RosterRepository;
pub use service::RosterService;
pub use store::RosterStore;
