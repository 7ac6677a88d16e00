//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. The evaluation repository
//! additionally owns the transactional admission pipeline.

pub mod award_repo;
pub mod evaluation_repo;
pub mod project_repo;
pub mod user_repo;

pub use award_repo::AwardRepo;
pub use evaluation_repo::{AdmissionError, AdmissionOutcome, EvaluationRepo};
pub use project_repo::ProjectRepo;
pub use user_repo::UserRepo;
