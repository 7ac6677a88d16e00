//! Domain logic for the InnovateHub award portal.
//!
//! This crate is free of I/O: it holds the error taxonomy, the role model,
//! the award schedule window, the project lifecycle rules, the evaluation
//! admission checks, and winner ranking. The `db` and `api` crates build on
//! these primitives.

pub mod error;
pub mod evaluation;
pub mod project;
pub mod ranking;
pub mod roles;
pub mod schedule;
pub mod score;
pub mod types;
pub mod users;
