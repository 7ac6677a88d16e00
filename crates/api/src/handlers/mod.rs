//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers parse and authorize, delegate domain rules to
//! `innovatehub_core`, persistence to `innovatehub_db`, and map errors via
//! [`crate::error::AppError`].

pub mod auth;
pub mod award;
pub mod evaluation;
pub mod health;
pub mod project;
pub mod user;
