//! Middleware and extractors.

pub mod admin;
pub mod cors;
pub mod error;
