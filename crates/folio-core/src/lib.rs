//! # Folio Core
//!
//! The domain layer of the Folio blog backend.
//! This crate contains the blog entities, the ports the infrastructure must
//! implement, and the `BlogService` that enforces validation, ordering and
//! write authorization. It performs no I/O of its own.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, StoreError};
pub use service::BlogService;
