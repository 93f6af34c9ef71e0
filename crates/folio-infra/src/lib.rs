//! # Folio Infrastructure
//!
//! Concrete implementations of the ports defined in `folio-core`:
//! the JSON-file blog store used in production, an in-memory store for tests
//! and ephemeral runs, and the system clock.

pub mod clock;
pub mod store;

pub use clock::SystemClock;
pub use store::{InMemoryBlogStore, JsonFileBlogStore};
