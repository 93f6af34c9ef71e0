//! Domain entities - the core business objects.

mod collection;
mod post;
mod tags;
pub mod timestamp;

pub use collection::BlogCollection;
pub use post::{BlogPost, PostFields, PostInput};
pub use tags::{TagInput, normalize_tags};
