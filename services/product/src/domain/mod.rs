//! Domain layer

pub mod entities;
pub mod repositories;
pub mod value_objects;

pub use entities::{ProductDraft, StoredProduct};
pub use repositories::{ProductCursor, ProductRepository};
pub use value_objects::{InvalidProductId, ProductId};
