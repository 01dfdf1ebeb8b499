mod product;

pub use product::{ProductDraft, StoredProduct};
