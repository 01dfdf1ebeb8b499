mod ids;

pub use ids::{InvalidProductId, ProductId};
