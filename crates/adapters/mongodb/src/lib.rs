//! catalog-adapter-mongodb - MongoDB 适配器

mod config;
mod connection;

pub use config::*;
pub use connection::*;
