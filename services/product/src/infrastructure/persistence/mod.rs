//! Persistence implementations

mod documents;
mod mongo;

pub use mongo::MongoProductRepository;
