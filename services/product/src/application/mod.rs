//! Application layer

mod handler;

pub use handler::{ListOutcome, ServiceHandler};
