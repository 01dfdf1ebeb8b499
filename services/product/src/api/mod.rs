//! API layer - gRPC service implementations

mod grpc_service;
pub mod proto_converters;

pub use grpc_service::ProductServiceImpl;
