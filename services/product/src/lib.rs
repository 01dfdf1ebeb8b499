//! product-service - 商品目录 gRPC 服务

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Proto generated code modules
pub mod product {
    pub mod v1 {
        tonic::include_proto!("product.v1");
    }
}

// Re-export for convenience
pub use product::v1 as proto;

/// File descriptor set for gRPC reflection
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("product_descriptor");
