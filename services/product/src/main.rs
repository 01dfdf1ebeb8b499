//! product-service Service - Product Catalog

use std::sync::Arc;

use catalog_bootstrap::{Infrastructure, build_reflection, run_server};
use catalog_errors::AppError;
use tracing::info;

use product_service::FILE_DESCRIPTOR_SET;
use product_service::api::ProductServiceImpl;
use product_service::application::ServiceHandler;
use product_service::infrastructure::persistence::MongoProductRepository;
use product_service::proto::product_service_server::ProductServiceServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_server("config", |infra: Infrastructure, mut server| async move {
        info!("Initializing product-service...");

        let repo = Arc::new(MongoProductRepository::new(
            &infra.mongo_database(),
            infra.mongo_collection_name(),
        ));
        info!(collection = infra.mongo_collection_name(), "Repository initialized");

        let handler = Arc::new(ServiceHandler::new(repo));
        let service = ProductServiceImpl::new(handler);

        let reflection_service = build_reflection(vec![FILE_DESCRIPTOR_SET])
            .map_err(|e| AppError::internal(format!("Failed to build reflection service: {}", e)))?;

        Ok::<_, AppError>(
            server
                .add_service(ProductServiceServer::new(service))
                .add_service(reflection_service),
        )
    })
    .await
}
