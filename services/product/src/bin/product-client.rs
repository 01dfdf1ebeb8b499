//! 演示客户端：依次调用 Create / Get / Update / List

use anyhow::{Context, Result};
use catalog_telemetry::init_tracing;
use product_service::proto::product_service_client::ProductServiceClient;
use product_service::proto::{
    CreateProductRequest, GetProductRequest, ListProductsRequest, Product, UpdateProductRequest,
};
use tracing::{info, warn};

const DEFAULT_ENDPOINT: &str = "http://localhost:50051";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("info");

    let endpoint =
        std::env::var("PRODUCT_SERVICE_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
    info!(%endpoint, "Connecting to product service");

    let mut client = ProductServiceClient::connect(endpoint.clone())
        .await
        .with_context(|| format!("failed to connect to {}", endpoint))?;

    // Create
    let created = client
        .create_product(CreateProductRequest {
            product: Some(Product {
                id: String::new(),
                name: "Portátil Acer".to_string(),
                price: 2_000_000.0,
            }),
        })
        .await
        .context("failed to create product")?
        .into_inner()
        .product
        .context("create response carried no product")?;
    info!(?created, "Product created");

    // Get
    let fetched = client
        .get_product(GetProductRequest {
            id: created.id.clone(),
        })
        .await
        .context("failed to get product")?
        .into_inner();
    info!(product = ?fetched.product, "Product fetched");

    // Update
    match client
        .update_product(UpdateProductRequest {
            product: Some(Product {
                id: created.id.clone(),
                name: "New computer: HP".to_string(),
                price: 1_500_000.0,
            }),
        })
        .await
    {
        Ok(response) => info!(product = ?response.into_inner().product, "Product updated"),
        Err(status) => warn!(code = ?status.code(), message = status.message(), "Update failed"),
    }

    // List
    let mut stream = client
        .list_products(ListProductsRequest {})
        .await
        .context("failed to list products")?
        .into_inner();

    let mut count = 0;
    while let Some(item) = stream.message().await.context("failed to receive product")? {
        count += 1;
        info!(product = ?item.product, "Product listed");
    }
    info!(count, "List finished");

    Ok(())
}
