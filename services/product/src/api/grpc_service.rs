//! gRPC service implementation

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use catalog_bootstrap::{record_grpc_request, record_grpc_stream_items};
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status};
use tracing::debug;

use crate::application::ServiceHandler;
use crate::proto::product_service_server::ProductService;
use crate::proto::*;

use super::proto_converters::{product_from_proto, product_to_proto};

const SERVICE_NAME: &str = "product.v1.ProductService";

/// ListProducts 在发送端与传输层之间缓冲的最大条数
const LIST_BUFFER: usize = 16;

pub struct ProductServiceImpl {
    handler: Arc<ServiceHandler>,
}

impl ProductServiceImpl {
    pub fn new(handler: Arc<ServiceHandler>) -> Self {
        Self { handler }
    }
}

#[tonic::async_trait]
impl ProductService for ProductServiceImpl {
    async fn create_product(
        &self,
        request: Request<CreateProductRequest>,
    ) -> Result<Response<CreateProductResponse>, Status> {
        observed("CreateProduct", async move {
            let product = require_product(request.into_inner().product)?;

            let created = self
                .handler
                .create_product(product_from_proto(product))
                .await?;

            Ok::<_, Status>(CreateProductResponse {
                product: Some(product_to_proto(&created)),
            })
        })
        .await
    }

    async fn get_product(
        &self,
        request: Request<GetProductRequest>,
    ) -> Result<Response<GetProductResponse>, Status> {
        observed("GetProduct", async move {
            let req = request.into_inner();
            let product = self.handler.get_product(&req.id).await?;

            Ok::<_, Status>(GetProductResponse {
                product: Some(product_to_proto(&product)),
            })
        })
        .await
    }

    async fn update_product(
        &self,
        request: Request<UpdateProductRequest>,
    ) -> Result<Response<UpdateProductResponse>, Status> {
        observed("UpdateProduct", async move {
            let product = require_product(request.into_inner().product)?;
            let id = product.id.clone();

            let updated = self
                .handler
                .update_product(&id, product_from_proto(product))
                .await?;

            Ok::<_, Status>(UpdateProductResponse {
                product: Some(product_to_proto(&updated)),
            })
        })
        .await
    }

    type ListProductsStream =
        Pin<Box<dyn futures::Stream<Item = Result<ListProductsResponse, Status>> + Send>>;

    async fn list_products(
        &self,
        _request: Request<ListProductsRequest>,
    ) -> Result<Response<Self::ListProductsStream>, Status> {
        let (tx, rx) = mpsc::channel(LIST_BUFFER);
        let handler = self.handler.clone();

        // 扫描在独立任务中进行；调用方断开时 rx 被丢弃，任务随之结束并关闭游标
        tokio::spawn(async move {
            let started = Instant::now();
            let outcome = handler.list_products(tx).await;
            record_grpc_stream_items(SERVICE_NAME, "ListProducts", outcome.sent);
            record_grpc_request(
                SERVICE_NAME,
                "ListProducts",
                outcome.status(),
                started.elapsed().as_secs_f64() * 1000.0,
            );
        });

        let stream = ReceiverStream::new(rx).map(|item| {
            item.map(|product| ListProductsResponse {
                product: Some(product_to_proto(&product)),
            })
            .map_err(Status::from)
        });

        Ok(Response::new(Box::pin(stream)))
    }
}

#[allow(clippy::result_large_err)]
fn require_product(product: Option<Product>) -> Result<Product, Status> {
    product.ok_or_else(|| Status::invalid_argument("request is missing the product field"))
}

/// 执行一次一元调用并记录 metrics
async fn observed<T>(
    method: &'static str,
    call: impl Future<Output = Result<T, Status>>,
) -> Result<Response<T>, Status> {
    let started = Instant::now();
    let result = call.await;

    let status = match &result {
        Ok(_) => "Ok".to_string(),
        Err(status) => {
            debug!(method, code = ?status.code(), message = status.message(), "Request failed");
            format!("{:?}", status.code())
        }
    };
    record_grpc_request(
        SERVICE_NAME,
        method,
        &status,
        started.elapsed().as_secs_f64() * 1000.0,
    );

    result.map(Response::new)
}
