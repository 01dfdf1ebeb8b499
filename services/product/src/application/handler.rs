//! Business logic handler

use std::sync::Arc;

use catalog_errors::{AppError, AppResult};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::{ProductCursor, ProductDraft, ProductId, ProductRepository, StoredProduct};
use crate::error::RepositoryError;

/// 商品服务的业务编排
///
/// 只持有仓储句柄，每次调用互不影响，可被任意多个请求并发使用。
/// 失败从不在本地重试。
pub struct ServiceHandler {
    repo: Arc<dyn ProductRepository>,
}

/// 一次 ListProducts 扫描的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOutcome {
    /// 成功推送的条数
    pub sent: u64,
    /// 是否以 `Internal` 错误结束
    pub failed: bool,
}

impl ListOutcome {
    /// metrics 状态标签，取值与一元调用的状态码一致
    pub fn status(&self) -> &'static str {
        if self.failed { "Internal" } else { "Ok" }
    }
}

/// 全量扫描的结束方式
enum ScanOutcome {
    Exhausted(u64),
    Abandoned(u64),
    Failed { sent: u64, error: RepositoryError },
}

impl ServiceHandler {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    /// 创建商品，ID 由存储层分配
    pub async fn create_product(&self, draft: ProductDraft) -> AppResult<StoredProduct> {
        let id = self.repo.insert(&draft).await.map_err(|e| {
            warn!(error = %e, "Failed to insert product");
            AppError::internal(format!("cannot create product: {}", e))
        })?;

        debug!(product_id = %id, "Product created");
        Ok(draft.into_stored(id))
    }

    /// 根据字符串 ID 获取商品
    pub async fn get_product(&self, id: &str) -> AppResult<StoredProduct> {
        let id = decode_id(id)?;
        let product = self.repo.find_by_id(&id).await?;
        Ok(product)
    }

    /// 全量替换 name 和 price
    ///
    /// 先确认文档存在，再以请求中的字段整体替换，ID 保持不变。
    /// 同一 ID 的并发更新以最后一次写入为准。
    pub async fn update_product(&self, id: &str, draft: ProductDraft) -> AppResult<StoredProduct> {
        let id = decode_id(id)?;
        self.repo.find_by_id(&id).await?;

        let replacement = draft.into_stored(id);
        self.repo.replace_by_id(&id, &replacement).await?;

        debug!(product_id = %id, "Product replaced");
        Ok(replacement)
    }

    /// 把集合中的所有商品逐条推送给 `sink`
    ///
    /// 扫描出错时推送一条 `Internal` 错误后结束；`sink` 的接收端被丢弃（调用方断开）
    /// 时立即停止扫描。无论哪种结束方式，游标都恰好关闭一次。
    ///
    /// 调用方中途断开不算失败。
    pub async fn list_products(&self, sink: mpsc::Sender<AppResult<StoredProduct>>) -> ListOutcome {
        let mut cursor = match self.repo.scan_all().await {
            Ok(cursor) => cursor,
            Err(e) => {
                warn!(error = %e, "Failed to open product scan");
                let _ = sink.send(Err(e.into())).await;
                return ListOutcome {
                    sent: 0,
                    failed: true,
                };
            }
        };

        let outcome = drain(cursor.as_mut(), &sink).await;

        if let Err(e) = cursor.close().await {
            warn!(error = %e, "Failed to close product scan cursor");
        }

        match outcome {
            ScanOutcome::Exhausted(sent) => {
                debug!(sent, "Product scan completed");
                ListOutcome {
                    sent,
                    failed: false,
                }
            }
            ScanOutcome::Abandoned(sent) => {
                debug!(sent, "Receiver dropped, product scan abandoned");
                ListOutcome {
                    sent,
                    failed: false,
                }
            }
            ScanOutcome::Failed { sent, error } => {
                warn!(sent, error = %error, "Product scan failed");
                let _ = sink.send(Err(error.into())).await;
                ListOutcome { sent, failed: true }
            }
        }
    }
}

fn decode_id(raw: &str) -> AppResult<ProductId> {
    ProductId::decode(raw)
        .map_err(|e| AppError::validation(format!("cannot parse product id {:?}: {}", raw, e)))
}

async fn drain(
    cursor: &mut dyn ProductCursor,
    sink: &mpsc::Sender<AppResult<StoredProduct>>,
) -> ScanOutcome {
    let mut sent = 0;
    loop {
        let next = tokio::select! {
            next = cursor.next() => next,
            _ = sink.closed() => return ScanOutcome::Abandoned(sent),
        };

        match next {
            Ok(Some(product)) => {
                if sink.send(Ok(product)).await.is_err() {
                    return ScanOutcome::Abandoned(sent);
                }
                sent += 1;
            }
            Ok(None) => return ScanOutcome::Exhausted(sent),
            Err(error) => return ScanOutcome::Failed { sent, error },
        }
    }
}
