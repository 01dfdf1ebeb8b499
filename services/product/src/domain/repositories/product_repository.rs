//! 商品仓储接口

use async_trait::async_trait;

use crate::domain::entities::{ProductDraft, StoredProduct};
use crate::domain::value_objects::ProductId;
use crate::error::RepositoryResult;

/// 商品集合的持久化网关
///
/// 实现需要支持任意数量的并发调用。除文中列出的 `NotFound` 外，
/// 所有底层故障都以 [`RepositoryError::Unavailable`](crate::error::RepositoryError) 返回。
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 根据 ID 查找，不存在时返回 `NotFound`
    async fn find_by_id(&self, id: &ProductId) -> RepositoryResult<StoredProduct>;

    /// 插入新商品，返回存储层分配的 ID
    async fn insert(&self, draft: &ProductDraft) -> RepositoryResult<ProductId>;

    /// 整体替换文档，文档已不存在时返回 `NotFound`
    async fn replace_by_id(&self, id: &ProductId, product: &StoredProduct) -> RepositoryResult<()>;

    /// 打开全量扫描游标，顺序由存储层决定
    async fn scan_all(&self) -> RepositoryResult<Box<dyn ProductCursor>>;
}

/// 全量扫描游标
///
/// 单次遍历。调用方在遍历结束或中途放弃时都必须调用 [`close`](ProductCursor::close)。
#[async_trait]
pub trait ProductCursor: Send {
    /// 取下一条，`Ok(None)` 表示遍历结束
    async fn next(&mut self) -> RepositoryResult<Option<StoredProduct>>;

    /// 释放服务端游标
    async fn close(self: Box<Self>) -> RepositoryResult<()>;
}
