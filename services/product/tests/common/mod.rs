//! 测试用的内存仓储

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use product_service::domain::{
    ProductCursor, ProductDraft, ProductId, ProductRepository, StoredProduct,
};
use product_service::error::{RepositoryError, RepositoryResult};

/// 按插入顺序保存商品的内存仓储，带调用计数和故障注入
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: Mutex<Vec<StoredProduct>>,
    next_id: AtomicU64,
    pub find_calls: AtomicUsize,
    pub insert_calls: AtomicUsize,
    pub replace_calls: AtomicUsize,
    pub scan_calls: AtomicUsize,
    pub cursors_closed: Arc<AtomicUsize>,
    pub items_yielded: Arc<AtomicUsize>,
    fail_writes: bool,
    fail_scan_open: bool,
    fail_scan_after: Option<usize>,
    fail_close: bool,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// insert / replace 一律返回 Unavailable
    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// scan_all 直接失败
    pub fn with_failing_scan_open(mut self) -> Self {
        self.fail_scan_open = true;
        self
    }

    /// 游标产出 `n` 条后返回 Unavailable
    pub fn with_failing_scan_after(mut self, n: usize) -> Self {
        self.fail_scan_after = Some(n);
        self
    }

    /// 关闭游标时返回错误
    pub fn with_failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    /// 直接写入一条记录，不计入调用次数
    pub fn seed(&self, name: &str, price: f64) -> StoredProduct {
        let product = ProductDraft::new(name, price).into_stored(self.allocate_id());
        self.products.lock().unwrap().push(product.clone());
        product
    }

    /// 从存储中删除，模拟其他进程的并发删除
    pub fn remove(&self, id: &ProductId) {
        self.products.lock().unwrap().retain(|p| p.id() != *id);
    }

    pub fn len(&self) -> usize {
        self.products.lock().unwrap().len()
    }

    pub fn gateway_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
            + self.insert_calls.load(Ordering::SeqCst)
            + self.replace_calls.load(Ordering::SeqCst)
            + self.scan_calls.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.cursors_closed.load(Ordering::SeqCst)
    }

    fn allocate_id(&self) -> ProductId {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let mut bytes = [0u8; ProductId::LEN];
        bytes[..4].copy_from_slice(&0x65f1_c0a2u32.to_be_bytes());
        bytes[4..].copy_from_slice(&n.to_be_bytes());
        ProductId::from_bytes(bytes)
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> RepositoryResult<StoredProduct> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id() == *id)
            .cloned()
            .ok_or(RepositoryError::NotFound(*id))
    }

    async fn insert(&self, draft: &ProductDraft) -> RepositoryResult<ProductId> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(RepositoryError::unavailable("write concern timeout"));
        }
        let id = self.allocate_id();
        self.products
            .lock()
            .unwrap()
            .push(draft.clone().into_stored(id));
        Ok(id)
    }

    async fn replace_by_id(&self, id: &ProductId, product: &StoredProduct) -> RepositoryResult<()> {
        self.replace_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(RepositoryError::unavailable("write concern timeout"));
        }
        let mut products = self.products.lock().unwrap();
        let slot = products
            .iter_mut()
            .find(|p| p.id() == *id)
            .ok_or(RepositoryError::NotFound(*id))?;
        *slot = product.clone();
        Ok(())
    }

    async fn scan_all(&self) -> RepositoryResult<Box<dyn ProductCursor>> {
        self.scan_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_scan_open {
            return Err(RepositoryError::unavailable("no reachable servers"));
        }
        Ok(Box::new(InMemoryCursor {
            items: self.products.lock().unwrap().iter().cloned().collect(),
            yielded: 0,
            fail_after: self.fail_scan_after,
            fail_close: self.fail_close,
            yielded_total: self.items_yielded.clone(),
            closed: self.cursors_closed.clone(),
        }))
    }
}

struct InMemoryCursor {
    items: VecDeque<StoredProduct>,
    yielded: usize,
    fail_after: Option<usize>,
    fail_close: bool,
    yielded_total: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

#[async_trait]
impl ProductCursor for InMemoryCursor {
    async fn next(&mut self) -> RepositoryResult<Option<StoredProduct>> {
        if self.fail_after == Some(self.yielded) {
            return Err(RepositoryError::unavailable("cursor killed by server"));
        }
        let next = self.items.pop_front();
        if next.is_some() {
            self.yielded += 1;
            self.yielded_total.fetch_add(1, Ordering::SeqCst);
        }
        Ok(next)
    }

    async fn close(self: Box<Self>) -> RepositoryResult<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            return Err(RepositoryError::unavailable("killCursors failed"));
        }
        Ok(())
    }
}

/// 轮询直到条件成立，最多约 2 秒
pub async fn eventually(condition: impl Fn() -> bool) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
