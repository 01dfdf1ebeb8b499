//! 商品实体

use crate::domain::value_objects::ProductId;

/// 已持久化的商品
///
/// `id` 由存储层在插入时分配，之后不再变化；`name` 和 `price` 可被整体替换。
/// 价格不做任何校验，零或负数都原样保存。
#[derive(Debug, Clone, PartialEq)]
pub struct StoredProduct {
    id: ProductId,
    pub name: String,
    pub price: f64,
}

impl StoredProduct {
    pub fn new(id: ProductId, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }
}

/// 尚未分配 ID 的商品字段
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// 以给定 ID 生成完整记录（全量替换，不与旧记录合并）
    pub fn into_stored(self, id: ProductId) -> StoredProduct {
        StoredProduct::new(id, self.name, self.price)
    }
}
