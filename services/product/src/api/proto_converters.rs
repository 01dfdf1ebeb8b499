//! Domain <-> Proto conversions

use crate::domain::{ProductDraft, StoredProduct};
use crate::proto;

/// 存储记录 -> 对外消息，ID 编码为小写十六进制
pub fn product_to_proto(product: &StoredProduct) -> proto::Product {
    proto::Product {
        id: product.id().encode(),
        name: product.name.clone(),
        price: product.price,
    }
}

/// 对外消息 -> 待保存字段
///
/// 消息中的 `id` 被忽略：创建时尚无 ID，更新时由调用方单独解码
pub fn product_from_proto(product: proto::Product) -> ProductDraft {
    ProductDraft::new(product.name, product.price)
}
