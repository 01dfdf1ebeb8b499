//! MongoDB 文档结构

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::{ProductDraft, ProductId, StoredProduct};

/// `products` 集合中的文档：`{_id: ObjectId, name: string, price: double}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub price: f64,
}

impl ProductDocument {
    /// 待插入的文档，`_id` 交给驱动生成
    pub fn from_draft(draft: &ProductDraft) -> Self {
        Self {
            id: None,
            name: draft.name.clone(),
            price: draft.price,
        }
    }

    pub fn from_stored(product: &StoredProduct) -> Self {
        Self {
            id: Some(to_object_id(&product.id())),
            name: product.name.clone(),
            price: product.price,
        }
    }

    /// 从集合读出的文档一定带 `_id`
    pub fn into_stored(self) -> Option<StoredProduct> {
        let id = self.id?;
        Some(StoredProduct::new(from_object_id(&id), self.name, self.price))
    }
}

pub fn to_object_id(id: &ProductId) -> ObjectId {
    ObjectId::from_bytes(id.bytes())
}

pub fn from_object_id(oid: &ObjectId) -> ProductId {
    ProductId::from_bytes(oid.bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};

    #[test]
    fn test_object_id_conversion_preserves_hex() {
        let oid = ObjectId::parse_str("65f1c0a2b3d4e5f60718293a").unwrap();
        let id = from_object_id(&oid);
        assert_eq!(id.encode(), oid.to_hex());
        assert_eq!(to_object_id(&id), oid);
    }

    #[test]
    fn test_draft_document_omits_id() {
        let document = ProductDocument::from_draft(&ProductDraft::new("Portátil Acer", 2_000_000.0));
        let raw = bson::to_document(&document).unwrap();
        assert!(!raw.contains_key("_id"));
        assert_eq!(raw.get_str("name").unwrap(), "Portátil Acer");
        assert_eq!(raw.get_f64("price").unwrap(), 2_000_000.0);
    }

    #[test]
    fn test_stored_document_round_trips_through_bson() {
        let oid = ObjectId::new();
        let raw = doc! { "_id": oid, "name": "New computer: HP", "price": 1_500_000.0 };

        let document: ProductDocument = bson::from_document(raw).unwrap();
        let stored = document.into_stored().unwrap();
        assert_eq!(stored.id(), from_object_id(&oid));
        assert_eq!(stored.name, "New computer: HP");
        assert_eq!(stored.price, 1_500_000.0);
    }
}
