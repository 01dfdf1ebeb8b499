//! MongoDB repository implementation

use std::time::Instant;

use async_trait::async_trait;
use catalog_bootstrap::record_db_query;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Collection, Cursor, Database};

use crate::domain::{ProductCursor, ProductDraft, ProductId, ProductRepository, StoredProduct};
use crate::error::{RepositoryError, RepositoryResult};

use super::documents::{ProductDocument, from_object_id, to_object_id};

pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(database: &Database, collection: &str) -> Self {
        Self {
            collection: database.collection(collection),
        }
    }

    fn observe<T>(&self, operation: &str, started: Instant, result: &RepositoryResult<T>) {
        record_db_query(
            operation,
            self.collection.name(),
            started.elapsed().as_secs_f64() * 1000.0,
            result.is_ok(),
        );
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> RepositoryResult<StoredProduct> {
        let started = Instant::now();
        let result = async {
            let document = self
                .collection
                .find_one(doc! { "_id": to_object_id(id) })
                .await?
                .ok_or(RepositoryError::NotFound(*id))?;

            document
                .into_stored()
                .ok_or_else(|| RepositoryError::unavailable("stored product has no _id"))
        }
        .await;

        self.observe("find_one", started, &result);
        result
    }

    async fn insert(&self, draft: &ProductDraft) -> RepositoryResult<ProductId> {
        let started = Instant::now();
        let result = async {
            let inserted = self
                .collection
                .insert_one(ProductDocument::from_draft(draft))
                .await?;

            inserted
                .inserted_id
                .as_object_id()
                .map(|oid| from_object_id(&oid))
                .ok_or_else(|| {
                    RepositoryError::unavailable(format!(
                        "inserted id is not an ObjectId: {}",
                        inserted.inserted_id
                    ))
                })
        }
        .await;

        self.observe("insert_one", started, &result);
        result
    }

    async fn replace_by_id(&self, id: &ProductId, product: &StoredProduct) -> RepositoryResult<()> {
        let started = Instant::now();
        let result = async {
            let outcome = self
                .collection
                .replace_one(
                    doc! { "_id": to_object_id(id) },
                    ProductDocument::from_stored(product),
                )
                .await?;

            if outcome.matched_count == 0 {
                return Err(RepositoryError::NotFound(*id));
            }
            Ok::<(), RepositoryError>(())
        }
        .await;

        self.observe("replace_one", started, &result);
        result
    }

    async fn scan_all(&self) -> RepositoryResult<Box<dyn ProductCursor>> {
        let started = Instant::now();
        let result = self
            .collection
            .find(doc! {})
            .await
            .map_err(RepositoryError::from);

        self.observe("find", started, &result);
        let cursor = result?;
        Ok(Box::new(MongoProductCursor { inner: cursor }))
    }
}

/// 对 `mongodb::Cursor` 的包装
struct MongoProductCursor {
    inner: Cursor<ProductDocument>,
}

#[async_trait]
impl ProductCursor for MongoProductCursor {
    async fn next(&mut self) -> RepositoryResult<Option<StoredProduct>> {
        match self.inner.try_next().await? {
            Some(document) => document
                .into_stored()
                .map(Some)
                .ok_or_else(|| RepositoryError::unavailable("stored product has no _id")),
            None => Ok(None),
        }
    }

    async fn close(self: Box<Self>) -> RepositoryResult<()> {
        // 驱动在 Cursor 被 drop 时向服务端发送 killCursors
        drop(self.inner);
        Ok(())
    }
}
