//! 基础设施资源管理
//!
//! 进程启动时建立一次，之后只读共享

use std::time::Duration;

use catalog_adapter_mongodb::{MongoConfig, create_client};
use catalog_config::AppConfig;
use catalog_errors::AppResult;
use mongodb::{Client, Database};
use secrecy::ExposeSecret;
use tracing::info;

use crate::retry::{RetryConfig, with_retry};

/// 基础设施资源容器
///
/// `mongodb::Client` 内部是引用计数的连接池，克隆开销很小
#[derive(Clone)]
pub struct Infrastructure {
    /// 应用配置
    config: AppConfig,
    /// MongoDB 客户端
    mongo_client: Client,
}

impl Infrastructure {
    /// 从配置创建基础设施资源（带重试）
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let retry_config = RetryConfig::default();

        let mongo_config = MongoConfig::new(config.mongodb.url.expose_secret())
            .with_database(&config.mongodb.database)
            .with_app_name(&config.app_name)
            .with_connect_timeout(Duration::from_secs(config.mongodb.connect_timeout_secs))
            .with_max_pool_size(config.mongodb.max_pool_size);

        let mongo_client = with_retry(&retry_config, "MongoDB connection", || {
            let cfg = mongo_config.clone();
            async move { create_client(&cfg).await }
        })
        .await?;
        info!(
            database = %config.mongodb.database,
            max_pool_size = config.mongodb.max_pool_size,
            "MongoDB client created"
        );

        Ok(Self {
            config,
            mongo_client,
        })
    }

    /// 获取配置中指定的数据库
    pub fn mongo_database(&self) -> Database {
        self.mongo_client.database(&self.config.mongodb.database)
    }

    /// 配置中指定的集合名
    pub fn mongo_collection_name(&self) -> &str {
        &self.config.mongodb.collection
    }
}
