//! MongoDB 连接配置

use std::time::Duration;

/// MongoDB 客户端配置
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// 连接字符串
    pub url: String,
    /// 数据库名
    pub database: String,
    /// 应用名称（用于连接标识）
    pub app_name: Option<String>,
    /// 连接超时
    pub connect_timeout: Duration,
    /// 最大连接数
    pub max_pool_size: u32,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: "productsdb".to_string(),
            app_name: None,
            connect_timeout: Duration::from_secs(10),
            max_pool_size: 10,
        }
    }
}

impl MongoConfig {
    /// 从 URL 创建配置
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// 设置数据库名
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// 设置应用名称
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// 设置连接超时
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// 设置最大连接数
    pub fn with_max_pool_size(mut self, max: u32) -> Self {
        self.max_pool_size = max;
        self
    }
}
