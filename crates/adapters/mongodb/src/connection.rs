//! MongoDB 连接管理

use catalog_errors::{AppError, AppResult};
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::debug;

use crate::config::MongoConfig;

/// 创建 MongoDB 客户端
///
/// 驱动是惰性连接的，这里额外执行一次 `ping` 确保服务端真正可达
pub async fn create_client(config: &MongoConfig) -> AppResult<Client> {
    let mut options = ClientOptions::parse(config.url.as_str())
        .await
        .map_err(|e| AppError::database(format!("Invalid MongoDB connection string: {}", e)))?;

    options.app_name = config.app_name.clone();
    options.connect_timeout = Some(config.connect_timeout);
    options.server_selection_timeout = Some(config.connect_timeout);
    options.max_pool_size = Some(config.max_pool_size);

    let client = Client::with_options(options)
        .map_err(|e| AppError::database(format!("Failed to create MongoDB client: {}", e)))?;

    check_connection(&client.database(&config.database)).await?;
    debug!(database = %config.database, "MongoDB ping succeeded");

    Ok(client)
}

/// 检查数据库连接
pub async fn check_connection(database: &Database) -> AppResult<()> {
    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| AppError::database(format!("MongoDB health check failed: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_connection_string_is_rejected() {
        let config = MongoConfig::new("postgres://not-mongo");
        let err = create_client(&config).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
        assert!(err.to_string().contains("Invalid MongoDB connection string"));
    }
}
