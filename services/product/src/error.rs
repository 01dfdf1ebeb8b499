//! 持久层错误及其到 [`AppError`] 的映射

use catalog_errors::AppError;
use thiserror::Error;

use crate::domain::ProductId;

/// 持久层错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// 指定 ID 的文档不存在
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// 连接、超时、文档解码等任何底层故障
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Unavailable(err.to_string())
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) => AppError::not_found(err.to_string()),
            RepositoryError::Unavailable(_) => AppError::internal(err.to_string()),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
