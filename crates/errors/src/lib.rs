//! catalog-errors - 统一错误处理
//!
//! 所有 crate 共享的错误分类，以及到 gRPC 状态码的映射

use thiserror::Error;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// 转换为 gRPC 状态码
    pub fn grpc_code(&self) -> tonic::Code {
        match self {
            Self::NotFound(_) => tonic::Code::NotFound,
            Self::Validation(_) => tonic::Code::InvalidArgument,
            Self::Internal(_) => tonic::Code::Internal,
            Self::Database(_) => tonic::Code::Internal,
        }
    }
}

impl From<AppError> for tonic::Status {
    fn from(err: AppError) -> Self {
        tonic::Status::new(err.grpc_code(), err.to_string())
    }
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grpc_code_mapping() {
        assert_eq!(AppError::validation("bad id").grpc_code(), tonic::Code::InvalidArgument);
        assert_eq!(AppError::not_found("gone").grpc_code(), tonic::Code::NotFound);
        assert_eq!(AppError::internal("boom").grpc_code(), tonic::Code::Internal);
        assert_eq!(AppError::database("down").grpc_code(), tonic::Code::Internal);
    }

    #[test]
    fn test_status_keeps_message() {
        let status: tonic::Status = AppError::not_found("product 42").into();
        assert_eq!(status.code(), tonic::Code::NotFound);
        assert_eq!(status.message(), "Not found: product 42");
    }
}
