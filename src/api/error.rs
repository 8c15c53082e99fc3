// ==========================================
// Smart Vista 能源与OEE仪表盘 - API 层错误类型
// ==========================================

use crate::engine::EngineError;
use crate::export::ExportError;
use thiserror::Error;

/// API 层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("序列化失败: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// API Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
