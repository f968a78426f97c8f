// ==========================================
// 班级体测薄弱项分析系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 并发控制错误 =====
    #[error("画像存储锁获取失败: {0}")]
    LockError(String),

    // ===== 文件错误 =====
    #[error("画像文件读写失败 ({path}): {message}")]
    StoreIoError { path: String, message: String },

    #[error("画像序列化失败: {0}")]
    SerializationError(String),

    // ===== 数据质量错误 =====
    #[error("数据验证失败: {0}")]
    ValidationError(String),
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::SerializationError(err.to_string())
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
