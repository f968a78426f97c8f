// ==========================================
// 班级体测薄弱项分析系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 班级画像的持久化（单个 JSON 文件）
// ==========================================

pub mod error;
pub mod profile_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use profile_repo::{ProfileCollection, ProfileRepository};
