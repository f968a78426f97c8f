// ==========================================
// 班级体测薄弱项分析系统 - API 层
// ==========================================
// 职责: 组合导入 / 分析 / 存储，供命令行或上层服务调用
// ==========================================

pub mod class_profile_api;
pub mod error;

// 重导出核心类型
pub use class_profile_api::{BatchFailure, BatchReport, ClassMatch, ClassProfileApi};
pub use error::{ApiError, ApiResult};
