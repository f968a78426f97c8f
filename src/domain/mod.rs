// ==========================================
// 班级体测薄弱项分析系统 - 领域层
// ==========================================
// 职责: 实体与类型，不含 IO
// ==========================================

pub mod dataset;
pub mod profile;
pub mod types;

// 重导出核心实体
pub use dataset::{Dataset, StudentRecord};
pub use profile::{ClassWeaknessProfile, ItemStats, StudentDetail, StudentGroup};
pub use types::{AnalysisSource, Dimension, GradeScale};
