// ==========================================
// 班级体测薄弱项分析系统 - 配置层
// ==========================================
// 职责: 映射表、身份列、运行参数
// 存储: JSON 文件 / 环境变量
// ==========================================

pub mod analysis_config;
pub mod app_config;
pub mod dimension_mapping;
pub mod error;

// 重导出核心配置
pub use analysis_config::{AnalysisConfig, IdentityColumns, WEAK_DIMENSION_LIMIT};
pub use app_config::{default_store_path, env_keys, AppConfig};
pub use dimension_mapping::{DimensionMapping, ItemDimension, GRADE_COLUMN_SUFFIX};
pub use error::{ConfigError, ConfigResult};
