// ==========================================
// 班级体测薄弱项分析系统 - 核心库
// ==========================================
// 输入: 班级学生体测等级表 (Excel / CSV)
// 输出: 班级薄弱维度画像 + 学生薄弱分组
// 系统定位: 为课课练设计提供班级薄弱项依据
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 映射表 / 身份列 / 运行配置
pub mod config;

// 引擎层 - 分析规则
pub mod engine;

// 导入层 - 体测文件
pub mod importer;

// 数据仓储层 - 班级画像持久化
pub mod repository;

// API 层 - 业务接口
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    AnalysisSource, ClassWeaknessProfile, Dataset, Dimension, GradeScale, ItemStats,
    StudentDetail, StudentGroup, StudentRecord,
};

// 配置
pub use config::{AnalysisConfig, AppConfig, DimensionMapping, ItemDimension};

// 引擎
pub use engine::{analyze, extract_grade, ClassAnalyzer, WeaknessSummarizer};

// 存储
pub use repository::ProfileRepository;

// API
pub use api::{ApiError, ClassProfileApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "班级体测薄弱项分析系统";
