// ==========================================
// 班级体测薄弱项分析系统 - 导入层
// ==========================================
// 职责: 体测文件 → Dataset
// 支持: Excel (.xlsx/.xls), CSV
// ==========================================

pub mod error;
pub mod file_parser;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, UniversalFileParser};
