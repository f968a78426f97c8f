// ==========================================
// 班级体测薄弱项分析系统 - 分析配置
// ==========================================
// 映射表 + 学生身份列 + 明细列
// ==========================================

use crate::config::dimension_mapping::DimensionMapping;
use crate::domain::dataset::StudentRecord;
use serde::{Deserialize, Serialize};

/// 班级最多选取的薄弱维度数
pub const WEAK_DIMENSION_LIMIT: usize = 2;

/// 学生身份列（按候选顺序，第一个非空值胜出）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityColumns {
    /// 编号类候选列: 学生编号 → 学号 → 编号
    pub id_columns: Vec<String>,
    pub name_column: String,
    pub class_column: String,
    pub gender_column: String,
    pub age_column: String,
}

impl Default for IdentityColumns {
    fn default() -> Self {
        Self {
            id_columns: vec![
                "学生编号".to_string(),
                "学号".to_string(),
                "编号".to_string(),
            ],
            name_column: "姓名".to_string(),
            class_column: "班级".to_string(),
            gender_column: "性别".to_string(),
            age_column: "年龄".to_string(),
        }
    }
}

impl IdentityColumns {
    /// 解析学生标识: 编号类列 → 姓名 → "学生{row_index+1}"
    pub fn resolve_key(&self, row: &StudentRecord, row_index: usize) -> String {
        row.first_non_empty(
            self.id_columns
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(self.name_column.as_str())),
        )
        .map(str::to_string)
        .unwrap_or_else(|| synthetic_student_name(row_index))
    }

    /// 编号（可能为空）
    pub fn resolve_id(&self, row: &StudentRecord) -> String {
        row.first_non_empty(&self.id_columns)
            .unwrap_or_default()
            .to_string()
    }

    pub fn resolve_name(&self, row: &StudentRecord) -> String {
        row.get_or(&self.name_column, "").to_string()
    }
}

/// 缺少任何标识时的占位名
pub fn synthetic_student_name(row_index: usize) -> String {
    format!("学生{}", row_index + 1)
}

/// 分析配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub mapping: DimensionMapping,
    #[serde(default)]
    pub identity: IdentityColumns,
}

impl AnalysisConfig {
    pub fn with_mapping(mapping: DimensionMapping) -> Self {
        Self {
            mapping,
            identity: IdentityColumns::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> StudentRecord {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn test_resolve_key_candidate_order() {
        let identity = IdentityColumns::default();

        let row = record(&[("学生编号", "A01"), ("学号", "B01"), ("姓名", "张三")]);
        assert_eq!(identity.resolve_key(&row, 0), "A01");

        let row = record(&[("学号", "B01"), ("姓名", "张三")]);
        assert_eq!(identity.resolve_key(&row, 0), "B01");

        let row = record(&[("编号", "C01"), ("姓名", "张三")]);
        assert_eq!(identity.resolve_key(&row, 0), "C01");

        let row = record(&[("学生编号", " "), ("姓名", "张三")]);
        assert_eq!(identity.resolve_key(&row, 0), "张三");
    }

    #[test]
    fn test_resolve_key_synthetic_fallback() {
        let identity = IdentityColumns::default();
        let row = record(&[("性别", "男")]);
        assert_eq!(identity.resolve_key(&row, 4), "学生5");
        assert_eq!(identity.resolve_id(&row), "");
        assert_eq!(identity.resolve_name(&row), "");
    }
}
