// ==========================================
// 班级体测薄弱项分析系统 - 体测数据集
// ==========================================
// 一行一名学生，列名 → 单元格文本
// 空白单元格视为缺失值
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 单个学生记录（带类型的行访问器）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    values: HashMap<String, String>,
}

impl StudentRecord {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// 读取单元格，去除首尾空白；空白视为缺失
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// 依次尝试候选列，返回第一个非空值
    pub fn first_non_empty<'a, I, S>(&'a self, candidates: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        candidates
            .into_iter()
            .find_map(|column| self.get(column.as_ref()))
    }

    /// 读取单元格，缺失时返回默认值
    pub fn get_or<'a>(&'a self, column: &str, default: &'a str) -> &'a str {
        self.get(column).unwrap_or(default)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StudentRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// 体测数据集（保留表头顺序）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<StudentRecord>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<StudentRecord>) -> Self {
        Self { columns, rows }
    }

    /// 从原始行构建（表头取自参数，不在表头内的键依然可读）
    pub fn from_raw_records(columns: Vec<String>, records: Vec<HashMap<String, String>>) -> Self {
        Self {
            columns,
            rows: records.into_iter().map(StudentRecord::new).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[StudentRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// 某列的非缺失取值
    pub fn non_missing_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.rows.iter().filter_map(move |row| row.get(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> StudentRecord {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn test_blank_cells_are_missing() {
        let row = record(&[("姓名", "  "), ("学号", " 1001 ")]);
        assert_eq!(row.get("姓名"), None);
        assert_eq!(row.get("学号"), Some("1001"));
        assert_eq!(row.get("性别"), None);
        assert_eq!(row.get_or("性别", "未知"), "未知");
    }

    #[test]
    fn test_first_non_empty_respects_order() {
        let row = record(&[("学生编号", ""), ("学号", "S02"), ("姓名", "张三")]);
        assert_eq!(row.first_non_empty(["学生编号", "学号", "姓名"]), Some("S02"));
        assert_eq!(row.first_non_empty(["编号"]), None);
    }

    #[test]
    fn test_non_missing_values_skips_blanks() {
        let dataset = Dataset::new(
            vec!["50米跑等级".to_string()],
            vec![
                record(&[("50米跑等级", "优秀")]),
                record(&[("50米跑等级", "")]),
                record(&[]),
            ],
        );
        assert!(dataset.has_column("50米跑等级"));
        assert_eq!(dataset.non_missing_values("50米跑等级").count(), 1);
        assert_eq!(dataset.len(), 3);
    }
}
