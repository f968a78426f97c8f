// ==========================================
// 班级体测薄弱项分析系统 - 班级画像实体
// ==========================================
// ClassWeaknessProfile: 按班级名称持久化
// StudentGroup: 按学生个体薄弱维度分组（嵌套于画像）
// ==========================================

use crate::domain::types::{AnalysisSource, Dimension};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ==========================================
// ItemStats - 单个体测项目的统计
// ==========================================
// 体重项目已映射为统一的 4 档形状:
// excellent←正常, good←0, pass←超重+低体重, fail←肥胖
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStats {
    pub item: String,
    pub dimension: Dimension,
    pub total: usize,
    pub excellent_count: usize,
    pub good_count: usize,
    pub pass_count: usize,
    pub fail_count: usize,
    pub excellent_rate: f64,
    pub good_rate: f64,
    pub pass_rate: f64,
    pub fail_rate: f64,
    /// 薄弱分数（越高越薄弱）
    pub score: f64,
}

// ==========================================
// StudentDetail - 分组内学生明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDetail {
    /// 序号（数据集行号 + 1）
    #[serde(rename = "序号")]
    pub seq: usize,
    #[serde(rename = "学生编号")]
    pub student_id: String,
    #[serde(rename = "姓名")]
    pub name: String,
    #[serde(rename = "班级", default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(rename = "性别", default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(rename = "年龄", default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
}

impl StudentDetail {
    /// 展示名：无姓名时使用 "学生{序号}"
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            format!("学生{}", self.seq)
        } else {
            self.name.clone()
        }
    }
}

// ==========================================
// StudentGroup - 学生薄弱分组
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentGroup {
    pub count: usize,
    /// 学生标识（按出现顺序）
    pub students: Vec<String>,
    /// 关联的体测项目（仅用于展示）
    pub weakness_items: Vec<String>,
    pub student_details: Vec<StudentDetail>,
}

// ==========================================
// ClassWeaknessProfile - 班级薄弱项画像
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassWeaknessProfile {
    pub class_name: String,
    /// 年级（由班级名称提取）
    pub grade: String,
    /// 最薄弱的维度（≤ 2，按薄弱程度降序）
    pub weak_dimensions: Vec<Dimension>,
    pub weakness_justifications: IndexMap<Dimension, String>,
    /// 每个薄弱维度的代表性体测项目
    #[serde(default)]
    pub weakness_items: IndexMap<Dimension, String>,
    pub description: String,
    pub student_groups: IndexMap<String, StudentGroup>,
    /// 各体测项目统计（按映射表顺序）
    #[serde(default)]
    pub test_stats: IndexMap<String, ItemStats>,
    #[serde(default)]
    pub student_count: usize,
    #[serde(default)]
    pub analysis_source: AnalysisSource,
    pub analyzed_at: DateTime<Utc>,
}

impl ClassWeaknessProfile {
    /// 薄弱维度以 "、" 连接（课课练参数 trained_weaknesses）
    pub fn trained_weaknesses(&self) -> String {
        self.weak_dimensions
            .iter()
            .map(|d| d.name())
            .collect::<Vec<_>>()
            .join("、")
    }
}
