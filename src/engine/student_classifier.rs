// ==========================================
// 班级体测薄弱项分析系统 - 学生个体薄弱判定
// ==========================================
// 职责: 逐个学生判定薄弱维度（集合语义，按维度去重）
// 规则: 体重 超重/肥胖/低体重 为薄弱；其他项目 及格/不及格 为薄弱
// 输出: 仅包含薄弱集合非空的学生
// ==========================================

use crate::config::analysis_config::AnalysisConfig;
use crate::config::dimension_mapping::ItemDimension;
use crate::domain::dataset::Dataset;
use crate::domain::types::Dimension;
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// 单个学生的薄弱判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentWeakness {
    pub row_index: usize,
    pub student_key: String,
    pub dimensions: BTreeSet<Dimension>,
}

// ==========================================
// StudentClassifier - 学生薄弱判定器
// ==========================================
pub struct StudentClassifier<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> StudentClassifier<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// 判定全部学生（按行顺序，省略无薄弱维度的学生）
    pub fn classify(&self, dataset: &Dataset) -> Vec<StudentWeakness> {
        // 只考虑数据集中存在等级列的项目
        let present: Vec<(String, &ItemDimension)> = self
            .config
            .mapping
            .iter()
            .map(|entry| (entry.grade_column(), entry))
            .filter(|(column, _)| dataset.has_column(column))
            .collect();

        dataset
            .rows()
            .iter()
            .enumerate()
            .filter_map(|(row_index, row)| {
                let mut dimensions = BTreeSet::new();
                for (column, entry) in &present {
                    if dimensions.contains(&entry.dimension) {
                        continue;
                    }
                    if let Some(grade) = row.get(column) {
                        if entry.scale.is_weak_grade(grade) {
                            dimensions.insert(entry.dimension);
                        }
                    }
                }

                if dimensions.is_empty() {
                    return None;
                }

                Some(StudentWeakness {
                    row_index,
                    student_key: self.config.identity.resolve_key(row, row_index),
                    dimensions,
                })
            })
            .collect()
    }

    /// 学生标识 → 薄弱维度（同一标识出现多次时合并）
    pub fn weak_dimensions_by_student(&self, dataset: &Dataset) -> IndexMap<String, BTreeSet<Dimension>> {
        let mut by_student: IndexMap<String, BTreeSet<Dimension>> = IndexMap::new();
        for student in self.classify(dataset) {
            by_student
                .entry(student.student_key)
                .or_default()
                .extend(student.dimensions);
        }
        by_student
    }
}
