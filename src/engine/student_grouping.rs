// ==========================================
// 班级体测薄弱项分析系统 - 学生分组
// ==========================================
// 职责: 个体薄弱维度 ∩ 班级薄弱维度 → 分组
// 分组键: 交集维度按名称排序后以 "+" 连接
// 排序: 人数降序（同人数保持首次出现顺序）
// ==========================================

use crate::config::analysis_config::AnalysisConfig;
use crate::domain::dataset::{Dataset, StudentRecord};
use crate::domain::profile::{StudentDetail, StudentGroup};
use crate::domain::types::{join_dimension_key, Dimension};
use crate::engine::student_classifier::StudentWeakness;
use indexmap::IndexMap;

// ==========================================
// StudentGroupingEngine - 学生分组引擎
// ==========================================
pub struct StudentGroupingEngine<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> StudentGroupingEngine<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// 按班级薄弱维度对学生分组
    ///
    /// # 参数
    /// - `dataset`: 体测数据（取学生明细）
    /// - `students`: 学生个体薄弱判定结果
    /// - `class_dimensions`: 班级薄弱维度
    pub fn group(
        &self,
        dataset: &Dataset,
        students: &[StudentWeakness],
        class_dimensions: &[Dimension],
    ) -> IndexMap<String, StudentGroup> {
        let mut groups: IndexMap<String, (Vec<Dimension>, StudentGroup)> = IndexMap::new();

        for student in students {
            let intersection: Vec<Dimension> = class_dimensions
                .iter()
                .copied()
                .filter(|d| student.dimensions.contains(d))
                .collect();
            if intersection.is_empty() {
                continue;
            }

            let Some(row) = dataset.rows().get(student.row_index) else {
                continue;
            };

            let key = join_dimension_key(&intersection);
            let (_, group) = groups.entry(key).or_insert_with(|| {
                (
                    intersection.clone(),
                    StudentGroup {
                        count: 0,
                        students: Vec::new(),
                        weakness_items: Vec::new(),
                        student_details: Vec::new(),
                    },
                )
            });

            group.count += 1;
            group.students.push(student.student_key.clone());
            group
                .student_details
                .push(self.detail(row, student.row_index));
        }

        let mut result: IndexMap<String, StudentGroup> = groups
            .into_iter()
            .map(|(key, (dimensions, mut group))| {
                group.weakness_items = self.weakness_items(dataset, &dimensions);
                (key, group)
            })
            .collect();

        // IndexMap::sort_by 为稳定排序
        result.sort_by(|_, a, _, b| b.count.cmp(&a.count));
        result
    }

    /// 学生明细记录
    fn detail(&self, row: &StudentRecord, row_index: usize) -> StudentDetail {
        let identity = &self.config.identity;
        StudentDetail {
            seq: row_index + 1,
            student_id: identity.resolve_id(row),
            name: identity.resolve_name(row),
            class: row.get(&identity.class_column).map(str::to_string),
            gender: row.get(&identity.gender_column).map(str::to_string),
            age: row.get(&identity.age_column).map(str::to_string),
        }
    }

    /// 分组涉及的体测项目（映射表顺序，去重，仅限数据集中存在的列）
    fn weakness_items(&self, dataset: &Dataset, dimensions: &[Dimension]) -> Vec<String> {
        let mut items: Vec<String> = Vec::new();
        for entry in self.config.mapping.iter() {
            if dimensions.contains(&entry.dimension)
                && dataset.has_column(&entry.grade_column())
                && !items.contains(&entry.item)
            {
                items.push(entry.item.clone());
            }
        }
        items
    }
}
