// ==========================================
// 班级体测薄弱项分析系统 - 等级分布统计
// ==========================================
// 职责: 单个体测项目的等级分布（4 档计数 + 占比）
// 输入: 数据集 + 映射表项
// 输出: GradeDistribution（列缺失或无有效数据时为 None）
// ==========================================

use crate::config::dimension_mapping::ItemDimension;
use crate::domain::dataset::Dataset;
use crate::domain::types::{Dimension, GradeScale};

/// 单个项目的等级分布
///
/// `counts` 与 `scale.categories()` 顺序一致。
/// 不在量表内的取值计入 total，但不计入任何一档。
#[derive(Debug, Clone, PartialEq)]
pub struct GradeDistribution {
    pub item: String,
    pub dimension: Dimension,
    pub scale: GradeScale,
    pub total: usize,
    pub counts: [usize; 4],
}

impl GradeDistribution {
    /// 第 idx 档的占比（百分比）
    pub fn rate(&self, idx: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.counts[idx] as f64 * 100.0 / self.total as f64
    }

    pub fn rates(&self) -> [f64; 4] {
        [self.rate(0), self.rate(1), self.rate(2), self.rate(3)]
    }

}

// ==========================================
// GradeClassifier - 等级分布统计器
// ==========================================
pub struct GradeClassifier {
    // 无状态引擎
}

impl GradeClassifier {
    pub fn new() -> Self {
        Self {}
    }

    /// 统计单个项目
    ///
    /// # 返回
    /// - None: 等级列不存在，或没有非缺失值（跳过，不是错误）
    pub fn classify(&self, dataset: &Dataset, entry: &ItemDimension) -> Option<GradeDistribution> {
        let column = entry.grade_column();
        if !dataset.has_column(&column) {
            tracing::debug!(item = %entry.item, "等级列不存在，跳过");
            return None;
        }

        let categories = entry.scale.categories();
        let mut counts = [0usize; 4];
        let mut total = 0usize;

        for value in dataset.non_missing_values(&column) {
            total += 1;
            if let Some(idx) = categories.iter().position(|c| *c == value) {
                counts[idx] += 1;
            }
        }

        if total == 0 {
            tracing::debug!(item = %entry.item, "等级列无有效数据，跳过");
            return None;
        }

        Some(GradeDistribution {
            item: entry.item.clone(),
            dimension: entry.dimension,
            scale: entry.scale,
            total,
            counts,
        })
    }

    /// 按映射表顺序统计全部项目
    pub fn classify_all<'a, I>(&self, dataset: &Dataset, entries: I) -> Vec<GradeDistribution>
    where
        I: IntoIterator<Item = &'a ItemDimension>,
    {
        entries
            .into_iter()
            .filter_map(|entry| self.classify(dataset, entry))
            .collect()
    }
}

impl Default for GradeClassifier {
    fn default() -> Self {
        Self::new()
    }
}
