// ==========================================
// 班级体测薄弱项分析系统 - 班级薄弱维度排序
// ==========================================
// 职责: 维度按薄弱分数降序，取前 2，生成说明文字
// 输入: 每个维度的代表项目统计
// 输出: RankedWeaknesses
// ==========================================

use crate::config::analysis_config::WEAK_DIMENSION_LIMIT;
use crate::domain::profile::ItemStats;
use crate::domain::types::Dimension;
use indexmap::IndexMap;
use std::cmp::Ordering;

/// 排序结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedWeaknesses {
    pub weak_dimensions: Vec<Dimension>,
    pub justifications: IndexMap<Dimension, String>,
    /// 维度 → 代表项目
    pub items: IndexMap<Dimension, String>,
}

impl RankedWeaknesses {
    /// 一句话描述: "{班级}体质监测核心薄弱维度：维度（项目）、…"
    pub fn description(&self, class_name: &str) -> String {
        build_description(class_name, &self.weak_dimensions, &self.items)
    }
}

/// 构建一句话描述（没有代表项目的维度只写维度名）
fn build_description(
    class_name: &str,
    dimensions: &[Dimension],
    items: &IndexMap<Dimension, String>,
) -> String {
    if dimensions.is_empty() {
        return format!("{}体质监测数据", class_name);
    }

    let parts: Vec<String> = dimensions
        .iter()
        .map(|d| match items.get(d) {
            Some(item) if !item.is_empty() => format!("{}（{}）", d, item),
            _ => d.to_string(),
        })
        .collect();

    format!("{}体质监测核心薄弱维度：{}", class_name, parts.join("、"))
}

// ==========================================
// WeaknessRanker - 班级薄弱维度排序器
// ==========================================
pub struct WeaknessRanker {
    limit: usize,
}

impl WeaknessRanker {
    pub fn new() -> Self {
        Self {
            limit: WEAK_DIMENSION_LIMIT,
        }
    }

    /// 排序并选取最薄弱的维度
    ///
    /// # 参数
    /// - `per_dimension`: 每个维度一条代表项目统计（已归并）
    /// - `class_name`: 班级名称（写入说明文字）
    pub fn rank(&self, per_dimension: &[ItemStats], class_name: &str) -> RankedWeaknesses {
        let mut sorted: Vec<&ItemStats> = per_dimension.iter().collect();
        // 稳定排序: 同分保持原顺序
        sorted.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        let mut ranked = RankedWeaknesses::default();
        for stats in sorted.into_iter().take(self.limit) {
            ranked.weak_dimensions.push(stats.dimension);
            ranked.items.insert(stats.dimension, stats.item.clone());
            ranked
                .justifications
                .insert(stats.dimension, justification(class_name, stats));
        }

        ranked
    }
}

impl Default for WeaknessRanker {
    fn default() -> Self {
        Self::new()
    }
}

/// 生成单个薄弱维度的说明文字
pub fn justification(class_name: &str, stats: &ItemStats) -> String {
    let dimension = stats.dimension;
    let mut detail = format!(
        "从体测数据来看，{}是{}的薄弱项：{}",
        dimension, class_name, stats.item
    );

    if stats.excellent_count == 0 {
        detail.push_str("无'优秀'等级学生，");
    } else {
        detail.push_str(&format!(
            "仅{}人（占比{:.1}%）达到'优秀'，",
            stats.excellent_count, stats.excellent_rate
        ));
    }

    if stats.good_count > 0 {
        detail.push_str(&format!(
            "{}人（占比{:.1}%）达到'良好'，",
            stats.good_count, stats.good_rate
        ));
    }

    detail.push_str(&format!(
        "{}人（占比{:.1}%）为'及格'",
        stats.pass_count, stats.pass_rate
    ));

    if stats.fail_count > 0 {
        detail.push_str(&format!(
            "，{}人（占比{:.1}%）为'不及格'",
            stats.fail_count, stats.fail_rate
        ));
    }

    detail.push_str(&format!("，{}素质提升需求迫切。", dimension));
    detail
}
