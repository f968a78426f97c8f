// ==========================================
// 班级体测薄弱项分析系统 - 薄弱分数计算
// ==========================================
// 标准项目: (100 - 优秀率) + 及格率 + 2 × 不及格率
// 体重项目: (100 - 正常率) + 2 × 肥胖率 + 1.5 × 超重率 + 1.5 × 低体重率
// 同维度多项目: 保留分数严格最高者（同分保留先评估者）
// ==========================================

use crate::domain::profile::ItemStats;
use crate::domain::types::GradeScale;
use crate::engine::grade_classifier::GradeDistribution;

// 体重量表下标: 正常 / 超重 / 肥胖 / 低体重
const BW_NORMAL: usize = 0;
const BW_OVERWEIGHT: usize = 1;
const BW_OBESE: usize = 2;
const BW_UNDERWEIGHT: usize = 3;

// 标准量表下标: 优秀 / 良好 / 及格 / 不及格
const STD_EXCELLENT: usize = 0;
const STD_GOOD: usize = 1;
const STD_PASS: usize = 2;
const STD_FAIL: usize = 3;

// ==========================================
// WeaknessScorer - 薄弱分数计算器
// ==========================================
pub struct WeaknessScorer {
    // 无状态引擎
}

impl WeaknessScorer {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算薄弱分数（越高越薄弱）
    pub fn score(&self, dist: &GradeDistribution) -> f64 {
        let r = dist.rates();
        match dist.scale {
            GradeScale::Standard => {
                (100.0 - r[STD_EXCELLENT]) + r[STD_PASS] + 2.0 * r[STD_FAIL]
            }
            GradeScale::BodyWeight => {
                (100.0 - r[BW_NORMAL])
                    + 2.0 * r[BW_OBESE]
                    + 1.5 * r[BW_OVERWEIGHT]
                    + 1.5 * r[BW_UNDERWEIGHT]
            }
        }
    }

    /// 转换为统一形状的项目统计
    pub fn to_item_stats(&self, dist: &GradeDistribution) -> ItemStats {
        let score = self.score(dist);
        let (excellent, good, pass, fail) = match dist.scale {
            GradeScale::Standard => (
                dist.counts[STD_EXCELLENT],
                dist.counts[STD_GOOD],
                dist.counts[STD_PASS],
                dist.counts[STD_FAIL],
            ),
            GradeScale::BodyWeight => (
                dist.counts[BW_NORMAL],
                0,
                dist.counts[BW_OVERWEIGHT] + dist.counts[BW_UNDERWEIGHT],
                dist.counts[BW_OBESE],
            ),
        };

        let rate = |count: usize| count as f64 * 100.0 / dist.total as f64;

        ItemStats {
            item: dist.item.clone(),
            dimension: dist.dimension,
            total: dist.total,
            excellent_count: excellent,
            good_count: good,
            pass_count: pass,
            fail_count: fail,
            excellent_rate: rate(excellent),
            good_rate: rate(good),
            pass_rate: rate(pass),
            fail_rate: rate(fail),
            score,
        }
    }

    /// 每个维度保留最薄弱的代表项目
    ///
    /// 结果按维度首次出现的顺序排列。
    pub fn reduce_by_dimension(&self, stats: &[ItemStats]) -> Vec<ItemStats> {
        let mut worst: Vec<ItemStats> = Vec::new();

        for candidate in stats {
            match worst.iter_mut().find(|s| s.dimension == candidate.dimension) {
                Some(current) => {
                    if candidate.score > current.score {
                        *current = candidate.clone();
                    }
                }
                None => worst.push(candidate.clone()),
            }
        }

        worst
    }
}

impl Default for WeaknessScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Dimension;

    fn standard(item: &str, dimension: Dimension, counts: [usize; 4]) -> GradeDistribution {
        GradeDistribution {
            item: item.to_string(),
            dimension,
            scale: GradeScale::Standard,
            total: counts.iter().sum(),
            counts,
        }
    }

    fn body_weight(counts: [usize; 4]) -> GradeDistribution {
        GradeDistribution {
            item: "体重".to_string(),
            dimension: Dimension::Morphology,
            scale: GradeScale::BodyWeight,
            total: counts.iter().sum(),
            counts,
        }
    }

    #[test]
    fn test_standard_score_example() {
        // 2 优秀 / 3 良好 / 4 及格 / 1 不及格 => (100-20)+40+2×10 = 140
        let dist = standard("50米跑", Dimension::Speed, [2, 3, 4, 1]);
        let scorer = WeaknessScorer::new();
        assert!((scorer.score(&dist) - 140.0).abs() < 1e-9);
    }

    #[test]
    fn test_body_weight_score_and_remap() {
        // 正常 5 / 超重 2 / 肥胖 2 / 低体重 1 (共 10)
        // (100-50) + 2×20 + 1.5×20 + 1.5×10 = 135
        let dist = body_weight([5, 2, 2, 1]);
        let scorer = WeaknessScorer::new();
        let stats = scorer.to_item_stats(&dist);

        assert!((stats.score - 135.0).abs() < 1e-9);
        assert_eq!(stats.excellent_count, 5);
        assert_eq!(stats.good_count, 0);
        assert_eq!(stats.pass_count, 3);
        assert_eq!(stats.fail_count, 2);
        assert!((stats.pass_rate - 30.0).abs() < 1e-9);
        assert!((stats.good_rate - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_monotonic_in_fail_rate() {
        let scorer = WeaknessScorer::new();

        // 固定优秀 2 人，把及格逐步换成不及格
        let mut previous = f64::MIN;
        for fail in 0..=6 {
            let dist = standard("50米跑", Dimension::Speed, [2, 2, 6 - fail, fail]);
            let score = scorer.score(&dist);
            assert!(score >= previous);
            previous = score;
        }

        // 体重: 把超重逐步换成肥胖
        let mut previous = f64::MIN;
        for obese in 0..=4 {
            let score = scorer.score(&body_weight([4, 4 - obese, obese, 2]));
            assert!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn test_reduce_keeps_worst_item_per_dimension() {
        let scorer = WeaknessScorer::new();
        let stats = vec![
            scorer.to_item_stats(&standard("800米跑", Dimension::Endurance, [5, 3, 2, 0])),
            scorer.to_item_stats(&standard("50米跑", Dimension::Speed, [1, 1, 1, 1])),
            scorer.to_item_stats(&standard("1000米跑", Dimension::Endurance, [1, 2, 4, 3])),
        ];

        let reduced = scorer.reduce_by_dimension(&stats);
        assert_eq!(reduced.len(), 2);
        assert_eq!(reduced[0].dimension, Dimension::Endurance);
        assert_eq!(reduced[0].item, "1000米跑");
        assert_eq!(reduced[1].item, "50米跑");
    }

    #[test]
    fn test_reduce_tie_keeps_first_evaluated() {
        let scorer = WeaknessScorer::new();
        let stats = vec![
            scorer.to_item_stats(&standard("50米跑", Dimension::Speed, [1, 1, 1, 1])),
            scorer.to_item_stats(&standard("一分钟跳绳", Dimension::Speed, [1, 1, 1, 1])),
        ];

        let reduced = scorer.reduce_by_dimension(&stats);
        assert_eq!(reduced.len(), 1);
        assert_eq!(reduced[0].item, "50米跑");
    }
}
