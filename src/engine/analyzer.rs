// ==========================================
// 班级体测薄弱项分析系统 - 班级分析编排
// ==========================================
// 主流程:
// 1) 等级分布统计 (GradeClassifier)
// 2) 薄弱分数 + 同维度归并 (WeaknessScorer)
// 3) 班级薄弱维度排序 (WeaknessRanker)
// 4) 学生个体薄弱判定 (StudentClassifier)
// 5) 学生分组 (StudentGroupingEngine)
// ==========================================
// 纯计算: 不做 IO，不持有可变共享状态
// ==========================================

use crate::config::analysis_config::AnalysisConfig;
use crate::domain::dataset::Dataset;
use crate::domain::profile::{ClassWeaknessProfile, ItemStats};
use crate::domain::types::AnalysisSource;
use crate::engine::grade_classifier::GradeClassifier;
use crate::engine::grade_extractor::extract_grade;
use crate::engine::student_classifier::StudentClassifier;
use crate::engine::student_grouping::StudentGroupingEngine;
use crate::engine::summarizer::{summarize_with_timeout, SummaryRequest, WeaknessSummarizer};
use crate::engine::weakness_ranker::{
    justification, RankedWeaknesses, WeaknessRanker,
};
use crate::engine::weakness_scorer::WeaknessScorer;
use chrono::Utc;
use indexmap::IndexMap;
use std::time::Duration;

/// 带外部总结服务的分析结果
#[derive(Debug, Clone)]
pub struct SummarizedAnalysis {
    pub profile: ClassWeaknessProfile,
    /// 回退时给操作者的提示
    pub warning: Option<String>,
}

// ==========================================
// ClassAnalyzer - 班级分析器
// ==========================================
pub struct ClassAnalyzer {
    config: AnalysisConfig,
    classifier: GradeClassifier,
    scorer: WeaknessScorer,
    ranker: WeaknessRanker,
}

impl ClassAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            classifier: GradeClassifier::new(),
            scorer: WeaknessScorer::new(),
            ranker: WeaknessRanker::new(),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// 各项目统计（映射表顺序，跳过无数据项目）
    pub fn item_stats(&self, dataset: &Dataset) -> Vec<ItemStats> {
        self.classifier
            .classify_all(dataset, self.config.mapping.iter())
            .iter()
            .map(|dist| self.scorer.to_item_stats(dist))
            .collect()
    }

    /// 确定性排序: 每维度最薄弱项目 → 取前 2
    pub fn rank(&self, stats: &[ItemStats], class_name: &str) -> RankedWeaknesses {
        let per_dimension = self.scorer.reduce_by_dimension(stats);
        self.ranker.rank(&per_dimension, class_name)
    }

    /// 分析班级体测数据
    pub fn analyze(&self, dataset: &Dataset, class_name: &str) -> ClassWeaknessProfile {
        let stats = self.item_stats(dataset);
        let ranked = self.rank(&stats, class_name);
        let profile = self.build_profile(
            dataset,
            class_name,
            stats,
            ranked,
            AnalysisSource::Deterministic,
        );

        tracing::info!(
            class_name = %class_name,
            students = dataset.len(),
            weak_dimensions = %profile.trained_weaknesses(),
            groups = profile.student_groups.len(),
            "班级体测分析完成"
        );
        profile
    }

    /// 先尝试外部总结服务，失败时回退到确定性排序
    pub async fn analyze_with_summarizer(
        &self,
        dataset: &Dataset,
        class_name: &str,
        summarizer: &dyn WeaknessSummarizer,
        timeout: Duration,
    ) -> SummarizedAnalysis {
        let stats = self.item_stats(dataset);
        let deterministic = self.rank(&stats, class_name);

        let request = SummaryRequest {
            class_name: class_name.to_string(),
            grade: extract_grade(class_name),
            student_count: dataset.len(),
            item_stats: stats.clone(),
        };

        match summarize_with_timeout(summarizer, &request, timeout).await {
            Ok(parsed) => {
                // 代表项目沿用确定性统计；外部未给说明的维度用模板补齐
                let per_dimension = self.scorer.reduce_by_dimension(&stats);
                let mut ranked = RankedWeaknesses::default();
                for dimension in parsed.weak_dimensions {
                    ranked.weak_dimensions.push(dimension);
                    let representative = per_dimension.iter().find(|s| s.dimension == dimension);
                    if let Some(rep) = representative {
                        ranked.items.insert(dimension, rep.item.clone());
                    }
                    let detail = match parsed.justifications.get(&dimension) {
                        Some(text) if !text.is_empty() => Some(text.clone()),
                        _ => representative.map(|rep| justification(class_name, rep)),
                    };
                    // 既无外部说明也无数据支撑的维度不写说明
                    if let Some(detail) = detail {
                        ranked.justifications.insert(dimension, detail);
                    }
                }

                let profile =
                    self.build_profile(dataset, class_name, stats, ranked, AnalysisSource::Summarizer);
                SummarizedAnalysis {
                    profile,
                    warning: None,
                }
            }
            Err(e) => {
                tracing::warn!(class_name = %class_name, error = %e, "外部总结失败，回退到确定性分析");
                let profile = self.build_profile(
                    dataset,
                    class_name,
                    stats,
                    deterministic,
                    AnalysisSource::Deterministic,
                );
                SummarizedAnalysis {
                    profile,
                    warning: Some(format!("{}，已使用传统方法分析", e)),
                }
            }
        }
    }

    /// 组装画像（学生分组使用最终选定的维度）
    fn build_profile(
        &self,
        dataset: &Dataset,
        class_name: &str,
        stats: Vec<ItemStats>,
        ranked: RankedWeaknesses,
        source: AnalysisSource,
    ) -> ClassWeaknessProfile {
        let students = StudentClassifier::new(&self.config).classify(dataset);
        let student_groups = StudentGroupingEngine::new(&self.config).group(
            dataset,
            &students,
            &ranked.weak_dimensions,
        );

        let description = ranked.description(class_name);
        let test_stats: IndexMap<String, ItemStats> =
            stats.into_iter().map(|s| (s.item.clone(), s)).collect();

        ClassWeaknessProfile {
            class_name: class_name.to_string(),
            grade: extract_grade(class_name),
            weak_dimensions: ranked.weak_dimensions,
            weakness_justifications: ranked.justifications,
            weakness_items: ranked.items,
            description,
            student_groups,
            test_stats,
            student_count: dataset.len(),
            analysis_source: source,
            analyzed_at: Utc::now(),
        }
    }
}

impl Default for ClassAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

/// 便捷入口: 默认配置分析
pub fn analyze(dataset: &Dataset, class_name: &str) -> ClassWeaknessProfile {
    ClassAnalyzer::default().analyze(dataset, class_name)
}
