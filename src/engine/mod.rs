// ==========================================
// 班级体测薄弱项分析系统 - 引擎层
// ==========================================
// 职责: 体测分析规则，不做 IO
// 红线: 所有维度级输出只能取自 6 个允许维度
// ==========================================

pub mod analyzer;
pub mod grade_classifier;
pub mod grade_extractor;
pub mod student_classifier;
pub mod student_grouping;
pub mod summarizer;
pub mod weakness_ranker;
pub mod weakness_scorer;

// 重导出核心引擎
pub use analyzer::{analyze, ClassAnalyzer, SummarizedAnalysis};
pub use grade_classifier::{GradeClassifier, GradeDistribution};
pub use grade_extractor::{extract_grade, DEFAULT_GRADE};
pub use student_classifier::{StudentClassifier, StudentWeakness};
pub use student_grouping::StudentGroupingEngine;
pub use summarizer::{
    parse_summary, ParsedSummary, SummarizerError, SummaryRequest, WeaknessSummarizer,
};
pub use weakness_ranker::{RankedWeaknesses, WeaknessRanker};
pub use weakness_scorer::WeaknessScorer;
