// ==========================================
// ClassAnalyzer 集成测试
// ==========================================
// 测试目标: 验证完整的班级分析流程
// 统计 → 薄弱分数 → 维度排序 → 学生分组 → 外部总结回退
// ==========================================


use async_trait::async_trait;
use fitness_class_profile::domain::{AnalysisSource, Dimension};
use fitness_class_profile::engine::{
    analyze, ClassAnalyzer, SummarizerError, SummaryRequest, WeaknessSummarizer,
};
use fitness_class_profile::logging;
use std::time::Duration;
use test_helpers::{scenario_dataset, DatasetBuilder, SCENARIO_CLASS};

const TIMEOUT: Duration = Duration::from_millis(200);

// ==========================================
// 外部总结服务 Mock
// ==========================================

struct FixedSummarizer(&'static str);

#[async_trait]
impl WeaknessSummarizer for FixedSummarizer {
    async fn summarize(&self, _request: &SummaryRequest) -> Result<String, SummarizerError> {
        Ok(self.0.to_string())
    }
}

struct FailingSummarizer;

#[async_trait]
impl WeaknessSummarizer for FailingSummarizer {
    async fn summarize(&self, _request: &SummaryRequest) -> Result<String, SummarizerError> {
        Err(SummarizerError::Request("connection refused".to_string()))
    }
}

struct SlowSummarizer;

#[async_trait]
impl WeaknessSummarizer for SlowSummarizer {
    async fn summarize(&self, _request: &SummaryRequest) -> Result<String, SummarizerError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(r#"{"weaknesses": ["柔韧"]}"#.to_string())
    }
}

// ==========================================
// 确定性分析
// ==========================================

#[test]
fn test_scenario_item_statistics() {
    logging::init_test();
    let profile = analyze(&scenario_dataset(), SCENARIO_CLASS);

    // 映射表顺序: 50米跑 → 坐位体前屈 → 立定跳远
    let items: Vec<&str> = profile.test_stats.keys().map(String::as_str).collect();
    assert_eq!(items, vec!["50米跑", "坐位体前屈", "立定跳远"]);

    let sprint = &profile.test_stats["50米跑"];
    assert_eq!(sprint.total, 10);
    assert_eq!(
        (sprint.excellent_count, sprint.good_count, sprint.pass_count, sprint.fail_count),
        (2, 3, 4, 1)
    );
    assert!((sprint.excellent_rate - 20.0).abs() < 1e-9);
    assert!((sprint.good_rate - 30.0).abs() < 1e-9);
    assert!((sprint.pass_rate - 40.0).abs() < 1e-9);
    assert!((sprint.fail_rate - 10.0).abs() < 1e-9);
    assert!((sprint.score - 140.0).abs() < 1e-9);

    assert!((profile.test_stats["立定跳远"].score - 120.0).abs() < 1e-9);
    assert!((profile.test_stats["坐位体前屈"].score - 20.0).abs() < 1e-9);
}

#[test]
fn test_scenario_weak_dimensions_and_description() {
    let profile = analyze(&scenario_dataset(), SCENARIO_CLASS);

    assert_eq!(profile.grade, "5");
    assert_eq!(profile.student_count, 10);
    assert_eq!(profile.analysis_source, AnalysisSource::Deterministic);
    assert_eq!(
        profile.weak_dimensions,
        vec![Dimension::Speed, Dimension::Strength]
    );
    assert_eq!(profile.weakness_items[&Dimension::Speed], "50米跑");
    assert_eq!(profile.weakness_items[&Dimension::Strength], "立定跳远");
    assert_eq!(
        profile.description,
        "五年级3班体质监测核心薄弱维度：速度（50米跑）、力量（立定跳远）"
    );
    assert_eq!(profile.trained_weaknesses(), "速度、力量");

    let speed = &profile.weakness_justifications[&Dimension::Speed];
    assert!(speed.starts_with("从体测数据来看，速度是五年级3班的薄弱项：50米跑"));
    assert!(speed.contains("仅2人（占比20.0%）达到'优秀'"));
    assert!(speed.contains("1人（占比10.0%）为'不及格'"));
}

#[test]
fn test_scenario_student_groups() {
    let profile = analyze(&scenario_dataset(), SCENARIO_CLASS);

    // 按人数降序
    let keys: Vec<&str> = profile.student_groups.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["速度", "力量+速度"]);

    let speed = &profile.student_groups["速度"];
    assert_eq!(speed.count, 4);
    assert_eq!(speed.students, vec!["S07", "S08", "S09", "S10"]);
    assert_eq!(speed.weakness_items, vec!["50米跑"]);

    let both = &profile.student_groups["力量+速度"];
    assert_eq!(both.count, 1);
    assert_eq!(both.weakness_items, vec!["50米跑", "立定跳远"]);
    let detail = &both.student_details[0];
    assert_eq!(detail.seq, 6);
    assert_eq!(detail.student_id, "S06");
    assert_eq!(detail.name, "张六");
    assert_eq!(detail.class, None);

    // 只在柔韧薄弱的 S01 不进入任何分组
    assert!(profile
        .student_groups
        .values()
        .all(|g| !g.students.iter().any(|s| s == "S01")));
}

#[test]
fn test_analyze_is_idempotent() {
    let dataset = scenario_dataset();
    let first = analyze(&dataset, SCENARIO_CLASS);
    let mut second = analyze(&dataset, SCENARIO_CLASS);

    second.analyzed_at = first.analyzed_at;
    assert_eq!(first, second);
}

#[test]
fn test_body_weight_item() {
    let dataset = DatasetBuilder::new(&["姓名", "体重等级"])
        .row(&["甲", "正常"])
        .row(&["乙", "正常"])
        .row(&["丙", "正常"])
        .row(&["丁", "正常"])
        .row(&["戊", "正常"])
        .row(&["己", "超重"])
        .row(&["庚", "超重"])
        .row(&["辛", "肥胖"])
        .row(&["壬", "低体重"])
        .row(&["癸", "低体重"])
        .build();

    let profile = analyze(&dataset, "3年级2班");
    let weight = &profile.test_stats["体重"];

    // 正常 → excellent, 超重+低体重 → pass, 肥胖 → fail
    assert_eq!(
        (weight.excellent_count, weight.good_count, weight.pass_count, weight.fail_count),
        (5, 0, 4, 1)
    );
    assert!((weight.score - 130.0).abs() < 1e-9);

    assert_eq!(profile.grade, "3");
    assert_eq!(profile.weak_dimensions, vec![Dimension::Morphology]);
    let group = &profile.student_groups["形态"];
    assert_eq!(group.count, 5);
    assert_eq!(group.students, vec!["己", "庚", "辛", "壬", "癸"]);
}

#[test]
fn test_students_without_identity_get_synthetic_names() {
    let dataset = DatasetBuilder::new(&["50米跑等级"])
        .row(&["优秀"])
        .row(&["不及格"])
        .build();

    let profile = analyze(&dataset, "未知班");
    assert_eq!(profile.grade, "1");
    assert_eq!(profile.student_groups["速度"].students, vec!["学生2"]);
    assert_eq!(
        profile.student_groups["速度"].student_details[0].display_name(),
        "学生2"
    );
}

#[test]
fn test_no_usable_items() {
    let dataset = DatasetBuilder::new(&["姓名", "备注"])
        .row(&["甲", "请假"])
        .build();

    let profile = analyze(&dataset, "一年级1班");
    assert!(profile.weak_dimensions.is_empty());
    assert!(profile.student_groups.is_empty());
    assert!(profile.test_stats.is_empty());
    assert_eq!(profile.description, "一年级1班体质监测数据");
}

// ==========================================
// 外部总结服务
// ==========================================

#[tokio::test]
async fn test_summarizer_result_is_used() {
    let summarizer = FixedSummarizer(
        "结论如下\n```json\n{\"weaknesses\": [\"柔韧\", \"协调\"], \"weakness_details\": {\"柔韧\": \"坐位体前屈及格率偏高\"}}\n```",
    );
    let analyzer = ClassAnalyzer::default();

    let result = analyzer
        .analyze_with_summarizer(&scenario_dataset(), SCENARIO_CLASS, &summarizer, TIMEOUT)
        .await;

    assert!(result.warning.is_none());
    let profile = result.profile;
    assert_eq!(profile.analysis_source, AnalysisSource::Summarizer);
    assert_eq!(profile.weak_dimensions, vec![Dimension::Flexibility]);
    assert_eq!(
        profile.weakness_justifications[&Dimension::Flexibility],
        "坐位体前屈及格率偏高"
    );
    assert_eq!(profile.weakness_items[&Dimension::Flexibility], "坐位体前屈");

    // 分组使用最终选定的维度
    let keys: Vec<&str> = profile.student_groups.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["柔韧"]);
    assert_eq!(profile.student_groups["柔韧"].students, vec!["S01"]);
}

#[tokio::test]
async fn test_summarizer_failure_falls_back() {
    let analyzer = ClassAnalyzer::default();
    let result = analyzer
        .analyze_with_summarizer(&scenario_dataset(), SCENARIO_CLASS, &FailingSummarizer, TIMEOUT)
        .await;

    let warning = result.warning.expect("fallback warning");
    assert!(warning.contains("已使用传统方法分析"));
    assert_eq!(result.profile.analysis_source, AnalysisSource::Deterministic);
    assert_eq!(
        result.profile.weak_dimensions,
        vec![Dimension::Speed, Dimension::Strength]
    );
}

#[tokio::test]
async fn test_summarizer_timeout_falls_back() {
    let analyzer = ClassAnalyzer::default();
    let result = analyzer
        .analyze_with_summarizer(
            &scenario_dataset(),
            SCENARIO_CLASS,
            &SlowSummarizer,
            Duration::from_millis(50),
        )
        .await;

    // 亚秒级超时按原值报告
    assert!(result
        .warning
        .is_some_and(|w| w.contains("超时") && w.contains("50ms")));
    assert_eq!(
        result.profile.weak_dimensions,
        vec![Dimension::Speed, Dimension::Strength]
    );
}

#[tokio::test]
async fn test_unparseable_summary_falls_back() {
    let summarizer = FixedSummarizer("这个班级整体不错");
    let analyzer = ClassAnalyzer::default();

    let result = analyzer
        .analyze_with_summarizer(&scenario_dataset(), SCENARIO_CLASS, &summarizer, TIMEOUT)
        .await;

    assert!(result.warning.is_some());
    assert_eq!(result.profile.analysis_source, AnalysisSource::Deterministic);
    assert_eq!(result.profile.student_groups["速度"].count, 4);
}

#[tokio::test]
async fn test_summarized_dimension_without_data_has_no_justification() {
    // 数据中没有 肺活量 列
    let summarizer = FixedSummarizer(r#"{"weaknesses": ["机能"], "weakness_details": {}}"#);
    let analyzer = ClassAnalyzer::default();

    let result = analyzer
        .analyze_with_summarizer(&scenario_dataset(), SCENARIO_CLASS, &summarizer, TIMEOUT)
        .await;

    let profile = result.profile;
    assert_eq!(profile.analysis_source, AnalysisSource::Summarizer);
    assert_eq!(profile.weak_dimensions, vec![Dimension::Function]);
    assert!(!profile.weakness_justifications.contains_key(&Dimension::Function));
    assert!(profile.weakness_justifications.values().all(|j| !j.is_empty()));
    assert!(!profile.weakness_items.contains_key(&Dimension::Function));
    assert_eq!(profile.description, "五年级3班体质监测核心薄弱维度：机能");
    assert!(profile.student_groups.is_empty());
}
