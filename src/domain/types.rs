// ==========================================
// 班级体测薄弱项分析系统 - 领域类型定义
// ==========================================
// 薄弱维度: 固定 6 个，所有维度级输出必须取自该集合
// 等级量表: 标准项目 4 档 / 体重 4 档
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 薄弱维度 (Weakness Dimension)
// ==========================================
// 序列化格式: 中文名称 (与班级配置 JSON 一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "形态")]
    Morphology,
    #[serde(rename = "耐力")]
    Endurance,
    #[serde(rename = "力量")]
    Strength,
    #[serde(rename = "柔韧")]
    Flexibility,
    #[serde(rename = "速度")]
    Speed,
    #[serde(rename = "机能")]
    Function,
}

impl Dimension {
    /// 全部 6 个允许的薄弱维度
    pub const ALL: [Dimension; 6] = [
        Dimension::Morphology,
        Dimension::Endurance,
        Dimension::Strength,
        Dimension::Flexibility,
        Dimension::Speed,
        Dimension::Function,
    ];

    /// 中文名称
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Morphology => "形态",
            Dimension::Endurance => "耐力",
            Dimension::Strength => "力量",
            Dimension::Flexibility => "柔韧",
            Dimension::Speed => "速度",
            Dimension::Function => "机能",
        }
    }

    /// 从中文名称解析（不在 6 个维度内返回 None）
    pub fn from_name(name: &str) -> Option<Dimension> {
        let trimmed = name.trim();
        Dimension::ALL.into_iter().find(|d| d.name() == trimmed)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::from_name(s).ok_or_else(|| format!("未知的薄弱维度: {}", s))
    }
}

/// 按名称字符串排序并以 "+" 连接（分组键）
pub fn join_dimension_key(dimensions: &[Dimension]) -> String {
    let mut names: Vec<&str> = dimensions.iter().map(|d| d.name()).collect();
    names.sort_unstable();
    names.dedup();
    names.join("+")
}

// ==========================================
// 等级量表 (Grade Scale)
// ==========================================
// Standard: 优秀 / 良好 / 及格 / 不及格
// BodyWeight: 正常 / 超重 / 肥胖 / 低体重
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeScale {
    #[default]
    Standard,
    BodyWeight,
}

impl GradeScale {
    /// 该量表的 4 个等级（固定顺序）
    pub fn categories(&self) -> [&'static str; 4] {
        match self {
            GradeScale::Standard => [
                grade_labels::EXCELLENT,
                grade_labels::GOOD,
                grade_labels::PASS,
                grade_labels::FAIL,
            ],
            GradeScale::BodyWeight => [
                grade_labels::NORMAL,
                grade_labels::OVERWEIGHT,
                grade_labels::OBESE,
                grade_labels::UNDERWEIGHT,
            ],
        }
    }

    /// 学生在该项目上是否薄弱
    ///
    /// - 体重: 除"正常"外的 超重/肥胖/低体重 均为薄弱
    /// - 其他: 及格/不及格 为薄弱，优秀/良好 不薄弱
    pub fn is_weak_grade(&self, grade: &str) -> bool {
        let grade = grade.trim();
        match self {
            GradeScale::Standard => grade == grade_labels::PASS || grade == grade_labels::FAIL,
            GradeScale::BodyWeight => matches!(
                grade,
                grade_labels::OVERWEIGHT | grade_labels::OBESE | grade_labels::UNDERWEIGHT
            ),
        }
    }
}

impl fmt::Display for GradeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeScale::Standard => write!(f, "standard"),
            GradeScale::BodyWeight => write!(f, "body_weight"),
        }
    }
}

/// 等级取值
pub mod grade_labels {
    pub const EXCELLENT: &str = "优秀";
    pub const GOOD: &str = "良好";
    pub const PASS: &str = "及格";
    pub const FAIL: &str = "不及格";

    pub const NORMAL: &str = "正常";
    pub const OVERWEIGHT: &str = "超重";
    pub const OBESE: &str = "肥胖";
    pub const UNDERWEIGHT: &str = "低体重";
}

// ==========================================
// 分析来源 (Analysis Source)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    /// 确定性排序引擎
    #[default]
    Deterministic,
    /// 外部文本生成服务
    Summarizer,
}
