// ==========================================
// 班级体测薄弱项分析系统 - 年级提取
// ==========================================
// 规则: 取 "年级" 前的数字或中文数字（一 ~ 十）
// 未匹配: 默认 "1"
// ==========================================

use regex::Regex;
use std::sync::LazyLock;

/// 无法识别年级时的默认值
pub const DEFAULT_GRADE: &str = "1";

static RE_GRADE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+|[一二三四五六七八九十]+)\s*年级").expect("static regex"));

/// 从班级名称提取年级
///
/// ```
/// use fitness_class_profile::engine::extract_grade;
/// assert_eq!(extract_grade("五年级3班"), "5");
/// assert_eq!(extract_grade("3年级2班"), "3");
/// assert_eq!(extract_grade("未知班"), "1");
/// ```
pub fn extract_grade(class_name: &str) -> String {
    RE_GRADE
        .captures(class_name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| normalize_numeral(m.as_str()))
        .unwrap_or_else(|| DEFAULT_GRADE.to_string())
}

/// 阿拉伯数字原样返回（去掉前导 0）；中文数字仅支持 一 ~ 十
fn normalize_numeral(raw: &str) -> Option<String> {
    if raw.chars().all(|c| c.is_ascii_digit()) {
        let trimmed = raw.trim_start_matches('0');
        return if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    let value = match raw {
        "一" => 1,
        "二" => 2,
        "三" => 3,
        "四" => 4,
        "五" => 5,
        "六" => 6,
        "七" => 7,
        "八" => 8,
        "九" => 9,
        "十" => 10,
        _ => return None,
    };
    Some(value.to_string())
}
