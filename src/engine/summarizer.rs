// ==========================================
// 班级体测薄弱项分析系统 - 外部总结服务接口
// ==========================================
// 外部文本生成服务是可选协作方:
// - 调用受超时约束
// - 失败 / 超时 / 输出无法解析 => 回退到确定性排序结果
// ==========================================

use crate::config::analysis_config::WEAK_DIMENSION_LIMIT;
use crate::domain::profile::ItemStats;
use crate::domain::types::Dimension;
use async_trait::async_trait;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;

static RE_JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*(\{.*?\})\s*```").expect("static regex"));

/// 外部总结服务错误
#[derive(Error, Debug)]
pub enum SummarizerError {
    #[error("总结服务请求失败: {0}")]
    Request(String),

    #[error("总结服务超时 ({0:?})")]
    Timeout(Duration),

    #[error("总结结果无法解析: {0}")]
    InvalidOutput(String),
}

/// 提交给外部服务的班级数据摘要
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRequest {
    pub class_name: String,
    pub grade: String,
    pub student_count: usize,
    pub item_stats: Vec<ItemStats>,
}

/// 外部文本生成服务
#[async_trait]
pub trait WeaknessSummarizer: Send + Sync {
    /// 返回原始文本（期望包含 ```json {...}``` 结构化块）
    async fn summarize(&self, request: &SummaryRequest) -> Result<String, SummarizerError>;
}

/// 解析后的总结
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSummary {
    pub weak_dimensions: Vec<Dimension>,
    pub justifications: IndexMap<Dimension, String>,
}

#[derive(Debug, Deserialize)]
struct RawSummary {
    #[serde(default)]
    weaknesses: Vec<String>,
    #[serde(default)]
    weakness_details: IndexMap<String, String>,
}

/// 解析外部服务输出
///
/// 未知维度被丢弃，最多保留 2 个；没有任何有效维度视为无法解析。
pub fn parse_summary(text: &str) -> Result<ParsedSummary, SummarizerError> {
    let json = extract_json_block(text)
        .ok_or_else(|| SummarizerError::InvalidOutput("未找到 JSON 结构".to_string()))?;

    let raw: RawSummary = serde_json::from_str(json)
        .map_err(|e| SummarizerError::InvalidOutput(e.to_string()))?;

    let mut weak_dimensions: Vec<Dimension> = Vec::new();
    for name in &raw.weaknesses {
        if let Some(dimension) = Dimension::from_name(name) {
            if !weak_dimensions.contains(&dimension) {
                weak_dimensions.push(dimension);
            }
        }
    }
    weak_dimensions.truncate(WEAK_DIMENSION_LIMIT);

    if weak_dimensions.is_empty() {
        return Err(SummarizerError::InvalidOutput(
            "没有可用的薄弱维度".to_string(),
        ));
    }

    let justifications = weak_dimensions
        .iter()
        .filter_map(|d| {
            raw.weakness_details
                .get(d.name())
                .map(|detail| (*d, detail.trim().to_string()))
        })
        .collect();

    Ok(ParsedSummary {
        weak_dimensions,
        justifications,
    })
}

/// 优先取 ```json 代码块，其次取最外层花括号
fn extract_json_block(text: &str) -> Option<&str> {
    if let Some(m) = RE_JSON_FENCE.captures(text).and_then(|caps| caps.get(1)) {
        return Some(m.as_str());
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// 调用外部服务；任何失败都返回 Err，由调用方回退
pub async fn summarize_with_timeout(
    summarizer: &dyn WeaknessSummarizer,
    request: &SummaryRequest,
    timeout: Duration,
) -> Result<ParsedSummary, SummarizerError> {
    let text = match tokio::time::timeout(timeout, summarizer.summarize(request)).await {
        Ok(result) => result?,
        Err(_) => return Err(SummarizerError::Timeout(timeout)),
    };
    parse_summary(&text)
}
