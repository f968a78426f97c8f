// ==========================================
// 班级体测薄弱项分析系统 - 班级画像 API
// ==========================================
// 职责: 上传分析 / 批量分析 / 画像查询与删除 / 文本中识别班级
// 流程: 文件解析 (importer) → 分析 (engine) → 保存 (repository)
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::app_config::AppConfig;
use crate::domain::dataset::Dataset;
use crate::domain::profile::ClassWeaknessProfile;
use crate::engine::analyzer::{ClassAnalyzer, SummarizedAnalysis};
use crate::engine::summarizer::WeaknessSummarizer;
use crate::importer::error::ImportError;
use crate::importer::file_parser::UniversalFileParser;
use crate::repository::profile_repo::{ProfileCollection, ProfileRepository};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CLASS_SUFFIX: char = '班';

/// 批量分析中单个文件的失败记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchFailure {
    pub file_name: String,
    pub error: String,
}

/// 批量分析结果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// 处理的文件数
    pub total: usize,
    /// 成功分析并保存的班级
    pub succeeded: Vec<String>,
    /// 失败的文件（不影响其他文件）
    pub failed: Vec<BatchFailure>,
}

/// 文本中识别到的班级及课课练参数预填
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMatch {
    pub class_name: String,
    pub grades_query: String,
    pub trained_weaknesses: String,
}

/// 班级画像API
pub struct ClassProfileApi {
    repo: ProfileRepository,
    analyzer: ClassAnalyzer,
    parser: UniversalFileParser,
    summarizer_timeout: Duration,
}

impl ClassProfileApi {
    /// 创建新的ClassProfileApi实例
    pub fn new(config: AppConfig) -> Self {
        Self {
            repo: ProfileRepository::new(config.profile_store_path),
            analyzer: ClassAnalyzer::new(config.analysis),
            parser: UniversalFileParser,
            summarizer_timeout: config.summarizer_timeout,
        }
    }

    // ==========================================
    // 上传分析
    // ==========================================

    /// 上传班级体测文件并分析
    ///
    /// # 参数
    /// - bytes: 文件内容
    /// - file_name: 原始文件名（用于识别格式）
    /// - class_name: 班级名称
    ///
    /// # 返回
    /// - Ok(ClassWeaknessProfile): 已保存的班级画像
    /// - Err(ApiError): 输入无效 / 文件无法解析 / 保存失败
    pub fn upload_and_analyze(
        &self,
        bytes: &[u8],
        file_name: &str,
        class_name: &str,
    ) -> ApiResult<ClassWeaknessProfile> {
        let (dataset, class_name) = self.parse_upload(bytes, file_name, class_name)?;
        let profile = self.analyzer.analyze(&dataset, &class_name);
        self.repo.upsert(&class_name, &profile)?;
        Ok(profile)
    }

    /// 上传分析（先尝试外部总结服务，失败时回退）
    pub async fn upload_and_analyze_with_summarizer(
        &self,
        bytes: &[u8],
        file_name: &str,
        class_name: &str,
        summarizer: &dyn WeaknessSummarizer,
    ) -> ApiResult<SummarizedAnalysis> {
        let (dataset, class_name) = self.parse_upload(bytes, file_name, class_name)?;
        let result = self
            .analyzer
            .analyze_with_summarizer(&dataset, &class_name, summarizer, self.summarizer_timeout)
            .await;
        self.repo.upsert(&class_name, &result.profile)?;
        Ok(result)
    }

    /// 分析本地文件；未给班级名称时取文件名（不含扩展名）
    pub fn analyze_file(
        &self,
        path: &Path,
        class_name: Option<&str>,
    ) -> ApiResult<ClassWeaknessProfile> {
        let class_name = match class_name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => class_name_from_path(path)
                .ok_or_else(|| ApiError::InvalidInput("请提供班级名称".to_string()))?,
        };

        let dataset = self.parser.parse(path)?;
        let profile = self.analyzer.analyze(&dataset, &class_name);
        self.repo.upsert(&class_name, &profile)?;
        Ok(profile)
    }

    fn parse_upload(
        &self,
        bytes: &[u8],
        file_name: &str,
        class_name: &str,
    ) -> ApiResult<(Dataset, String)> {
        let class_name = class_name.trim();
        if class_name.is_empty() {
            return Err(ApiError::InvalidInput("请提供班级名称".to_string()));
        }
        if file_name.trim().is_empty() {
            return Err(ApiError::InvalidInput("请选择文件".to_string()));
        }

        let dataset = self.parser.parse_upload(file_name, bytes)?;
        Ok((dataset, class_name.to_string()))
    }

    // ==========================================
    // 批量分析
    // ==========================================

    /// 批量分析目录中的体测文件
    ///
    /// 文件按文件名排序，班级名称取文件名（不含扩展名）；
    /// 单个文件失败只记录，不中断其余文件。
    pub fn batch_analyze_dir(&self, dir: &Path, max_count: Option<usize>) -> ApiResult<BatchReport> {
        if !dir.is_dir() {
            return Err(ApiError::InvalidInput(format!(
                "目录不存在: {}",
                dir.display()
            )));
        }

        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(ImportError::from)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && UniversalFileParser::is_supported(path))
            .collect();
        files.sort();
        if let Some(limit) = max_count {
            files.truncate(limit);
        }

        let mut report = BatchReport {
            total: files.len(),
            ..BatchReport::default()
        };

        for path in &files {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            match self.analyze_file(path, None) {
                Ok(profile) => {
                    tracing::info!(file = %file_name, class_name = %profile.class_name, "批量分析: 完成");
                    report.succeeded.push(profile.class_name);
                }
                Err(e) => {
                    tracing::warn!(file = %file_name, error = %e, "批量分析: 文件失败");
                    report.failed.push(BatchFailure {
                        file_name,
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            total = report.total,
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "批量分析结束"
        );
        Ok(report)
    }

    // ==========================================
    // 画像查询 / 删除
    // ==========================================

    pub fn list_profiles(&self) -> ApiResult<ProfileCollection> {
        Ok(self.repo.get_all()?)
    }

    pub fn get_profile(&self, class_name: &str) -> ApiResult<ClassWeaknessProfile> {
        self.repo
            .get(class_name)?
            .ok_or_else(|| ApiError::NotFound(format!("班级画像不存在: {}", class_name)))
    }

    /// 删除班级画像；不存在时返回 false
    pub fn delete_profile(&self, class_name: &str) -> ApiResult<bool> {
        Ok(self.repo.delete(class_name)?)
    }

    // ==========================================
    // 文本中识别班级
    // ==========================================

    /// 在自由文本中识别已保存的班级，返回课课练参数预填
    ///
    /// 较长的班级名称优先（"一年级一班" 优先于 "一年级"）。
    pub fn detect_class(&self, text: &str) -> ApiResult<Option<ClassMatch>> {
        let profiles = self.repo.get_all()?;

        let mut names: Vec<&String> = profiles.keys().collect();
        names.sort_by_key(|name| Reverse(name.chars().count()));

        for name in names {
            if !is_whole_class_match(text, name) {
                continue;
            }
            if let Some(profile) = profiles.get(name) {
                tracing::info!(class_name = %name, "识别到班级");
                return Ok(Some(ClassMatch {
                    class_name: name.clone(),
                    grades_query: profile.grade.clone(),
                    trained_weaknesses: profile.trained_weaknesses(),
                }));
            }
        }

        Ok(None)
    }
}

/// 检查班级名称在文本中首次出现的位置是否为完整匹配
///
/// - 前一个字符不能是数字
/// - 名称含 "班" 时，后一个字符不能是数字或 "班"
/// - 名称不含 "班" 时，后一个字符不能是数字
fn is_whole_class_match(text: &str, class_name: &str) -> bool {
    if class_name.is_empty() {
        return false;
    }
    let Some(idx) = text.find(class_name) else {
        return false;
    };

    let before = text[..idx].chars().next_back();
    let after = text[idx + class_name.len()..].chars().next();

    if before.is_some_and(|c| c.is_numeric()) {
        return false;
    }

    match after {
        Some(c) if c.is_numeric() => false,
        Some(c) if c == CLASS_SUFFIX => !class_name.contains(CLASS_SUFFIX),
        _ => true,
    }
}

fn class_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_class_match_rules() {
        assert!(is_whole_class_match("给一年级一班设计课课练", "一年级一班"));
        assert!(!is_whole_class_match("一年级一班2组", "一年级一班"));
        assert!(!is_whole_class_match("1一年级一班", "一年级一班"));
        assert!(!is_whole_class_match("一年级一班班", "一年级一班"));

        // 名称不含 "班" 时允许后接 "班"
        assert!(is_whole_class_match("kkk班级的课", "kkk"));
        assert!(!is_whole_class_match("kkk3", "kkk"));
        assert!(!is_whole_class_match("没有提到", "kkk"));
    }

    #[test]
    fn test_class_name_from_path() {
        assert_eq!(
            class_name_from_path(Path::new("/data/五年级3班.xlsx")),
            Some("五年级3班".to_string())
        );
        assert_eq!(class_name_from_path(Path::new("/")), None);
    }
}
