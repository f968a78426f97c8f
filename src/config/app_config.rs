// ==========================================
// 班级体测薄弱项分析系统 - 运行配置
// ==========================================
// 来源: 环境变量（便于调试/测试/CI）
// - FITNESS_PROFILE_STORE_PATH: 班级画像 JSON 文件路径
// - FITNESS_MAPPING_PATH: 映射表 JSON 文件（可选）
// - FITNESS_SUMMARIZER_TIMEOUT_SECS: 外部总结服务超时（秒）
// ==========================================

use crate::config::analysis_config::AnalysisConfig;
use crate::config::dimension_mapping::DimensionMapping;
use crate::config::error::{ConfigError, ConfigResult};
use std::path::PathBuf;
use std::time::Duration;

pub mod env_keys {
    pub const PROFILE_STORE_PATH: &str = "FITNESS_PROFILE_STORE_PATH";
    pub const MAPPING_PATH: &str = "FITNESS_MAPPING_PATH";
    pub const SUMMARIZER_TIMEOUT_SECS: &str = "FITNESS_SUMMARIZER_TIMEOUT_SECS";
}

/// 外部总结服务默认超时
pub const DEFAULT_SUMMARIZER_TIMEOUT_SECS: u64 = 15;

const STORE_FILE_NAME: &str = "class_profiles.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub profile_store_path: PathBuf,
    pub analysis: AnalysisConfig,
    pub summarizer_timeout: Duration,
}

impl AppConfig {
    /// 从环境变量加载
    pub fn from_env() -> ConfigResult<Self> {
        let profile_store_path = env_value(env_keys::PROFILE_STORE_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(default_store_path);

        let mapping = match env_value(env_keys::MAPPING_PATH) {
            Some(path) => {
                tracing::info!("使用自定义映射表: {}", path);
                DimensionMapping::from_json_file(&path)?
            }
            None => DimensionMapping::standard(),
        };

        let timeout_secs = match env_value(env_keys::SUMMARIZER_TIMEOUT_SECS) {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                key: env_keys::SUMMARIZER_TIMEOUT_SECS.to_string(),
                value: raw.clone(),
                message: e.to_string(),
            })?,
            None => DEFAULT_SUMMARIZER_TIMEOUT_SECS,
        };

        Ok(Self {
            profile_store_path,
            analysis: AnalysisConfig::with_mapping(mapping),
            summarizer_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 默认画像文件路径: 用户数据目录，拿不到时回退到当前目录
pub fn default_store_path() -> PathBuf {
    let mut path = PathBuf::from(".").join(STORE_FILE_NAME);

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("fitness-class-profile");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join(STORE_FILE_NAME);
        }
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_store_path_file_name() {
        let path = default_store_path();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(STORE_FILE_NAME));
    }
}
