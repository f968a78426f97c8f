// ==========================================
// 班级体测薄弱项分析系统 - 体测项目→薄弱维度映射
// ==========================================
// 每个部署固定一张映射表，可由 JSON 文件注入
// 映射顺序即评估顺序（同分时先评估者保留）
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::{Dimension, GradeScale};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// 等级列名后缀: "<项目>等级"
pub const GRADE_COLUMN_SUFFIX: &str = "等级";

/// 单个体测项目映射
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDimension {
    pub item: String,
    pub dimension: Dimension,
    #[serde(default)]
    pub scale: GradeScale,
}

impl ItemDimension {
    pub fn new(item: &str, dimension: Dimension) -> Self {
        Self {
            item: item.to_string(),
            dimension,
            scale: GradeScale::Standard,
        }
    }

    pub fn with_scale(mut self, scale: GradeScale) -> Self {
        self.scale = scale;
        self
    }

    /// 等级列名
    pub fn grade_column(&self) -> String {
        format!("{}{}", self.item, GRADE_COLUMN_SUFFIX)
    }
}

/// 体测项目→薄弱维度映射表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionMapping {
    pub items: Vec<ItemDimension>,
}

impl Default for DimensionMapping {
    fn default() -> Self {
        Self::standard()
    }
}

impl DimensionMapping {
    /// 内置标准映射表
    pub fn standard() -> Self {
        Self {
            items: vec![
                ItemDimension::new("50米跑", Dimension::Speed),
                ItemDimension::new("一分钟仰卧起坐", Dimension::Strength),
                ItemDimension::new("坐位体前屈", Dimension::Flexibility),
                ItemDimension::new("一分钟跳绳", Dimension::Speed),
                ItemDimension::new("立定跳远", Dimension::Strength),
                ItemDimension::new("800米跑", Dimension::Endurance),
                ItemDimension::new("1000米跑", Dimension::Endurance),
                ItemDimension::new("肺活量", Dimension::Function),
                ItemDimension::new("身高", Dimension::Morphology),
                ItemDimension::new("体重", Dimension::Morphology)
                    .with_scale(GradeScale::BodyWeight),
            ],
        }
    }

    /// 构建并校验
    pub fn new(items: Vec<ItemDimension>) -> ConfigResult<Self> {
        let mapping = Self { items };
        mapping.validate()?;
        Ok(mapping)
    }

    /// 从 JSON 文件加载
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let mapping: DimensionMapping = serde_json::from_str(raw)?;
        mapping.validate()?;
        Ok(mapping)
    }

    /// 映射表不能为空，项目名不能重复
    pub fn validate(&self) -> ConfigResult<()> {
        if self.items.is_empty() {
            return Err(ConfigError::InvalidMapping("映射表为空".to_string()));
        }

        let mut seen = HashSet::new();
        for entry in &self.items {
            let item = entry.item.trim();
            if item.is_empty() {
                return Err(ConfigError::InvalidMapping("项目名称为空".to_string()));
            }
            if !seen.insert(item) {
                return Err(ConfigError::InvalidMapping(format!("项目重复: {}", item)));
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemDimension> {
        self.items.iter()
    }

    pub fn get(&self, item: &str) -> Option<&ItemDimension> {
        self.items.iter().find(|e| e.item == item)
    }

}
