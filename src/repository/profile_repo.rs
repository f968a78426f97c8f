// ==========================================
// 班级体测薄弱项分析系统 - 班级画像仓储
// ==========================================
// 存储: 单个 UTF-8 JSON 文件 { 班级名称: 画像 }
// 红线: Repository 不含业务逻辑
// ==========================================
// 并发: 进程级互斥锁串行化 读-改-写
// 写入: 临时文件 + 原子 rename，不会留下半截文件
// 容错: 文件不存在 / 为空 / 损坏 => 视为空集合
// ==========================================

use crate::domain::profile::ClassWeaknessProfile;
use crate::repository::error::{RepositoryError, RepositoryResult};
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// 班级画像集合（保持写入顺序）
pub type ProfileCollection = IndexMap<String, ClassWeaknessProfile>;

// 同一进程内所有仓储实例共享，保证同一文件的读-改-写不交错
static STORE_LOCK: Mutex<()> = Mutex::new(());

// ==========================================
// ProfileRepository - 班级画像仓储
// ==========================================
pub struct ProfileRepository {
    path: PathBuf,
}

impl ProfileRepository {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'static, ()>> {
        STORE_LOCK
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 插入或覆盖班级画像
    pub fn upsert(&self, class_name: &str, profile: &ClassWeaknessProfile) -> RepositoryResult<()> {
        if class_name.trim().is_empty() {
            return Err(RepositoryError::ValidationError(
                "班级名称不能为空".to_string(),
            ));
        }

        let _guard = self.lock()?;
        let mut profiles = self.read_collection();
        let replaced = profiles
            .insert(class_name.to_string(), profile.clone())
            .is_some();
        self.write_collection(&profiles)?;

        tracing::info!(
            class_name = %class_name,
            replaced,
            total = profiles.len(),
            "班级画像已保存"
        );
        Ok(())
    }

    /// 删除班级画像；不存在时返回 false
    pub fn delete(&self, class_name: &str) -> RepositoryResult<bool> {
        let _guard = self.lock()?;
        if !self.path.exists() {
            return Ok(false);
        }

        let mut profiles = self.read_collection();
        if profiles.shift_remove(class_name).is_none() {
            return Ok(false);
        }
        self.write_collection(&profiles)?;

        tracing::info!(class_name = %class_name, remaining = profiles.len(), "班级画像已删除");
        Ok(true)
    }

    /// 读取全部画像
    pub fn get_all(&self) -> RepositoryResult<ProfileCollection> {
        let _guard = self.lock()?;
        Ok(self.read_collection())
    }

    /// 按班级名称读取
    pub fn get(&self, class_name: &str) -> RepositoryResult<Option<ClassWeaknessProfile>> {
        let _guard = self.lock()?;
        Ok(self.read_collection().shift_remove(class_name))
    }

    // ==========================================
    // 文件读写（调用方需持有锁）
    // ==========================================

    fn read_collection(&self) -> ProfileCollection {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return ProfileCollection::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "画像文件读取失败，按空集合处理");
                return ProfileCollection::new();
            }
        };

        if content.trim().is_empty() {
            return ProfileCollection::new();
        }

        match serde_json::from_str(&content) {
            Ok(profiles) => profiles,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "画像文件损坏，按空集合处理");
                ProfileCollection::new()
            }
        }
    }

    fn write_collection(&self, profiles: &ProfileCollection) -> RepositoryResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(profiles)?;
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            self.io_error(e)
        })
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, err: std::io::Error) -> RepositoryError {
        RepositoryError::StoreIoError {
            path: self.path.display().to_string(),
            message: err.to_string(),
        }
    }
}
