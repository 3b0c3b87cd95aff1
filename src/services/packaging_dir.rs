//! 打包目录构建 - 业务能力层
//!
//! 先在同级的 staging 目录中构建完整结果，成功后再整体替换旧的打包目录。
//! 构建过程中失败时，旧的打包目录保持不变。

use crate::error::{AppError, AppResult, FileError};
use crate::models::{BatchLayout, ModelType};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 每个模型目录下的 TEI 子目录
pub const TEI_DIR: &str = "tei";
/// 每个模型目录下的原始文件子目录
pub const RAW_DIR: &str = "raw";

/// 构建中的打包目录
///
/// 未调用 [`StagedPackaging::commit`] 就被丢弃时，staging 目录会被删除
#[derive(Debug)]
pub struct StagedPackaging {
    staging: PathBuf,
    target: PathBuf,
    retired: PathBuf,
    committed: bool,
}

impl StagedPackaging {
    /// 创建 staging 目录，并为每个模型建立 `tei/` 与 `raw/`
    ///
    /// # 参数
    /// - `layout`: 批次目录布局
    /// - `models`: 已发现的模型类型
    pub fn create(layout: &BatchLayout, models: &[ModelType]) -> AppResult<Self> {
        let staging = layout.staging_dir();
        // 上次中断遗留的 staging
        remove_if_exists(&staging)?;
        fs::create_dir_all(&staging).map_err(|e| AppError::create_dir_failed(&staging, e))?;

        let staged = Self {
            staging,
            target: layout.packaging_dir(),
            retired: layout.retired_dir(),
            committed: false,
        };

        for model in models {
            for sub in [TEI_DIR, RAW_DIR] {
                let dir = staged.staging.join(model.as_str()).join(sub);
                fs::create_dir_all(&dir).map_err(|e| AppError::create_dir_failed(&dir, e))?;
            }
        }
        debug!(
            "已在 {} 中创建 {} 个模型目录",
            staged.staging.display(),
            models.len()
        );

        Ok(staged)
    }

    /// staging 根目录，复制文件时写入这里
    pub fn root(&self) -> &Path {
        &self.staging
    }

    /// 用 staging 目录替换最终打包目录
    ///
    /// # 返回
    /// 最终打包目录路径
    pub fn commit(mut self) -> AppResult<PathBuf> {
        remove_if_exists(&self.retired)?;

        // 目标可能是文件或失效的符号链接，exists() 无法识别后者
        let had_previous = fs::symlink_metadata(&self.target).is_ok();
        if had_previous {
            rename(&self.target, &self.retired)?;
        }

        if let Err(e) = rename(&self.staging, &self.target) {
            if had_previous {
                if let Err(restore) = fs::rename(&self.retired, &self.target) {
                    warn!(
                        "⚠️ 无法恢复旧的打包目录 {}: {}",
                        self.retired.display(),
                        restore
                    );
                }
            }
            return Err(e);
        }
        self.committed = true;

        // 新结果已就位，旧目录清理失败不影响本次打包
        if had_previous {
            if let Err(e) = remove_if_exists(&self.retired) {
                warn!("⚠️ 清理旧的打包目录失败: {}", e);
            }
        }

        Ok(self.target.clone())
    }
}

impl Drop for StagedPackaging {
    fn drop(&mut self) {
        if !self.committed && self.staging.exists() {
            if let Err(e) = fs::remove_dir_all(&self.staging) {
                warn!("⚠️ 清理 staging 目录失败 {}: {}", self.staging.display(), e);
            }
        }
    }
}

/// 删除目录、文件或符号链接；不存在时什么也不做
fn remove_if_exists(path: &Path) -> AppResult<()> {
    let Ok(metadata) = fs::symlink_metadata(path) else {
        return Ok(());
    };
    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| AppError::delete_failed(path, e))
}

fn rename(from: &Path, to: &Path) -> AppResult<()> {
    fs::rename(from, to).map_err(|source| {
        AppError::File(FileError::RenameFailed {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{parse_tei_file_name, TeiName};
    use tempfile::TempDir;

    fn models(names: &[&str]) -> Vec<ModelType> {
        names
            .iter()
            .filter_map(|n| match parse_tei_file_name(&format!("x.{}.tei.xml", n)) {
                TeiName::Match { model, .. } => Some(model),
                TeiName::NoMatch(_) => None,
            })
            .collect()
    }

    fn child_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_creates_tei_and_raw_per_model_only() {
        let dir = TempDir::new().unwrap();
        let layout = BatchLayout::new(dir.path(), &Config::default());

        let staged = StagedPackaging::create(&layout, &models(&["funding", "segmentation"])).unwrap();
        assert_eq!(child_names(staged.root()), vec!["funding", "segmentation"]);
        assert_eq!(
            child_names(&staged.root().join("funding")),
            vec!["raw", "tei"]
        );
        assert!(child_names(&staged.root().join("segmentation/raw")).is_empty());

        let target = staged.commit().unwrap();
        assert_eq!(target, dir.path().join("4_packaging"));
        assert!(target.join("segmentation/tei").is_dir());
        assert!(!layout.staging_dir().exists());
        assert!(!layout.retired_dir().exists());
    }

    #[test]
    fn test_commit_replaces_previous_output() {
        let dir = TempDir::new().unwrap();
        let layout = BatchLayout::new(dir.path(), &Config::default());
        fs::create_dir_all(dir.path().join("4_packaging/header/tei")).unwrap();
        fs::write(dir.path().join("4_packaging/header/tei/old.header.tei.xml"), b"").unwrap();

        let staged = StagedPackaging::create(&layout, &models(&["funding"])).unwrap();
        let target = staged.commit().unwrap();

        assert_eq!(child_names(&target), vec!["funding"]);
    }

    #[test]
    fn test_dropped_staging_leaves_previous_output() {
        let dir = TempDir::new().unwrap();
        let layout = BatchLayout::new(dir.path(), &Config::default());
        fs::create_dir_all(dir.path().join("4_packaging/header/tei")).unwrap();

        {
            let staged = StagedPackaging::create(&layout, &models(&["funding"])).unwrap();
            assert!(staged.root().exists());
        }

        assert!(!layout.staging_dir().exists());
        assert_eq!(child_names(&layout.packaging_dir()), vec!["header"]);
    }

    #[test]
    fn test_commit_replaces_plain_file_at_target() {
        let dir = TempDir::new().unwrap();
        let layout = BatchLayout::new(dir.path(), &Config::default());
        fs::write(layout.packaging_dir(), b"not a directory").unwrap();

        for _ in 0..2 {
            let staged = StagedPackaging::create(&layout, &models(&["funding"])).unwrap();
            let target = staged.commit().unwrap();
            assert_eq!(child_names(&target), vec!["funding"]);
        }
        assert!(!layout.retired_dir().exists());
    }

    #[test]
    fn test_stale_retired_file_is_cleared() {
        let dir = TempDir::new().unwrap();
        let layout = BatchLayout::new(dir.path(), &Config::default());
        fs::write(layout.retired_dir(), b"leftover").unwrap();
        fs::write(layout.staging_dir(), b"leftover").unwrap();

        let staged = StagedPackaging::create(&layout, &models(&["header"])).unwrap();
        staged.commit().unwrap();
        assert!(layout.packaging_dir().join("header/tei").is_dir());
        assert!(fs::symlink_metadata(layout.retired_dir()).is_err());
    }

    #[test]
    fn test_stale_staging_is_replaced() {
        let dir = TempDir::new().unwrap();
        let layout = BatchLayout::new(dir.path(), &Config::default());
        fs::create_dir_all(layout.staging_dir().join("leftover")).unwrap();

        let staged = StagedPackaging::create(&layout, &models(&["header"])).unwrap();
        assert_eq!(child_names(staged.root()), vec!["header"]);
    }
}
