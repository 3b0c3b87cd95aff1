//! 压缩包解压服务 - 业务能力层
//!
//! 调用系统解压程序（默认 `unzip`），每个压缩包解压到同名目录

use crate::config::Config;
use crate::error::{AppResult, ArchiveError};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// 压缩包解压服务
pub struct ArchiveExtractor {
    program: String,
}

impl ArchiveExtractor {
    pub fn new(config: &Config) -> Self {
        Self::with_program(config.unzip_program.clone())
    }

    /// 使用自定义解压程序创建
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// 解压单个压缩包
    ///
    /// # 参数
    /// - `archive`: zip 文件路径
    /// - `dest`: 解压目标目录，不存在时由解压程序创建
    pub async fn extract(&self, archive: &Path, dest: &Path) -> AppResult<()> {
        debug!("解压 {} → {}", archive.display(), dest.display());

        let status = Command::new(&self.program)
            .arg("-o")
            .arg("-q")
            .arg(archive)
            .arg("-d")
            .arg(dest)
            .status()
            .await
            .map_err(|source| ArchiveError::SpawnFailed {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ArchiveError::ExtractFailed {
                archive: archive.to_path_buf(),
                code: status.code(),
            }
            .into());
        }
        Ok(())
    }
}

/// 压缩包对应的解压目录：与压缩包同级、以其文件名（去掉扩展名）命名
pub fn archive_target_dir(archive: &Path) -> Option<PathBuf> {
    let stem = archive.file_stem()?;
    Some(archive.with_file_name(stem))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_archive_target_dir() {
        assert_eq!(
            archive_target_dir(Path::new("/b/1_generated/paper-01.zip")),
            Some(PathBuf::from("/b/1_generated/paper-01"))
        );
        assert_eq!(
            archive_target_dir(Path::new("/b/1_generated/10.1000.x.zip")),
            Some(PathBuf::from("/b/1_generated/10.1000.x"))
        );
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let extractor = ArchiveExtractor::with_program("trainprep-no-such-unzip");
        let result = tokio_test::block_on(
            extractor.extract(Path::new("missing.zip"), Path::new("missing")),
        );
        assert!(matches!(
            result,
            Err(AppError::Archive(ArchiveError::SpawnFailed { .. }))
        ));
    }
}
