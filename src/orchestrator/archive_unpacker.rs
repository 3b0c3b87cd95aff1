//! 压缩包解压 - 编排层
//!
//! 把生成阶段中的每个 zip 解压到同名目录；单个压缩包失败只记录并计数。

use crate::error::{AppResult, BatchError};
use crate::models::BatchLayout;
use crate::services::archive_extractor::{archive_target_dir, ArchiveExtractor};
use crate::services::source_scanner::sorted_entries;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// 解压统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnzipStats {
    pub extracted: usize,
    pub failed: usize,
}

/// 解压批次中所有训练包
pub async fn unpack_batch(layout: &BatchLayout, extractor: &ArchiveExtractor) -> AppResult<UnzipStats> {
    let generated_dir = layout.generated_dir();
    if !generated_dir.is_dir() {
        return Err(BatchError::StageNotFound {
            path: generated_dir,
        }
        .into());
    }

    let archives = list_archives(&generated_dir)?;
    info!("✓ 找到 {} 个压缩包", archives.len());

    let mut stats = UnzipStats::default();
    let total = archives.len();

    for (idx, archive) in archives.iter().enumerate() {
        let Some(dest) = archive_target_dir(archive) else {
            continue;
        };
        match extractor.extract(archive, &dest).await {
            Ok(()) => {
                info!("[{}/{}] ✓ {}", idx + 1, total, dest.display());
                stats.extracted += 1;
            }
            Err(e) => {
                error!("[{}/{}] ❌ {}", idx + 1, total, e);
                stats.failed += 1;
            }
        }
    }

    Ok(stats)
}

/// 列出目录中的 zip 文件，按路径排序
pub fn list_archives(dir: &Path) -> AppResult<Vec<PathBuf>> {
    let archives = sorted_entries(dir)?
        .into_iter()
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
        })
        .filter(|path| path.is_file())
        .collect();
    Ok(archives)
}
