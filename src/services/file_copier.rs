//! 文件分类与复制 - 业务能力层
//!
//! TEI 文件按文件名中的模型名归入 `<model>/tei/`；
//! `.segmentation` 文件只归入 `segmentation/raw/`，且从不创建新的模型目录。

use crate::error::{AppError, AppResult};
use crate::models::{parse_tei_file_name, TeiName, SEGMENTATION_MODEL, SEGMENTATION_SUFFIX, TEI_SUFFIX};
use crate::services::packaging_dir::{RAW_DIR, TEI_DIR};
use crate::services::source_scanner::scan_all;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 复制统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CopyStats {
    /// 已复制的 TEI 文件数
    pub tei_copied: usize,
    /// 已复制的 segmentation 原始文件数
    pub segmentation_copied: usize,
    /// 因没有 segmentation 模型而跳过的原始文件数
    pub segmentation_skipped: usize,
    /// 文件名中解析不出模型名的 TEI 文件数
    pub unparsed_tei: usize,
    /// 解析出模型名但打包目录中没有对应 `tei/` 的 TEI 文件数
    pub tei_missing_destination: usize,
}

/// 将源目录中的文件分类复制到打包目录
///
/// # 参数
/// - `source_dirs`: 源阶段目录（与发现阶段相同）
/// - `packaging_root`: 已建好模型目录的打包根目录
///
/// # 返回
/// 复制统计；任一文件复制失败即返回错误
pub fn copy_source_files(source_dirs: &[PathBuf], packaging_root: &Path) -> AppResult<CopyStats> {
    let mut stats = CopyStats::default();

    for path in scan_all(source_dirs, TEI_SUFFIX)? {
        let name = file_name(&path);
        let model = match parse_tei_file_name(&name) {
            TeiName::Match { model, .. } => model,
            TeiName::NoMatch(_) => {
                stats.unparsed_tei += 1;
                continue;
            }
        };
        let dest_dir = packaging_root.join(model.as_str()).join(TEI_DIR);
        if copy_into(&path, &dest_dir)? {
            stats.tei_copied += 1;
        } else {
            debug!("{} 没有对应的模型目录，跳过", path.display());
            stats.tei_missing_destination += 1;
        }
    }

    let raw_dir = packaging_root.join(SEGMENTATION_MODEL).join(RAW_DIR);
    for path in scan_all(source_dirs, SEGMENTATION_SUFFIX)? {
        if copy_into(&path, &raw_dir)? {
            stats.segmentation_copied += 1;
        } else {
            stats.segmentation_skipped += 1;
        }
    }

    if stats.segmentation_skipped > 0 {
        debug!(
            "没有 segmentation 模型，跳过 {} 个 .segmentation 文件",
            stats.segmentation_skipped
        );
    }

    Ok(stats)
}

/// 目标目录存在时复制文件，保留原文件名
///
/// # 返回
/// 是否已复制
fn copy_into(source: &Path, dest_dir: &Path) -> AppResult<bool> {
    if !dest_dir.is_dir() {
        return Ok(false);
    }
    let dest = dest_dir.join(file_name(source));
    fs::copy(source, &dest).map_err(|e| AppError::copy_failed(source, &dest, e))?;
    debug!("复制 {} → {}", source.display(), dest.display());
    Ok(true)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
