//! 训练数据提交 - 编排层
//!
//! 逐个把输入阶段的 PDF 提交给 GROBID，保存返回的压缩包。
//! 顺序处理，不重试；单个 PDF 失败只记录并计数。

use crate::clients::GrobidClient;
use crate::error::{AppError, AppResult, BatchError, FileError};
use crate::models::BatchLayout;
use crate::services::source_scanner::sorted_entries;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// 提交统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmitStats {
    pub submitted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// 提交批次中所有 PDF
///
/// # 参数
/// - `layout`: 批次目录布局
/// - `client`: GROBID 客户端
/// - `overwrite`: 已存在的压缩包是否重新生成
pub async fn submit_batch(
    layout: &BatchLayout,
    client: &GrobidClient,
    overwrite: bool,
) -> AppResult<SubmitStats> {
    let input_dir = layout.input_dir();
    if !input_dir.is_dir() {
        return Err(BatchError::StageNotFound { path: input_dir }.into());
    }

    let pdfs = list_pdfs(&input_dir)?;
    info!("✓ 找到 {} 个 PDF", pdfs.len());

    let output_dir = layout.generated_dir();
    tokio::fs::create_dir_all(&output_dir)
        .await
        .map_err(|e| AppError::create_dir_failed(&output_dir, e))?;

    let mut stats = SubmitStats::default();
    let total = pdfs.len();

    for (idx, pdf) in pdfs.iter().enumerate() {
        let Some(target) = archive_path_for(pdf, &output_dir) else {
            continue;
        };

        if target.exists() && !overwrite {
            info!("[{}/{}] 已存在，跳过: {}", idx + 1, total, target.display());
            stats.skipped += 1;
            continue;
        }

        match client.create_training(pdf).await {
            Ok(body) => {
                tokio::fs::write(&target, &body)
                    .await
                    .map_err(|source| FileError::WriteFailed {
                        path: target.clone(),
                        source,
                    })?;
                info!(
                    "[{}/{}] ✓ {} ({} 字节)",
                    idx + 1,
                    total,
                    target.display(),
                    body.len()
                );
                stats.submitted += 1;
            }
            Err(e) => {
                error!("[{}/{}] ❌ {}: {}", idx + 1, total, pdf.display(), e);
                stats.failed += 1;
            }
        }
    }

    Ok(stats)
}

/// 列出目录中的 PDF（扩展名不区分大小写），按路径排序
pub fn list_pdfs(dir: &Path) -> AppResult<Vec<PathBuf>> {
    let pdfs = sorted_entries(dir)?
        .into_iter()
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .filter(|path| path.is_file())
        .collect();
    Ok(pdfs)
}

/// PDF 对应的压缩包路径：`<output_dir>/<pdf 文件名去掉扩展名>.zip`
fn archive_path_for(pdf: &Path, output_dir: &Path) -> Option<PathBuf> {
    let stem = pdf.file_stem()?.to_string_lossy();
    Some(output_dir.join(format!("{}.zip", stem)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_list_pdfs_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.pdf"), b"").unwrap();
        fs::write(dir.path().join("a.PDF"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("dir.pdf")).unwrap();

        let pdfs = list_pdfs(dir.path()).unwrap();
        assert_eq!(
            pdfs,
            vec![dir.path().join("a.PDF"), dir.path().join("b.pdf")]
        );
    }

    #[test]
    fn test_archive_path_for() {
        assert_eq!(
            archive_path_for(Path::new("/b/0_pdf/paper.v2.pdf"), Path::new("/b/1_generated")),
            Some(PathBuf::from("/b/1_generated/paper.v2.zip"))
        );
    }

    #[tokio::test]
    async fn test_missing_input_stage() {
        let dir = TempDir::new().unwrap();
        let config = Config::default();
        let layout = BatchLayout::new(dir.path(), &config);
        let client = GrobidClient::new(&config).unwrap();

        let err = submit_batch(&layout, &client, false).await.unwrap_err();
        assert!(matches!(err, AppError::Batch(BatchError::StageNotFound { .. })));
        assert!(!layout.generated_dir().exists());
    }

    #[tokio::test]
    async fn test_existing_archives_are_skipped() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            // 不会被访问
            grobid_url: "http://127.0.0.1:9".to_string(),
            ..Config::default()
        };
        let layout = BatchLayout::new(dir.path(), &config);
        fs::create_dir_all(layout.input_dir()).unwrap();
        fs::create_dir_all(layout.generated_dir()).unwrap();
        fs::write(layout.input_dir().join("paper.pdf"), b"%PDF").unwrap();
        fs::write(layout.generated_dir().join("paper.zip"), b"PK").unwrap();

        let client = GrobidClient::new(&config).unwrap();
        let stats = submit_batch(&layout, &client, false).await.unwrap();
        assert_eq!(
            stats,
            SubmitStats {
                submitted: 0,
                skipped: 1,
                failed: 0
            }
        );
    }
}
