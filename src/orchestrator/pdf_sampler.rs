//! 样本 PDF 下载 - 编排层
//!
//! 按期刊优先级从样本清单中挑选论文，下载到批次的输入阶段目录：
//!
//! 1. 期刊按已下载数从少到多、再按名称排序
//! 2. 每个期刊最多取 `per_journal` 篇，目标总数为 `per_journal × journals`
//! 3. 某期刊不够时，由后面的期刊补足
//! 4. 每次下载后立即写回清单，失败的行标记为 `unavailable` 不再重试

use crate::clients::PdfDownloader;
use crate::config::Config;
use crate::error::{AppError, AppResult, FileError};
use crate::models::{encode_doi_for_filename, BatchLayout, DownloadStatus, SampleCatalog};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// 下载计划
#[derive(Debug, Clone)]
pub struct SamplePlan {
    pub per_journal: usize,
    pub journals: usize,
    /// 两次成功下载之间的等待
    pub delay: Duration,
}

impl SamplePlan {
    pub fn from_config(config: &Config) -> Self {
        Self {
            per_journal: config.sample_per_journal,
            journals: config.sample_journals,
            delay: Duration::from_millis(config.download_delay_ms),
        }
    }

    pub fn target(&self) -> usize {
        self.per_journal * self.journals
    }
}

/// 下载统计
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SampleStats {
    pub target: usize,
    pub downloaded: usize,
    pub unavailable: usize,
    /// 实际尝试过的期刊，按处理顺序
    pub journals_used: Vec<String>,
}

/// 从样本清单下载 PDF 到 `<batch>/0_pdf`
///
/// # 参数
/// - `layout`: 批次目录布局
/// - `catalog_path`: 样本清单 CSV
/// - `downloader`: PDF 下载客户端
/// - `plan`: 下载计划
pub async fn sample_pdfs(
    layout: &BatchLayout,
    catalog_path: &Path,
    downloader: &PdfDownloader,
    plan: &SamplePlan,
) -> AppResult<SampleStats> {
    let mut catalog = SampleCatalog::load(catalog_path)?;
    info!("✓ 样本清单共 {} 行", catalog.len());
    for (journal, (downloaded, total)) in catalog.journal_stats() {
        info!("  {}: {}/{} 已下载", journal, downloaded, total);
    }

    let input_dir = layout.input_dir();
    tokio::fs::create_dir_all(&input_dir)
        .await
        .map_err(|e| AppError::create_dir_failed(&input_dir, e))?;

    let mut stats = SampleStats {
        target: plan.target(),
        ..Default::default()
    };

    for journal in catalog.journal_priority() {
        if stats.downloaded >= stats.target {
            break;
        }
        let pending = catalog.pending_rows(&journal);
        if pending.is_empty() {
            continue;
        }
        stats.journals_used.push(journal.clone());

        let mut from_journal = 0;
        for row in pending {
            if from_journal >= plan.per_journal || stats.downloaded >= stats.target {
                break;
            }

            let doi = catalog.doi(row).to_string();
            let url = catalog.url(row).to_string();
            let target = input_dir.join(format!("{}.pdf", encode_doi_for_filename(&doi)));
            info!(
                "[{}/{}] {} | DOI: {}",
                stats.downloaded + 1,
                stats.target,
                journal,
                doi
            );

            match downloader.fetch_pdf(&url).await {
                Ok(body) => {
                    tokio::fs::write(&target, &body)
                        .await
                        .map_err(|source| FileError::WriteFailed {
                            path: target.clone(),
                            source,
                        })?;
                    info!("  ✓ 已保存: {}", target.display());
                    catalog.set_status(row, DownloadStatus::Downloaded);
                    catalog.save()?;
                    from_journal += 1;
                    stats.downloaded += 1;

                    if stats.downloaded < stats.target && !plan.delay.is_zero() {
                        tokio::time::sleep(plan.delay).await;
                    }
                }
                Err(e) => {
                    warn!("  ✗ {}，标记为 unavailable", e);
                    catalog.set_status(row, DownloadStatus::Unavailable);
                    catalog.save()?;
                    stats.unavailable += 1;
                }
            }
        }
    }

    Ok(stats)
}
