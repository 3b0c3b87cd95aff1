use crate::clients::{GrobidClient, PdfDownloader};
use crate::config::Config;
use crate::models::BatchLayout;
use crate::orchestrator::{package_batch, sample_pdfs, submit_batch, unpack_batch, SamplePlan};
use crate::services::ArchiveExtractor;
use crate::utils::logging::{
    log_startup, print_package_summary, print_sample_stats, print_submit_stats,
    print_unzip_stats,
};
use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::warn;

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 整理训练文件到打包目录
    ///
    /// # 参数
    /// - `batch_dir`: 批次目录
    /// - `json`: 是否同时在 stdout 输出 JSON 结果
    pub fn package(&self, batch_dir: &Path, json: bool) -> Result<()> {
        log_startup("package", batch_dir);
        let layout = BatchLayout::new(batch_dir, &self.config);

        let report = package_batch(&layout)
            .with_context(|| format!("打包失败: {}", batch_dir.display()))?;
        print_package_summary(&report);

        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Ok(())
    }

    /// 从样本清单下载 PDF 到输入阶段
    ///
    /// 未达到目标数量时返回错误，可重新运行补齐
    pub async fn sample(&self, batch_dir: &Path) -> Result<()> {
        log_startup("sample", batch_dir);
        let layout = BatchLayout::new(batch_dir, &self.config);
        let catalog = self.config.sample_catalog.as_path();
        let downloader = PdfDownloader::new(&self.config)?;
        let plan = SamplePlan::from_config(&self.config);

        let stats = sample_pdfs(&layout, catalog, &downloader, &plan)
            .await
            .with_context(|| format!("下载失败: {}", catalog.display()))?;
        print_sample_stats(&stats, &layout.input_dir(), catalog);

        if stats.downloaded < stats.target {
            bail!(
                "只下载了 {}/{} 个 PDF，可重新运行以重试",
                stats.downloaded,
                stats.target
            );
        }
        Ok(())
    }

    /// 提交 PDF 生成训练数据
    pub async fn submit(&self, batch_dir: &Path, overwrite: bool) -> Result<()> {
        log_startup("submit", batch_dir);
        let layout = BatchLayout::new(batch_dir, &self.config);
        let client = GrobidClient::new(&self.config)?;

        let stats = submit_batch(&layout, &client, overwrite)
            .await
            .with_context(|| format!("提交失败: {}", batch_dir.display()))?;
        print_submit_stats(&stats, &layout.generated_dir());

        if stats.failed > 0 {
            warn!("⚠️ {} 个 PDF 提交失败，可重新运行以补齐", stats.failed);
        }
        Ok(())
    }

    /// 解压生成的训练包
    pub async fn unzip(&self, batch_dir: &Path) -> Result<()> {
        log_startup("unzip", batch_dir);
        let layout = BatchLayout::new(batch_dir, &self.config);
        let extractor = ArchiveExtractor::new(&self.config);

        let stats = unpack_batch(&layout, &extractor)
            .await
            .with_context(|| format!("解压失败: {}", batch_dir.display()))?;
        print_unzip_stats(&stats);
        Ok(())
    }
}
