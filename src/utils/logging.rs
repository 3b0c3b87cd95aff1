/// 日志工具模块
///
/// 提供各子命令的启动、进度与统计输出
use crate::models::{ModelType, SourceStage};
use crate::orchestrator::{PackageReport, SampleStats, SubmitStats, UnzipStats};
use std::path::Path;
use tracing::info;

/// 记录程序启动信息
///
/// # 参数
/// - `command`: 子命令名
/// - `batch_dir`: 批次目录
pub fn log_startup(command: &str, batch_dir: &Path) {
    info!("{}", "=".repeat(60));
    info!("🚀 trainprep {} 启动", command);
    info!("📁 批次目录: {}", batch_dir.display());
    info!("{}", "=".repeat(60));
}

/// 记录选中的源阶段
pub fn log_stage_resolved(stage: &SourceStage) {
    info!("📂 源阶段: {} ({})", stage.kind, stage.path.display());
}

/// 记录发现的模型类型
pub fn log_models_discovered(models: &[ModelType]) {
    let names: Vec<&str> = models.iter().map(|m| m.as_str()).collect();
    info!("✓ 发现 {} 个模型类型: {}", models.len(), names.join(", "));
}

/// 打印打包统计
pub fn print_package_summary(report: &PackageReport) {
    info!("\n{}", "=".repeat(60));
    info!("📊 打包完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("{:<24} {:>8} {:>8}", "模型", "tei", "raw");
    info!("{}", "─".repeat(60));
    for summary in &report.models {
        info!(
            "{:<24} {:>8} {:>8}",
            summary.model.as_str(),
            summary.tei_files,
            summary.raw_files
        );
    }
    info!("{}", "─".repeat(60));
    info!("✅ 复制 TEI 文件: {}", report.copy_stats.tei_copied);
    info!(
        "✅ 复制 segmentation 文件: {}",
        report.copy_stats.segmentation_copied
    );
    if report.copy_stats.unparsed_tei > 0 {
        info!("⚠️ 无法解析模型名的 TEI 文件: {}", report.copy_stats.unparsed_tei);
    }
    if report.copy_stats.tei_missing_destination > 0 {
        info!(
            "⚠️ 没有对应模型目录的 TEI 文件: {}",
            report.copy_stats.tei_missing_destination
        );
    }
    if report.copy_stats.segmentation_skipped > 0 {
        info!(
            "⚠️ 没有 segmentation 模型，跳过 .segmentation 文件: {}",
            report.copy_stats.segmentation_skipped
        );
    }
    info!("{}", "=".repeat(60));
    info!("\n输出目录: {}", report.packaging_dir.display());
}

/// 打印提交统计
pub fn print_submit_stats(stats: &SubmitStats, output_dir: &Path) {
    info!("\n{}", "=".repeat(60));
    info!("📊 提交完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}", stats.submitted);
    info!("⏭️ 跳过: {}", stats.skipped);
    info!("❌ 失败: {}", stats.failed);
    info!("{}", "=".repeat(60));
    info!("\n压缩包已保存至: {}", output_dir.display());
}

/// 打印解压统计
pub fn print_unzip_stats(stats: &UnzipStats) {
    info!("\n{}", "=".repeat(60));
    info!("📊 解压完成统计");
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}", stats.extracted);
    info!("❌ 失败: {}", stats.failed);
    info!("{}", "=".repeat(60));
}

/// 打印样本下载统计
pub fn print_sample_stats(stats: &SampleStats, pdf_dir: &Path, catalog: &Path) {
    info!("\n{}", "=".repeat(60));
    info!("📊 下载完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", stats.downloaded, stats.target);
    info!("❌ 不可用: {}", stats.unavailable);
    info!(
        "📚 使用期刊 {} 个: {}",
        stats.journals_used.len(),
        stats.journals_used.join(", ")
    );
    info!("{}", "=".repeat(60));
    info!("\nPDF 已保存至: {}", pdf_dir.display());
    info!("清单已更新: {}", catalog.display());
}
