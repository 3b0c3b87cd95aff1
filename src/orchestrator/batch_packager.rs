//! 批次打包 - 编排层
//!
//! 将修正/收集后的训练文件按模型类型整理到打包目录：
//!
//! 1. 选择源阶段（collected 优先于 corrected）
//! 2. 从 TEI 文件名发现模型类型
//! 3. 在 staging 目录中建立 `<model>/tei` 与 `<model>/raw`
//! 4. 分类复制文件
//! 5. 用 staging 目录替换旧的打包目录
//! 6. 统计每个模型的文件数
//!
//! 第 3 步之前的任何失败都不会修改文件系统。

use crate::error::AppResult;
use crate::models::{BatchLayout, ModelType, SourceStage};
use crate::services::{
    copy_source_files, discover_model_types, resolve_source_stage, summarize_packaging,
    CopyStats, ModelSummary, StagedPackaging,
};
use crate::utils::logging::{log_models_discovered, log_stage_resolved};
use serde::Serialize;
use std::path::PathBuf;

/// 打包结果
#[derive(Debug, Clone, Serialize)]
pub struct PackageReport {
    pub batch_dir: PathBuf,
    pub source_stage: SourceStage,
    pub packaging_dir: PathBuf,
    pub model_types: Vec<ModelType>,
    pub copy_stats: CopyStats,
    pub models: Vec<ModelSummary>,
}

/// 打包单个批次
///
/// # 参数
/// - `layout`: 批次目录布局
///
/// # 返回
/// 打包结果；源阶段缺失或没有发现模型类型时返回错误且不做任何修改
pub fn package_batch(layout: &BatchLayout) -> AppResult<PackageReport> {
    let source_stage = resolve_source_stage(layout)?;
    log_stage_resolved(&source_stage);

    let source_dirs = vec![source_stage.path.clone()];
    let model_types = discover_model_types(&source_dirs)?;
    log_models_discovered(&model_types);

    let staged = StagedPackaging::create(layout, &model_types)?;
    let copy_stats = copy_source_files(&source_dirs, staged.root())?;
    let packaging_dir = staged.commit()?;

    let models = summarize_packaging(&packaging_dir, &model_types)?;

    Ok(PackageReport {
        batch_dir: layout.root().to_path_buf(),
        source_stage,
        packaging_dir,
        model_types,
        copy_stats,
        models,
    })
}
