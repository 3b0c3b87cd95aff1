//! 源阶段选择 - 业务能力层
//!
//! 每次只使用一个阶段：collected 优先，其次 corrected，不合并。

use crate::error::{AppResult, BatchError};
use crate::models::{BatchLayout, SourceStage, StageKind};
use tracing::debug;

/// 选择本次打包使用的源阶段目录
///
/// 不做任何文件系统修改
pub fn resolve_source_stage(layout: &BatchLayout) -> AppResult<SourceStage> {
    if !layout.root().is_dir() {
        return Err(BatchError::BatchDirNotFound {
            path: layout.root().to_path_buf(),
        }
        .into());
    }

    let collected = layout.collected_dir();
    if collected.is_dir() {
        debug!("使用 collected 阶段: {}", collected.display());
        return Ok(SourceStage {
            kind: StageKind::Collected,
            path: collected,
        });
    }

    let corrected = layout.corrected_dir();
    if corrected.is_dir() {
        debug!("使用 corrected 阶段: {}", corrected.display());
        return Ok(SourceStage {
            kind: StageKind::Corrected,
            path: corrected,
        });
    }

    Err(BatchError::NoSourceStage {
        batch: layout.root().to_path_buf(),
        collected: layout.collected_stage_name().to_string(),
        corrected: layout.corrected_stage_name().to_string(),
    }
    .into())
}
