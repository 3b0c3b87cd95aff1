//! 模型类型发现 - 业务能力层

use crate::error::{AppResult, BatchError};
use crate::models::{parse_tei_file_name, ModelType, TeiName, TEI_SUFFIX};
use crate::services::source_scanner::scan_all;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, warn};

/// 从源目录中的 TEI 文件名推断所有模型类型
///
/// # 参数
/// - `source_dirs`: 源阶段目录列表
///
/// # 返回
/// 去重并按字典序排列的模型类型；一个都没有时返回 `NoModelTypes`
pub fn discover_model_types(source_dirs: &[PathBuf]) -> AppResult<Vec<ModelType>> {
    let mut models = BTreeSet::new();

    for path in scan_all(source_dirs, TEI_SUFFIX)? {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        match parse_tei_file_name(&name) {
            TeiName::Match { model, .. } => {
                debug!("{} → {}", name, model);
                models.insert(model);
            }
            TeiName::NoMatch(reason) => {
                warn!("⚠️ 跳过无法识别的文件 {}: {}", path.display(), reason);
            }
        }
    }

    if models.is_empty() {
        return Err(BatchError::NoModelTypes {
            source_dir: source_dirs.first().cloned().unwrap_or_default(),
        }
        .into());
    }

    Ok(models.into_iter().collect())
}
