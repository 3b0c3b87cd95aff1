//! 打包结果统计 - 业务能力层
//!
//! 只读遍历已写好的打包目录

use crate::error::AppResult;
use crate::models::{ModelType, TEI_SUFFIX};
use crate::services::packaging_dir::{RAW_DIR, TEI_DIR};
use crate::services::source_scanner::sorted_entries;
use serde::Serialize;
use std::path::Path;

/// 单个模型的文件统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    pub model: ModelType,
    /// `tei/` 中以 `.tei.xml` 结尾的文件数
    pub tei_files: usize,
    /// `raw/` 中以 `.<model>` 结尾的文件数
    pub raw_files: usize,
}

/// 统计每个模型目录中的文件数
pub fn summarize_packaging(
    packaging_root: &Path,
    models: &[ModelType],
) -> AppResult<Vec<ModelSummary>> {
    let mut summaries = Vec::with_capacity(models.len());
    for model in models {
        let model_dir = packaging_root.join(model.as_str());
        summaries.push(ModelSummary {
            model: model.clone(),
            tei_files: count_with_suffix(&model_dir.join(TEI_DIR), TEI_SUFFIX)?,
            raw_files: count_with_suffix(&model_dir.join(RAW_DIR), &model.raw_suffix())?,
        });
    }
    Ok(summaries)
}

fn count_with_suffix(dir: &Path, suffix: &str) -> AppResult<usize> {
    let count = sorted_entries(dir)?
        .iter()
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| name.ends_with(suffix))
        })
        .count();
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_tei_file_name, TeiName};
    use std::fs;
    use tempfile::TempDir;

    fn model(name: &str) -> ModelType {
        match parse_tei_file_name(&format!("x.{}.tei.xml", name)) {
            TeiName::Match { model, .. } => model,
            TeiName::NoMatch(reason) => panic!("{}", reason),
        }
    }

    #[test]
    fn test_counts_only_matching_suffixes() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        for m in ["funding", "segmentation"] {
            fs::create_dir_all(root.join(m).join(TEI_DIR)).unwrap();
            fs::create_dir_all(root.join(m).join(RAW_DIR)).unwrap();
        }
        fs::write(root.join("segmentation/tei/a.training.segmentation.tei.xml"), "").unwrap();
        fs::write(root.join("segmentation/tei/notes.txt"), "").unwrap();
        fs::write(root.join("segmentation/raw/a.segmentation"), "").unwrap();
        fs::write(root.join("segmentation/raw/b.segmentation"), "").unwrap();
        fs::write(root.join("funding/tei/a.training.funding.tei.xml"), "").unwrap();

        let summary =
            summarize_packaging(root, &[model("funding"), model("segmentation")]).unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].model.as_str(), "funding");
        assert_eq!((summary[0].tei_files, summary[0].raw_files), (1, 0));
        assert_eq!((summary[1].tei_files, summary[1].raw_files), (1, 2));
    }

    #[test]
    fn test_missing_model_dir_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(summarize_packaging(dir.path(), &[model("header")]).is_err());
    }
}
