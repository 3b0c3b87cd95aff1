//! 批次目录布局
//!
//! 一个批次目录按约定包含若干有序的阶段子目录：
//! 输入（PDF）→ 生成（训练包）→ 修正/收集 → 打包

use crate::config::Config;
use serde::Serialize;
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// 批次目录及其各阶段子目录
#[derive(Debug, Clone)]
pub struct BatchLayout {
    root: PathBuf,
    input_stage: String,
    generated_stage: String,
    corrected_stage: String,
    collected_stage: String,
    packaging_stage: String,
}

impl BatchLayout {
    /// 按配置中的阶段目录名创建布局
    pub fn new(root: impl Into<PathBuf>, config: &Config) -> Self {
        Self {
            root: root.into(),
            input_stage: config.input_stage.clone(),
            generated_stage: config.generated_stage.clone(),
            corrected_stage: config.corrected_stage.clone(),
            collected_stage: config.collected_stage.clone(),
            packaging_stage: config.packaging_stage.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// PDF 输入目录
    pub fn input_dir(&self) -> PathBuf {
        self.root.join(&self.input_stage)
    }

    /// 生成的训练包（zip 及其解压目录）
    pub fn generated_dir(&self) -> PathBuf {
        self.root.join(&self.generated_stage)
    }

    pub fn corrected_dir(&self) -> PathBuf {
        self.root.join(&self.corrected_stage)
    }

    pub fn collected_dir(&self) -> PathBuf {
        self.root.join(&self.collected_stage)
    }

    /// 最终打包目录
    pub fn packaging_dir(&self) -> PathBuf {
        self.root.join(&self.packaging_stage)
    }

    /// 构建中的打包目录，完成后整体替换 `packaging_dir`
    ///
    /// 与打包目录同级，保证 rename 不跨文件系统
    pub fn staging_dir(&self) -> PathBuf {
        self.root.join(format!(".{}.staging", self.packaging_stage))
    }

    /// 替换期间暂存旧打包目录的位置
    pub fn retired_dir(&self) -> PathBuf {
        self.root.join(format!(".{}.old", self.packaging_stage))
    }

    pub fn collected_stage_name(&self) -> &str {
        &self.collected_stage
    }

    pub fn corrected_stage_name(&self) -> &str {
        &self.corrected_stage
    }
}

/// 源阶段类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Collected,
    Corrected,
}

impl Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageKind::Collected => write!(f, "collected"),
            StageKind::Corrected => write!(f, "corrected"),
        }
    }
}

/// 本次打包实际使用的源阶段
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceStage {
    pub kind: StageKind,
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let layout = BatchLayout::new("/data/batch1", &Config::default());
        assert_eq!(layout.input_dir(), PathBuf::from("/data/batch1/0_pdf"));
        assert_eq!(layout.collected_dir(), PathBuf::from("/data/batch1/2_collected"));
        assert_eq!(layout.packaging_dir(), PathBuf::from("/data/batch1/4_packaging"));
        assert_eq!(
            layout.staging_dir(),
            PathBuf::from("/data/batch1/.4_packaging.staging")
        );
    }

    #[test]
    fn test_layout_follows_configured_stage_names() {
        let config = Config {
            packaging_stage: "out".to_string(),
            ..Config::default()
        };
        let layout = BatchLayout::new("b", &config);
        assert_eq!(layout.packaging_dir(), PathBuf::from("b/out"));
        assert_eq!(layout.staging_dir(), PathBuf::from("b/.out.staging"));
    }
}
