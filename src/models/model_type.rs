//! 模型类型与文件名解析
//!
//! 模型类型完全由文件名推断：`<name>.<model>.tei.xml` 中的 `<model>`。

use serde::Serialize;
use std::fmt::Display;

/// TEI 文件后缀
pub const TEI_SUFFIX: &str = ".tei.xml";
/// 分割模型原始文件后缀
pub const SEGMENTATION_SUFFIX: &str = ".segmentation";
/// 分割模型名，`.segmentation` 文件只会归入这个模型
pub const SEGMENTATION_MODEL: &str = "segmentation";

/// 模型类型标签（如 `segmentation`、`funding`）
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ModelType(String);

impl ModelType {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 该模型 `raw/` 目录中文件应有的后缀，即 `.<model>`
    pub fn raw_suffix(&self) -> String {
        format!(".{}", self.0)
    }
}

impl Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 无法从文件名得到模型类型的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoMatchReason {
    /// 不以 `.tei.xml` 结尾
    MissingSuffix,
    /// `.tei.xml` 之前没有点号，如 `doc.tei.xml`
    NoModelSegment,
    /// 最后一个点号之后为空，如 `doc..tei.xml`
    EmptyModel,
    /// 最后一个点号之前为空，如 `.funding.tei.xml`
    EmptyPrefix,
}

impl Display for NoMatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            NoMatchReason::MissingSuffix => "不是 .tei.xml 文件",
            NoMatchReason::NoModelSegment => ".tei.xml 之前缺少模型名",
            NoMatchReason::EmptyModel => "模型名为空",
            NoMatchReason::EmptyPrefix => "模型名之前缺少文档名",
        };
        f.write_str(text)
    }
}

/// TEI 文件名解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeiName {
    Match { stem: String, model: ModelType },
    NoMatch(NoMatchReason),
}

impl TeiName {
    pub fn model(&self) -> Option<&ModelType> {
        match self {
            TeiName::Match { model, .. } => Some(model),
            TeiName::NoMatch(_) => None,
        }
    }
}

/// 解析 TEI 文件名
///
/// 去掉 `.tei.xml` 后取最后一个点号之后的部分作为模型名：
/// `doc.training.segmentation.tei.xml` → `segmentation`
///
/// # 参数
/// - `file_name`: 文件名（不含目录）
///
/// # 返回
/// `TeiName::Match`，或带原因的 `TeiName::NoMatch`
pub fn parse_tei_file_name(file_name: &str) -> TeiName {
    let Some(stem) = file_name.strip_suffix(TEI_SUFFIX) else {
        return TeiName::NoMatch(NoMatchReason::MissingSuffix);
    };
    let Some((prefix, model)) = stem.rsplit_once('.') else {
        return TeiName::NoMatch(NoMatchReason::NoModelSegment);
    };
    if model.is_empty() {
        return TeiName::NoMatch(NoMatchReason::EmptyModel);
    }
    if prefix.is_empty() {
        return TeiName::NoMatch(NoMatchReason::EmptyPrefix);
    }

    TeiName::Match {
        stem: prefix.to_string(),
        model: ModelType(model.to_string()),
    }
}
