use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// 程序配置
///
/// 加载顺序：默认值 → TOML 配置文件（可选）→ 环境变量，命令行参数最后覆盖
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// GROBID 服务地址（不含 `/api/...` 路径）
    pub grobid_url: String,
    /// 训练数据的 flavor，为空时不发送
    pub flavor: Option<String>,
    /// 单个 PDF 请求的超时时间（秒）
    pub request_timeout_secs: u64,
    /// 解压程序
    pub unzip_program: String,
    // --- 样本 PDF 下载 ---
    /// 样本清单 CSV（需要 journal / doi / oa_url 列）
    pub sample_catalog: PathBuf,
    /// 每个期刊下载的 PDF 数
    pub sample_per_journal: usize,
    /// 期刊数
    pub sample_journals: usize,
    /// 单个 PDF 下载超时（秒）
    pub download_timeout_secs: u64,
    /// 两次成功下载之间的等待（毫秒）
    pub download_delay_ms: u64,
    pub user_agent: String,
    // --- 批次阶段目录 ---
    pub input_stage: String,
    pub generated_stage: String,
    pub corrected_stage: String,
    pub collected_stage: String,
    pub packaging_stage: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grobid_url: "http://localhost:8070".to_string(),
            flavor: None,
            request_timeout_secs: 300,
            unzip_program: "unzip".to_string(),
            sample_catalog: PathBuf::from("data/oa_law_review_samples_with_footnotes.csv"),
            sample_per_journal: 2,
            sample_journals: 5,
            download_timeout_secs: 30,
            download_delay_ms: 1000,
            user_agent: "Mozilla/5.0 (compatible; ResearchBot/1.0; +mailto:research@example.com)"
                .to_string(),
            input_stage: "0_pdf".to_string(),
            generated_stage: "1_generated".to_string(),
            corrected_stage: "2_corrected".to_string(),
            collected_stage: "2_collected".to_string(),
            packaging_stage: "4_packaging".to_string(),
        }
    }
}

impl Config {
    /// 加载配置：可选的 TOML 文件叠加环境变量
    pub fn load(config_file: Option<&Path>) -> AppResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.with_env()
    }

    /// 从 TOML 文件读取配置，缺省字段取默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    /// 用进程环境变量覆盖当前配置
    pub fn with_env(self) -> AppResult<Self> {
        self.with_env_lookup(|name| std::env::var(name).ok())
    }

    /// 用 `lookup` 提供的变量覆盖当前配置
    ///
    /// # 参数
    /// - `lookup`: 变量名 → 值，未设置时返回 `None`
    pub fn with_env_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        if let Some(url) = lookup("TRAINPREP_GROBID_URL") {
            self.grobid_url = url;
        }
        if let Some(flavor) = lookup("TRAINPREP_FLAVOR") {
            self.flavor = Some(flavor).filter(|f| !f.is_empty());
        }
        if let Some(value) = lookup("TRAINPREP_TIMEOUT_SECS") {
            self.request_timeout_secs = parse_env("TRAINPREP_TIMEOUT_SECS", value, "u64")?;
        }
        if let Some(program) = lookup("TRAINPREP_UNZIP_BIN") {
            self.unzip_program = program;
        }
        if let Some(value) = lookup("TRAINPREP_DOWNLOAD_TIMEOUT_SECS") {
            self.download_timeout_secs =
                parse_env("TRAINPREP_DOWNLOAD_TIMEOUT_SECS", value, "u64")?;
        }
        Ok(self)
    }
}

fn parse_env<T: FromStr>(var_name: &str, value: String, expected_type: &str) -> AppResult<T> {
    value.parse().map_err(|_| {
        ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value,
            expected_type: expected_type.to_string(),
        }
        .into()
    })
}
