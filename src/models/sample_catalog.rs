//! 样本清单
//!
//! 开放获取论文的 CSV 清单，每行一篇：`journal`、`doi`、`oa_url`，
//! 以及记录下载结果的 `downloaded` 列（缺失时自动补上）。

use crate::error::{AppResult, CatalogError, FileError};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const JOURNAL_COLUMN: &str = "journal";
const DOI_COLUMN: &str = "doi";
const URL_COLUMN: &str = "oa_url";
const DOWNLOADED_COLUMN: &str = "downloaded";

/// 文件名中保留的字符：字母数字与 `_-.~`
const FILENAME_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'-')
    .remove(b'.')
    .remove(b'~');

/// 单行的下载状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStatus {
    Pending,
    Downloaded,
    /// 下载失败，不再重试
    Unavailable,
}

impl DownloadStatus {
    /// 解析 `downloaded` 列，不区分大小写
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "yes" => DownloadStatus::Downloaded,
            "unavailable" => DownloadStatus::Unavailable,
            _ => DownloadStatus::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadStatus::Pending => "",
            DownloadStatus::Downloaded => "yes",
            DownloadStatus::Unavailable => "unavailable",
        }
    }
}

/// CSV 样本清单
#[derive(Debug, Clone)]
pub struct SampleCatalog {
    path: PathBuf,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    journal_col: usize,
    doi_col: usize,
    url_col: usize,
    downloaded_col: usize,
}

impl SampleCatalog {
    /// 读取清单；没有 `downloaded` 列时追加一列空值
    pub fn load(path: &Path) -> AppResult<Self> {
        let read_failed = |source| CatalogError::ReadFailed {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::Reader::from_path(path).map_err(read_failed)?;
        let mut headers: Vec<String> = reader
            .headers()
            .map_err(read_failed)?
            .iter()
            .map(String::from)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(read_failed)?;
            rows.push(record.iter().map(String::from).collect::<Vec<_>>());
        }

        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| CatalogError::MissingColumn {
                    path: path.to_path_buf(),
                    column: name.to_string(),
                })
        };
        let journal_col = column(JOURNAL_COLUMN)?;
        let doi_col = column(DOI_COLUMN)?;
        let url_col = column(URL_COLUMN)?;
        let downloaded_col = match headers.iter().position(|h| h == DOWNLOADED_COLUMN) {
            Some(col) => col,
            None => {
                headers.push(DOWNLOADED_COLUMN.to_string());
                headers.len() - 1
            }
        };
        for row in &mut rows {
            row.resize(headers.len(), String::new());
        }

        Ok(Self {
            path: path.to_path_buf(),
            headers,
            rows,
            journal_col,
            doi_col,
            url_col,
            downloaded_col,
        })
    }

    /// 写回清单（先写临时文件再替换）
    pub fn save(&self) -> AppResult<()> {
        let tmp = self.path.with_extension("csv.tmp");
        let write_failed = |source| CatalogError::WriteFailed {
            path: tmp.clone(),
            source,
        };

        let mut writer = csv::Writer::from_path(&tmp).map_err(write_failed)?;
        writer.write_record(&self.headers).map_err(write_failed)?;
        for row in &self.rows {
            writer.write_record(row).map_err(write_failed)?;
        }
        writer
            .flush()
            .map_err(|e| write_failed(csv::Error::from(e)))?;
        drop(writer);

        fs::rename(&tmp, &self.path).map_err(|source| FileError::RenameFailed {
            from: tmp.clone(),
            to: self.path.clone(),
            source,
        })?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn journal(&self, row: usize) -> &str {
        &self.rows[row][self.journal_col]
    }

    pub fn doi(&self, row: usize) -> &str {
        &self.rows[row][self.doi_col]
    }

    pub fn url(&self, row: usize) -> &str {
        &self.rows[row][self.url_col]
    }

    pub fn status(&self, row: usize) -> DownloadStatus {
        DownloadStatus::parse(&self.rows[row][self.downloaded_col])
    }

    pub fn set_status(&mut self, row: usize, status: DownloadStatus) {
        self.rows[row][self.downloaded_col] = status.as_str().to_string();
    }

    /// 各期刊的（已下载数, 总数）
    pub fn journal_stats(&self) -> BTreeMap<String, (usize, usize)> {
        let mut stats: BTreeMap<String, (usize, usize)> = BTreeMap::new();
        for row in 0..self.rows.len() {
            let entry = stats.entry(self.journal(row).to_string()).or_default();
            entry.1 += 1;
            if self.status(row) == DownloadStatus::Downloaded {
                entry.0 += 1;
            }
        }
        stats
    }

    /// 按优先级排列的期刊：已下载数少的在前，相同时按名称
    pub fn journal_priority(&self) -> Vec<String> {
        let mut journals: Vec<(String, usize)> = self
            .journal_stats()
            .into_iter()
            .map(|(journal, (downloaded, _))| (journal, downloaded))
            .collect();
        journals.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        journals.into_iter().map(|(journal, _)| journal).collect()
    }

    /// 某期刊中待下载的行，按 CSV 顺序
    pub fn pending_rows(&self, journal: &str) -> Vec<usize> {
        (0..self.rows.len())
            .filter(|&row| self.journal(row) == journal)
            .filter(|&row| self.status(row) == DownloadStatus::Pending)
            .collect()
    }
}

/// 把 DOI 转成可用作文件名的字符串
///
/// 去掉 `https://doi.org/` 前缀，`/` 换成 `__`，
/// 其余字母数字与 `_-.~` 以外的字符做百分号编码
pub fn encode_doi_for_filename(doi: &str) -> String {
    let doi = doi
        .strip_prefix("https://doi.org/")
        .or_else(|| doi.strip_prefix("http://doi.org/"))
        .unwrap_or(doi);
    let doi = doi.replace('/', "__");
    utf8_percent_encode(&doi, FILENAME_SAFE).to_string()
}
