/// 开放获取 PDF 下载客户端
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use std::time::Duration;
use tracing::debug;

/// PDF 文件头
const PDF_MAGIC: &[u8] = b"%PDF";

/// PDF 下载客户端
pub struct PdfDownloader {
    http: reqwest::Client,
}

impl PdfDownloader {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.download_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|source| ApiError::ClientBuildFailed { source })?;
        Ok(Self { http })
    }

    /// 下载 PDF，内容不以 `%PDF` 开头时返回 `NotPdf`
    ///
    /// # 参数
    /// - `url`: 开放获取地址
    pub async fn fetch_pdf(&self, url: &str) -> AppResult<Vec<u8>> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::BadResponse {
                endpoint: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::api_request_failed(url, e))?;
        if !body.starts_with(PDF_MAGIC) {
            return Err(ApiError::NotPdf {
                url: url.to_string(),
            }
            .into());
        }
        Ok(body.to_vec())
    }
}
