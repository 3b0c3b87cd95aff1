/// GROBID 训练数据 API 客户端
///
/// 上传 PDF，接收包含训练文件的 zip 压缩包
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult, FileError};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// 训练数据生成接口路径
const CREATE_TRAINING_PATH: &str = "/api/createTraining";

/// GROBID 客户端
pub struct GrobidClient {
    http: reqwest::Client,
    base_url: String,
    flavor: Option<String>,
}

impl GrobidClient {
    /// 创建新的 GROBID 客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|source| ApiError::ClientBuildFailed { source })?;

        Ok(Self {
            http,
            base_url: config.grobid_url.trim_end_matches('/').to_string(),
            flavor: config.flavor.clone(),
        })
    }

    /// 完整的训练数据接口地址
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, CREATE_TRAINING_PATH)
    }

    /// 提交单个 PDF，返回响应体（zip 压缩包）
    ///
    /// 不重试，也不校验压缩包内容
    ///
    /// # 参数
    /// - `pdf_path`: PDF 文件路径
    pub async fn create_training(&self, pdf_path: &Path) -> AppResult<Vec<u8>> {
        let bytes = tokio::fs::read(pdf_path)
            .await
            .map_err(|source| FileError::ReadFailed {
                path: pdf_path.to_path_buf(),
                source,
            })?;
        let file_name = pdf_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "input.pdf".to_string());

        let endpoint = self.endpoint();
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/pdf")
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;
        let mut form = Form::new().part("input", part);
        if let Some(flavor) = &self.flavor {
            form = form.text("flavor", flavor.clone());
        }

        debug!("POST {} ({})", endpoint, pdf_path.display());
        let response = self
            .http
            .post(&endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::BadResponse {
                endpoint,
                status: status.as_u16(),
            }
            .into());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = Config {
            grobid_url: "http://grobid:8070/".to_string(),
            ..Config::default()
        };
        let client = GrobidClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "http://grobid:8070/api/createTraining");
    }

    #[tokio::test]
    async fn test_missing_pdf_is_file_error() {
        let client = GrobidClient::new(&Config::default()).unwrap();
        let err = client
            .create_training(Path::new("/nonexistent/paper.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::File(FileError::ReadFailed { .. })));
    }
}
