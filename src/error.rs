use std::path::PathBuf;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 批次目录结构错误
    #[error("批次错误: {0}")]
    Batch(#[from] BatchError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 压缩包解压错误
    #[error("解压错误: {0}")]
    Archive(#[from] ArchiveError),
    /// 样本清单（CSV）错误
    #[error("样本清单错误: {0}")]
    Catalog(#[from] CatalogError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 批次目录结构错误
///
/// 这些错误都发生在任何破坏性操作之前
#[derive(Debug, Error)]
pub enum BatchError {
    /// 批次目录不存在
    #[error("批次目录不存在: {}", path.display())]
    BatchDirNotFound { path: PathBuf },
    /// 既没有 collected 也没有 corrected 阶段目录
    #[error(
        "未找到可用的源阶段目录 (no usable source stage found): {} 下既没有 {collected} 也没有 {corrected}",
        batch.display()
    )]
    NoSourceStage {
        batch: PathBuf,
        collected: String,
        corrected: String,
    },
    /// 源阶段目录中没有任何可识别的 TEI 文件
    #[error("未发现任何模型类型 (no model types discovered): {}", source_dir.display())]
    NoModelTypes { source_dir: PathBuf },
    /// 阶段目录不存在（submit 的输入目录、unzip 的生成目录）
    #[error("阶段目录不存在: {}", path.display())]
    StageNotFound { path: PathBuf },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取目录失败
    #[error("读取目录失败 ({}): {source}", path.display())]
    ReadDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 读取文件失败
    #[error("读取文件失败 ({}): {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({}): {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 创建目录失败
    #[error("创建目录失败 ({}): {source}", path.display())]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 删除目录失败
    #[error("删除目录失败 ({}): {source}", path.display())]
    DeleteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 复制文件失败
    #[error("复制文件失败 ({} -> {}): {source}", from.display(), to.display())]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 重命名失败
    #[error("重命名失败 ({} -> {}): {source}", from.display(), to.display())]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 创建 HTTP 客户端失败
    #[error("创建 HTTP 客户端失败: {source}")]
    ClientBuildFailed {
        #[source]
        source: reqwest::Error,
    },
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// API 返回非成功状态码
    #[error("API返回错误响应 ({endpoint}): status={status}")]
    BadResponse { endpoint: String, status: u16 },
    /// 下载内容不是 PDF
    #[error("下载内容不是PDF: {url}")]
    NotPdf { url: String },
}

/// 样本清单（CSV）错误
#[derive(Debug, Error)]
pub enum CatalogError {
    /// 读取 CSV 失败
    #[error("读取CSV失败 ({}): {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// 写入 CSV 失败
    #[error("写入CSV失败 ({}): {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// 缺少必需的列
    #[error("CSV缺少列 '{column}': {}", path.display())]
    MissingColumn { path: PathBuf, column: String },
}

/// 压缩包解压错误
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// 无法启动解压程序
    #[error("无法启动解压程序 {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// 解压程序返回失败
    #[error("解压失败 ({}): exit code {code:?}", archive.display())]
    ExtractFailed { archive: PathBuf, code: Option<i32> },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({}): {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("TOML解析失败 ({}): {source}", path.display())]
    TomlParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建读取目录错误
    pub fn read_dir_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadDirFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建目录创建错误
    pub fn create_dir_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::File(FileError::CreateDirFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建目录删除错误
    pub fn delete_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::File(FileError::DeleteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件复制错误
    pub fn copy_failed(
        from: impl Into<PathBuf>,
        to: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        AppError::File(FileError::CopyFailed {
            from: from.into(),
            to: to.into(),
            source,
        })
    }

    /// 创建API请求失败错误
    pub fn api_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
