//! 错误类型
//!
//! 三类错误在引擎边界上的去向不同：
//! - `InputError`：在任何网络请求之前发现，整批直接失败
//! - `LookupError`：只影响单个条目，最终写进 `ConversionOutcome::error`
//! - 其余（文件、配置、CSV）只出现在应用层

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入列表校验失败
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// 文件读取/上传错误
    #[error("文件错误: {0}")]
    Ingest(#[from] IngestError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// CSV 生成失败
    #[error("CSV错误: {0}")]
    Csv(#[from] csv::Error),
    /// HTTP 客户端初始化失败
    #[error("HTTP客户端错误: {0}")]
    Http(#[from] reqwest::Error),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 批次开始前的输入错误
///
/// `Display` 的文本就是返回给调用方的错误信息。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// 去掉空行后没有剩余内容
    #[error("No valid input provided")]
    EmptyInput,
    /// 条目数超过单批上限
    #[error("Maximum {max} compounds per batch allowed (got {count})")]
    TooManyItems { count: usize, max: usize },
    /// 所有条目都没通过校验
    #[error("No valid inputs found")]
    NoValidItems,
}

/// 单个条目的查询失败
///
/// 永远不会离开 `PubChemClient::lookup`，只会被格式化进结果的 `error` 字段。
#[derive(Debug, Error)]
pub enum LookupError {
    /// 输入为空白
    #[error("Empty {0}")]
    EmptyInput(&'static str),
    /// 第一步（解析 CID）返回非 2xx
    #[error("API error: {0}")]
    ResolveStatus(u16),
    /// 第一步成功但没有任何 CID
    #[error("No compound found")]
    NoCompound,
    /// 第二步（取属性）返回非 2xx
    #[error("Failed to get {label}: {status}")]
    PropertyStatus { label: &'static str, status: u16 },
    /// 属性表缺失或为空
    #[error("No properties found")]
    NoProperties,
    /// 属性存在但值为空
    #[error("{label} not available")]
    PropertyUnavailable { label: &'static str },
    /// 网络、超时或 JSON 解码错误
    #[error("Error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// 文件读取/上传错误
#[derive(Debug, Error)]
pub enum IngestError {
    /// 没有选择文件
    #[error("No file selected")]
    NoFileSelected,
    /// 扩展名不在允许范围内
    #[error("Invalid file type: {filename}")]
    InvalidFileType { filename: String },
    /// 上传内容超过大小限制
    #[error("File too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },
    /// 文件读写失败
    #[error("读取文件失败 ({path}): {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    /// CSV 解析失败
    #[error("Error parsing CSV file: {0}")]
    Csv(#[from] csv::Error),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("无法读取配置文件 {path}: {source}")]
    ReadFailed {
        path: String,
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        source: toml::de::Error,
    },
    /// 未知的转换方向
    #[error("未知的转换方向: {0}")]
    UnknownDirection(String),
}

// ========== 便捷构造函数 ==========

impl IngestError {
    /// 创建文件读写错误
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        IngestError::Io {
            path: path.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
