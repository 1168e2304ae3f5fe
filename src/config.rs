use crate::error::ConfigError;
use crate::models::Direction;
use crate::services::validator::MAX_BATCH_SIZE;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// PubChem PUG REST 根地址
    pub api_base_url: String,
    /// 单次网络请求超时（秒）
    pub request_timeout_secs: u64,
    /// 同时进行的查询数量
    pub max_concurrency: usize,
    /// 每完成一个条目后的等待时间（毫秒）
    pub completion_delay_ms: u64,
    /// 单批最多条目数，只能调小（见 `batch_limit`）
    pub max_batch_size: usize,
    /// 转换方向
    pub direction: Direction,
    /// 输入文件（.csv 或 .txt）
    pub input_file: String,
    /// 结果 CSV 输出目录
    pub output_dir: String,
    /// 上传文件临时目录，为空时使用系统临时目录
    pub upload_dir: Option<String>,
    /// 上传文件大小上限（字节）
    pub max_upload_bytes: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 运行日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://pubchem.ncbi.nlm.nih.gov/rest/pug".to_string(),
            request_timeout_secs: 20,
            max_concurrency: 3,
            completion_delay_ms: 500,
            max_batch_size: MAX_BATCH_SIZE,
            direction: Direction::SmilesToIupac,
            input_file: "input.txt".to_string(),
            output_dir: ".".to_string(),
            upload_dir: None,
            max_upload_bytes: 16 * 1024 * 1024,
            verbose_logging: false,
            output_log_file: "conversion_log.txt".to_string(),
        }
    }
}

impl Config {
    /// 默认值 → `CONVERT_CONFIG` 指向的 TOML 文件 → 环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var("CONVERT_CONFIG") {
            Ok(path) => Self::from_toml_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    /// 从 TOML 文件读取，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    fn with_env_overrides(self) -> Self {
        let base = self;
        Self {
            api_base_url: std::env::var("PUBCHEM_API_BASE_URL").unwrap_or(base.api_base_url),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(base.request_timeout_secs),
            max_concurrency: std::env::var("MAX_CONCURRENCY").ok().and_then(|v| v.parse().ok()).unwrap_or(base.max_concurrency),
            completion_delay_ms: std::env::var("COMPLETION_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(base.completion_delay_ms),
            max_batch_size: std::env::var("MAX_BATCH_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(base.max_batch_size),
            direction: std::env::var("CONVERSION_DIRECTION").ok().and_then(|v| v.parse().ok()).unwrap_or(base.direction),
            input_file: std::env::var("INPUT_FILE").unwrap_or(base.input_file),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(base.output_dir),
            upload_dir: std::env::var("UPLOAD_DIR").ok().or(base.upload_dir),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES").ok().and_then(|v| v.parse().ok()).unwrap_or(base.max_upload_bytes),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(base.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(base.output_log_file),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }

    /// 实际使用的单批上限，不超过 `MAX_BATCH_SIZE`
    pub fn batch_limit(&self) -> usize {
        self.max_batch_size.clamp(1, MAX_BATCH_SIZE)
    }
}
