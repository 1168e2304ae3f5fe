//! 转换流程 - 流程层
//!
//! 核心职责：定义"一次转换请求"的完整处理流程
//!
//! 流程顺序：
//! 1. 读取条目（文本框 / 文件 / 上传）
//! 2. 校验（失败则整批直接返回，不发任何请求）
//! 3. BatchRunner 并发查询
//! 4. 统计 + 生成 CSV

use crate::clients::PubChemClient;
use crate::config::Config;
use crate::error::{AppError, AppResult, InputError};
use crate::models::{BatchStatistics, ConversionOutcome, ConversionRequest, Direction};
use crate::orchestrator::BatchRunner;
use crate::services::file_ingest::UploadedFile;
use crate::services::{table_renderer, validator};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// 一批转换的完整结果
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub success: bool,
    pub direction: Direction,
    pub results: Vec<ConversionOutcome>,
    pub csv_data: String,
    pub statistics: BatchStatistics,
}

/// 返回给调用方的响应体
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ConversionResponse {
    Completed(ConversionReport),
    Rejected { success: bool, error: String },
}

impl ConversionResponse {
    pub fn from_result(result: AppResult<ConversionReport>) -> Self {
        match result {
            Ok(report) => ConversionResponse::Completed(report),
            Err(AppError::Input(e)) => ConversionResponse::rejected(e.to_string()),
            Err(AppError::Ingest(e)) => ConversionResponse::rejected(e.to_string()),
            Err(e) => ConversionResponse::rejected(format!("Batch processing error: {}", e)),
        }
    }

    fn rejected(error: String) -> Self {
        ConversionResponse::Rejected {
            success: false,
            error,
        }
    }
}

/// 转换流程
///
/// - 持有 HTTP 客户端和执行器，可在多个请求间复用
/// - 不关心条目来自哪里
pub struct ConversionService {
    client: PubChemClient,
    runner: BatchRunner,
    max_batch_size: usize,
    upload_dir: Option<PathBuf>,
    max_upload_bytes: usize,
}

impl ConversionService {
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self {
            client: PubChemClient::new(config)?,
            runner: BatchRunner::from_config(config),
            max_batch_size: config.batch_limit(),
            upload_dir: config.upload_dir.as_ref().map(PathBuf::from),
            max_upload_bytes: config.max_upload_bytes,
        })
    }

    /// 多行文本输入
    pub async fn convert_text(&self, text: &str, direction: Direction) -> AppResult<ConversionReport> {
        self.convert_items(text.lines(), direction).await
    }

    /// 已拆分的条目列表（文件输入）
    pub async fn convert_items<I, S>(&self, items: I, direction: Direction) -> AppResult<ConversionReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let valid = validator::validate_items(items, direction, self.max_batch_size)
            .inspect_err(|e| warn!("⚠️ 输入校验失败: {}", e))?;

        self.run(ConversionRequest::new(valid, direction)).await
    }

    /// 上传文件输入，暂存文件在返回前删除
    pub async fn convert_upload(
        &self,
        filename: &str,
        bytes: &[u8],
        direction: Direction,
    ) -> AppResult<ConversionReport> {
        let upload = UploadedFile::persist(
            filename,
            bytes,
            self.upload_dir.as_deref(),
            self.max_upload_bytes,
        )?;
        info!("📥 收到上传文件: {}", upload.original_name());

        let items = upload.read_items()?;
        self.convert_items(items, direction).await
    }

    /// 单个条目
    pub async fn convert_one(&self, item: &str, direction: Direction) -> Result<ConversionOutcome, InputError> {
        let item = item.trim();
        if item.is_empty() {
            return Err(InputError::EmptyInput);
        }
        if !validator::validate(item, direction) {
            return Err(InputError::NoValidItems);
        }
        Ok(self.client.lookup(item, direction).await)
    }

    /// 执行已校验的请求
    pub async fn run(&self, request: ConversionRequest) -> AppResult<ConversionReport> {
        let ConversionRequest { items, direction } = request;
        info!(
            "🚀 开始转换 {} 个条目 ({}, 并发 {})",
            items.len(),
            direction,
            self.runner.max_concurrency()
        );

        let client = self.client.clone();
        let results = self
            .runner
            .run(items, move |item| {
                let client = client.clone();
                async move { client.lookup(&item, direction).await }
            })
            .await;

        let statistics = BatchStatistics::from_outcomes(&results);
        let csv_data = table_renderer::render(&results, direction)?;

        info!(
            "📊 转换完成: 成功 {}/{}，失败 {}",
            statistics.successful, statistics.total, statistics.failed
        );

        Ok(ConversionReport {
            success: true,
            direction,
            results,
            csv_data,
            statistics,
        })
    }
}
