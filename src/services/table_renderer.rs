//! 结果表导出 - 业务能力层
//!
//! 把一批结果写成 CSV 文本，或直接写入导出文件。

use crate::error::{AppError, AppResult, IngestError};
use crate::models::{ConversionOutcome, Direction};
use std::path::{Path, PathBuf};
use tracing::info;

/// 单行：输入、输出、状态、错误
pub fn render_row(outcome: &ConversionOutcome) -> [String; 4] {
    let status = if outcome.is_success() { "Success" } else { "Failed" };
    [
        outcome.input.clone(),
        outcome.output.clone().unwrap_or_default(),
        status.to_string(),
        outcome.error.clone().unwrap_or_default(),
    ]
}

/// 渲染为 CSV 文本，行顺序与传入顺序一致
pub fn render(outcomes: &[ConversionOutcome], direction: Direction) -> AppResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(direction.csv_header())?;
    for outcome in outcomes {
        writer.write_record(render_row(outcome))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Other(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Other(e.to_string()))
}

/// 写入 `<dir>/conversion_results_<direction>.csv`，返回文件路径
pub fn write_export(dir: &Path, csv_text: &str, direction: Direction) -> AppResult<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| IngestError::io(dir.display().to_string(), e))?;

    let path = dir.join(direction.export_filename());
    std::fs::write(&path, csv_text.as_bytes())
        .map_err(|e| IngestError::io(path.display().to_string(), e))?;

    info!("💾 结果已导出: {}", path.display());
    Ok(path)
}
