//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：写日志文件头、输出启动信息、创建 ConversionService
//! 2. **读取输入**：从配置指定的 `.csv` / `.txt` 文件读取条目
//! 3. **执行转换**：委托 ConversionService（校验 → 并发查询 → 统计）
//! 4. **导出结果**：写 `conversion_results_<direction>.csv`，并把逐条结果追加到运行日志

use crate::config::Config;
use crate::models::ConversionOutcome;
use crate::services::{file_ingest, table_renderer};
use crate::utils::logging::{init_log_file, log_startup, print_final_stats};
use crate::workflow::{ConversionReport, ConversionService};
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// 应用主结构
pub struct App {
    config: Config,
    service: ConversionService,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        init_log_file(&config.output_log_file)?;

        log_startup(&config);

        let service = ConversionService::new(&config).context("无法创建转换服务")?;

        Ok(Self { config, service })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ConversionReport> {
        info!("\n📁 正在读取输入文件: {}", self.config.input_file);
        let items = file_ingest::read_input_file(Path::new(&self.config.input_file))?;

        let report = self
            .service
            .convert_items(items, self.config.direction)
            .await?;

        let export_path = table_renderer::write_export(
            Path::new(&self.config.output_dir),
            &report.csv_data,
            report.direction,
        )?;

        self.append_run_log(&report.results)?;

        print_final_stats(
            &report.statistics,
            &export_path.display().to_string(),
            &self.config.output_log_file,
        );

        Ok(report)
    }

    /// 逐条写入运行日志
    fn append_run_log(&self, results: &[ConversionOutcome]) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.config.output_log_file)
            .with_context(|| format!("无法打开日志文件: {}", self.config.output_log_file))?;

        for outcome in results {
            let line = match (&outcome.output, &outcome.error) {
                (Some(output), _) => format!("✓ {} → {}\n", outcome.input, output),
                (None, error) => format!(
                    "✗ {} | {}\n",
                    outcome.input,
                    error.as_deref().unwrap_or_default()
                ),
            };
            file.write_all(line.as_bytes())?;
        }

        Ok(())
    }
}
