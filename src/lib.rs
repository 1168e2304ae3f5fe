//! # Compound Convert
//!
//! 通过 PubChem 在 SMILES 与 IUPAC 名称之间批量转换化合物标识
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 只负责与 PubChem 通信
//! - `PubChemClient` - 两步查询（输入 → CID → 属性），单条失败写进结果而不是返回错误
//!
//! ### ② 业务能力层（Services）
//! - `validator` - 单条 / 列表校验
//! - `file_ingest` - 从 CSV / 文本 / 上传文件取出条目
//! - `table_renderer` - 结果表导出为 CSV
//!
//! ### ③ 流程层（Workflow）
//! - `ConversionService` - 校验 → 批量执行 → 统计 → CSV
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_runner` - 有界并发 + 完成限速
//! - `orchestrator/app` - 命令行入口
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::PubChemClient;
pub use config::Config;
pub use error::{AppError, AppResult, InputError};
pub use models::{BatchStatistics, ConversionOutcome, ConversionRequest, Direction};
pub use orchestrator::{App, BatchRunner};
pub use workflow::{ConversionReport, ConversionResponse, ConversionService};
