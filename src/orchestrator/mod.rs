//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_runner` - 批量执行器
//! - 控制并发数量（Semaphore）
//! - 按完成顺序收集结果，每次完成后限速
//! - 把任务级故障转换成单条错误结果
//!
//! ### `app` - 命令行应用
//! - 管理应用生命周期（初始化、运行）
//! - 读取输入文件、导出 CSV、输出全局统计
//!
//! ## 层次关系
//!
//! ```text
//! app (读文件 / 导出)
//!     ↓
//! workflow::ConversionService (校验 → 执行 → 统计)
//!     ↓
//! batch_runner (处理 Vec<String>)
//!     ↓
//! clients::PubChemClient (处理单个条目)
//! ```

pub mod app;
pub mod batch_runner;

// 重新导出主要类型
pub use app::App;
pub use batch_runner::BatchRunner;
