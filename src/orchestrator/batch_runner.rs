//! 批量转换执行器 - 编排层
//!
//! ## 职责
//!
//! 把一批已校验的条目分发给查询函数，控制并发和完成速率，收集全部结果。
//!
//! ## 并发模型
//!
//! - 每个条目一个 `tokio::spawn` 任务，任务内先拿 `Semaphore` 许可再查询
//! - 只有主循环写结果数组（按输入位置索引），任务本身不碰共享状态
//! - 主循环按完成顺序取结果；每取到一个，等待 `completion_delay` 后才归还该任务的许可，
//!   所以新的查询最快每个间隔启动一个
//! - 任务 panic 或被取消时，用原始输入生成 `Processing error` 结果，条目数始终不变

use crate::config::Config;
use crate::models::ConversionOutcome;
use crate::utils::logging::truncate_text;
use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};
use tokio::time::sleep;
use tracing::{error, info};

/// 批量执行器
#[derive(Debug, Clone)]
pub struct BatchRunner {
    max_concurrency: usize,
    completion_delay: Duration,
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(500))
    }
}

impl BatchRunner {
    /// `max_concurrency` 限制在 `1..=Semaphore::MAX_PERMITS`
    pub fn new(max_concurrency: usize, completion_delay: Duration) -> Self {
        Self {
            max_concurrency: max_concurrency.clamp(1, Semaphore::MAX_PERMITS),
            completion_delay,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_concurrency, config.completion_delay())
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// 执行一批查询
    ///
    /// 返回值与 `items` 等长，且按输入顺序排列。
    pub async fn run<F, Fut>(&self, items: Vec<String>, lookup_fn: F) -> Vec<ConversionOutcome>
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ConversionOutcome> + Send + 'static,
    {
        let total = items.len();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let lookup_fn = Arc::new(lookup_fn);
        let mut pending = FuturesUnordered::new();

        for (index, item) in items.iter().enumerate() {
            let semaphore = semaphore.clone();
            let lookup_fn = lookup_fn.clone();
            let item = item.clone();

            let handle = tokio::spawn(async move {
                let permit = semaphore.acquire_owned().await?;
                let outcome = lookup_fn(item).await;
                Ok::<(ConversionOutcome, OwnedSemaphorePermit), AcquireError>((outcome, permit))
            });
            pending.push(async move { (index, handle.await) });
        }

        let mut slots: Vec<Option<ConversionOutcome>> = vec![None; total];
        let mut completed = 0;

        while let Some((index, joined)) = pending.next().await {
            completed += 1;

            match joined {
                Ok(Ok((outcome, permit))) => {
                    log_progress(completed, total, &outcome);
                    slots[index] = Some(outcome);

                    if completed < total && !self.completion_delay.is_zero() {
                        sleep(self.completion_delay).await;
                    }
                    drop(permit);
                }
                Ok(Err(e)) => {
                    error!("[{}/{}] 无法获取并发许可: {}", completed, total, e);
                    slots[index] = Some(processing_error(&items[index], e));
                }
                Err(e) => {
                    error!("[{}/{}] 任务执行失败: {}", completed, total, e);
                    slots[index] = Some(processing_error(&items[index], e));
                }
            }
        }

        slots
            .into_iter()
            .zip(items)
            .map(|(slot, item)| {
                slot.unwrap_or_else(|| processing_error(&item, "result missing"))
            })
            .collect()
    }
}

fn processing_error(item: &str, cause: impl std::fmt::Display) -> ConversionOutcome {
    ConversionOutcome::failure(item, format!("Processing error: {}", cause))
}

fn log_progress(completed: usize, total: usize, outcome: &ConversionOutcome) {
    match (&outcome.output, &outcome.error) {
        (Some(output), _) if !output.is_empty() => info!(
            "[{}/{}] ✓ {} → {}",
            completed,
            total,
            truncate_text(&outcome.input, 80),
            truncate_text(output, 80)
        ),
        (_, error) => info!(
            "[{}/{}] ❌ {}: {}",
            completed,
            total,
            truncate_text(&outcome.input, 80),
            error.as_deref().unwrap_or_default()
        ),
    }
}
