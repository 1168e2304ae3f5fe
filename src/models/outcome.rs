use crate::models::Direction;
use serde::{Deserialize, Serialize};

/// 一次转换请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub items: Vec<String>,
    pub direction: Direction,
}

impl ConversionRequest {
    pub fn new(items: Vec<String>, direction: Direction) -> Self {
        Self { items, direction }
    }
}

/// 单个条目的转换结果
///
/// 正常结束时 `output` 与 `error` 恰好有一个有值。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOutcome {
    pub input: String,
    pub output: Option<String>,
    pub error: Option<String>,
}

impl ConversionOutcome {
    pub fn success(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: Some(output.into()),
            error: None,
        }
    }

    pub fn failure(input: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.output.as_deref().is_some_and(|o| !o.is_empty())
    }
}

/// 批次统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStatistics {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

impl BatchStatistics {
    pub fn from_outcomes(outcomes: &[ConversionOutcome]) -> Self {
        let successful = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            total: outcomes.len(),
            successful,
            failed: outcomes.len() - successful,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_always_add_up() {
        let outcomes = vec![
            ConversionOutcome::success("CCO", "ethanol"),
            ConversionOutcome::failure("xyz", "No compound found"),
            ConversionOutcome::failure("C#", "API error: 400"),
        ];
        let stats = BatchStatistics::from_outcomes(&outcomes);
        assert_eq!(stats, BatchStatistics { total: 3, successful: 1, failed: 2 });
        assert_eq!(stats.successful + stats.failed, stats.total);
    }

    #[test]
    fn empty_output_counts_as_failure() {
        let outcome = ConversionOutcome {
            input: "CCO".into(),
            output: Some(String::new()),
            error: None,
        };
        assert!(!outcome.is_success());
        assert_eq!(BatchStatistics::from_outcomes(&[outcome]).failed, 1);
    }
}
