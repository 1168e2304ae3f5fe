//! 输入校验 - 业务能力层
//!
//! 只做语法层面的过滤，不判断化学结构是否合理。

use crate::error::InputError;
use crate::models::Direction;
use regex::Regex;
use std::sync::LazyLock;

/// 单批最多条目数
pub const MAX_BATCH_SIZE: usize = 100;

static SMILES_ALPHABET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9@+\-\[\]()\\/%=#.]+$").expect("valid SMILES pattern"));

/// 检查单个条目
pub fn validate(item: &str, direction: Direction) -> bool {
    match direction {
        Direction::SmilesToIupac => validate_smiles(item),
        Direction::IupacToSmiles => validate_iupac(item),
    }
}

fn validate_smiles(smiles: &str) -> bool {
    if smiles.chars().count() < 2 {
        return false;
    }
    SMILES_ALPHABET.is_match(smiles)
}

fn validate_iupac(name: &str) -> bool {
    if name.chars().count() < 3 {
        return false;
    }
    name.chars().any(char::is_alphabetic)
}

/// 解析多行文本并校验
pub fn validate_list(text: &str, direction: Direction) -> Result<Vec<String>, InputError> {
    validate_items(text.lines(), direction, MAX_BATCH_SIZE)
}

/// 校验已经拆分好的条目列表（文本框或文件）
///
/// 先去空白、去空行，再检查数量上限，最后逐条过滤；保持原有顺序。
pub fn validate_items<I, S>(
    items: I,
    direction: Direction,
    max_items: usize,
) -> Result<Vec<String>, InputError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lines: Vec<String> = items
        .into_iter()
        .map(|line| line.as_ref().trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(InputError::EmptyInput);
    }

    if lines.len() > max_items {
        return Err(InputError::TooManyItems {
            count: lines.len(),
            max: max_items,
        });
    }

    let valid: Vec<String> = lines
        .into_iter()
        .filter(|line| validate(line, direction))
        .collect();

    if valid.is_empty() {
        return Err(InputError::NoValidItems);
    }

    Ok(valid)
}
