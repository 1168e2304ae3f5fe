//! 文件读取 - 业务能力层
//!
//! 从 CSV / 文本文件中取出待转换的条目，交给校验器；不做校验本身。

use crate::error::IngestError;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// 按优先级尝试的列名，都找不到时用第一列
pub const CANDIDATE_COLUMNS: [&str; 6] = ["smiles", "iupac", "compound", "name", "input", "molecule"];

/// 允许上传的扩展名
pub const ALLOWED_EXTENSIONS: [&str; 2] = ["csv", "txt"];

/// 解析带表头的分隔文本
pub fn parse_delimited<R: Read>(reader: R) -> Result<Vec<String>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let records = reader.records().collect::<Result<Vec<_>, _>>()?;

    let matched = CANDIDATE_COLUMNS.iter().find_map(|candidate| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(candidate))
            .map(|idx| (*candidate, idx))
    });

    let column_values = |idx: usize| -> Vec<String> {
        records
            .iter()
            .filter_map(|record| record.get(idx))
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()
    };

    if let Some((name, idx)) = matched {
        let values = column_values(idx);
        if !values.is_empty() {
            debug!("使用列 '{}' ({} 条)", name, values.len());
            return Ok(values);
        }
    }

    debug!("未找到候选列，使用第一列");
    Ok(column_values(0))
}

/// 每行一个条目，去掉空行
pub fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// 读取输入文件：`.csv` 按表格解析，其余按行解析
pub fn read_input_file(path: &Path) -> Result<Vec<String>, IngestError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| IngestError::io(path.display().to_string(), e))?;

    let items = if has_extension(path, "csv") {
        parse_delimited(content.as_bytes())?
    } else {
        parse_lines(&content)
    };

    info!("📄 从 {} 读取到 {} 个条目", path.display(), items.len());
    Ok(items)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.eq_ignore_ascii_case(ext))
}

/// 检查上传文件名
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ALLOWED_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a)))
}

/// 上传文件的临时副本
///
/// 写在调用方给定的目录里，句柄销毁时文件随之删除，无论后续处理成功与否。
#[derive(Debug)]
pub struct UploadedFile {
    file: NamedTempFile,
    original_name: String,
}

impl UploadedFile {
    /// 校验文件名和大小后落盘
    pub fn persist(
        filename: &str,
        bytes: &[u8],
        dir: Option<&Path>,
        max_bytes: usize,
    ) -> Result<Self, IngestError> {
        let filename = filename.trim();
        if filename.is_empty() {
            return Err(IngestError::NoFileSelected);
        }
        if !allowed_file(filename) {
            return Err(IngestError::InvalidFileType {
                filename: filename.to_string(),
            });
        }
        if bytes.len() > max_bytes {
            return Err(IngestError::TooLarge {
                size: bytes.len(),
                max: max_bytes,
            });
        }

        let suffix = format!(".{}", sanitized_extension(filename));
        let dir: PathBuf = dir.map(Path::to_path_buf).unwrap_or_else(std::env::temp_dir);
        let mut file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(&suffix)
            .tempfile_in(&dir)
            .map_err(|e| IngestError::io(dir.display().to_string(), e))?;

        file.write_all(bytes)
            .and_then(|_| file.flush())
            .map_err(|e| IngestError::io(file.path().display().to_string(), e))?;

        debug!("上传文件 {} 暂存为 {}", filename, file.path().display());

        Ok(Self {
            file,
            original_name: filename.to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// 读取暂存文件中的条目
    pub fn read_items(&self) -> Result<Vec<String>, IngestError> {
        read_input_file(self.path())
    }
}

fn sanitized_extension(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_first_matching_column_by_priority() {
        let data = "id,name,smiles\n1,ethanol,CCO\n2,acetic acid,CC(=O)O\n";
        let items = parse_delimited(data.as_bytes()).unwrap();
        assert_eq!(items, vec!["CCO", "CC(=O)O"]);
    }

    #[test]
    fn falls_back_to_first_column() {
        let data = "structure,note\nCCO,a\n,b\nCCN,c\n";
        let items = parse_delimited(data.as_bytes()).unwrap();
        assert_eq!(items, vec!["CCO", "CCN"]);
    }

    #[test]
    fn empty_matched_column_falls_back_to_first() {
        let data = "structure,name\nCCO,\nCCN,\n";
        let items = parse_delimited(data.as_bytes()).unwrap();
        assert_eq!(items, vec!["CCO", "CCN"]);
    }

    #[test]
    fn header_match_ignores_case() {
        let data = "Compound\n benzene \n";
        assert_eq!(parse_delimited(data.as_bytes()).unwrap(), vec!["benzene"]);
    }

    #[test]
    fn only_csv_and_txt_uploads_are_allowed() {
        assert!(allowed_file("batch.CSV"));
        assert!(allowed_file("names.txt"));
        assert!(!allowed_file("sheet.xlsx"));
        assert!(!allowed_file("noextension"));
    }

    #[test]
    fn upload_is_removed_when_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let upload = UploadedFile::persist("input.csv", b"smiles\nCCO\n", Some(dir.path()), 1024).unwrap();
        let path = upload.path().to_path_buf();
        assert!(path.exists());
        assert_eq!(upload.read_items().unwrap(), vec!["CCO"]);

        drop(upload);
        assert!(!path.exists());
    }

    #[test]
    fn rejects_oversized_and_unnamed_uploads() {
        assert!(matches!(
            UploadedFile::persist("big.csv", &[b'C'; 32], None, 16),
            Err(IngestError::TooLarge { size: 32, max: 16 })
        ));
        assert!(matches!(
            UploadedFile::persist("  ", b"CCO", None, 16),
            Err(IngestError::NoFileSelected)
        ));
        assert!(matches!(
            UploadedFile::persist("x.pdf", b"CCO", None, 16),
            Err(IngestError::InvalidFileType { .. })
        ));
    }
}
