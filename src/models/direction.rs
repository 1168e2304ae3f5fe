use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// 转换方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// SMILES → IUPAC 名称
    SmilesToIupac,
    /// IUPAC 名称 → SMILES
    IupacToSmiles,
}

impl Direction {
    /// 对外使用的标识，也用于导出文件名
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::SmilesToIupac => "smiles_to_iupac",
            Direction::IupacToSmiles => "iupac_to_smiles",
        }
    }

    /// 输入一侧的名称（用于错误信息）
    pub fn input_label(&self) -> &'static str {
        match self {
            Direction::SmilesToIupac => "SMILES string",
            Direction::IupacToSmiles => "IUPAC name",
        }
    }

    /// 第二步查询的 PubChem 属性名
    pub fn target_property(&self) -> &'static str {
        match self {
            Direction::SmilesToIupac => "IUPACName",
            Direction::IupacToSmiles => "CanonicalSMILES",
        }
    }

    /// 输出一侧的名称（用于错误信息）
    pub fn target_label(&self) -> &'static str {
        match self {
            Direction::SmilesToIupac => "IUPAC name",
            Direction::IupacToSmiles => "SMILES",
        }
    }

    /// 结果表头
    pub fn csv_header(&self) -> [&'static str; 4] {
        match self {
            Direction::SmilesToIupac => ["SMILES", "IUPAC_Name", "Status", "Error"],
            Direction::IupacToSmiles => ["IUPAC_Name", "SMILES", "Status", "Error"],
        }
    }

    /// 导出文件名
    pub fn export_filename(&self) -> String {
        format!("conversion_results_{}.csv", self.as_str())
    }

    /// 示例输入
    pub fn sample_inputs(&self) -> &'static [&'static str] {
        match self {
            Direction::SmilesToIupac => &[
                "CCO",
                "CC(=O)O",
                "C1=CC=CC=C1",
                "CN1C=NC2=C1C(=O)N(C(=O)N2C)C",
                "CC(C)CC1=CC=C(C=C1)C(C)C(=O)O",
            ],
            Direction::IupacToSmiles => &[
                "ethanol",
                "acetic acid",
                "benzene",
                "1,3,7-trimethylpurine-2,6-dione",
                "ibuprofen",
            ],
        }
    }
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smiles_to_iupac" | "smiles" => Ok(Direction::SmilesToIupac),
            "iupac_to_smiles" | "iupac" => Ok(Direction::IupacToSmiles),
            other => Err(ConfigError::UnknownDirection(other.to_string())),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
