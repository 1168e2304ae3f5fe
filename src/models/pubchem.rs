//! PubChem PUG REST 响应结构
//!
//! 只声明用得到的字段；结构不符的响应在解码阶段失败，由客户端转成单条错误。

use serde::Deserialize;
use std::collections::HashMap;

/// `/cids/JSON` 响应
#[derive(Debug, Deserialize)]
pub struct CidResponse {
    #[serde(rename = "IdentifierList", default)]
    pub identifier_list: Option<IdentifierList>,
}

#[derive(Debug, Deserialize)]
pub struct IdentifierList {
    #[serde(rename = "CID", default)]
    pub cid: Vec<u64>,
}

impl CidResponse {
    /// 多个 CID 时取返回顺序中的第一个
    pub fn first_cid(&self) -> Option<u64> {
        self.identifier_list
            .as_ref()
            .and_then(|list| list.cid.first().copied())
    }
}

/// `/property/<Prop>/JSON` 响应
#[derive(Debug, Deserialize)]
pub struct PropertyResponse {
    #[serde(rename = "PropertyTable", default)]
    pub property_table: Option<PropertyTable>,
}

#[derive(Debug, Deserialize)]
pub struct PropertyTable {
    #[serde(rename = "Properties", default)]
    pub properties: Vec<HashMap<String, serde_json::Value>>,
}

impl PropertyResponse {
    /// 第一条属性记录，缺失时为 `None`
    pub fn first_record(&self) -> Option<&HashMap<String, serde_json::Value>> {
        self.property_table
            .as_ref()
            .and_then(|table| table.properties.first())
    }
}
