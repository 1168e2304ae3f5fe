/// PubChem API 客户端
///
/// 封装两步查询：输入 → CID → 目标属性
use crate::config::Config;
use crate::error::{AppResult, LookupError};
use crate::models::pubchem::{CidResponse, PropertyResponse};
use crate::models::{ConversionOutcome, Direction};
use crate::utils::logging::truncate_text;
use reqwest::Client;
use tracing::{debug, warn};

/// 新版 PubChem 对 CanonicalSMILES 请求返回的字段名可能是这两个
const SMILES_PROPERTY_ALIASES: [&str; 3] = ["CanonicalSMILES", "ConnectivitySMILES", "SMILES"];

/// PubChem 客户端
#[derive(Clone, Debug)]
pub struct PubChemClient {
    http: Client,
    base_url: String,
}

impl PubChemClient {
    /// 创建新的 PubChem 客户端，每个请求都带配置中的超时
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 转换单个条目
    ///
    /// 所有失败都写进返回值的 `error` 字段，调用方不需要处理错误。
    pub async fn lookup(&self, item: &str, direction: Direction) -> ConversionOutcome {
        let item = item.trim();

        match self.try_lookup(item, direction).await {
            Ok(value) => {
                debug!(
                    "✓ {} → {}",
                    truncate_text(item, 80),
                    truncate_text(&value, 80)
                );
                ConversionOutcome::success(item, value)
            }
            Err(e) => {
                warn!("⚠️ {} 转换失败: {}", truncate_text(item, 80), e);
                ConversionOutcome::failure(item, e.to_string())
            }
        }
    }

    async fn try_lookup(&self, item: &str, direction: Direction) -> Result<String, LookupError> {
        if item.is_empty() {
            return Err(LookupError::EmptyInput(direction.input_label()));
        }

        let cid = self.resolve_cid(item, direction).await?;
        debug!("{} 对应 CID {}", truncate_text(item, 80), cid);

        self.fetch_property(cid, direction).await
    }

    /// 第一步：输入 → CID
    ///
    /// SMILES 用表单 POST（避免路径中的特殊字符），名称用 GET。
    async fn resolve_cid(&self, item: &str, direction: Direction) -> Result<u64, LookupError> {
        let request = match direction {
            Direction::SmilesToIupac => self
                .http
                .post(format!("{}/compound/smiles/cids/JSON", self.base_url))
                .form(&[("smiles", item)]),
            Direction::IupacToSmiles => self.http.get(format!(
                "{}/compound/name/{}/cids/JSON",
                self.base_url,
                urlencoding::encode(item)
            )),
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::ResolveStatus(status.as_u16()));
        }

        let body: CidResponse = response.json().await?;
        body.first_cid().ok_or(LookupError::NoCompound)
    }

    /// 第二步：CID → 目标属性
    async fn fetch_property(&self, cid: u64, direction: Direction) -> Result<String, LookupError> {
        let url = format!(
            "{}/compound/cid/{}/property/{}/JSON",
            self.base_url,
            cid,
            direction.target_property()
        );

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::PropertyStatus {
                label: direction.target_label(),
                status: status.as_u16(),
            });
        }

        let body: PropertyResponse = response.json().await?;
        let record = body.first_record().ok_or(LookupError::NoProperties)?;

        let keys: &[&str] = match direction {
            Direction::SmilesToIupac => &["IUPACName"],
            Direction::IupacToSmiles => &SMILES_PROPERTY_ALIASES,
        };

        keys.iter()
            .filter_map(|key| record.get(*key).and_then(|v| v.as_str()))
            .find(|value| !value.is_empty())
            .map(str::to_string)
            .ok_or(LookupError::PropertyUnavailable {
                label: direction.target_label(),
            })
    }
}
