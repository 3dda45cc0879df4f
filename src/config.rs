use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::error::{ExecutorError, ExecutorResult};

fn default_clob_host() -> String {
    "https://clob.polymarket.com".to_string()
}

fn default_chain_id() -> u64 {
    137 // Polygon; set CHAIN_ID=8453 for Base
}

fn default_ttl_seconds() -> i64 {
    600
}

fn default_slippage_bps() -> i64 {
    100
}

fn default_max_notional() -> Decimal {
    dec!(500)
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_clob_host")]
    pub clob_host: String,
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    #[serde(default = "default_ttl_seconds")]
    pub order_ttl_seconds: i64,
    #[serde(default = "default_slippage_bps")]
    pub max_slippage_bps: i64,
    #[serde(default = "default_max_notional")]
    pub max_order_notional: Decimal,

    /// Dry-run only: substitute an empty book when no candidate token has one.
    #[serde(default)]
    pub allow_missing_book: bool,

    // Signing preconditions; all must be present before execution starts.
    pub rpc_url: Option<String>,
    pub private_key: Option<String>,
    pub eip712_name: Option<String>,
    pub eip712_version: Option<String>,
    pub verifying_contract: Option<String>,
}

/// Validated signing configuration. Only materialized once every required
/// key is present; the engine refuses partial execution otherwise.
#[derive(Debug, Clone)]
pub struct SigningSettings {
    pub private_key: String,
    pub eip712_name: String,
    pub eip712_version: String,
    pub verifying_contract: String,
    pub chain_id: u64,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let c = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?;
        Ok(c.try_deserialize()?)
    }

    pub fn signing(&self) -> ExecutorResult<SigningSettings> {
        let mut missing: Vec<&str> = vec![];
        if self.rpc_url.as_deref().map_or(true, str::is_empty) {
            missing.push("RPC_URL");
        }
        if self.private_key.as_deref().map_or(true, str::is_empty) {
            missing.push("PRIVATE_KEY");
        }
        if self.eip712_name.as_deref().map_or(true, str::is_empty) {
            missing.push("EIP712_NAME");
        }
        if self.eip712_version.as_deref().map_or(true, str::is_empty) {
            missing.push("EIP712_VERSION");
        }
        if self.verifying_contract.as_deref().map_or(true, str::is_empty) {
            missing.push("VERIFYING_CONTRACT");
        }
        if !missing.is_empty() {
            return Err(ExecutorError::Configuration(missing.join(", ")));
        }

        Ok(SigningSettings {
            private_key: self.private_key.clone().unwrap(),
            eip712_name: self.eip712_name.clone().unwrap(),
            eip712_version: self.eip712_version.clone().unwrap(),
            verifying_contract: self.verifying_contract.clone().unwrap(),
            chain_id: self.chain_id,
        })
    }
}
