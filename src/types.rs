use crate::static_values::DEFAULT_FEE_LIMIT;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unsigned transaction as returned by the full node.
pub type UnsignedTransaction = Value;

/// Candidate address and vote count, in submission order.
pub type Vote<'a> = (&'a str, i64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Resource {
    #[default]
    Bandwidth,
    Energy,
}

/// Typed argument of a constructor or contract call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractParameter {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Value,
}

impl ContractParameter {
    pub fn new(kind: impl Into<String>, value: impl Into<Value>) -> Self {
        ContractParameter {
            kind: kind.into(),
            value: value.into(),
        }
    }

    pub fn is_address(&self) -> bool {
        self.kind == "address" || (self.kind.starts_with("address[") && self.kind.ends_with(']'))
    }
}

/// One function, constructor or event descriptor of a contract ABI. Keys
/// other than `name`, `type` and `payable` are kept as they were given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbiEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payable: Option<bool>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl AbiEntry {
    pub fn is_payable_constructor(&self) -> bool {
        if self.kind.as_deref() != Some("constructor") {
            return false;
        }
        self.payable == Some(true)
            || self
                .rest
                .get("stateMutability")
                .and_then(Value::as_str)
                .map_or(false, |m| m.eq_ignore_ascii_case("payable"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContractAbi {
    Entries(Vec<AbiEntry>),
    Json(String),
}

impl ContractAbi {
    pub fn entries(self) -> serde_json::Result<Vec<AbiEntry>> {
        match self {
            ContractAbi::Entries(entries) => Ok(entries),
            ContractAbi::Json(text) => serde_json::from_str(&text),
        }
    }
}

impl From<Vec<AbiEntry>> for ContractAbi {
    fn from(entries: Vec<AbiEntry>) -> Self {
        ContractAbi::Entries(entries)
    }
}

impl From<&str> for ContractAbi {
    fn from(text: &str) -> Self {
        ContractAbi::Json(text.to_string())
    }
}

impl From<String> for ContractAbi {
    fn from(text: String) -> Self {
        ContractAbi::Json(text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SmartContractOptions {
    pub abi: Option<ContractAbi>,
    pub bytecode: String,
    pub fee_limit: i64,
    pub call_value: i64,
    pub user_fee_percentage: i64,
    pub parameters: Vec<ContractParameter>,
}

impl Default for SmartContractOptions {
    fn default() -> Self {
        SmartContractOptions {
            abi: None,
            bytecode: String::new(),
            fee_limit: DEFAULT_FEE_LIMIT,
            call_value: 0,
            user_fee_percentage: 0,
            parameters: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TriggerOptions {
    pub fee_limit: i64,
    pub call_value: i64,
    pub parameters: Vec<ContractParameter>,
}

impl Default for TriggerOptions {
    fn default() -> Self {
        TriggerOptions {
            fee_limit: DEFAULT_FEE_LIMIT,
            call_value: 0,
            parameters: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateTokenOptions {
    pub name: String,
    pub abbreviation: String,
    pub description: String,
    pub url: String,
    pub total_supply: i64,
    /// Amount of TRX (in sun) that buys `token_ratio` tokens.
    pub trx_ratio: i64,
    pub token_ratio: i64,
    /// Epoch millis, defaults to the moment of construction.
    pub sale_start: Option<i64>,
    pub sale_end: Option<i64>,
    /// Bandwidth the issuer donates for use by token holders.
    pub free_bandwidth: i64,
    /// Out of `free_bandwidth`, the amount each holder gets.
    pub free_bandwidth_limit: i64,
    pub frozen_amount: i64,
    pub frozen_duration: i64,
}

impl Default for CreateTokenOptions {
    fn default() -> Self {
        CreateTokenOptions {
            name: String::new(),
            abbreviation: String::new(),
            description: String::new(),
            url: String::new(),
            total_supply: 0,
            trx_ratio: 1,
            token_ratio: 1,
            sale_start: None,
            sale_end: None,
            free_bandwidth: 0,
            free_bandwidth_limit: 0,
            frozen_amount: 0,
            frozen_duration: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateTokenOptions {
    pub description: String,
    pub url: String,
    pub free_bandwidth: i64,
    pub free_bandwidth_limit: i64,
}
