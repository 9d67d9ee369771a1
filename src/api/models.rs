use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One page of a list endpoint. Unknown envelope fields are carried through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub page_items: Vec<T>,
    #[serde(default)]
    pub total_filtered_records: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<T> Page<T> {
    pub fn new(page_items: Vec<T>, total_filtered_records: u64) -> Self {
        Self {
            page_items,
            total_filtered_records,
            extra: Map::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.page_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.page_items.is_empty()
    }
}

/// Client identifiers arrive either as strings or as numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClientId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientId::Number(n) => write!(f, "{}", n),
            ClientId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amount {
    pub value: Value,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub status: Option<String>,
    pub rail: Option<String>,
    #[serde(rename = "type")]
    pub payment_type: Option<String>,
    pub amount: Option<Amount>,
    pub client_id: Option<ClientId>,
    pub recipient_name: Option<String>,
    pub is_settled: Option<bool>,
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub account_type: Option<String>,
    pub client_id: Option<ClientId>,
    pub balance: Option<Amount>,
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A customer of the tenant (named to avoid clashing with HTTP clients).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub id: ClientId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub client_type: Option<String>,
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub id: String,
    pub name: Option<String>,
    pub status: Option<String>,
    pub client_id: Option<ClientId>,
    pub rail: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub id: String,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub transfer_type: Option<String>,
    pub source_account_id: Option<String>,
    pub destination_account_id: Option<String>,
    pub amount: Option<Amount>,
    pub is_settled: Option<bool>,
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
