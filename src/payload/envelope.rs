use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::encoder::PayloadEncoder;
use crate::core::{Result, RqHeader};

/// Request envelope with a plaintext `Data` body, before encryption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    #[serde(rename = "MerchantID")]
    pub merchant_id: String,
    #[serde(rename = "RqHeader")]
    pub rq_header: RqHeader,
    #[serde(rename = "Data", default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

impl RequestEnvelope {
    pub fn new(merchant_id: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            rq_header: RqHeader::new(),
            data: Some(data),
        }
    }
}

/// Wire form of a request: `Data` is base64 AES ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportEnvelope {
    #[serde(rename = "MerchantID")]
    pub merchant_id: String,
    #[serde(rename = "RqHeader")]
    pub rq_header: RqHeader,
    #[serde(rename = "Data")]
    pub data: String,
}

/// Vendor response: either an encrypted `Data` or a transport-level `TransCode`/`TransMsg`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "Data", default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(rename = "TransCode", default, skip_serializing_if = "Option::is_none")]
    pub trans_code: Option<i64>,
    #[serde(rename = "TransMsg", default, skip_serializing_if = "Option::is_none")]
    pub trans_msg: Option<String>,
}

impl ResponseEnvelope {
    /// The encrypted payload, if the vendor produced one.
    pub fn payload(&self) -> Option<&str> {
        self.data.as_deref().filter(|d| !d.is_empty())
    }
}

/// Decoded vendor response. Always carries `RtnCode` and `RtnMsg`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Response {
    data: Map<String, Value>,
}

impl Response {
    /// Vendor `RtnCode` signalling success.
    pub const SUCCESS_CODE: i64 = 1;

    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// Decode a vendor response envelope with `encoder`.
    pub fn from_envelope(envelope: &ResponseEnvelope, encoder: &PayloadEncoder) -> Result<Self> {
        encoder.decode_response(envelope)
    }

    /// Fold a transport-level failure into the `RtnCode`/`RtnMsg` shape.
    pub fn transport_failure(code: i64, message: impl Into<String>) -> Self {
        let mut data = Map::new();
        data.insert("RtnCode".into(), Value::from(code));
        data.insert("RtnMsg".into(), Value::String(message.into()));
        Self { data }
    }

    /// `RtnCode`, accepting either a JSON number or a numeric string.
    pub fn rtn_code(&self) -> Option<i64> {
        match self.data.get("RtnCode")? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn rtn_msg(&self) -> Option<&str> {
        self.data.get("RtnMsg").and_then(Value::as_str)
    }

    pub fn is_success(&self) -> bool {
        self.rtn_code() == Some(Self::SUCCESS_CODE)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn into_data(self) -> Map<String, Value> {
        self.data
    }
}
