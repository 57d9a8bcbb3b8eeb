use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::cipher::CipherService;
use super::envelope::{RequestEnvelope, Response, ResponseEnvelope, TransportEnvelope};
use crate::core::{FapiaoError, Result};

/// Percent-encoded sequences the vendor expects as literal characters.
///
/// The receiving platform escapes differently from a standard URL encoder,
/// so these are turned back into plain characters after encoding. The table
/// is part of the wire contract.
///
/// Entries are written in lowercase hex, but matching ignores case: the
/// `urlencoding` crate emits uppercase hex (`%2A`) and the vendor decodes
/// either case, so both forms translate to the same character.
pub const URL_TRANSLATIONS: [(&str, char); 7] = [
    ("%2d", '-'),
    ("%5f", '_'),
    ("%2e", '.'),
    ("%21", '!'),
    ("%2a", '*'),
    ("%28", '('),
    ("%29", ')'),
];

/// The vendor's wire encoding: JSON → URL-encode → translation table → AES → base64.
#[derive(Debug, Clone)]
pub struct PayloadEncoder {
    cipher: CipherService,
}

impl PayloadEncoder {
    pub fn new(cipher: CipherService) -> Self {
        Self { cipher }
    }

    pub fn cipher(&self) -> &CipherService {
        &self.cipher
    }

    /// Encrypt the envelope's `Data`; `MerchantID` and `RqHeader` pass through unchanged.
    pub fn encode_payload(&self, envelope: RequestEnvelope) -> Result<TransportEnvelope> {
        let RequestEnvelope {
            merchant_id,
            rq_header,
            data,
        } = envelope;

        let data = data.ok_or_else(|| FapiaoError::Payload("envelope has no Data".into()))?;

        Ok(TransportEnvelope {
            merchant_id,
            rq_header,
            data: self.encode_data(&data)?,
        })
    }

    /// Encode and encrypt a data body on its own.
    pub fn encode_data(&self, data: &Map<String, Value>) -> Result<String> {
        let json = serde_json::to_string(data)
            .map_err(|e| FapiaoError::Payload(format!("failed to serialize Data: {e}")))?;
        let encoded = translate_url_encoding(&urlencoding::encode(&json));
        debug!(json_len = json.len(), encoded_len = encoded.len(), "encoding payload");
        self.cipher.encrypt(encoded.as_bytes())
    }

    /// Decrypt, URL-decode and parse a `Data` ciphertext into a JSON object.
    pub fn decode_data(&self, ciphertext: &str) -> Result<Map<String, Value>> {
        let plain = self.cipher.decrypt(ciphertext)?;
        let plain = String::from_utf8(plain)
            .map_err(|_| FapiaoError::Payload("decrypted Data is not UTF-8".into()))?;

        // Form-style encoders on the vendor side write spaces as '+'.
        let spaced = plain.replace('+', " ");
        let json = urlencoding::decode(&spaced)
            .map_err(|e| FapiaoError::Payload(format!("failed to URL-decode Data: {e}")))?;
        debug!(json_len = json.len(), "decoded payload");

        match serde_json::from_str::<Value>(&json) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(FapiaoError::Payload(format!(
                "decoded Data is not a JSON object: {}",
                json_kind(&other)
            ))),
            Err(e) => Err(FapiaoError::Payload(format!("decoded Data is not JSON: {e}"))),
        }
    }

    /// Decode either response shape into a [`Response`].
    ///
    /// A transport-level failure (no `Data`) surfaces as `RtnCode = TransCode`,
    /// `RtnMsg = TransMsg`.
    pub fn decode_response(&self, envelope: &ResponseEnvelope) -> Result<Response> {
        match envelope.payload() {
            Some(data) => self.decode_data(data).map(Response::new),
            None => {
                let code = envelope.trans_code.unwrap_or(0);
                let message = envelope.trans_msg.clone().unwrap_or_default();
                warn!(trans_code = code, trans_msg = %message, "response carries no Data");
                Ok(Response::transport_failure(code, message))
            }
        }
    }
}

/// Apply [`URL_TRANSLATIONS`] in a single left-to-right pass.
///
/// Hex digits match in either case. A substituted character is never
/// re-examined, so the pass is not recursive.
pub fn translate_url_encoding(encoded: &str) -> String {
    let mut out = String::with_capacity(encoded.len());
    let mut rest = encoded;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match tail.get(..3).and_then(translated_char) {
            Some(c) => {
                out.push(c);
                rest = &tail[3..];
            }
            None => {
                out.push('%');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn translated_char(sequence: &str) -> Option<char> {
    URL_TRANSLATIONS
        .iter()
        .find(|(from, _)| from.eq_ignore_ascii_case(sequence))
        .map(|(_, to)| *to)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
