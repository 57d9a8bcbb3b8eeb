//! Vendor operations.
//!
//! Each operation is a plain data builder. It validates itself, renders its
//! `Data` body, and leaves encryption to a [`PayloadEncoder`] passed in by
//! the caller.

mod allowance;
mod delay;
mod invalid;
mod invoice;
mod notify;
mod queries;

pub use allowance::*;
pub use delay::*;
pub use invalid::*;
pub use invoice::*;
pub use notify::*;
pub use queries::*;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal::prelude::ToPrimitive;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::core::{FapiaoError, Result, ValidationError};
use crate::payload::{PayloadEncoder, RequestEnvelope, TransportEnvelope};

/// Wire format for `InvoiceDate` and friends.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A request the vendor API accepts.
///
/// Implementors supply the path, the merchant id, their own validation and
/// the finalized body; envelope assembly and encoding are shared.
pub trait Operation {
    /// Path appended to the server URL, e.g. `/B2CInvoice/Issue`.
    fn request_path(&self) -> &'static str;

    fn merchant_id(&self) -> &str;

    /// Check every rule for this operation.
    ///
    /// Implementations start with [`crate::core::validate_base_params`].
    fn validate(&self) -> Result<()>;

    /// The finalized `Data` body, derived fields included.
    fn data_body(&self) -> Result<Map<String, Value>>;

    /// Validate, then wrap the body with a fresh `RqHeader`.
    fn envelope(&self) -> Result<RequestEnvelope> {
        self.validate()?;
        let data = self.data_body()?;
        debug!(path = self.request_path(), fields = data.len(), "assembled request body");
        Ok(RequestEnvelope::new(self.merchant_id(), data))
    }

    /// Validate and encrypt into the wire envelope.
    fn content(&self, encoder: &PayloadEncoder) -> Result<TransportEnvelope> {
        encoder.encode_payload(self.envelope()?)
    }
}

/// Serialize a body struct into a JSON object, keeping field order.
pub(crate) fn to_body<T: Serialize>(body: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(FapiaoError::Payload("request body is not a JSON object".into())),
        Err(e) => Err(FapiaoError::Payload(format!("failed to serialize request body: {e}"))),
    }
}

/// Round a money amount half away from zero to whole NT dollars.
pub(crate) fn round_amount(field: &str, amount: Decimal) -> Result<i64> {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| ValidationError::new(field, format!("{field} is out of range")).into())
}

pub(crate) fn require_date(field: &str, date: Option<NaiveDate>) -> Result<()> {
    if date.is_none() {
        return Err(ValidationError::new(field, format!("{field} is empty")).into());
    }
    Ok(())
}

pub(crate) fn date_or_empty<S: Serializer>(
    date: &Option<NaiveDate>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match date {
        Some(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
        None => serializer.serialize_str(""),
    }
}

/// Unset vendor codes go on the wire as an empty string, not `null`.
pub(crate) fn code_or_empty<S, T>(
    value: &Option<T>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    match value {
        Some(value) => value.serialize(serializer),
        None => serializer.serialize_str(""),
    }
}
