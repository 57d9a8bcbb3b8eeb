use chrono::Utc;
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Protocol revision sent with every request.
pub const REVISION: &str = "3.0.0";

/// Length of each random padding segment in an `RqID`.
const RQ_ID_PADDING: usize = 5;

/// `RqHeader`: per-request metadata (timestamp, unique id, protocol revision).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RqHeader {
    /// Unix timestamp in seconds.
    #[serde(rename = "Timestamp")]
    pub timestamp: i64,
    /// Best-effort unique request id.
    #[serde(rename = "RqID")]
    pub rq_id: String,
    #[serde(rename = "Revision")]
    pub revision: String,
}

impl RqHeader {
    /// Header stamped with the current time and a fresh `RqID`.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            timestamp: now.timestamp(),
            rq_id: generate_rq_id(now.timestamp(), now.timestamp_subsec_micros()),
            revision: REVISION.to_string(),
        }
    }

    /// Header with an explicit timestamp, which must be positive.
    pub fn with_timestamp(timestamp: i64) -> Result<Self, ValidationError> {
        if timestamp <= 0 {
            return Err(ValidationError::new(
                "Timestamp",
                "timestamp must be greater than 0",
            ));
        }
        let micros = Utc::now().timestamp_subsec_micros();
        Ok(Self {
            timestamp,
            rq_id: generate_rq_id(timestamp, micros),
            revision: REVISION.to_string(),
        })
    }
}

impl Default for RqHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// seconds ‖ 5 random alphanumerics ‖ microseconds ‖ 5 random alphanumerics
fn generate_rq_id(seconds: i64, micros: u32) -> String {
    let mut rng = rand::thread_rng();
    let mut padding = || -> String {
        (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(RQ_ID_PADDING)
            .map(char::from)
            .collect()
    };
    let head = padding();
    let tail = padding();
    format!("{seconds}{head}{micros}{tail}")
}
