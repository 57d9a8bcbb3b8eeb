//! Request orchestration: operation → encoder → transport → decoded response.

mod config;
#[cfg(feature = "http")]
mod http;

pub use config::*;
#[cfg(feature = "http")]
pub use http::*;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::core::{FapiaoError, Result, ValidationError};
use crate::operations::Operation;
use crate::payload::{CipherService, PayloadEncoder, Response, ResponseEnvelope};

/// Delivers a JSON request body and returns the JSON response body.
///
/// The client holds no network state of its own; tests plug in a fake.
pub trait Transport {
    fn post_json(&self, url: &str, body: &Value) -> Result<Value>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        (**self).post_json(url, body)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        (**self).post_json(url, body)
    }
}

/// Sends operations for one merchant. Operations built for any other
/// merchant id are rejected before encryption.
///
/// ```no_run
/// # #[cfg(feature = "http")]
/// # fn main() -> fapiao::Result<()> {
/// use fapiao::client::{Client, Config, HttpTransport};
/// use fapiao::operations::CheckLoveCode;
///
/// let config = Config::from_env()?;
/// let client = Client::new(config, HttpTransport::new()?)?;
/// let lookup = CheckLoveCode::new(&client.config().merchant_id).love_code("168001")?;
/// let response = client.send(&lookup)?;
/// println!("{:?} {:?}", response.rtn_code(), response.rtn_msg());
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "http"))]
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct Client<T> {
    config: Config,
    encoder: PayloadEncoder,
    transport: T,
}

impl<T: Transport> Client<T> {
    /// Fails with [`FapiaoError::Configuration`] on missing or malformed settings.
    pub fn new(config: Config, transport: T) -> Result<Self> {
        config.validate()?;
        let cipher = CipherService::new(&config.hash_key, &config.hash_iv)?;
        Ok(Self {
            config,
            encoder: PayloadEncoder::new(cipher),
            transport,
        })
    }

    /// Validate, encrypt and post `operation`, then decode the vendor reply.
    #[instrument(skip_all, fields(path = operation.request_path()))]
    pub fn send<O: Operation + ?Sized>(&self, operation: &O) -> Result<Response> {
        if operation.merchant_id() != self.config.merchant_id {
            return Err(ValidationError::new(
                "MerchantID",
                format!(
                    "operation is for merchant '{}', client is configured for '{}'",
                    operation.merchant_id(),
                    self.config.merchant_id
                ),
            )
            .into());
        }
        let content = operation.content(&self.encoder)?;
        let body = serde_json::to_value(&content)
            .map_err(|e| FapiaoError::Payload(format!("failed to serialize envelope: {e}")))?;

        let url = self.config.endpoint(operation.request_path());
        debug!(%url, rq_id = %content.rq_header.rq_id, "posting request");
        let reply = self.transport.post_json(&url, &body)?;

        let envelope: ResponseEnvelope = serde_json::from_value(reply)
            .map_err(|e| FapiaoError::Payload(format!("unexpected response envelope: {e}")))?;
        Response::from_envelope(&envelope, &self.encoder)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn encoder(&self) -> &PayloadEncoder {
        &self.encoder
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
