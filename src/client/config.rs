use serde::Deserialize;

use crate::core::{FapiaoError, Result};

pub const ENV_SERVER: &str = "ECPAY_EINVOICE_SERVER";
pub const ENV_MERCHANT_ID: &str = "ECPAY_EINVOICE_MERCHANT_ID";
pub const ENV_HASH_KEY: &str = "ECPAY_EINVOICE_HASH_KEY";
pub const ENV_HASH_IV: &str = "ECPAY_EINVOICE_HASH_IV";

/// Vendor environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Staging,
    Production,
}

impl Environment {
    pub fn server(&self) -> &'static str {
        match self {
            Self::Staging => "https://einvoice-stage.ecpay.com.tw",
            Self::Production => "https://einvoice.ecpay.com.tw",
        }
    }
}

/// Connection settings and key material for one merchant.
///
/// Deserializable from any serde source; `server` defaults to staging.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default = "default_server")]
    pub server: String,
    pub merchant_id: String,
    pub hash_key: String,
    pub hash_iv: String,
}

fn default_server() -> String {
    Environment::Staging.server().to_string()
}

impl Config {
    pub fn new(
        environment: Environment,
        merchant_id: impl Into<String>,
        hash_key: impl Into<String>,
        hash_iv: impl Into<String>,
    ) -> Self {
        Self {
            server: environment.server().to_string(),
            merchant_id: merchant_id.into(),
            hash_key: hash_key.into(),
            hash_iv: hash_iv.into(),
        }
    }

    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.server = server.into();
        self
    }

    /// Read `ECPAY_EINVOICE_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &str| {
            read(name).ok_or_else(|| FapiaoError::Configuration(format!("{name} is not set")))
        };

        let config = Self {
            server: read(ENV_SERVER).unwrap_or_else(default_server),
            merchant_id: required(ENV_MERCHANT_ID)?,
            hash_key: required(ENV_HASH_KEY)?,
            hash_iv: required(ENV_HASH_IV)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Server and merchant id must be present. Key material is checked by the cipher.
    pub fn validate(&self) -> Result<()> {
        if self.server.trim().is_empty() {
            return Err(FapiaoError::Configuration("server is empty".into()));
        }
        if self.merchant_id.is_empty() {
            return Err(FapiaoError::Configuration("merchant id is empty".into()));
        }
        Ok(())
    }

    /// Full URL for a request path.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.server.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server", &self.server)
            .field("merchant_id", &self.merchant_id)
            .field("hash_key", &"***")
            .field("hash_iv", &"***")
            .finish()
    }
}
