use std::{collections::HashMap, time::Duration};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::RpcClientError;

// Retry parameters for transient HTTP failures, e.g. rate limiting.
const DEFAULT_MIN_RETRY_INTERVAL: Duration = Duration::from_secs(1);
const DEFAULT_MAX_RETRY_INTERVAL: Duration = Duration::from_secs(32);
const DEFAULT_MAX_RETRIES: u32 = 9;

/// Aurora networks with a public JSON-RPC endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuroraNetwork {
    /// Aurora mainnet
    Mainnet,
    /// Aurora testnet
    Testnet,
}

impl AuroraNetwork {
    /// The chain ID, which Aurora also reports as its network ID.
    pub const fn chain_id(self) -> u64 {
        match self {
            AuroraNetwork::Mainnet => 1_313_161_554,
            AuroraNetwork::Testnet => 1_313_161_555,
        }
    }

    /// The HTTPS endpoint.
    pub const fn http_url(self) -> &'static str {
        match self {
            AuroraNetwork::Mainnet => "https://mainnet.aurora.dev",
            AuroraNetwork::Testnet => "https://testnet.aurora.dev",
        }
    }

    /// The WebSocket endpoint.
    pub const fn ws_url(self) -> &'static str {
        match self {
            AuroraNetwork::Mainnet => "wss://mainnet.aurora.dev",
            AuroraNetwork::Testnet => "wss://testnet.aurora.dev",
        }
    }

    /// Finds the network with the provided chain ID.
    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        [AuroraNetwork::Mainnet, AuroraNetwork::Testnet]
            .into_iter()
            .find(|network| network.chain_id() == chain_id)
    }

    /// Infers the network from a public endpoint URL.
    pub fn from_url(url: &url::Url) -> Option<Self> {
        match url.host_str()? {
            "mainnet.aurora.dev" => Some(AuroraNetwork::Mainnet),
            "testnet.aurora.dev" => Some(AuroraNetwork::Testnet),
            _ => None,
        }
    }
}

/// Configuration for an [`HttpTransport`](crate::HttpTransport).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpTransportConfig {
    /// The JSON-RPC endpoint.
    pub url: String,
    /// Extra HTTP headers sent with every request.
    pub http_headers: Option<HashMap<String, String>>,
    /// Maximum number of retries for transient HTTP failures. Zero disables
    /// retrying.
    pub max_retries: u32,
    /// Lower bound of the exponential backoff.
    #[serde(with = "millis")]
    pub min_retry_interval: Duration,
    /// Upper bound of the exponential backoff.
    #[serde(with = "millis")]
    pub max_retry_interval: Duration,
    /// Timeout for a single HTTP request. `None` waits indefinitely.
    #[serde(with = "optional_millis")]
    pub request_timeout: Option<Duration>,
}

impl HttpTransportConfig {
    /// Creates a configuration with default settings for the provided URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Converts the configured HTTP headers into a [`HeaderMap`].
    pub fn header_map(&self) -> Result<HeaderMap, RpcClientError> {
        let mut headers = HeaderMap::new();
        for (name, value) in self.http_headers.iter().flatten() {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|error| {
                RpcClientError::InvalidHeader {
                    name: name.clone(),
                    message: error.to_string(),
                }
            })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|error| RpcClientError::InvalidHeader {
                    name: name.clone(),
                    message: error.to_string(),
                })?;

            headers.append(header_name, header_value);
        }
        Ok(headers)
    }
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            url: AuroraNetwork::Mainnet.http_url().to_string(),
            http_headers: None,
            max_retries: DEFAULT_MAX_RETRIES,
            min_retry_interval: DEFAULT_MIN_RETRY_INTERVAL,
            max_retry_interval: DEFAULT_MAX_RETRY_INTERVAL,
            request_timeout: None,
        }
    }
}

/// (De)serializes a [`Duration`] as a number of milliseconds.
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

mod optional_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => super::millis::serialize(value, s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Option::<u64>::deserialize(d).map(|millis| millis.map(Duration::from_millis))
    }
}
