// Parts of this code were adapted from github.com/gakonst/ethers-rs and are
// distributed under its licenses:
// - https://github.com/gakonst/ethers-rs/blob/7e6c3ba98363bdf6131e8284f186cc2c70ff48c3/LICENSE-APACHE
// - https://github.com/gakonst/ethers-rs/blob/7e6c3ba98363bdf6131e8284f186cc2c70ff48c3/LICENSE-MIT
// For the original context, see https://github.com/gakonst/ethers-rs/tree/7e6c3ba98363bdf6131e8284f186cc2c70ff48c3

use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Represents a JSON-RPC request.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Request<MethodT> {
    /// JSON-RPC version
    #[serde(rename = "jsonrpc")]
    pub version: Version,
    /// the method to invoke, with its parameters
    #[serde(flatten)]
    pub method: MethodT,
    /// the request id
    pub id: Id,
}

/// Represents a JSON-RPC response.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Response<SuccessT> {
    /// JSON-RPC version
    #[serde(rename = "jsonrpc")]
    pub version: Version,
    /// the request id that this response belongs to
    pub id: Id,
    /// the response payload
    #[serde(flatten)]
    pub data: ResponseData<SuccessT>,
}

/// The payload of a JSON-RPC response: either a result or an error object.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ResponseData<SuccessT> {
    /// The server returned an error object
    Error {
        /// The error object
        error: Error,
    },
    /// The server returned a result
    Success {
        /// The result
        result: SuccessT,
    },
}

impl<SuccessT> ResponseData<SuccessT> {
    /// Converts the response data into a `Result`.
    pub fn into_result(self) -> Result<SuccessT, Error> {
        match self {
            ResponseData::Success { result } => Ok(result),
            ResponseData::Error { error } => Err(error),
        }
    }
}

impl<SuccessT> From<Result<SuccessT, Error>> for ResponseData<SuccessT> {
    fn from(result: Result<SuccessT, Error>) -> Self {
        match result {
            Ok(result) => ResponseData::Success { result },
            Err(error) => ResponseData::Error { error },
        }
    }
}

/// A JSON-RPC error object, as reported by the remote node.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Error {
    /// error code
    pub code: i64,
    /// error message
    pub message: String,
    /// optional additional data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "The remote node returned error code {}: {}",
            self.code, self.message
        )?;
        if let Some(data) = &self.data {
            write!(f, " ({data})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

/// Represents JSON-RPC request/response id.
///
/// An identifier established by the Client that MUST contain a String, Number,
/// or NULL value if included. If it is not included it is assumed to be a
/// notification. The value SHOULD normally not be Null and Numbers SHOULD NOT
/// contain fractional parts.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Id {
    /// Numeric id
    Num(u64),
    /// String id
    Str(String),
}

/// Supported JSON-RPC versions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Version {
    /// Version 2.0
    V2_0,
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Version::V2_0 => serializer.serialize_str("2.0"),
        }
    }
}

impl<'a> Deserialize<'a> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Version, D::Error>
    where
        D: Deserializer<'a>,
    {
        let version = String::deserialize(deserializer)?;
        match version.as_str() {
            "2.0" => Ok(Version::V2_0),
            _ => Err(serde::de::Error::custom(format!(
                "unsupported JSON-RPC version '{version}'"
            ))),
        }
    }
}
