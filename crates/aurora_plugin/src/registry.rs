//! Namespaces of remote call definitions and their suppressions.

use std::{fmt, ops::RangeInclusive};

use indexmap::{IndexMap, IndexSet, map::Entry};
use serde_json::Value;

/// Block tags accepted wherever a block identifier is expected.
const BLOCK_TAGS: [&str; 5] = ["latest", "earliest", "pending", "safe", "finalized"];

/// Number of hex digits in an address.
const ADDRESS_DIGITS: usize = 40;
/// Number of hex digits in a 32-byte hash.
const HASH_DIGITS: usize = 64;

/// The expected shape of a positional JSON-RPC parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    /// Any JSON value
    Any,
    /// `0x`-prefixed, 20-byte hex string
    Address,
    /// `0x`-prefixed, 32-byte hex string
    Hash,
    /// `0x`-prefixed hex string with an even number of digits, possibly empty
    Data,
    /// `0x`-prefixed hex number with at least one digit
    Quantity,
    /// A quantity, a block tag, or an object with a `blockHash` or
    /// `blockNumber` field
    BlockId,
    /// A JSON boolean
    Bool,
    /// A JSON object
    Object,
    /// A JSON object or `null`
    NullableObject,
    /// A JSON array
    Array,
}

impl ParamKind {
    /// Whether the provided value has this shape.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            ParamKind::Any => true,
            ParamKind::Address => is_hex_of_len(value, ADDRESS_DIGITS),
            ParamKind::Hash => is_hex_of_len(value, HASH_DIGITS),
            ParamKind::Data => value
                .as_str()
                .is_some_and(|data| data.starts_with("0x") && hex::check(data).is_ok()),
            ParamKind::Quantity => is_quantity(value),
            ParamKind::BlockId => is_block_id(value),
            ParamKind::Bool => value.is_boolean(),
            ParamKind::Object => value.is_object(),
            ParamKind::NullableObject => value.is_null() || value.is_object(),
            ParamKind::Array => value.is_array(),
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamKind::Any => "any value",
            ParamKind::Address => "address",
            ParamKind::Hash => "32-byte hash",
            ParamKind::Data => "hex data",
            ParamKind::Quantity => "hex quantity",
            ParamKind::BlockId => "block identifier",
            ParamKind::Bool => "boolean",
            ParamKind::Object => "object",
            ParamKind::NullableObject => "object or null",
            ParamKind::Array => "array",
        };
        f.write_str(name)
    }
}

fn hex_digits(value: &Value) -> Option<&str> {
    value.as_str()?.strip_prefix("0x")
}

fn is_hex_of_len(value: &Value, len: usize) -> bool {
    hex_digits(value).is_some_and(|digits| digits.len() == len && hex::check_raw(digits))
}

fn is_quantity(value: &Value) -> bool {
    hex_digits(value).is_some_and(|digits| !digits.is_empty() && hex::check_raw(digits))
}

fn is_block_id(value: &Value) -> bool {
    match value {
        Value::String(tag) if BLOCK_TAGS.contains(&tag.as_str()) => true,
        Value::String(_) => is_quantity(value),
        Value::Object(fields) => {
            fields
                .get("blockHash")
                .is_some_and(|hash| is_hex_of_len(hash, HASH_DIGITS))
                || fields.get("blockNumber").is_some_and(is_quantity)
        }
        _ => false,
    }
}

/// Why a list of positional parameters does not satisfy a [`ParamSpec`].
#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    /// Too few or too many parameters.
    #[error("expected between {min} and {max} parameters, got {actual}")]
    WrongCount {
        /// The number of required parameters
        min: usize,
        /// The number of required and optional parameters
        max: usize,
        /// The number of provided parameters
        actual: usize,
    },
    /// A parameter does not have the expected shape.
    #[error("parameter {position} must be a {expected}, got {actual}")]
    WrongKind {
        /// Zero-based index of the parameter
        position: usize,
        /// The expected shape
        expected: ParamKind,
        /// The provided value
        actual: Value,
    },
    /// A typed argument could not be converted to JSON.
    #[error("argument cannot be serialized: {0}")]
    Unserializable(serde_json::Error),
}

/// The positional parameter contract of a remote operation: required
/// parameters followed by optional ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParamSpec {
    required: Vec<ParamKind>,
    optional: Vec<ParamKind>,
}

impl ParamSpec {
    /// A contract without parameters.
    pub fn none() -> Self {
        Self::default()
    }

    /// A contract with the provided required parameters.
    pub fn required(kinds: impl IntoIterator<Item = ParamKind>) -> Self {
        Self {
            required: kinds.into_iter().collect(),
            optional: Vec::new(),
        }
    }

    /// Appends optional trailing parameters.
    pub fn with_optional(mut self, kinds: impl IntoIterator<Item = ParamKind>) -> Self {
        self.optional.extend(kinds);
        self
    }

    /// The accepted number of parameters.
    pub fn arity(&self) -> RangeInclusive<usize> {
        self.required.len()..=self.required.len() + self.optional.len()
    }

    /// Checks the parameter count and the shape of each parameter.
    pub fn validate(&self, params: &[Value]) -> Result<(), ParamError> {
        let arity = self.arity();
        if !arity.contains(&params.len()) {
            return Err(ParamError::WrongCount {
                min: *arity.start(),
                max: *arity.end(),
                actual: params.len(),
            });
        }

        let kinds = self.required.iter().chain(self.optional.iter());
        for (position, (kind, value)) in kinds.zip(params).enumerate() {
            if !kind.accepts(value) {
                return Err(ParamError::WrongKind {
                    position,
                    expected: *kind,
                    actual: value.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Static description of one remote operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RpcCallDefinition {
    method: String,
    params: ParamSpec,
}

impl RpcCallDefinition {
    /// Creates a definition for the provided wire method.
    pub fn new(method: impl Into<String>, params: ParamSpec) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    /// The wire method name, e.g. `eth_getBalance`.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The parameter contract.
    pub fn params(&self) -> &ParamSpec {
        &self.params
    }
}

/// Errors that occur while declaring namespaces.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The local name is already defined in the namespace.
    #[error("The method '{method}' is already defined in the '{namespace}' namespace")]
    DuplicateDefinition {
        /// The namespace
        namespace: String,
        /// The local name
        method: String,
    },
    /// A namespace with the same name is already registered.
    #[error("The namespace '{namespace}' is already registered")]
    DuplicateNamespace {
        /// The namespace
        namespace: String,
    },
}

/// Why a local name cannot be called.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unavailability {
    /// The name is suppressed in the namespace.
    Suppressed,
    /// The namespace has no such definition.
    Undefined,
    /// The namespace does not exist.
    UnknownNamespace,
}

impl fmt::Display for Unavailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Unavailability::Suppressed => "suppressed by the backend",
            Unavailability::Undefined => "not defined",
            Unavailability::UnknownNamespace => "unknown namespace",
        };
        f.write_str(reason)
    }
}

/// A local name that cannot be called.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotAvailable {
    /// The namespace
    pub namespace: String,
    /// The local name
    pub method: String,
    /// Why it cannot be called
    pub reason: Unavailability,
}

/// The outcome of looking up a local name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The name is callable.
    Available(&'a RpcCallDefinition),
    /// The name cannot be called.
    NotAvailable(NotAvailable),
}

impl Resolution<'_> {
    /// Whether the name is callable.
    pub fn is_available(&self) -> bool {
        matches!(self, Resolution::Available(_))
    }
}

/// A named group of call definitions.
///
/// Suppressed names never resolve, even when a definition exists for them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Namespace {
    name: String,
    definitions: IndexMap<String, RpcCallDefinition>,
    suppressed: IndexSet<String>,
}

impl Namespace {
    /// Creates an empty namespace.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definitions: IndexMap::new(),
            suppressed: IndexSet::new(),
        }
    }

    /// Creates a namespace that starts with the definitions and suppressions
    /// of `base`.
    pub fn extending(name: impl Into<String>, base: &Namespace) -> Self {
        Self {
            name: name.into(),
            definitions: base.definitions.clone(),
            suppressed: base.suppressed.clone(),
        }
    }

    /// The namespace's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declares a remote operation under a local name.
    pub fn define(
        &mut self,
        local: impl Into<String>,
        method: impl Into<String>,
        params: ParamSpec,
    ) -> Result<&RpcCallDefinition, RegistryError> {
        match self.definitions.entry(local.into()) {
            Entry::Occupied(entry) => Err(RegistryError::DuplicateDefinition {
                namespace: self.name.clone(),
                method: entry.key().clone(),
            }),
            Entry::Vacant(entry) => Ok(entry.insert(RpcCallDefinition::new(method, params))),
        }
    }

    /// Marks a local name as unavailable, whether or not it is defined.
    pub fn suppress(&mut self, local: impl Into<String>) {
        self.suppressed.insert(local.into());
    }

    /// Whether the local name is suppressed.
    pub fn is_suppressed(&self, local: &str) -> bool {
        self.suppressed.contains(local)
    }

    /// Looks up a local name.
    pub fn resolve(&self, local: &str) -> Resolution<'_> {
        let reason = if self.is_suppressed(local) {
            Unavailability::Suppressed
        } else if let Some(definition) = self.definitions.get(local) {
            return Resolution::Available(definition);
        } else {
            Unavailability::Undefined
        };

        Resolution::NotAvailable(NotAvailable {
            namespace: self.name.clone(),
            method: local.to_string(),
            reason,
        })
    }

    /// The callable definitions, in declaration order.
    pub fn available(&self) -> impl Iterator<Item = (&str, &RpcCallDefinition)> {
        self.definitions
            .iter()
            .filter(|(local, _)| !self.suppressed.contains(local.as_str()))
            .map(|(local, definition)| (local.as_str(), definition))
    }

    /// The suppressed local names, in suppression order.
    pub fn suppressed(&self) -> impl Iterator<Item = &str> {
        self.suppressed.iter().map(String::as_str)
    }
}

/// A set of uniquely named namespaces.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamespaceRegistry {
    namespaces: IndexMap<String, Namespace>,
}

impl NamespaceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a prebuilt namespace.
    pub fn insert(&mut self, namespace: Namespace) -> Result<(), RegistryError> {
        match self.namespaces.entry(namespace.name.clone()) {
            Entry::Occupied(entry) => Err(RegistryError::DuplicateNamespace {
                namespace: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(namespace);
                Ok(())
            }
        }
    }

    /// Declares a remote operation, creating the namespace if needed.
    pub fn define(
        &mut self,
        namespace: &str,
        local: impl Into<String>,
        method: impl Into<String>,
        params: ParamSpec,
    ) -> Result<&RpcCallDefinition, RegistryError> {
        self.namespace_mut(namespace).define(local, method, params)
    }

    /// Suppresses a local name, creating the namespace if needed.
    pub fn suppress(&mut self, namespace: &str, local: impl Into<String>) {
        self.namespace_mut(namespace).suppress(local);
    }

    /// Looks up a local name in a namespace.
    pub fn resolve(&self, namespace: &str, local: &str) -> Resolution<'_> {
        match self.namespaces.get(namespace) {
            Some(namespace) => namespace.resolve(local),
            None => Resolution::NotAvailable(NotAvailable {
                namespace: namespace.to_string(),
                method: local.to_string(),
                reason: Unavailability::UnknownNamespace,
            }),
        }
    }

    /// Returns the namespace with the provided name.
    pub fn get(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.get(name)
    }

    /// The registered namespaces, in registration order.
    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.namespaces.values()
    }

    fn namespace_mut(&mut self, name: &str) -> &mut Namespace {
        self.namespaces
            .entry(name.to_string())
            .or_insert_with(|| Namespace::new(name))
    }
}
