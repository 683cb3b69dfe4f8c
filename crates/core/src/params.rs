//! Free-form model parameters forwarded to the server.
//!
//! Keys are validated to be non-empty; values are opaque to the client and
//! interpreted by the remote service (e.g. `n_predict`, `temp`, `stop`).

use crate::{Error, Result};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A boolean flag.
    Bool(bool),
    /// An integer, e.g. `n_predict`.
    Int(i64),
    /// A float, e.g. `temp`.
    Float(f64),
    /// A string.
    Str(String),
    /// A list of strings, e.g. stop sequences.
    List(Vec<String>),
}

impl ParamValue {
    /// Parse a command-line value.
    ///
    /// `true`/`false` become booleans, then integers and floats are tried,
    /// anything else is kept as a string.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }
        if let Ok(int) = raw.parse::<i64>() {
            return Self::Int(int);
        }
        if let Ok(float) = raw.parse::<f64>() {
            return Self::Float(float);
        }
        Self::Str(raw.to_owned())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Parameters merged into every generation request.
///
/// Serializes as a flat JSON object, keys in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "BTreeMap<CompactString, ParamValue>")]
pub struct Params(BTreeMap<CompactString, ParamValue>);

impl Params {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, replacing any previous value under the same key.
    ///
    /// Fails with [`Error::InvalidParam`] if the key is empty.
    pub fn insert(&mut self, key: &str, value: impl Into<ParamValue>) -> Result<()> {
        if key.is_empty() {
            return Err(Error::InvalidParam("parameter key must not be empty".into()));
        }
        self.0.insert(CompactString::from(key), value.into());
        Ok(())
    }

    /// Builder-style [`Params::insert`].
    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Result<Self> {
        self.insert(key, value)?;
        Ok(self)
    }

    /// Get a parameter by key.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Whether the key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn merged(&self, other: &Params) -> Params {
        let mut out = self.clone();
        for (key, value) in &other.0 {
            out.0.insert(key.clone(), value.clone());
        }
        out
    }
}

impl TryFrom<BTreeMap<CompactString, ParamValue>> for Params {
    type Error = Error;

    fn try_from(map: BTreeMap<CompactString, ParamValue>) -> Result<Self> {
        let mut params = Params::new();
        for (key, value) in map {
            params.insert(&key, value)?;
        }
        Ok(params)
    }
}
