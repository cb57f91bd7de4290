//! Typed access to a module's property set.
//!
//! Properties are plain strings. Typed readers parse strictly: integers must be
//! plain decimal text and booleans must be exactly `true` or `false`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading module properties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
  /// A required property is absent.
  #[error("module '{module}': required property '{key}' is not set")]
  Missing { module: String, key: String },

  /// A property is present but its text does not parse as the requested type.
  #[error("module '{module}': property '{key}' has value '{value}', expected {expected}")]
  InvalidFormat {
    module: String,
    key: String,
    value: String,
    expected: &'static str,
  },
}

/// A property value as written in the build description.
///
/// Integers and booleans are accepted for convenience and stored in their
/// canonical text form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawProperty {
  Text(String),
  Integer(i64),
  Boolean(bool),
}

impl fmt::Display for RawProperty {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RawProperty::Text(s) => write!(f, "{}", s),
      RawProperty::Integer(i) => write!(f, "{}", i),
      RawProperty::Boolean(b) => write!(f, "{}", b),
    }
  }
}

/// The string properties of one module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySet {
  module: String,
  values: BTreeMap<String, String>,
}

impl PropertySet {
  pub fn new(module: &str) -> Self {
    Self {
      module: module.to_string(),
      values: BTreeMap::new(),
    }
  }

  /// Build a property set from inherited values overlaid with the module's own.
  pub fn layered(module: &str, inherited: &BTreeMap<String, RawProperty>, own: &BTreeMap<String, RawProperty>) -> Self {
    let mut set = Self::new(module);
    for (key, value) in inherited.iter().chain(own.iter()) {
      set.set(key, &value.to_string());
    }
    set
  }

  pub fn module(&self) -> &str {
    &self.module
  }

  pub fn set(&mut self, key: &str, value: &str) {
    self.values.insert(key.to_string(), value.to_string());
  }

  pub fn contains(&self, key: &str) -> bool {
    self.values.contains_key(key)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  pub fn get_string(&self, key: &str) -> Result<String, PropertyError> {
    self.values.get(key).cloned().ok_or_else(|| PropertyError::Missing {
      module: self.module.clone(),
      key: key.to_string(),
    })
  }

  pub fn get_optional(&self, key: &str) -> Option<String> {
    self.values.get(key).cloned()
  }

  pub fn get_int(&self, key: &str) -> Result<i32, PropertyError> {
    let text = self.get_string(key)?;
    self.parse_int(key, text)
  }

  /// Like [`get_int`](Self::get_int) but rejects zero and negative values.
  pub fn get_positive_int(&self, key: &str) -> Result<i32, PropertyError> {
    let text = self.get_string(key)?;
    match self.parse_int(key, text.clone())? {
      n if n > 0 => Ok(n),
      _ => Err(PropertyError::InvalidFormat {
        module: self.module.clone(),
        key: key.to_string(),
        value: text,
        expected: "a positive integer",
      }),
    }
  }

  pub fn get_int_optional(&self, key: &str, default: i32) -> Result<i32, PropertyError> {
    match self.get_optional(key) {
      Some(text) => self.parse_int(key, text),
      None => Ok(default),
    }
  }

  pub fn get_bool(&self, key: &str) -> Result<bool, PropertyError> {
    let text = self.get_string(key)?;
    self.parse_bool(key, text)
  }

  /// Returns `default` only when `key` is absent; a malformed value still fails.
  pub fn get_bool_optional(&self, key: &str, default: bool) -> Result<bool, PropertyError> {
    match self.get_optional(key) {
      Some(text) => self.parse_bool(key, text),
      None => Ok(default),
    }
  }

  fn parse_int(&self, key: &str, text: String) -> Result<i32, PropertyError> {
    text.parse::<i32>().map_err(|_| PropertyError::InvalidFormat {
      module: self.module.clone(),
      key: key.to_string(),
      value: text,
      expected: "an integer",
    })
  }

  fn parse_bool(&self, key: &str, text: String) -> Result<bool, PropertyError> {
    match text.as_str() {
      "true" => Ok(true),
      "false" => Ok(false),
      _ => Err(PropertyError::InvalidFormat {
        module: self.module.clone(),
        key: key.to_string(),
        value: text,
        expected: "'true' or 'false'",
      }),
    }
  }
}
