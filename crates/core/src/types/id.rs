//! Canonical product identifiers.
//!
//! Catalog endpoints disagree on whether a product id is a JSON number or a
//! JSON string. [`ProductId`] normalizes both to one string form at the
//! boundary so `7`, `7.0` and `"7"` compare equal everywhere downstream.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Opaque product identifier in canonical string form.
///
/// Serializes as a JSON string. Deserializes from a string, an integer, or a
/// float; numbers are rendered the way the catalog prints them, with integral
/// floats losing their trailing `.0`.
///
/// # Example
///
/// ```rust
/// # use medmart_core::ProductId;
/// let from_number: ProductId = serde_json::from_str("7").unwrap();
/// let from_string: ProductId = serde_json::from_str("\"7\"").unwrap();
///
/// assert_eq!(from_number, from_string);
/// assert_eq!(from_number.as_str(), "7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create an ID from an already-canonical string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Normalize a JSON scalar into an ID.
    ///
    /// Returns `None` for anything that is not a string or a number, and for
    /// the empty string.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            Value::Number(n) => n
                .as_i64()
                .map(|i| i.to_string())
                .or_else(|| n.as_u64().map(|u| u.to_string()))
                .or_else(|| n.as_f64().map(canonical_float))
                .map(Self),
            _ => None,
        }
    }

    /// Get the canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the ID and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Render a float id. `f64`'s `Display` already drops a zero fraction.
fn canonical_float(f: f64) -> String {
    f.to_string()
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawProductId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawProductId::deserialize(deserializer)?;
        Ok(match raw {
            RawProductId::Text(s) => Self(s),
            RawProductId::Signed(i) => Self::from(i),
            RawProductId::Unsigned(u) => Self::from(u),
            RawProductId::Float(f) => Self(canonical_float(f)),
        })
    }
}
