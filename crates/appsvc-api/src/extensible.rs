// ── Extensible wire enums ──
//
// The service adds enum values over time. A known value parses into `E`;
// anything else is kept verbatim so a response never fails to decode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A wire enum that also carries values this crate does not know yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Extensible<E> {
    Known(E),
    Other(String),
}

impl<E: AsRef<str>> Extensible<E> {
    /// The wire string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(e) => e.as_ref(),
            Self::Other(raw) => raw,
        }
    }
}

impl<E: Default> Default for Extensible<E> {
    fn default() -> Self {
        Self::Known(E::default())
    }
}

impl<E: FromStr> From<String> for Extensible<E> {
    fn from(raw: String) -> Self {
        raw.parse().map_or(Self::Other(raw), Self::Known)
    }
}

impl<E: AsRef<str>> fmt::Display for Extensible<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<E: AsRef<str>> Serialize for Extensible<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// `null` reads as the zero value, like an absent field.
impl<'de, E: FromStr + Default> Deserialize<'de> for Extensible<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.map_or_else(Self::default, Self::from))
    }
}
