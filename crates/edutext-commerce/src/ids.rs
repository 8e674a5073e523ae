//! Identifier newtypes used across the storefront.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

macro_rules! define_numeric_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_numeric_id!(TextbookId, "Catalog identifier of a textbook.");
define_numeric_id!(OrderId, "Server-assigned identifier of a created order.");

/// Client-generated payment reference.
///
/// Minted once per checkout attempt and reused across gateway retries and
/// order submission, so the backend can deduplicate on it. Doubles as the
/// receipt lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reference(String);

impl Reference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Mints a fresh reference from the wall clock and a little entropy,
    /// e.g. `ETX-1755950000123-9f3a`.
    pub fn generate() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let entropy: u16 = rand::random();
        Self(format!("ETX-{}-{:04x}", millis, entropy))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Reference {
    fn from(reference: String) -> Self {
        Self(reference)
    }
}

impl From<&str> for Reference {
    fn from(reference: &str) -> Self {
        Self(reference.to_string())
    }
}

impl AsRef<str> for Reference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
