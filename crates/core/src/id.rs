//! Strongly-typed identifiers used across the domain.
//!
//! Products and orders are keyed by short random codes rather than raw UUIDs;
//! the external feed uses its own integer numbering space.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Locally-assigned unique code identifying a product.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCode(String);

/// Unique code identifying a replenishment order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

/// Identifier in the third-party catalog's own numbering space.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalId(pub i64);

impl core::fmt::Display for ExternalId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Length of generated codes (uppercase hex, from a random UUID).
const CODE_LEN: usize = 8;

macro_rules! impl_code_newtype {
    ($t:ty) => {
        impl $t {
            /// Wrap an existing code verbatim.
            pub fn new(code: impl Into<String>) -> Self {
                Self(code.into())
            }

            /// Generate a fresh random code.
            ///
            /// Uses a v4 UUID so codes generated in the same instant do not
            /// share a prefix. Prefer passing codes explicitly in tests.
            pub fn generate() -> Self {
                let hex = Uuid::new_v4().simple().to_string();
                Self(hex[..CODE_LEN].to_uppercase())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_code_newtype!(ProductCode);
impl_code_newtype!(OrderId);
