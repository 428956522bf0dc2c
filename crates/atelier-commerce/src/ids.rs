//! Newtype IDs for type-safe identifiers.
//!
//! Ids are assigned by the backend (Mongo-style object ids); the client only
//! carries them around, so there is no generator here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A backend-assigned identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(CategoryId);
define_id!(SubcategoryId);
define_id!(UserId);
define_id!(SpecificationId);
define_id!(SizeChartId);
define_id!(MaterialId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("64f1c0ffee");
        assert_eq!(id.as_str(), "64f1c0ffee");
    }

    #[test]
    fn test_id_from_string() {
        let id: CategoryId = "cat-456".into();
        assert_eq!(id.as_str(), "cat-456");
    }

    #[test]
    fn test_id_display() {
        let id = UserId::new("user-789");
        assert_eq!(format!("{}", id), "user-789");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = SubcategoryId::new("sub-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"sub-1\"");
        let back: SubcategoryId = serde_json::from_str("\"sub-1\"").unwrap();
        assert_eq!(back, id);
    }
}
