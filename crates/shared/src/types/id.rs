//! Typed file identifier.
//!
//! A `FileId` names both the stored bytes and the metadata record for one
//! logical file. Wrapping the UUID keeps raw strings out of the backends.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v4.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(
    FileId,
    "Unique identifier for a stored file and its metadata record."
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_file_id_creation() {
        let id = FileId::new();
        assert!(!id.to_string().is_empty());
    }

    #[test]
    fn test_file_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = FileId::from_uuid(uuid);
        assert_eq!(id.into_inner(), uuid);
    }

    #[test]
    fn test_file_id_display() {
        let uuid = Uuid::new_v4();
        let id = FileId::from_uuid(uuid);
        assert_eq!(format!("{id}"), uuid.to_string());
    }

    #[test]
    fn test_file_id_from_str() {
        let uuid = Uuid::new_v4();
        let id = FileId::from_str(&uuid.to_string()).unwrap();
        assert_eq!(id.into_inner(), uuid);
    }

    #[test]
    fn test_file_id_from_str_error() {
        assert!(FileId::from_str("not-a-uuid").is_err());
    }

    #[test]
    fn test_file_ids_are_unique() {
        let ids: std::collections::HashSet<FileId> = (0..100).map(|_| FileId::new()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_file_id_serde_transparent() {
        let id = FileId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    // Display and FromStr are inverses for any valid UUID.
    proptest! {
        #[test]
        fn prop_file_id_display_parse_roundtrip(bytes in any::<[u8; 16]>()) {
            let id = FileId::from_uuid(Uuid::from_bytes(bytes));
            let parsed = FileId::from_str(&id.to_string()).unwrap();
            prop_assert_eq!(parsed, id);
        }
    }
}
