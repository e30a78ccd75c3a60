//! Newtype identifiers for cards and their content blocks.
//!
//! Both wrap a shared `Arc<str>` so cloning an id while shuffling blocks between
//! faces never copies the underlying string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(id: impl Into<Arc<str>>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s.into())
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.into())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id! {
    /// Stable identifier of a card, usually derived from the source record.
    CardId
}

string_id! {
    /// Identifier of one content block within a card.
    BlockId
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_card_id_creation() {
        let a = CardId::new("fireball");
        let b = CardId::from("fireball");
        let c = CardId::from(String::from("fireball"));
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.as_str(), "fireball");
        assert_eq!(a.to_string(), "fireball");
    }

    #[test]
    fn test_ids_as_map_keys() {
        let mut heights = HashMap::new();
        heights.insert(BlockId::new("fireball/0"), 12.5_f32);
        assert_eq!(heights.get(&BlockId::new("fireball/0")), Some(&12.5));
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&CardId::new("shield")).unwrap();
        assert_eq!(json, "\"shield\"");
        let back: CardId = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_str(), "shield");
    }
}
