use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a cart instance.
///
/// One cart lives per shopping session; the id only serves to correlate
/// log lines and checkout snapshots with the session that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(Uuid);

impl CartId {
    /// Creates a new random cart ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CartId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses the hyphenated (or simple) UUID text form.
impl FromStr for CartId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_id_new_creates_unique_ids() {
        assert_ne!(CartId::new(), CartId::new());
    }

    #[test]
    fn cart_id_parses_its_display_form() {
        let id = CartId::new();
        assert_eq!(id.to_string().parse::<CartId>().unwrap(), id);
        assert!("not-a-uuid".parse::<CartId>().is_err());
    }

    #[test]
    fn cart_id_serializes_as_bare_uuid_string() {
        let id = CartId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
