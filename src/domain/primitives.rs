//! Domain primitives: typed entity ids.

use serde::{Deserialize, Serialize};

/// Common surface of every typed id, used where code is generic over the
/// entity kind (id sets, batched lookups).
pub trait EntityId: Copy + Ord + std::hash::Hash + std::fmt::Debug + Send + Sync + 'static {
    fn from_i64(id: i64) -> Self;
    fn to_i64(self) -> i64;
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(id: i64) -> Self {
                $name(id)
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl EntityId for $name {
            fn from_i64(id: i64) -> Self {
                $name(id)
            }

            fn to_i64(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(LeagueId);
entity_id!(CompetitionId);
entity_id!(TeamId);
entity_id!(LocationId);
entity_id!(
    /// Scheduled game between a home and an away team.
    GameId
);
entity_id!(PlayerId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_round_trip() {
        assert_eq!(TeamId::from_i64(-4).to_i64(), -4);
        assert_eq!(PlayerId::from_i64(3), PlayerId::new(3));
    }

    #[test]
    fn test_id_serializes_as_bare_number() {
        let json = serde_json::to_string(&GameId::new(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_id_display() {
        assert_eq!(CompetitionId::new(7).to_string(), "7");
    }
}
