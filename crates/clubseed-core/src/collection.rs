use std::fmt;

use serde::{Deserialize, Serialize};

/// Document store collections used by clubseed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Clubs,
    Events,
    Tables,
    Reservations,
    Reports,
}

impl Collection {
    /// Collections replaced by a seeding run, parents before children.
    pub const SEEDED: [Collection; 4] = [
        Collection::Clubs,
        Collection::Events,
        Collection::Tables,
        Collection::Reservations,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clubs => "clubs",
            Self::Events => "events",
            Self::Tables => "tables",
            Self::Reservations => "reservations",
            Self::Reports => "reports",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "clubs" => Some(Self::Clubs),
            "events" => Some(Self::Events),
            "tables" => Some(Self::Tables),
            "reservations" => Some(Self::Reservations),
            "reports" => Some(Self::Reports),
            _ => None,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_collections_are_in_dependency_order() {
        let names: Vec<&str> = Collection::SEEDED.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, ["clubs", "events", "tables", "reservations"]);
    }

    #[test]
    fn parse_round_trips_names() {
        for collection in Collection::SEEDED {
            assert_eq!(Collection::parse(collection.as_str()), Some(collection));
        }
        assert_eq!(Collection::parse("tickets"), None);
    }
}
