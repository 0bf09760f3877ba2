use clubseed_core::Club;

use super::{GuestContact, TextSource};

struct ClubFixture {
    name: &'static str,
    location: &'static str,
    description: &'static str,
}

const CLUBS: &[ClubFixture] = &[
    ClubFixture {
        name: "Club Riviera",
        location: "Rijeka, Hrvatska",
        description: "The best club on the coast, music until dawn!",
    },
    ClubFixture {
        name: "Club Dalmatino",
        location: "Split, Hrvatska",
        description: "Real Dalmatian nights on the waterfront",
    },
    ClubFixture {
        name: "Club Central",
        location: "Zagreb, Hrvatska",
        description: "The epicentre of the city's nightlife",
    },
    ClubFixture {
        name: "Club Danube",
        location: "Osijek, Hrvatska",
        description: "Slavonian music tradition with a modern sound",
    },
    ClubFixture {
        name: "Club Paradise",
        location: "Dubrovnik, Hrvatska",
        description: "Luxury club overlooking the Adriatic",
    },
];

const EVENT_NAMES: &[&str] = &[
    "Friday Night Fever",
    "Saturday Beats",
    "Summer Party",
    "Tech Sounds",
    "Sunset Vibes",
];

/// Deterministic fixture text.
///
/// Club fixtures repeat with a numeric suffix once exhausted ("Club Riviera 2"),
/// event names cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureText;

impl FixtureText {
    fn club(index: usize) -> (&'static ClubFixture, usize) {
        (&CLUBS[index % CLUBS.len()], index / CLUBS.len())
    }
}

impl TextSource for FixtureText {
    fn club_name(&mut self, index: usize) -> String {
        match Self::club(index) {
            (club, 0) => club.name.to_string(),
            (club, round) => format!("{} {}", club.name, round + 1),
        }
    }

    fn club_location(&mut self, index: usize) -> String {
        Self::club(index).0.location.to_string()
    }

    fn club_description(&mut self, index: usize) -> String {
        Self::club(index).0.description.to_string()
    }

    fn event_name(&mut self, index: usize) -> String {
        format!("🎉 {}", EVENT_NAMES[index % EVENT_NAMES.len()])
    }

    fn event_description(&mut self, club: &Club) -> String {
        format!("Spectacular event at {}", club.name)
    }

    fn guest_contact(&mut self) -> Option<GuestContact> {
        None
    }
}
