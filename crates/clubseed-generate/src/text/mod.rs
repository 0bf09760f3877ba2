mod faker;
mod fixture;
mod locales;

pub use faker::FakerText;
pub use fixture::FixtureText;
pub use locales::LocaleKey;

use clubseed_core::Club;

use crate::options::TextProfile;

/// Contact details attached to a reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestContact {
    pub name: String,
    pub email: String,
}

/// Provider of the descriptive text carried by generated documents.
///
/// Indices are 0-based positions: `club_*` take the club's position in the
/// run, `event_name` takes the event's position within its club.
pub trait TextSource {
    fn club_name(&mut self, index: usize) -> String;
    fn club_location(&mut self, index: usize) -> String;
    fn club_description(&mut self, index: usize) -> String;
    fn event_name(&mut self, index: usize) -> String;
    fn event_description(&mut self, club: &Club) -> String;
    /// Guest details for a reservation, or `None` when the source has none.
    fn guest_contact(&mut self) -> Option<GuestContact>;
}

/// Build the text source named by a profile.
pub fn text_source(profile: TextProfile, seed: u64) -> Box<dyn TextSource> {
    match profile {
        TextProfile::Fixture => Box::new(FixtureText),
        TextProfile::Faker { locale } => Box::new(FakerText::new(seed, locale)),
    }
}
