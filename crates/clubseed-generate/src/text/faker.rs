use fake::Fake;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use clubseed_core::Club;

use super::{GuestContact, LocaleKey, TextSource};

const EVENT_TYPES: &[&str] = &[
    "DJ Night",
    "Live Concert",
    "Party Night",
    "Electronic Beats",
    "Retro Party",
    "Foam Party",
    "VIP Dinner",
    "Summer Fest",
];

/// Dispatch a faker to the module of the active locale.
macro_rules! localized {
    ($locale:expr, $rng:expr, $module:ident :: $faker:ident ( $($arg:expr),* )) => {
        match $locale {
            LocaleKey::EnUs => fake::faker::$module::en::$faker($($arg),*).fake_with_rng($rng),
            LocaleKey::PtBr => fake::faker::$module::pt_br::$faker($($arg),*).fake_with_rng($rng),
        }
    };
}

/// Randomized text backed by the `fake` crate.
///
/// Owns its own ChaCha8 stream so that text draws never shift the
/// structural draws of the generator.
#[derive(Debug, Clone)]
pub struct FakerText {
    rng: ChaCha8Rng,
    locale: LocaleKey,
}

impl FakerText {
    pub fn new(seed: u64, locale: LocaleKey) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            locale,
        }
    }

    pub fn locale(&self) -> LocaleKey {
        self.locale
    }
}

impl TextSource for FakerText {
    fn club_name(&mut self, _index: usize) -> String {
        let company: String = localized!(self.locale, &mut self.rng, company::CompanyName());
        format!("{company} Club")
    }

    fn club_location(&mut self, _index: usize) -> String {
        let city: String = localized!(self.locale, &mut self.rng, address::CityName());
        format!("{city}, Hrvatska")
    }

    fn club_description(&mut self, _index: usize) -> String {
        localized!(self.locale, &mut self.rng, lorem::Sentence(4..10))
    }

    fn event_name(&mut self, index: usize) -> String {
        let words: Vec<String> = localized!(self.locale, &mut self.rng, lorem::Words(2..3));
        format!(
            "🎉 {} - {}",
            EVENT_TYPES[index % EVENT_TYPES.len()],
            words.join(" ")
        )
    }

    fn event_description(&mut self, _club: &Club) -> String {
        let sentences: Vec<String> =
            localized!(self.locale, &mut self.rng, lorem::Sentences(2..3));
        sentences.join(" ")
    }

    fn guest_contact(&mut self) -> Option<GuestContact> {
        let name: String = localized!(self.locale, &mut self.rng, name::Name());
        let email: String = localized!(self.locale, &mut self.rng, internet::SafeEmail());
        Some(GuestContact { name, email })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_text() {
        let mut left = FakerText::new(11, LocaleKey::EnUs);
        let mut right = FakerText::new(11, LocaleKey::EnUs);
        assert_eq!(left.club_name(0), right.club_name(0));
        assert_eq!(left.event_name(3), right.event_name(3));
        assert_eq!(left.guest_contact(), right.guest_contact());
    }

    #[test]
    fn names_follow_club_and_event_patterns() {
        let mut text = FakerText::new(3, LocaleKey::EnUs);
        assert!(text.club_name(0).ends_with(" Club"));
        assert!(text.club_location(0).ends_with(", Hrvatska"));
        assert!(text.event_name(9).starts_with("🎉 Live Concert - "));
        let contact = text.guest_contact().expect("faker provides contacts");
        assert!(contact.email.contains('@'));
    }

    #[test]
    fn portuguese_locale_generates_text() {
        let mut text = FakerText::new(5, LocaleKey::PtBr);
        assert_eq!(text.locale(), LocaleKey::PtBr);
        assert!(!text.club_description(0).is_empty());
    }
}
