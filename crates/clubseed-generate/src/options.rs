use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;
use crate::text::LocaleKey;

/// Upper bound for every day-based window: event spread, date horizon and
/// reservation age.
pub const MAX_WINDOW_DAYS: u64 = 36_500;

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: u32,
    pub max: u32,
}

impl IntRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// How event dates are laid out relative to the run clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DateSchedule {
    /// Event `i` (1-based) lands `i * every_days` days after today.
    Weekly { every_days: u32 },
    /// Uniform date between tomorrow and `horizon_days` days ahead.
    RandomFuture { horizon_days: u32 },
}

/// How reservation creation timestamps are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CreatedAtMode {
    /// Every reservation is stamped with the run clock.
    Now,
    /// Run clock minus a uniform offset of up to `max_days` days.
    RandomPast { max_days: u32 },
}

/// Source of descriptive text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextProfile {
    /// Fixed club and event fixtures, no guest contact details.
    Fixture,
    /// Fake names, places and lorem text.
    Faker { locale: LocaleKey },
}

/// Named configuration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Small deterministic fixture: 5 clubs, 5 events each, 20 tables each.
    Fixture,
    /// Larger randomized dataset with capacity, pricing and guest details.
    Randomized,
}

impl Profile {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "fixture" => Some(Self::Fixture),
            "randomized" => Some(Self::Randomized),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fixture => "fixture",
            Self::Randomized => "randomized",
        }
    }

    pub fn options(self) -> GenerateOptions {
        match self {
            Self::Fixture => GenerateOptions {
                profile: self,
                clubs: 5,
                events_per_club: 5,
                tables_per_event: 20,
                reservation_probability: 0.45,
                capacity: None,
                price: None,
                event_dates: DateSchedule::Weekly { every_days: 7 },
                created_at: CreatedAtMode::Now,
                text: TextProfile::Fixture,
            },
            Self::Randomized => GenerateOptions {
                profile: self,
                clubs: 8,
                events_per_club: 6,
                tables_per_event: 25,
                reservation_probability: 0.5,
                capacity: Some(IntRange::new(2, 8)),
                price: Some(IntRange::new(50, 500)),
                event_dates: DateSchedule::RandomFuture { horizon_days: 365 },
                created_at: CreatedAtMode::RandomPast { max_days: 30 },
                text: TextProfile::Faker {
                    locale: LocaleKey::EnUs,
                },
            },
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for the dataset generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Preset the options started from.
    pub profile: Profile,
    pub clubs: u32,
    pub events_per_club: u32,
    pub tables_per_event: u32,
    /// Probability that a table is drawn as reserved.
    pub reservation_probability: f64,
    /// Table capacity range; `None` leaves capacity off the documents.
    pub capacity: Option<IntRange>,
    /// Table price range; `None` leaves price off the documents.
    pub price: Option<IntRange>,
    pub event_dates: DateSchedule,
    pub created_at: CreatedAtMode,
    pub text: TextProfile,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Profile::Fixture.options()
    }
}

impl GenerateOptions {
    /// Check bounds once so generation itself never fails.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if !(0.0..=1.0).contains(&self.reservation_probability) {
            return Err(GenerationError::InvalidConfig(format!(
                "reservation_probability must be within [0, 1], got {}",
                self.reservation_probability
            )));
        }

        if let Some(capacity) = self.capacity {
            check_range("capacity", capacity)?;
            if capacity.min == 0 {
                return Err(GenerationError::InvalidConfig(
                    "capacity.min must be at least 1".to_string(),
                ));
            }
        }
        if let Some(price) = self.price {
            check_range("price", price)?;
        }

        match self.event_dates {
            DateSchedule::Weekly { every_days: 0 } => {
                return Err(GenerationError::InvalidConfig(
                    "event_dates.every_days must be greater than 0".to_string(),
                ));
            }
            DateSchedule::Weekly { every_days } => {
                let last_offset = u64::from(every_days) * u64::from(self.events_per_club);
                if last_offset > MAX_WINDOW_DAYS {
                    return Err(GenerationError::InvalidConfig(format!(
                        "event_dates.every_days x events_per_club must be <= {MAX_WINDOW_DAYS} days, got {last_offset}"
                    )));
                }
            }
            DateSchedule::RandomFuture { horizon_days: 0 } => {
                return Err(GenerationError::InvalidConfig(
                    "event_dates.horizon_days must be greater than 0".to_string(),
                ));
            }
            DateSchedule::RandomFuture { horizon_days } => {
                check_window("event_dates.horizon_days", horizon_days)?;
            }
        }

        match self.created_at {
            CreatedAtMode::Now => {}
            CreatedAtMode::RandomPast { max_days: 0 } => {
                return Err(GenerationError::InvalidConfig(
                    "created_at.max_days must be greater than 0".to_string(),
                ));
            }
            CreatedAtMode::RandomPast { max_days } => {
                check_window("created_at.max_days", max_days)?;
            }
        }

        Ok(())
    }

    /// Number of events the options will produce.
    pub fn expected_events(&self) -> u64 {
        u64::from(self.clubs) * u64::from(self.events_per_club)
    }

    /// Number of tables the options will produce.
    pub fn expected_tables(&self) -> u64 {
        self.expected_events() * u64::from(self.tables_per_event)
    }
}

fn check_window(name: &str, days: u32) -> Result<(), GenerationError> {
    if u64::from(days) > MAX_WINDOW_DAYS {
        return Err(GenerationError::InvalidConfig(format!(
            "{name} must be <= {MAX_WINDOW_DAYS}, got {days}"
        )));
    }
    Ok(())
}

fn check_range(name: &str, range: IntRange) -> Result<(), GenerationError> {
    if range.min > range.max {
        return Err(GenerationError::InvalidConfig(format!(
            "{name}.min ({}) must be <= {name}.max ({})",
            range.min, range.max
        )));
    }
    Ok(())
}
