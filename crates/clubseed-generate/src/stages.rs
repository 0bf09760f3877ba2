//! Generation stages, parents first.
//!
//! Each stage takes the previous stage's records as an explicit argument and
//! returns its own batch; nothing is accumulated in shared state.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use clubseed_core::{Club, Event, Reservation, ReservationStatus, Table, TableStatus};

use crate::options::{CreatedAtMode, DateSchedule, GenerateOptions, IntRange};
use crate::random::RandomSource;
use crate::text::TextSource;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

pub fn club_id(number: usize) -> String {
    format!("club-{number}")
}

pub fn event_id(club_id: &str, number: usize) -> String {
    format!("{club_id}-event-{number}")
}

pub fn table_id(event_id: &str, number: u32) -> String {
    format!("{event_id}-table-{number}")
}

pub fn reservation_id(table_id: &str) -> String {
    format!("reservation-{table_id}")
}

pub fn generate_clubs(options: &GenerateOptions, text: &mut dyn TextSource) -> Vec<Club> {
    (0..options.clubs as usize)
        .map(|index| Club {
            id: club_id(index + 1),
            name: text.club_name(index),
            location: text.club_location(index),
            description: text.club_description(index),
        })
        .collect()
}

pub fn generate_events(
    options: &GenerateOptions,
    clubs: &[Club],
    random: &mut dyn RandomSource,
    text: &mut dyn TextSource,
    today: NaiveDate,
) -> Vec<Event> {
    let per_club = options.events_per_club as usize;
    let mut events = Vec::with_capacity(clubs.len() * per_club);

    for club in clubs {
        for index in 0..per_club {
            events.push(Event {
                id: event_id(&club.id, index + 1),
                club_id: club.id.clone(),
                name: text.event_name(index),
                date: event_date(options.event_dates, index, random, today),
                description: text.event_description(club),
            });
        }
    }

    events
}

pub fn generate_tables(
    options: &GenerateOptions,
    events: &[Event],
    random: &mut dyn RandomSource,
) -> Vec<Table> {
    let per_event = options.tables_per_event;
    let mut tables = Vec::with_capacity(events.len() * per_event as usize);

    for event in events {
        for number in 1..=per_event {
            let status = if random.chance(options.reservation_probability) {
                TableStatus::Reserved
            } else {
                TableStatus::Free
            };
            tables.push(Table {
                id: table_id(&event.id, number),
                event_id: event.id.clone(),
                number,
                capacity: options.capacity.map(|range| draw(range, random)),
                status,
                price: options.price.map(|range| draw(range, random)),
            });
        }
    }

    tables
}

pub fn generate_reservations(
    options: &GenerateOptions,
    tables: &[Table],
    random: &mut dyn RandomSource,
    text: &mut dyn TextSource,
    now: DateTime<Utc>,
) -> Vec<Reservation> {
    tables
        .iter()
        .filter(|table| table.status.is_reserved())
        .map(|table| {
            let contact = text.guest_contact();
            let guests = match table.capacity {
                Some(capacity) => draw(IntRange::new(1, capacity.max(1)), random),
                None => 1,
            };
            Reservation {
                id: reservation_id(&table.id),
                event_id: table.event_id.clone(),
                table_id: table.id.clone(),
                user_name: contact.as_ref().map(|contact| contact.name.clone()),
                user_email: contact.map(|contact| contact.email),
                status: ReservationStatus::Booked,
                guests,
                created_at: created_at(options.created_at, random, now),
            }
        })
        .collect()
}

fn draw(range: IntRange, random: &mut dyn RandomSource) -> u32 {
    let value = random.int_in(i64::from(range.min), i64::from(range.max));
    u32::try_from(value).unwrap_or(range.min)
}

fn event_date(
    schedule: DateSchedule,
    index: usize,
    random: &mut dyn RandomSource,
    today: NaiveDate,
) -> NaiveDate {
    let offset_days = match schedule {
        DateSchedule::Weekly { every_days } => {
            i64::try_from(index)
                .unwrap_or(i64::MAX)
                .saturating_add(1)
                .saturating_mul(i64::from(every_days))
        }
        DateSchedule::RandomFuture { horizon_days } => {
            random.int_in(1, i64::from(horizon_days))
        }
    };
    // Only reachable when `validate` was skipped.
    Duration::try_days(offset_days)
        .and_then(|offset| today.checked_add_signed(offset))
        .unwrap_or(NaiveDate::MAX)
}

fn created_at(mode: CreatedAtMode, random: &mut dyn RandomSource, now: DateTime<Utc>) -> DateTime<Utc> {
    match mode {
        CreatedAtMode::Now => now,
        CreatedAtMode::RandomPast { max_days } => {
            let offset = random.int_in(0, i64::from(max_days).saturating_mul(MILLIS_PER_DAY));
            Duration::try_milliseconds(offset)
                .and_then(|offset| now.checked_sub_signed(offset))
                .unwrap_or(DateTime::<Utc>::MIN_UTC)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::options::Profile;
    use crate::random::ScriptedRandom;
    use crate::text::FixtureText;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
    }

    #[test]
    fn ids_follow_parent_prefixes() {
        assert_eq!(club_id(3), "club-3");
        assert_eq!(event_id("club-3", 2), "club-3-event-2");
        assert_eq!(table_id("club-3-event-2", 14), "club-3-event-2-table-14");
        assert_eq!(
            reservation_id("club-3-event-2-table-14"),
            "reservation-club-3-event-2-table-14"
        );
    }

    #[test]
    fn weekly_schedule_spaces_events_by_a_week() {
        let mut options = Profile::Fixture.options();
        options.clubs = 1;
        options.events_per_club = 3;
        let clubs = generate_clubs(&options, &mut FixtureText);
        let mut random = ScriptedRandom::new();
        let events = generate_events(&options, &clubs, &mut random, &mut FixtureText, today());

        let dates: Vec<String> = events.iter().map(|e| e.date.to_string()).collect();
        assert_eq!(dates, ["2026-10-26", "2026-11-02", "2026-11-09"]);
        assert_eq!(events[2].description, "Spectacular event at Club Riviera");
    }

    #[test]
    fn random_future_dates_stay_within_horizon() {
        let mut options = Profile::Randomized.options();
        options.event_dates = DateSchedule::RandomFuture { horizon_days: 10 };
        options.clubs = 1;
        options.events_per_club = 2;
        let clubs = generate_clubs(&options, &mut FixtureText);
        let mut random = ScriptedRandom::new().with_ints([1, 400]);
        let events = generate_events(&options, &clubs, &mut random, &mut FixtureText, today());
        assert_eq!(events[0].date.to_string(), "2026-10-20");
        assert_eq!(events[1].date.to_string(), "2026-10-29");
    }

    #[test]
    fn scripted_draws_set_table_status_capacity_and_price() {
        let mut options = Profile::Randomized.options();
        options.tables_per_event = 2;
        let event = Event {
            id: "club-1-event-1".to_string(),
            club_id: "club-1".to_string(),
            name: "Night".to_string(),
            date: today(),
            description: String::new(),
        };
        let mut random = ScriptedRandom::new()
            .with_chances([true, false])
            .with_ints([4, 120, 9, 9999]);
        let tables = generate_tables(&options, &[event], &mut random);

        assert_eq!(tables[0].status, TableStatus::Reserved);
        assert_eq!(tables[0].capacity, Some(4));
        assert_eq!(tables[0].price, Some(120));
        assert_eq!(tables[1].status, TableStatus::Free);
        assert_eq!(tables[1].capacity, Some(8), "clamped to capacity.max");
        assert_eq!(tables[1].price, Some(500), "clamped to price.max");
    }

    #[test]
    fn reservations_only_for_reserved_tables() {
        let options = Profile::Fixture.options();
        let now = Utc
            .with_ymd_and_hms(2026, 10, 19, 20, 0, 0)
            .single()
            .expect("valid timestamp");
        let tables: Vec<Table> = [TableStatus::Free, TableStatus::Reserved]
            .into_iter()
            .enumerate()
            .map(|(idx, status)| Table {
                id: table_id("club-1-event-1", idx as u32 + 1),
                event_id: "club-1-event-1".to_string(),
                number: idx as u32 + 1,
                capacity: None,
                status,
                price: None,
            })
            .collect();

        let mut random = ScriptedRandom::new();
        let reservations =
            generate_reservations(&options, &tables, &mut random, &mut FixtureText, now);

        assert_eq!(reservations.len(), 1);
        assert_eq!(reservations[0].table_id, "club-1-event-1-table-2");
        assert_eq!(reservations[0].guests, 1);
        assert_eq!(reservations[0].created_at, now);
        assert!(reservations[0].user_name.is_none());
    }

    #[test]
    fn random_past_timestamps_move_backwards() {
        let now = Utc
            .with_ymd_and_hms(2026, 10, 19, 20, 0, 0)
            .single()
            .expect("valid timestamp");
        let mut random = ScriptedRandom::new().with_ints([MILLIS_PER_DAY]);
        let stamp = created_at(CreatedAtMode::RandomPast { max_days: 30 }, &mut random, now);
        assert_eq!(now - stamp, Duration::days(1));
    }

    #[test]
    fn oversized_windows_saturate_instead_of_panicking() {
        let now = Utc
            .with_ymd_and_hms(2026, 10, 19, 20, 0, 0)
            .single()
            .expect("valid timestamp");
        let mut random = ScriptedRandom::new().with_ints([i64::MAX]);

        let date = event_date(
            DateSchedule::Weekly {
                every_days: u32::MAX,
            },
            usize::MAX,
            &mut random,
            today(),
        );
        assert!(date > today());

        let stamp = created_at(
            CreatedAtMode::RandomPast { max_days: u32::MAX },
            &mut random,
            now,
        );
        assert!(stamp < now);
    }
}
