use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::info;

use clubseed_core::Dataset;

use crate::errors::GenerationError;
use crate::options::GenerateOptions;
use crate::random::{RandomSource, SeededRandom, derive_seed};
use crate::stages::{generate_clubs, generate_events, generate_reservations, generate_tables};
use crate::text::{TextSource, text_source};

/// Entry point for generating a club dataset.
#[derive(Debug, Clone)]
pub struct DatasetGenerator {
    options: GenerateOptions,
}

impl DatasetGenerator {
    /// Validate `options` and build a generator; generation itself cannot fail.
    pub fn new(options: GenerateOptions) -> Result<Self, GenerationError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Generate with caller-provided random and text sources.
    pub fn generate(
        &self,
        random: &mut dyn RandomSource,
        text: &mut dyn TextSource,
        now: DateTime<Utc>,
    ) -> Dataset {
        let start = Instant::now();
        let options = &self.options;

        let clubs = generate_clubs(options, text);
        let events = generate_events(options, &clubs, random, text, now.date_naive());
        let tables = generate_tables(options, &events, random);
        let reservations = generate_reservations(options, &tables, random, text, now);

        let dataset = Dataset {
            clubs,
            events,
            tables,
            reservations,
        };

        let summary = dataset.summary();
        info!(
            profile = %options.profile,
            clubs = summary.clubs,
            events = summary.events,
            tables = summary.tables,
            reservations = summary.reservations,
            free_tables = summary.free_tables,
            duration_ms = start.elapsed().as_millis() as u64,
            "dataset generated"
        );

        dataset
    }

    /// Generate from a single seed; equal seeds and clocks give equal datasets.
    pub fn generate_seeded(&self, seed: u64, now: DateTime<Utc>) -> Dataset {
        let mut random = SeededRandom::new(derive_seed(seed, "structure"));
        let mut text = text_source(self.options.text, derive_seed(seed, "text"));
        self.generate(&mut random, text.as_mut(), now)
    }
}
