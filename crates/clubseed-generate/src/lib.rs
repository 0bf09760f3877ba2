//! Synthetic dataset generation for the club reservation demo.
//!
//! Clubs, events, tables and reservations are produced in strict top-down
//! order; every stage consumes the previous stage's output explicitly and
//! draws randomness from an injectable [`RandomSource`].

pub mod engine;
pub mod errors;
pub mod options;
pub mod random;
pub mod stages;
pub mod text;

pub use engine::DatasetGenerator;
pub use errors::GenerationError;
pub use options::{CreatedAtMode, DateSchedule, GenerateOptions, IntRange, Profile, TextProfile};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use text::{FakerText, FixtureText, LocaleKey, TextSource};
