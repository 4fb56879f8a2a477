//! A from-scratch rhythm-game beatmap difficulty and performance calculator.
//!
//! Parses a beatmap's text format into a typed model ([`model`]),
//! preprocesses its hit objects into a motion-annotated stream
//! ([`difficulty::preprocess`], [`difficulty::object`]), runs the strain
//! skills over that stream ([`difficulty::skills`]), and combines the
//! result into a star rating and performance attributes
//! ([`difficulty::rating`], [`performance`]).

pub mod difficulty;
pub mod math;
pub mod model;
pub mod mods;
pub mod parse;
pub mod performance;
pub mod util;

pub use difficulty::{calculate_difficulty, CalculationError, Difficulty, DifficultyAttributes};
pub use mods::{GameMods, Mod};
pub use parse::{parse, parse_path, ParseError};
pub use performance::{calculate_performance, Performance, PerformanceAttributes};
