//! Difficulty calculation facade (§4.J): orchestrates preprocessing, the
//! annotated object stream, the strain skills, and the rating formulas.

pub mod evaluators;
pub mod hit_windows;
pub mod object;
pub mod preprocess;
pub mod rating;
pub mod scaling_factor;
pub mod skills;

use std::{error::Error as StdError, fmt};

use crate::{
    difficulty::{
        hit_windows::{HitWindows, rate_adjusted_approach_rate, rate_adjusted_overall_difficulty},
        object::{OsuDifficultyObject, build_difficulty_objects},
        preprocess::preprocess,
        skills::{Aim, Flashlight, Speed},
    },
    model::Beatmap,
    mods::GameMods,
};

/// Builder for a difficulty calculation (§4.J), carrying the handful of
/// parameters the spec exposes (mods, passed-object count) rather than a
/// config file (§6). Grounded on `any::difficulty::Difficulty` in the
/// `MaxOhn-rosu-pp` lineage, trimmed to this crate's single mode and to the
/// parameters that actually apply here (no `hardrock_offsets`/mode-convert
/// knobs, since this crate has neither).
#[derive(Clone, Debug, Default, PartialEq)]
#[must_use]
pub struct Difficulty {
    mods: GameMods,
    passed_objects: Option<u32>,
}

impl Difficulty {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mods applied to the calculation (§4.D).
    pub fn mods(self, mods: GameMods) -> Self {
        Self { mods, ..self }
    }

    /// Restricts the calculation to the first `passed_objects` hit objects,
    /// for partial plays (e.g. a fail mid-map).
    pub const fn passed_objects(self, passed_objects: u32) -> Self {
        Self { passed_objects: Some(passed_objects), ..self }
    }

    /// Runs [`calculate_difficulty`] with this builder's parameters.
    pub fn calculate(&self, map: &Beatmap) -> Result<DifficultyAttributes, CalculationError> {
        match self.passed_objects {
            Some(passed_objects) => {
                let mut truncated = map.clone();
                truncated.hit_objects.truncate(passed_objects as usize);
                calculate_difficulty(&truncated, &self.mods)
            }
            None => calculate_difficulty(map, &self.mods),
        }
    }
}

/// Anything that can go wrong computing difficulty, short of
/// `insufficient_objects`'s zero-filled degraded result (§7).
#[derive(Debug)]
pub enum CalculationError {
    /// `beatmap.general.mode` was non-zero.
    UnsupportedMode(u8),
}

impl fmt::Display for CalculationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedMode(mode) => write!(f, "unsupported game mode `{mode}`"),
        }
    }
}

impl StdError for CalculationError {}

/// The result of [`calculate_difficulty`] (§4.J).
#[derive(Clone, Debug, PartialEq)]
pub struct DifficultyAttributes {
    pub star_rating: f64,
    pub aim_difficulty_value: f64,
    pub speed_difficulty_value: f64,
    pub flashlight_difficulty_value: f64,
    pub slider_factor: f64,
    pub aim_difficult_slider_count: f64,
    pub speed_note_count: f64,
    pub aim_difficult_strain_count: f64,
    pub speed_difficult_strain_count: f64,
    pub approach_rate: f64,
    pub overall_difficulty: f64,
    pub circle_size: f64,
    pub drain_rate: f64,
    pub clock_rate: f64,
    pub max_combo: u32,
    pub hit_circle_count: u32,
    pub slider_count: u32,
    pub spinner_count: u32,
    pub mods: GameMods,
    pub aim_strains: Vec<f64>,
}

impl DifficultyAttributes {
    /// A zero-filled result for beatmaps with too few objects to evaluate
    /// (§7 `CalculationError.InsufficientObjects`): stat adjustments are
    /// still accurate, but every strain-derived field is zero.
    fn insufficient_objects(map: &Beatmap, mods: &GameMods) -> Self {
        let clock_rate = mods.clock_rate();
        let approach_rate = mods.adjust_stat(map.difficulty.approach_rate, 1.4);
        let overall_difficulty = mods.adjust_stat(map.difficulty.overall_difficulty, 1.4);

        Self {
            star_rating: 0.0,
            aim_difficulty_value: 0.0,
            speed_difficulty_value: 0.0,
            flashlight_difficulty_value: 0.0,
            slider_factor: 1.0,
            aim_difficult_slider_count: 0.0,
            speed_note_count: 0.0,
            aim_difficult_strain_count: 0.0,
            speed_difficult_strain_count: 0.0,
            approach_rate: rate_adjusted_approach_rate(approach_rate, clock_rate),
            overall_difficulty: rate_adjusted_overall_difficulty(overall_difficulty, clock_rate),
            circle_size: mods.adjust_stat(map.difficulty.circle_size, 1.3),
            drain_rate: mods.adjust_stat(map.difficulty.hp_drain_rate, 1.4),
            clock_rate: mods.clock_rate(),
            max_combo: map.hit_objects.len() as u32,
            hit_circle_count: map.hit_circle_count() as u32,
            slider_count: map.slider_count() as u32,
            spinner_count: map.spinner_count() as u32,
            mods: mods.clone(),
            aim_strains: Vec::new(),
        }
    }
}

/// Computes difficulty for `beatmap` under `mods` (§4.J).
///
/// `beatmap.general.mode` is checked here, not only at parse time: `parse`
/// already rejects non-zero modes, but `General::mode` is a public,
/// freely-settable field, so a `Beatmap` assembled without going through
/// `parse` could otherwise slip an unsupported mode through to a full
/// computation.
pub fn calculate_difficulty(
    beatmap: &Beatmap,
    mods: &GameMods,
) -> Result<DifficultyAttributes, CalculationError> {
    if beatmap.general.mode != 0 {
        return Err(CalculationError::UnsupportedMode(beatmap.general.mode));
    }

    let clock_rate = mods.clock_rate();

    let approach_rate = mods.adjust_stat(beatmap.difficulty.approach_rate, 1.4);
    let overall_difficulty = mods.adjust_stat(beatmap.difficulty.overall_difficulty, 1.4);
    let circle_size = mods.adjust_stat(beatmap.difficulty.circle_size, 1.3);
    let drain_rate = mods.adjust_stat(beatmap.difficulty.hp_drain_rate, 1.4);

    let hit_windows = HitWindows::from_od(overall_difficulty);

    let mut map = beatmap.clone();
    map.resolve_slider_durations();

    let (preprocessed, scaling_factor) =
        preprocess(&map, circle_size, approach_rate, map.general.stack_leniency, hit_windows);

    if preprocessed.len() < 2 {
        return Ok(DifficultyAttributes::insufficient_objects(beatmap, mods));
    }

    let objects = build_difficulty_objects(
        &preprocessed,
        clock_rate,
        scaling_factor.factor,
        scaling_factor.radius,
    );

    let aim_attrs = run_aim(&objects, true);
    let aim_no_slider_attrs = run_aim(&objects, false);
    let speed_attrs = run_speed(&objects, hit_windows.great, mods.ap());
    let flashlight_value = run_flashlight(&objects, mods.hd(), scaling_factor.factor);

    let aim_rating = rating::aim_rating(aim_attrs.difficulty_value, mods);
    let aim_no_slider_rating = rating::aim_rating(aim_no_slider_attrs.difficulty_value, mods);
    let speed_rating = rating::speed_rating(speed_attrs.difficulty_value, mods);
    let flashlight_rating = rating::flashlight_rating(flashlight_value, mods);

    let star_rating = rating::star_rating(aim_rating, speed_rating, flashlight_rating, mods);

    let slider_factor = if aim_rating > 0.0 {
        aim_no_slider_rating / aim_rating
    } else {
        1.0
    };

    Ok(DifficultyAttributes {
        star_rating,
        aim_difficulty_value: aim_rating,
        speed_difficulty_value: speed_rating,
        flashlight_difficulty_value: flashlight_rating,
        slider_factor,
        aim_difficult_slider_count: aim_attrs.difficult_slider_count,
        speed_note_count: speed_attrs.note_count,
        aim_difficult_strain_count: aim_attrs.difficult_strain_count,
        speed_difficult_strain_count: speed_attrs.difficult_strain_count,
        approach_rate: rate_adjusted_approach_rate(approach_rate, clock_rate),
        overall_difficulty: rate_adjusted_overall_difficulty(overall_difficulty, clock_rate),
        circle_size,
        drain_rate,
        clock_rate,
        max_combo: map.hit_objects.len() as u32,
        hit_circle_count: map.hit_circle_count() as u32,
        slider_count: map.slider_count() as u32,
        spinner_count: map.spinner_count() as u32,
        mods: mods.clone(),
        aim_strains: aim_attrs.object_strains,
    })
}

struct AimRun {
    difficulty_value: f64,
    difficult_slider_count: f64,
    difficult_strain_count: f64,
    object_strains: Vec<f64>,
}

fn run_aim(objects: &[OsuDifficultyObject], include_sliders: bool) -> AimRun {
    let mut skill = Aim::new(include_sliders);

    for curr in objects {
        skill.process(curr, objects);
    }

    AimRun {
        difficulty_value: skill.difficulty_value(),
        difficult_slider_count: skill.get_difficult_sliders(),
        difficult_strain_count: skill.count_top_weighted_strains(),
        object_strains: skill.object_strains().to_vec(),
    }
}

struct SpeedRun {
    difficulty_value: f64,
    note_count: f64,
    difficult_strain_count: f64,
}

fn run_speed(objects: &[OsuDifficultyObject], hit_window_great: f64, autopilot: bool) -> SpeedRun {
    let mut skill = Speed::new(hit_window_great, autopilot);

    for curr in objects {
        skill.process(curr, objects);
    }

    SpeedRun {
        difficulty_value: skill.difficulty_value(),
        note_count: skill.relevant_note_count(),
        difficult_strain_count: skill.count_top_weighted_strains(),
    }
}

fn run_flashlight(objects: &[OsuDifficultyObject], has_hidden: bool, scaling_factor: f64) -> f64 {
    let mut skill = Flashlight::new(has_hidden, scaling_factor);

    for curr in objects {
        skill.process(curr, objects);
    }

    skill.difficulty_value()
}
