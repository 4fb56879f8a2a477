use crate::difficulty::{
    evaluators::{RhythmEvaluator, SpeedEvaluator},
    object::OsuDifficultyObject,
    skills::{self, Sections},
};

const SKILL_MULTIPLIER: f64 = 1.46;
const STRAIN_DECAY_BASE: f64 = 0.3;
const REDUCED_SECTION_COUNT: usize = 5;
const REDUCED_STRAIN_BASELINE: f64 = 0.75;

/// Tracks speed strain across a beatmap, §4.H.
pub struct Speed {
    hit_window: f64,
    autopilot: bool,
    current_strain: f64,
    current_rhythm: f64,
    sections: Sections,
    object_strains: Vec<f64>,
}

impl Speed {
    pub fn new(hit_window: f64, autopilot: bool) -> Self {
        Self {
            hit_window,
            autopilot,
            current_strain: 0.0,
            current_rhythm: 0.0,
            sections: Sections::new(),
            object_strains: Vec::new(),
        }
    }

    pub fn process(&mut self, curr: &OsuDifficultyObject, objects: &[OsuDifficultyObject]) {
        self.sections.advance(curr.start_time, |section_start| {
            let prev_start = curr.previous(0, objects).map_or(0.0, |p| p.start_time);
            (self.current_strain * self.current_rhythm)
                * skills::strain_decay(section_start - prev_start, STRAIN_DECAY_BASE)
        });

        self.current_strain *= skills::strain_decay(curr.strain_time, STRAIN_DECAY_BASE);
        self.current_strain +=
            SpeedEvaluator::evaluate_diff_of(curr, objects, self.hit_window, self.autopilot)
                * SKILL_MULTIPLIER;

        self.current_rhythm = RhythmEvaluator::evaluate_diff_of(curr, objects);

        let total_strain = self.current_strain * self.current_rhythm;

        self.sections.record(total_strain);
        self.object_strains.push(total_strain);
    }

    pub fn difficulty_value(&self) -> f64 {
        skills::reduced_difficulty_value(
            &self.sections.peaks(),
            REDUCED_SECTION_COUNT,
            REDUCED_STRAIN_BASELINE,
            skills::DECAY_WEIGHT,
        )
    }

    pub fn difficulty_to_performance(difficulty: f64) -> f64 {
        skills::difficulty_to_performance(difficulty)
    }

    pub fn relevant_note_count(&self) -> f64 {
        skills::count_top_weighted_against_max(&self.object_strains)
    }

    pub fn count_top_weighted_strains(&self) -> f64 {
        skills::count_top_weighted_strains(&self.object_strains, self.difficulty_value())
    }
}
