use crate::difficulty::{
    evaluators::FlashlightEvaluator,
    object::OsuDifficultyObject,
    skills::{self, Sections},
};

const SKILL_MULTIPLIER: f64 = 0.05512;
const STRAIN_DECAY_BASE: f64 = 0.15;

/// Tracks flashlight strain across a beatmap, §4.H. Only meaningful when the
/// Flashlight mod is enabled; the facade zeroes this skill's contribution
/// otherwise.
pub struct Flashlight {
    has_hidden: bool,
    evaluator: FlashlightEvaluator,
    current_strain: f64,
    sections: Sections,
}

impl Flashlight {
    pub fn new(has_hidden: bool, scaling_factor: f64) -> Self {
        Self {
            has_hidden,
            evaluator: FlashlightEvaluator::new(scaling_factor),
            current_strain: 0.0,
            sections: Sections::new(),
        }
    }

    pub fn process(&mut self, curr: &OsuDifficultyObject, objects: &[OsuDifficultyObject]) {
        self.sections.advance(curr.start_time, |section_start| {
            let prev_start = curr.previous(0, objects).map_or(0.0, |p| p.start_time);
            self.current_strain * skills::strain_decay(section_start - prev_start, STRAIN_DECAY_BASE)
        });

        self.current_strain *= skills::strain_decay(curr.delta_time, STRAIN_DECAY_BASE);
        self.current_strain +=
            self.evaluator.evaluate_diff_of(curr, objects, self.has_hidden) * SKILL_MULTIPLIER;

        self.sections.record(self.current_strain);
    }

    /// Unlike `Aim`/`Speed`, flashlight takes the plain (unreduced) sum of
    /// peaks.
    pub fn difficulty_value(&self) -> f64 {
        skills::difficulty_value(&self.sections.peaks(), skills::DECAY_WEIGHT)
    }

    pub fn difficulty_to_performance(difficulty: f64) -> f64 {
        25.0 * difficulty.powi(2)
    }
}
