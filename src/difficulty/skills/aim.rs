use crate::difficulty::{
    evaluators::AimEvaluator,
    object::OsuDifficultyObject,
    skills::{self, Sections},
};

const SKILL_MULTIPLIER: f64 = 25.6;
const STRAIN_DECAY_BASE: f64 = 0.15;
const REDUCED_SECTION_COUNT: usize = 10;
const REDUCED_STRAIN_BASELINE: f64 = 0.75;

/// Tracks aim strain across a beatmap, §4.H.
pub struct Aim {
    include_sliders: bool,
    current_strain: f64,
    sections: Sections,
    object_strains: Vec<f64>,
    slider_strains: Vec<f64>,
}

impl Aim {
    pub fn new(include_sliders: bool) -> Self {
        Self {
            include_sliders,
            current_strain: 0.0,
            sections: Sections::new(),
            object_strains: Vec::new(),
            slider_strains: Vec::new(),
        }
    }

    pub fn process(&mut self, curr: &OsuDifficultyObject, objects: &[OsuDifficultyObject]) {
        self.sections.advance(curr.start_time, |section_start| {
            let prev_start = curr.previous(0, objects).map_or(0.0, |p| p.start_time);
            self.current_strain * skills::strain_decay(section_start - prev_start, STRAIN_DECAY_BASE)
        });

        self.current_strain *= skills::strain_decay(curr.delta_time, STRAIN_DECAY_BASE);
        self.current_strain +=
            AimEvaluator::evaluate_diff_of(curr, objects, self.include_sliders) * SKILL_MULTIPLIER;

        if curr.is_slider() {
            self.slider_strains.push(self.current_strain);
        }

        self.sections.record(self.current_strain);
        self.object_strains.push(self.current_strain);
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

    pub fn get_difficult_sliders(&self) -> f64 {
        skills::count_top_weighted_against_max(&self.slider_strains)
    }

    pub fn count_top_weighted_strains(&self) -> f64 {
        skills::count_top_weighted_strains(&self.object_strains, self.difficulty_value())
    }

    pub fn object_strains(&self) -> &[f64] {
        &self.object_strains
    }
}
