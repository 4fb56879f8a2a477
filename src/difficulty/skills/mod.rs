//! The strain-skill engine (§4.H): section-bucketed exponential decay with
//! a top-weighted reduction into a single difficulty value.

pub mod aim;
pub mod flashlight;
pub mod speed;

pub use aim::Aim;
pub use flashlight::Flashlight;
pub use speed::Speed;

use crate::math::logistic;

pub const DECAY_WEIGHT: f64 = 0.9;
pub const SECTION_LENGTH: f64 = 400.0;

/// Decay factor for `ms` milliseconds at the given per-second base.
pub fn strain_decay(ms: f64, strain_decay_base: f64) -> f64 {
    strain_decay_base.powf(ms / 1000.0)
}

/// Tracks 400ms strain sections as objects are processed in order, closing
/// a section and opening the next whenever an object's start time crosses
/// the current boundary (an object can span several empty sections at
/// once, e.g. after a long break).
#[derive(Default)]
pub struct Sections {
    current_peak: f64,
    current_end: Option<f64>,
    peaks: Vec<f64>,
}

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closes any section boundaries crossed by `start_time`, re-seeding the
    /// new section's peak from `initial_strain` each time one opens.
    pub fn advance(&mut self, start_time: f64, mut initial_strain: impl FnMut(f64) -> f64) {
        let current_end = self
            .current_end
            .get_or_insert_with(|| (start_time / SECTION_LENGTH).ceil() * SECTION_LENGTH);

        while start_time > *current_end {
            #[cfg(feature = "tracing")]
            tracing::trace!(end = *current_end, peak = self.current_peak, "closing strain section");

            self.peaks.push(self.current_peak);
            self.current_peak = initial_strain(*current_end);
            *current_end += SECTION_LENGTH;
        }
    }

    pub fn record(&mut self, strain: f64) {
        self.current_peak = self.current_peak.max(strain);
    }

    /// All closed section peaks plus the still-open current one.
    pub fn peaks(&self) -> Vec<f64> {
        let mut peaks = self.peaks.clone();
        peaks.push(self.current_peak);
        peaks
    }
}

/// Plain weighted sum of strain peaks, highest first, no reduction.
/// Grounded on `Flashlight.difficulty_value`.
pub fn difficulty_value(peaks: &[f64], decay_weight: f64) -> f64 {
    let mut peaks: Vec<f64> = peaks.iter().copied().filter(|&p| p > 0.0).collect();
    peaks.sort_unstable_by(|a, b| b.total_cmp(a));

    let mut difficulty = 0.0;
    let mut weight = 1.0;

    for strain in peaks {
        difficulty += strain * weight;
        weight *= decay_weight;
    }

    difficulty
}

/// Weighted sum with the leading `reduced_section_count` peaks softened
/// towards `reduced_strain_baseline`, used by `Aim` and `Speed`.
pub fn reduced_difficulty_value(
    peaks: &[f64],
    reduced_section_count: usize,
    reduced_strain_baseline: f64,
    decay_weight: f64,
) -> f64 {
    let mut peaks: Vec<f64> = peaks.iter().copied().filter(|&p| p > 0.0).collect();
    peaks.sort_unstable_by(|a, b| b.total_cmp(a));

    for (i, strain) in peaks.iter_mut().take(reduced_section_count).enumerate() {
        let clamped = (i as f64 / reduced_section_count as f64).clamp(0.0, 1.0);
        let scale = (clamped * 9.0 + 1.0).log10();
        *strain *= reduced_strain_baseline + (1.0 - reduced_strain_baseline) * scale;
    }

    peaks.sort_unstable_by(|a, b| b.total_cmp(a));

    let mut difficulty = 0.0;
    let mut weight = 1.0;

    for strain in peaks {
        difficulty += strain * weight;
        weight *= decay_weight;
    }

    difficulty
}

pub fn difficulty_to_performance(difficulty: f64) -> f64 {
    (5.0 * (difficulty / 0.0675).max(1.0) - 4.0).powi(3) / 100_000.0
}

/// A top-weighted count of how many of `strains` sit near or above
/// `difficulty_value / 10`, used for `aim_difficult_strain_count` and
/// `speed_difficult_strain_count`.
pub fn count_top_weighted_strains(strains: &[f64], difficulty_value: f64) -> f64 {
    if strains.is_empty() {
        return 0.0;
    }

    let consistent_top_strain = difficulty_value / 10.0;

    if consistent_top_strain <= 0.0 {
        return strains.len() as f64;
    }

    strains
        .iter()
        .map(|&s| logistic(s / consistent_top_strain, 0.88, 10.0, 1.1))
        .sum()
}

/// A top-weighted count against the single largest value in `strains`,
/// used for `aim_difficult_slider_count` and `speed_note_count`.
pub fn count_top_weighted_against_max(strains: &[f64]) -> f64 {
    if strains.is_empty() {
        return 0.0;
    }

    let max_strain = strains.iter().copied().fold(0.0, f64::max);

    if max_strain <= 0.0 {
        return 0.0;
    }

    strains
        .iter()
        .map(|&s| logistic(s / max_strain, 0.88, 10.0, 1.1))
        .sum()
}
