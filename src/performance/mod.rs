//! Performance ("pp") calculation facade (§4.I, §4.J).

use crate::difficulty::DifficultyAttributes;

/// Builder for a performance calculation (§4.I), carrying accuracy, combo,
/// and miss count as plain builder methods rather than a config file (§6).
/// Grounded on `any::performance::Performance` in the `MaxOhn-rosu-pp`
/// lineage, trimmed to this crate's single mode's parameters.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct Performance {
    accuracy: f64,
    combo: Option<u32>,
    misses: u32,
}

impl Performance {
    pub fn new() -> Self {
        Self { accuracy: 1.0, combo: None, misses: 0 }
    }

    /// Accuracy as a fraction in `[0.0, 1.0]`.
    pub const fn accuracy(self, accuracy: f64) -> Self {
        Self { accuracy, ..self }
    }

    /// Max combo reached; defaults to the beatmap's max combo (full combo).
    pub const fn combo(self, combo: u32) -> Self {
        Self { combo: Some(combo), ..self }
    }

    /// Miss count.
    pub const fn misses(self, misses: u32) -> Self {
        Self { misses, ..self }
    }

    /// Runs [`calculate_performance`] with this builder's parameters.
    pub fn calculate(&self, difficulty: &DifficultyAttributes) -> PerformanceAttributes {
        calculate_performance(difficulty, self.accuracy, self.combo, self.misses)
    }
}

impl Default for Performance {
    fn default() -> Self {
        Self::new()
    }
}

/// The result of [`calculate_performance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerformanceAttributes {
    pub pp: f64,
    pub pp_aim: f64,
    pub pp_speed: f64,
    pub pp_acc: f64,
    pub accuracy: f64,
    pub effective_miss_count: f64,
}

/// Computes performance for `difficulty` at the given `accuracy`, `combo`,
/// and `misses` (§4.I). `combo` defaults to the beatmap's max combo,
/// `misses` to `0`, `accuracy` to `1.0`.
pub fn calculate_performance(
    difficulty: &DifficultyAttributes,
    accuracy: f64,
    combo: Option<u32>,
    misses: u32,
) -> PerformanceAttributes {
    let max_combo = difficulty.max_combo;
    let combo = combo.unwrap_or(max_combo).min(max_combo);

    let total_hits = f64::from(
        difficulty.hit_circle_count + difficulty.slider_count + difficulty.spinner_count,
    );

    let effective_miss_count = f64::from(misses).max(total_hits / 200.0);

    let mut pp_aim = crate::difficulty::rating::difficulty_to_performance(difficulty.aim_difficulty_value)
        * accuracy.powf(5.5)
        * (0.98 + f64::from(max_combo) / 1500.0);

    let mut pp_speed =
        crate::difficulty::rating::difficulty_to_performance(difficulty.speed_difficulty_value)
            * accuracy.powf(4.0);

    let pp_acc = accuracy.powf(5.5) * (25.0 + difficulty.star_rating * 5.0);

    if max_combo > 0 && combo < max_combo {
        let combo_scale = (f64::from(combo) / f64::from(max_combo)).powf(0.8);
        pp_aim *= combo_scale;
        pp_speed *= combo_scale;
    }

    let miss_penalty = 0.97_f64.powf(effective_miss_count);
    pp_aim *= miss_penalty;
    pp_speed *= miss_penalty;

    let pp = (pp_aim.powf(1.1) + pp_speed.powf(1.1) + pp_acc.powf(1.1)).powf(1.0 / 1.1);

    PerformanceAttributes {
        pp,
        pp_aim,
        pp_speed,
        pp_acc,
        accuracy,
        effective_miss_count,
    }
}
