use std::f64::consts::PI;

use crate::{difficulty::object::OsuDifficultyObject, math::logistic};

const HISTORY_TIME_MAX: f64 = 5000.0;
const HISTORY_OBJECTS_MAX: usize = 32;
const EPSILON: f64 = 3.0;

/// A run of approximately-equal deltas, grounded on the teacher's rhythm
/// evaluator `Island` idiom but tracking only what the simpler complexity
/// sum needs.
#[derive(Clone, Copy, Debug)]
struct Island {
    delta: f64,
    count: u32,
}

impl Island {
    const fn new(delta: f64) -> Self {
        Self { delta, count: 1 }
    }

    fn is_similar(&self, other: &Self) -> bool {
        (self.delta - other.delta).abs() < EPSILON
    }

    const fn is_similar_polarity(&self, other: &Self) -> bool {
        self.count % 2 == other.count % 2
    }
}

pub struct RhythmEvaluator;

impl RhythmEvaluator {
    pub fn evaluate_diff_of(curr: &OsuDifficultyObject, objects: &[OsuDifficultyObject]) -> f64 {
        if curr.is_spinner() {
            return 0.0;
        }

        let mut complexity_sum = 0.0;

        let history_len = curr.idx.min(HISTORY_OBJECTS_MAX);

        let mut island = Island::new(0.0);
        let mut prev_island = Island::new(0.0);
        let mut island_counts: Vec<(Island, u32)> = Vec::new();

        for i in 1..history_len {
            let Some(curr_hist) = curr.previous(i - 1, objects) else {
                break;
            };
            let Some(prev_hist) = curr.previous(i, objects) else {
                break;
            };

            if curr.start_time - curr_hist.start_time >= HISTORY_TIME_MAX {
                break;
            }

            let curr_delta = curr_hist.delta_time.max(1.0);
            let prev_delta = prev_hist.delta_time.max(1.0);

            let ratio = prev_delta.max(curr_delta) / prev_delta.min(curr_delta);
            let mut effective_ratio = 1.0 + 12.0 * (PI / ratio).sin().powi(2).min(0.5);

            if (prev_delta - curr_delta).abs() < EPSILON {
                island.count += 1;
            } else {
                if curr_hist.is_slider() {
                    effective_ratio *= 0.125;
                } else if prev_hist.is_slider() {
                    effective_ratio *= 0.3;
                } else {
                    effective_ratio *= 0.6;
                }

                if island.is_similar_polarity(&prev_island) {
                    effective_ratio *= 0.5;
                }

                let new_island = Island::new(curr_delta);

                let count = island_counts
                    .iter_mut()
                    .find(|(existing, _)| existing.is_similar(&new_island))
                    .map_or(1, |(_, count)| {
                        *count += 1;
                        *count
                    });

                if count == 1 {
                    island_counts.push((new_island, 1));
                }

                let power = logistic(new_island.delta, 58.33, 0.24, 2.75);
                effective_ratio *= (3.0 / f64::from(count)).min(f64::from(count).powf(-power));

                prev_island = island;
                island = new_island;
            }

            let age_decay = ((HISTORY_TIME_MAX - (curr.start_time - curr_hist.start_time))
                / HISTORY_TIME_MAX)
                .max(0.0);
            let note_decay = (history_len - i) as f64 / history_len as f64;
            let decay = age_decay.min(note_decay);

            complexity_sum += effective_ratio * decay;
        }

        (4.0 + complexity_sum * 0.95).sqrt() / 2.0
    }
}
