use crate::{difficulty::object::OsuDifficultyObject, math::{bpm_to_ms, ms_to_bpm}};

const SINGLE_SPACING_THRESHOLD: f64 = 100.0 * 1.25;
const MIN_SPEED_BONUS: f64 = 200.0;
const SPEED_BALANCING_FACTOR: f64 = 40.0;
const DIST_MULTIPLIER: f64 = 0.9;

pub struct SpeedEvaluator;

impl SpeedEvaluator {
    pub fn evaluate_diff_of(
        curr: &OsuDifficultyObject,
        objects: &[OsuDifficultyObject],
        hit_window: f64,
        autopilot: bool,
    ) -> f64 {
        if curr.is_spinner() {
            return 0.0;
        }

        let prev = curr.previous(0, objects);
        let next = curr.next(0, objects);

        let mut strain_time = curr.strain_time;
        let doubletap_factor = 1.0 - curr.doubletapness(next, hit_window);

        strain_time /= ((strain_time / hit_window) / 0.93).clamp(0.92, 1.0);

        let speed_bonus = if ms_to_bpm(strain_time, 4) > MIN_SPEED_BONUS {
            let base = (bpm_to_ms(MIN_SPEED_BONUS, 4) - strain_time) / SPEED_BALANCING_FACTOR;
            0.75 * base.powi(2)
        } else {
            0.0
        };

        let travel_distance = prev.map_or(0.0, |p| p.travel_distance);
        let distance = SINGLE_SPACING_THRESHOLD.min(travel_distance + curr.minimum_jump_distance);

        let mut distance_bonus = (distance / SINGLE_SPACING_THRESHOLD).powf(3.95) * DIST_MULTIPLIER;

        if autopilot {
            distance_bonus = 0.0;
        }

        (1.0 + speed_bonus + distance_bonus) * 1000.0 / strain_time * doubletap_factor
    }
}
