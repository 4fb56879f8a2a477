use crate::difficulty::object::OsuDifficultyObject;

/// Grounded on the flashlight evaluator's jump/stack/angle nerfs and slider
/// bonus. The opacity-over-time term is dropped: without a nested
/// approach-circle timing model there is nothing to simulate visibility
/// against, so every object is treated as fully visible.
pub struct FlashlightEvaluator {
    scaling_factor: f64,
}

impl FlashlightEvaluator {
    const MIN_VELOCITY: f64 = 0.5;
    const SLIDER_MULTIPLIER: f64 = 1.3;
    const HIDDEN_BONUS: f64 = 0.2;
    const MIN_ANGLE_MULTIPLIER: f64 = 0.2;

    pub const fn new(scaling_factor: f64) -> Self {
        Self { scaling_factor }
    }

    pub fn evaluate_diff_of(
        &self,
        curr: &OsuDifficultyObject,
        objects: &[OsuDifficultyObject],
        hidden: bool,
    ) -> f64 {
        if curr.is_spinner() {
            return 0.0;
        }

        let mut small_dist_nerf = 1.0;
        let mut cumulative_strain_time = 0.0;
        let mut result = 0.0;
        let mut angle_repeat_count = 0.0;

        let lookback = curr.idx.min(10);

        for i in 0..lookback {
            let Some(hist) = curr.previous(i, objects) else {
                break;
            };

            let last = if i == 0 {
                curr
            } else {
                curr.previous(i - 1, objects).unwrap_or(curr)
            };

            cumulative_strain_time += last.delta_time;

            if hist.is_spinner() {
                continue;
            }

            let jump_dist = distance(curr.stacked_position, hist.stacked_end_position);

            if i == 0 {
                small_dist_nerf = (jump_dist / 75.0).min(1.0);
            }

            let stack_nerf = ((hist.lazy_jump_distance / self.scaling_factor) / 25.0).min(1.0);

            result += stack_nerf * self.scaling_factor * jump_dist / cumulative_strain_time.max(1.0);

            if let Some((hist_angle, curr_angle)) = hist.angle.zip(curr.angle) {
                if (hist_angle - curr_angle).abs() < 0.02 {
                    angle_repeat_count += (1.0 - 0.1 * i as f64).max(0.0);
                }
            }
        }

        result = (small_dist_nerf * result).powi(2);

        if hidden {
            result *= 1.0 + Self::HIDDEN_BONUS;
        }

        result *= Self::MIN_ANGLE_MULTIPLIER + (1.0 - Self::MIN_ANGLE_MULTIPLIER) / (angle_repeat_count + 1.0);

        let mut slider_bonus = 0.0;

        if curr.is_slider() {
            let pixel_travel_dist = curr.lazy_travel_distance / self.scaling_factor;

            slider_bonus =
                ((pixel_travel_dist / curr.travel_time - Self::MIN_VELOCITY).max(0.0)).sqrt();
            slider_bonus *= pixel_travel_dist;

            if curr.slider_repeat_count > 0 {
                slider_bonus /= f64::from(curr.slider_repeat_count + 1);
            }
        }

        result += slider_bonus * Self::SLIDER_MULTIPLIER;

        result
    }
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}
