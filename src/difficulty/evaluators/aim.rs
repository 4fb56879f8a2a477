use crate::{
    difficulty::object::OsuDifficultyObject,
    math::{ms_to_bpm, reverse_lerp, smootherstep, smoothstep},
    util::float_ext::FloatExt,
};

const RADIUS: f64 = 50.0;
const DIAMETER: f64 = 100.0;

const WIDE_ANGLE_MULTIPLIER: f64 = 1.5;
const ACUTE_ANGLE_MULTIPLIER: f64 = 2.55;
const SLIDER_MULTIPLIER: f64 = 1.35;
const VELOCITY_CHANGE_MULTIPLIER: f64 = 0.75;
const WIGGLE_MULTIPLIER: f64 = 1.02;

pub struct AimEvaluator;

impl AimEvaluator {
    pub fn evaluate_diff_of(
        curr: &OsuDifficultyObject,
        objects: &[OsuDifficultyObject],
        include_sliders: bool,
    ) -> f64 {
        if curr.is_spinner() {
            return 0.0;
        }

        let Some((last_last, last)) = curr
            .previous(1, objects)
            .zip(curr.previous(0, objects))
            .filter(|(_, last)| !last.is_spinner())
        else {
            return 0.0;
        };

        let mut curr_vel = curr.lazy_jump_distance / curr.strain_time;
        let mut prev_vel = last.lazy_jump_distance / last.strain_time;

        if last.is_slider() && include_sliders {
            let travel_vel = last.travel_distance / last.travel_time;
            let movement_vel = curr.minimum_jump_distance / curr.minimum_jump_time;
            curr_vel = curr_vel.max(movement_vel + travel_vel);
        }

        if last_last.is_slider() && include_sliders {
            let travel_vel = last_last.travel_distance / last_last.travel_time;
            let movement_vel = last.minimum_jump_distance / last.minimum_jump_time;
            prev_vel = prev_vel.max(movement_vel + travel_vel);
        }

        let mut wide_angle_bonus = 0.0;
        let mut acute_angle_bonus = 0.0;
        let mut wiggle_bonus = 0.0;

        let mut aim = curr_vel;

        if curr.strain_time.max(last.strain_time) < 1.25 * curr.strain_time.min(last.strain_time) {
            if let Some((curr_angle, last_angle)) = curr.angle.zip(last.angle) {
                let angle_bonus = curr_vel.min(prev_vel);

                wide_angle_bonus = wide_angle(curr_angle);
                acute_angle_bonus = acute_angle(curr_angle);

                wide_angle_bonus *= 1.0 - wide_angle_bonus.min(wide_angle(last_angle).powi(3));
                acute_angle_bonus *= 0.08
                    + 0.92 * (1.0 - acute_angle_bonus.min(acute_angle(last_angle).powi(3)));

                wide_angle_bonus *=
                    angle_bonus * smootherstep(curr.lazy_jump_distance, 0.0, DIAMETER);

                acute_angle_bonus *= angle_bonus
                    * smootherstep(ms_to_bpm(curr.strain_time, 2), 300.0, 400.0)
                    * smootherstep(curr.lazy_jump_distance, DIAMETER, 2.0 * DIAMETER);

                wiggle_bonus = angle_bonus
                    * smootherstep(curr.lazy_jump_distance, RADIUS, DIAMETER)
                    * reverse_lerp(curr.lazy_jump_distance, 3.0 * DIAMETER, DIAMETER).powf(1.8)
                    * smootherstep(curr_angle, 110_f64.to_radians(), 60_f64.to_radians())
                    * smootherstep(last.lazy_jump_distance, RADIUS, DIAMETER)
                    * reverse_lerp(last.lazy_jump_distance, 3.0 * DIAMETER, DIAMETER).powf(1.8)
                    * smootherstep(last_angle, 110_f64.to_radians(), 60_f64.to_radians());
            }
        }

        let mut vel_change_bonus = 0.0;

        if prev_vel.max(curr_vel).not_eq(0.0) {
            let prev_vel = (last.lazy_jump_distance + last_last.travel_distance) / last.strain_time;
            let curr_vel = (curr.lazy_jump_distance + last.travel_distance) / curr.strain_time;

            let dist_ratio = smoothstep((prev_vel - curr_vel).abs() / prev_vel.max(curr_vel), 0.0, 1.0);

            let overlap_vel_buff = (DIAMETER * 1.25 / curr.strain_time.min(last.strain_time))
                .min((prev_vel - curr_vel).abs());

            vel_change_bonus = overlap_vel_buff * dist_ratio;

            let bonus_base =
                curr.strain_time.min(last.strain_time) / curr.strain_time.max(last.strain_time);
            vel_change_bonus *= bonus_base.powi(2);
        }

        let mut slider_bonus = 0.0;

        if last.is_slider() && include_sliders {
            slider_bonus = last.travel_distance / last.travel_time;
        }

        aim += wiggle_bonus * WIGGLE_MULTIPLIER;
        aim += vel_change_bonus * VELOCITY_CHANGE_MULTIPLIER;
        aim += (acute_angle_bonus * ACUTE_ANGLE_MULTIPLIER).max(wide_angle_bonus * WIDE_ANGLE_MULTIPLIER);

        if include_sliders {
            aim += slider_bonus * SLIDER_MULTIPLIER;
        }

        let small_circle_bonus = curr.small_circle_bonus.max(1.0);

        aim * small_circle_bonus
    }
}

fn wide_angle(angle: f64) -> f64 {
    smoothstep(angle, 40_f64.to_radians(), 140_f64.to_radians())
}

fn acute_angle(angle: f64) -> f64 {
    smoothstep(angle, 140_f64.to_radians(), 40_f64.to_radians())
}
