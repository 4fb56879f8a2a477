//! The annotated `DifficultyHitObject` stream (§3, §4.F step 5).
//!
//! Each entry references its predecessors by index into the shared slice
//! rather than holding pointers, so there is no possibility of reference
//! cycles and the whole stream can be built in one forward pass.

use crate::difficulty::preprocess::{DifficultyObject, ObjectType};

pub const MAX_SLIDER_RADIUS: f64 = 120.0;
pub const ASSUMED_SLIDER_RADIUS: f64 = 90.0;
pub const MIN_DELTA_TIME: f64 = 25.0;

#[derive(Clone, Debug, PartialEq)]
pub struct OsuDifficultyObject {
    pub idx: usize,
    pub start_time: f64,
    pub end_time: f64,
    pub delta_time: f64,
    pub strain_time: f64,
    pub hit_window_great: f64,

    pub lazy_jump_distance: f64,
    pub minimum_jump_distance: f64,
    pub minimum_jump_time: f64,
    pub travel_distance: f64,
    pub travel_time: f64,
    pub angle: Option<f64>,

    pub stacked_position: (f64, f64),
    pub stacked_end_position: (f64, f64),
    pub lazy_end_position: (f64, f64),
    pub lazy_travel_distance: f64,
    pub slider_repeat_count: u32,

    pub object_type: ObjectType,
    pub small_circle_bonus: f64,
}

impl OsuDifficultyObject {
    pub const fn is_spinner(&self) -> bool {
        matches!(self.object_type, ObjectType::Spinner)
    }

    pub const fn is_slider(&self) -> bool {
        matches!(self.object_type, ObjectType::Slider)
    }

    /// The `n`-th predecessor (`n=0` is the immediately preceding object).
    pub fn previous<'a>(&self, n: usize, objects: &'a [Self]) -> Option<&'a Self> {
        self.idx.checked_sub(n + 1).map(|i| &objects[i])
    }

    pub fn next<'a>(&self, n: usize, objects: &'a [Self]) -> Option<&'a Self> {
        objects.get(self.idx + n + 1)
    }

    /// `doubletapness(current, next)` (§4.G).
    pub fn doubletapness(&self, next: Option<&Self>, hit_window_great: f64) -> f64 {
        let Some(next) = next else { return 0.0 };

        let a = self.delta_time.max(1.0);
        let b = next.delta_time.max(1.0);
        let delta = (b - a).abs();
        let ratio = a / a.max(delta);
        let w = (a / hit_window_great).min(1.0).powi(2);

        1.0 - ratio.powf(1.0 - w)
    }
}

/// Builds the annotated object stream from the preprocessed objects
/// (§4.F step 5).
pub fn build_difficulty_objects(
    objects: &[DifficultyObject],
    clock_rate: f64,
    scaling_factor: f64,
    radius: f64,
) -> Vec<OsuDifficultyObject> {
    let small_circle_bonus = (1.0 + (30.0 - radius) / 40.0).max(1.0);

    let mut result: Vec<OsuDifficultyObject> = Vec::with_capacity(objects.len().saturating_sub(1));

    for i in 1..objects.len() {
        let base = &objects[i];
        let prev = &objects[i - 1];

        let delta_time = (base.start_time - prev.start_time) / clock_rate;
        let strain_time = delta_time.max(MIN_DELTA_TIME);
        let hit_window_great = 2.0 * base.hit_window_great / clock_rate;

        let lazy_end_position = if matches!(prev.object_type, ObjectType::Slider) {
            prev.stacked_end_position
        } else {
            prev.stacked_position
        };

        let mut annotated = OsuDifficultyObject {
            idx: i - 1,
            start_time: base.start_time / clock_rate,
            end_time: base.end_time / clock_rate,
            delta_time,
            strain_time,
            hit_window_great,
            lazy_jump_distance: 0.0,
            minimum_jump_distance: 0.0,
            minimum_jump_time: strain_time,
            travel_distance: 0.0,
            travel_time: 0.0,
            angle: None,
            stacked_position: base.stacked_position,
            stacked_end_position: base.stacked_end_position,
            lazy_end_position: if matches!(base.object_type, ObjectType::Slider) {
                base.stacked_end_position
            } else {
                base.stacked_position
            },
            lazy_travel_distance: base.lazy_travel_distance,
            slider_repeat_count: base.slider_repeat_count,
            object_type: base.object_type,
            small_circle_bonus,
        };

        if matches!(base.object_type, ObjectType::Slider) {
            let span_bonus = (1.0 + f64::from(base.slider_repeat_count) / 2.5).powf(1.0 / 2.5);
            annotated.travel_distance = base.lazy_travel_distance * span_bonus;
            annotated.travel_time = (base.lazy_travel_time / clock_rate).max(MIN_DELTA_TIME);
        }

        if !(matches!(base.object_type, ObjectType::Spinner)
            || matches!(prev.object_type, ObjectType::Spinner))
        {
            annotated.lazy_jump_distance = distance(
                scale(base.stacked_position, scaling_factor),
                scale(lazy_end_position, scaling_factor),
            );
            annotated.minimum_jump_time = strain_time;
            annotated.minimum_jump_distance = annotated.lazy_jump_distance;

            if matches!(prev.object_type, ObjectType::Slider) {
                if let Some(prev_annotated) = i.checked_sub(2).and_then(|idx| result.get(idx)) {
                    let last_travel_time =
                        (prev_annotated.travel_time).max(MIN_DELTA_TIME);

                    annotated.minimum_jump_time =
                        (strain_time - last_travel_time).max(MIN_DELTA_TIME);

                    let tail_jump_distance = distance(
                        scale(prev.stacked_end_position, scaling_factor),
                        scale(base.stacked_position, scaling_factor),
                    );

                    annotated.minimum_jump_distance = (annotated
                        .lazy_jump_distance
                        - (MAX_SLIDER_RADIUS - ASSUMED_SLIDER_RADIUS))
                        .min(tail_jump_distance - MAX_SLIDER_RADIUS)
                        .max(0.0);
                }
            }

            if i >= 2 && !matches!(objects[i - 2].object_type, ObjectType::Spinner) {
                let last_last_cursor_pos = if i >= 3 {
                    result[i - 3].lazy_end_position
                } else {
                    objects[i - 2].stacked_position
                };

                let v1 = sub(last_last_cursor_pos, prev.stacked_position);
                let v2 = sub(base.stacked_position, lazy_end_position);

                if v1 != (0.0, 0.0) {
                    let dot = v1.0 * v2.0 + v1.1 * v2.1;
                    let cross = v1.0 * v2.1 - v1.1 * v2.0;
                    annotated.angle = Some(cross.atan2(dot).abs());
                }
            }
        }

        result.push(annotated);
    }

    result
}

fn scale(p: (f64, f64), factor: f64) -> (f64, f64) {
    (p.0 * factor, p.1 * factor)
}

fn sub(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    (a.0 - b.0, a.1 - b.1)
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}
