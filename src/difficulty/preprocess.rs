//! Stacking and radius preprocessing (§4.F steps 1-4).

use crate::{
    difficulty::{hit_windows::HitWindows, scaling_factor::ScalingFactor},
    model::{Beatmap, HitObjectKind},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectType {
    Circle,
    Slider,
    Spinner,
}

/// One beatmap hit object after stacking and radius normalization (§3
/// "DifficultyObject (preprocessed)").
#[derive(Clone, Debug, PartialEq)]
pub struct DifficultyObject {
    pub start_time: f64,
    pub end_time: f64,
    pub position: (f64, f64),
    pub stacked_position: (f64, f64),
    pub end_position: (f64, f64),
    pub stacked_end_position: (f64, f64),
    pub object_radius: f64,
    pub object_type: ObjectType,

    pub slider_length: f64,
    pub slider_duration: f64,
    pub slider_repeat_count: u32,
    pub lazy_travel_distance: f64,
    pub lazy_travel_time: f64,

    pub hit_window_great: f64,
}

impl DifficultyObject {
    pub const fn is_spinner(&self) -> bool {
        matches!(self.object_type, ObjectType::Spinner)
    }

    pub const fn is_slider(&self) -> bool {
        matches!(self.object_type, ObjectType::Slider)
    }
}

/// Builds the preprocessed object stream for a beatmap at the given
/// mod-adjusted stats.
pub fn preprocess(
    map: &Beatmap,
    circle_size: f64,
    approach_rate: f64,
    stack_leniency: f64,
    hit_windows: HitWindows,
) -> (Vec<DifficultyObject>, ScalingFactor) {
    let scaling_factor = ScalingFactor::new(circle_size);

    let mut objects: Vec<_> = map.hit_objects.iter().collect();
    objects.sort_by(|a, b| a.start_time().total_cmp(&b.start_time()));

    let stack_heights = compute_stack_heights(&objects, approach_rate, stack_leniency);

    let scale = scaling_factor.stack_offset_scale();
    let offset_per_height = -6.4 * scale;

    let preprocessed = objects
        .iter()
        .zip(stack_heights)
        .map(|(object, stack_height)| {
            let offset = (stack_height as f64) * offset_per_height;
            let stacked = |p: (f64, f64)| (p.0 + offset, p.1 + offset);

            match &object.kind {
                HitObjectKind::Circle(c) => DifficultyObject {
                    start_time: c.time,
                    end_time: c.time,
                    position: c.pos,
                    stacked_position: stacked(c.pos),
                    end_position: c.pos,
                    stacked_end_position: stacked(c.pos),
                    object_radius: scaling_factor.radius,
                    object_type: ObjectType::Circle,
                    slider_length: 0.0,
                    slider_duration: 0.0,
                    slider_repeat_count: 0,
                    lazy_travel_distance: 0.0,
                    lazy_travel_time: 0.0,
                    hit_window_great: hit_windows.great,
                },
                HitObjectKind::Slider(s) => {
                    let span = (s.slides).max(1);
                    let lazy_travel_distance =
                        s.pixel_length * f64::from(span) * scaling_factor.factor / 100.0;

                    DifficultyObject {
                        start_time: s.time,
                        end_time: s.end_time(),
                        position: s.pos,
                        stacked_position: stacked(s.pos),
                        end_position: s.path_end(),
                        stacked_end_position: stacked(s.path_end()),
                        object_radius: scaling_factor.radius,
                        object_type: ObjectType::Slider,
                        slider_length: s.pixel_length,
                        slider_duration: s.duration_ms,
                        slider_repeat_count: s.slides,
                        lazy_travel_distance,
                        lazy_travel_time: s.duration_ms,
                        hit_window_great: hit_windows.great,
                    }
                }
                HitObjectKind::Spinner(sp) => DifficultyObject {
                    start_time: sp.time,
                    end_time: sp.end_time,
                    position: sp.pos,
                    stacked_position: sp.pos,
                    end_position: sp.pos,
                    stacked_end_position: sp.pos,
                    object_radius: scaling_factor.radius,
                    object_type: ObjectType::Spinner,
                    slider_length: 0.0,
                    slider_duration: 0.0,
                    slider_repeat_count: 0,
                    lazy_travel_distance: 0.0,
                    lazy_travel_time: 0.0,
                    hit_window_great: hit_windows.great,
                },
            }
        })
        .collect();

    (preprocessed, scaling_factor)
}

/// Grounded on §4.F step 2. Returns the stack height for each object, in
/// the same order as `objects`.
fn compute_stack_heights(
    objects: &[&crate::model::HitObject],
    approach_rate: f64,
    stack_leniency: f64,
) -> Vec<i32> {
    use crate::difficulty::hit_windows::{PREEMPT, difficulty_range};

    let threshold = difficulty_range(approach_rate, PREEMPT) * stack_leniency;

    let mut heights = vec![0_i32; objects.len()];
    let mut chain_end = vec![f64::NAN; objects.len()];

    for i in 0..objects.len() {
        if objects[i].is_spinner() {
            continue;
        }

        let mut chain_end_time = objects[i].start_time();
        let tail = tail_position(objects[i]);
        let pos_i = objects[i].pos();

        for j in (i + 1)..objects.len() {
            if objects[j].is_spinner() {
                continue;
            }

            if objects[j].start_time() - chain_end_time > threshold {
                break;
            }

            let pos_j = objects[j].pos();
            let close_head = distance(pos_i, pos_j) < 3.0;
            let close_tail = tail.is_some_and(|t| distance(t, pos_j) < 3.0);

            if close_head || close_tail {
                heights[i] += 1;
                chain_end_time = objects[j].start_time();
            }
        }

        chain_end[i] = chain_end_time;
    }

    heights
}

fn tail_position(object: &crate::model::HitObject) -> Option<(f64, f64)> {
    match &object.kind {
        HitObjectKind::Slider(s) => Some(s.path_end()),
        _ => None,
    }
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}
