use std::fmt;

use crate::model::{
    control_point::{inherited_point_at, uninherited_point_at, TimingPoint},
    difficulty::Difficulty,
    general::General,
    hit_object::{HitObject, HitObjectKind},
};

/// The full typed object model of a parsed `.osu` file.
///
/// Immutable once constructed by [`crate::parse::parse`]; `calculate_difficulty`
/// never mutates it (§3 "Ownership").
#[derive(Clone, Debug, PartialEq)]
pub struct Beatmap {
    pub general: General,
    pub difficulty: Difficulty,
    pub timing_points: Vec<TimingPoint>,
    pub hit_objects: Vec<HitObject>,
}

impl Beatmap {
    /// Finds the effective slider velocity and beat length governing a
    /// slider that starts at `time`, then resolves `duration_ms` for every
    /// slider in place.
    ///
    /// Grounded on §4.C: "the parser (or a post-construction pass on
    /// `Beatmap`) finds the last uninherited timing point at or before `t`
    /// ... and the last inherited timing point at or before `t`". This is
    /// the "post-construction pass" variant, run once right after parsing.
    pub fn resolve_slider_durations(&mut self) {
        let timing_points = self.timing_points.clone();
        let slider_multiplier = self.difficulty.slider_multiplier;

        for object in &mut self.hit_objects {
            if let HitObjectKind::Slider(slider) = &mut object.kind {
                let beat_len = uninherited_point_at(&timing_points, slider.time)
                    .map_or(TimingPoint::DEFAULT_BEAT_LEN, |p| p.beat_len);

                let slider_velocity = inherited_point_at(&timing_points, slider.time)
                    .map_or(1.0, TimingPoint::slider_velocity);

                let effective_velocity = slider_multiplier * slider_velocity;

                slider.duration_ms = slider.pixel_length * f64::from(slider.slides)
                    / (100.0 * effective_velocity)
                    * beat_len;
            }
        }
    }

    /// Sorts hit objects by start time. Ties keep their original relative
    /// order (§8 invariant 8: "sorting stability").
    pub fn sort_hit_objects(&mut self) {
        self.hit_objects
            .sort_by(|a, b| a.start_time().total_cmp(&b.start_time()));
    }

    pub fn hit_circle_count(&self) -> usize {
        self.hit_objects.iter().filter(|o| o.is_circle()).count()
    }

    pub fn slider_count(&self) -> usize {
        self.hit_objects.iter().filter(|o| o.is_slider()).count()
    }

    pub fn spinner_count(&self) -> usize {
        self.hit_objects.iter().filter(|o| o.is_spinner()).count()
    }
}

impl fmt::Display for Beatmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "osu file format v14")?;
        writeln!(f)?;
        writeln!(f, "{}", self.general)?;
        writeln!(f, "{}", self.difficulty)?;
        writeln!(f, "[TimingPoints]")?;

        for point in &self.timing_points {
            writeln!(f, "{point}")?;
        }

        writeln!(f)?;
        writeln!(f, "[HitObjects]")?;

        for object in &self.hit_objects {
            writeln!(f, "{object}")?;
        }

        Ok(())
    }
}
