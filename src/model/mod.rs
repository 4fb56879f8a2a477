//! The typed `.osu` object model (§4.B).
//!
//! A [`Beatmap`] is the parser's sole output and the sole input to
//! difficulty calculation: a flat, owned tree with no shared mutable state
//! and no trait objects.

pub mod beatmap;
pub mod control_point;
pub mod difficulty;
pub mod general;
pub mod hit_object;

pub use beatmap::Beatmap;
pub use control_point::TimingPoint;
pub use difficulty::Difficulty;
pub use general::General;
pub use hit_object::{Circle, CurveKind, HitObject, HitObjectKind, HitSample, Slider, SliderCurve, Spinner};
