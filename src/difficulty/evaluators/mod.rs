//! Pure per-object strain evaluators (§4.G). Each is a stateless function of
//! the current annotated object, its neighbors, and mods.

pub mod aim;
pub mod flashlight;
pub mod rhythm;
pub mod speed;

pub use aim::AimEvaluator;
pub use flashlight::FlashlightEvaluator;
pub use rhythm::RhythmEvaluator;
pub use speed::SpeedEvaluator;
