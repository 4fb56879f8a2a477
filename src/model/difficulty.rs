use std::fmt;

/// The `[Difficulty]` section.
///
/// Field names mirror the `.osu` keys (`HPDrainRate`, `CircleSize`, ...);
/// values are nominally in `[0, 10]` but mods can push them higher, so no
/// clamping happens here — clamping to 10.0 after mod adjustment is the
/// caller's job (see [`crate::mods`]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Difficulty {
    pub hp_drain_rate: f64,
    pub circle_size: f64,
    pub overall_difficulty: f64,
    pub approach_rate: f64,
    pub slider_multiplier: f64,
    pub slider_tick_rate: f64,
}

impl Difficulty {
    pub const DEFAULT_HP: f64 = 5.0;
    pub const DEFAULT_CS: f64 = 5.0;
    pub const DEFAULT_OD: f64 = 5.0;
    pub const DEFAULT_AR: f64 = 5.0;
    pub const DEFAULT_SLIDER_MULTIPLIER: f64 = 1.0;
    pub const DEFAULT_SLIDER_TICK_RATE: f64 = 1.0;
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            hp_drain_rate: Self::DEFAULT_HP,
            circle_size: Self::DEFAULT_CS,
            overall_difficulty: Self::DEFAULT_OD,
            approach_rate: Self::DEFAULT_AR,
            slider_multiplier: Self::DEFAULT_SLIDER_MULTIPLIER,
            slider_tick_rate: Self::DEFAULT_SLIDER_TICK_RATE,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::util::format_compact as fc;

        writeln!(f, "[Difficulty]")?;
        writeln!(f, "HPDrainRate: {}", fc(self.hp_drain_rate))?;
        writeln!(f, "CircleSize: {}", fc(self.circle_size))?;
        writeln!(f, "OverallDifficulty: {}", fc(self.overall_difficulty))?;
        writeln!(f, "ApproachRate: {}", fc(self.approach_rate))?;
        writeln!(f, "SliderMultiplier: {}", fc(self.slider_multiplier))?;
        writeln!(f, "SliderTickRate: {}", fc(self.slider_tick_rate))
    }
}
