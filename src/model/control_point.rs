use std::fmt;

/// A single `TimingPoints` line.
///
/// `beat_len > 0` marks an *uninherited* point (sets the BPM via
/// `60000 / beat_len`); `beat_len < 0` marks an *inherited* point (sets the
/// slider-velocity multiplier via `100 / |beat_len|`). This mirrors the
/// on-disk representation directly rather than splitting into two types, so
/// that parsing and rendering stay a 1:1 mapping (§8 round-trip invariant).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingPoint {
    pub time: f64,
    pub beat_len: f64,
    pub meter: i32,
    pub sample_set: i32,
    pub sample_index: i32,
    pub volume: i32,
    pub uninherited: bool,
    pub effects: i32,
}

impl TimingPoint {
    pub const DEFAULT_BEAT_LEN: f64 = 500.0;
    pub const DEFAULT_METER: i32 = 4;
    pub const DEFAULT_SAMPLE_SET: i32 = 1;
    pub const DEFAULT_SAMPLE_INDEX: i32 = 0;
    pub const DEFAULT_VOLUME: i32 = 100;
    pub const DEFAULT_EFFECTS: i32 = 0;

    /// BPM implied by this point, valid only when [`Self::uninherited`] is
    /// `true`.
    pub fn bpm(&self) -> f64 {
        60_000.0 / self.beat_len
    }

    /// Slider-velocity multiplier implied by this point, valid only when
    /// [`Self::uninherited`] is `false`. Defaults to `1.0` for malformed
    /// (zero) beat lengths.
    pub fn slider_velocity(&self) -> f64 {
        if self.beat_len == 0.0 {
            1.0
        } else {
            100.0 / self.beat_len.abs()
        }
    }
}

impl Default for TimingPoint {
    fn default() -> Self {
        Self {
            time: 0.0,
            beat_len: Self::DEFAULT_BEAT_LEN,
            meter: Self::DEFAULT_METER,
            sample_set: Self::DEFAULT_SAMPLE_SET,
            sample_index: Self::DEFAULT_SAMPLE_INDEX,
            volume: Self::DEFAULT_VOLUME,
            uninherited: true,
            effects: Self::DEFAULT_EFFECTS,
        }
    }
}

impl fmt::Display for TimingPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::util::format_compact as fc;

        write!(
            f,
            "{},{},{},{},{},{},{},{}",
            fc(self.time),
            fc(self.beat_len),
            self.meter,
            self.sample_set,
            self.sample_index,
            self.volume,
            i32::from(self.uninherited),
            self.effects,
        )
    }
}

/// Finds the last timing point with `time <= query`, as required by §5's
/// ordering guarantee ("the **last** point with `time <= query`, stable
/// tie-break: last by position"). `points` must already be sorted by time.
pub fn uninherited_point_at(points: &[TimingPoint], query: f64) -> Option<&TimingPoint> {
    points
        .iter()
        .filter(|p| p.uninherited && p.time <= query)
        .next_back()
}

/// Finds the last inherited (slider-velocity) timing point with
/// `time <= query`.
pub fn inherited_point_at(points: &[TimingPoint], query: f64) -> Option<&TimingPoint> {
    points
        .iter()
        .filter(|p| !p.uninherited && p.time <= query)
        .next_back()
}
