//! Overall-difficulty range curves (§4.E).

use crate::math;

/// A `(min, mid, max)` triple at OD=0, OD=5, OD=10.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub min: f64,
    pub mid: f64,
    pub max: f64,
}

pub const GREAT: Range = Range {
    min: 80.0,
    mid: 50.0,
    max: 20.0,
};

pub const OK: Range = Range {
    min: 140.0,
    mid: 100.0,
    max: 60.0,
};

pub const MEH: Range = Range {
    min: 200.0,
    mid: 150.0,
    max: 100.0,
};

pub const MISS_WINDOW: f64 = 400.0;

pub const PREEMPT: Range = Range {
    min: 1800.0,
    mid: 1200.0,
    max: 450.0,
};

/// Standard piecewise-linear interpolation around `od=5`, identity there.
pub fn difficulty_range(od: f64, range: Range) -> f64 {
    if od > 5.0 {
        math::lerp(range.mid, range.max, (od - 5.0) / 5.0)
    } else if od < 5.0 {
        math::lerp(range.mid, range.min, (5.0 - od) / 5.0)
    } else {
        range.mid
    }
}

/// Inverse of [`difficulty_range`]: recovers the OD that would produce
/// `value`.
pub fn inverse_difficulty_range(value: f64, range: Range) -> f64 {
    if value < range.max {
        5.0 + 5.0 * (range.mid - value) / (range.mid - range.max)
    } else if value > range.min {
        5.0 - 5.0 * (value - range.mid) / (range.min - range.mid)
    } else {
        5.0
    }
}

/// Hit windows (ms) in effect for a given overall-difficulty value, with the
/// 0.5 ms reduction applied to great/ok/meh (§4.E).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitWindows {
    pub great: f64,
    pub ok: f64,
    pub meh: f64,
    pub miss: f64,
}

impl HitWindows {
    pub fn from_od(od: f64) -> Self {
        Self {
            great: difficulty_range(od, GREAT) - 0.5,
            ok: difficulty_range(od, OK) - 0.5,
            meh: difficulty_range(od, MEH) - 0.5,
            miss: MISS_WINDOW,
        }
    }
}

/// Recovers the approach rate that, after dividing its preempt time by
/// `clock_rate`, would produce the same preempt time at rate `1.0` (§8 S2).
pub fn rate_adjusted_approach_rate(ar: f64, clock_rate: f64) -> f64 {
    let preempt = difficulty_range(ar, PREEMPT) / clock_rate;

    inverse_difficulty_range(preempt, PREEMPT)
}

/// Same idea as [`rate_adjusted_approach_rate`] but over the great hit
/// window, for the publicly reported overall-difficulty stat.
pub fn rate_adjusted_overall_difficulty(od: f64, clock_rate: f64) -> f64 {
    let window = difficulty_range(od, GREAT) / clock_rate;

    inverse_difficulty_range(window, GREAT)
}

#[cfg(test)]
mod tests {
    use super::{GREAT, difficulty_range, inverse_difficulty_range};

    #[test]
    fn identity_at_od5() {
        assert_eq!(difficulty_range(5.0, GREAT), 50.0);
    }

    #[test]
    fn inverse_round_trips() {
        let value = difficulty_range(7.0, GREAT);
        let od = inverse_difficulty_range(value, GREAT);
        assert!((od - 7.0).abs() < 1e-9);
    }

    #[test]
    fn rate_adjusted_ar_identity_at_unit_rate() {
        let ar = super::rate_adjusted_approach_rate(9.0, 1.0);
        assert!((ar - 9.0).abs() < 1e-6);
    }

    #[test]
    fn rate_adjusted_ar_doubletime() {
        let ar = super::rate_adjusted_approach_rate(9.0, 1.5);
        assert!((ar - 10.3333).abs() < 1e-4);
    }

    #[test]
    fn hit_window_at_od5() {
        let windows = super::HitWindows::from_od(5.0);
        assert!((windows.great - 49.5).abs() < 1e-9);
        assert!((windows.ok - 99.5).abs() < 1e-9);
        assert!((windows.meh - 149.5).abs() < 1e-9);
        assert_eq!(windows.miss, 400.0);
    }
}
