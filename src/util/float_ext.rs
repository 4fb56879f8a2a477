/// Epsilon-tolerant float comparisons, grounded on the teacher's
/// `util::float_ext::FloatExt` (used throughout the skill/rating code for
/// `eq(0.0)` checks instead of bit-exact comparison).
pub trait FloatExt {
    fn eq(self, other: Self) -> bool;
    fn not_eq(self, other: Self) -> bool;
}

impl FloatExt for f64 {
    fn eq(self, other: Self) -> bool {
        (self - other).abs() < f64::EPSILON
    }

    fn not_eq(self, other: Self) -> bool {
        !FloatExt::eq(self, other)
    }
}
