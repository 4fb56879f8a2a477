//! Small, mode-agnostic helpers used by both the parser and the difficulty
//! engine.

mod float_ext;

pub use float_ext::FloatExt;

/// Renders `x` the way the beatmap format expects: up to 15 significant
/// digits, no trailing `.0`, `-0` normalized to `0`.
///
/// Grounded on the "numeric formatting uses 15-significant-digit compact
/// form" rule from the beatmap model's round-trip invariant.
pub fn format_compact(x: f64) -> String {
    if x == 0.0 {
        return "0".to_owned();
    }

    let mut s = format!("{x:.*}", sig_fig_decimals(x));

    while s.contains('.') && (s.ends_with('0') || s.ends_with('.')) {
        if s.ends_with('.') {
            s.pop();
            break;
        }

        s.pop();
    }

    if s == "-0" {
        s = "0".to_owned();
    }

    s
}

fn sig_fig_decimals(x: f64) -> usize {
    let magnitude = x.abs().log10().floor();
    let int_digits = if magnitude >= 0.0 { magnitude as i32 + 1 } else { 1 };

    (15 - int_digits).clamp(0, 15) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_zero() {
        assert_eq!(format_compact(1.0), "1");
        assert_eq!(format_compact(1.5), "1.5");
    }

    #[test]
    fn normalizes_negative_zero() {
        assert_eq!(format_compact(-0.0), "0");
    }
}
