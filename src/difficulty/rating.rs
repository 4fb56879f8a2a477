//! Rating & performance formulas (§4.I).

use crate::mods::GameMods;

pub fn calculate_difficulty_rating(value: f64) -> f64 {
    value.max(0.0).sqrt() * 0.0675
}

pub fn difficulty_to_performance(difficulty: f64) -> f64 {
    (5.0 * (difficulty / 0.0675).max(1.0) - 4.0).powi(3) / 100_000.0
}

pub fn aim_rating(aim_difficulty_value: f64, mods: &GameMods) -> f64 {
    if mods.ap() {
        return 0.0;
    }

    let mut rating = calculate_difficulty_rating(aim_difficulty_value);

    if mods.td() {
        rating = rating.powf(0.8);
    }

    if mods.rx() {
        rating *= 0.9;
    }

    rating
}

pub fn speed_rating(speed_difficulty_value: f64, mods: &GameMods) -> f64 {
    if mods.rx() {
        return 0.0;
    }

    let mut rating = calculate_difficulty_rating(speed_difficulty_value);

    if mods.ap() {
        rating *= 0.5;
    }

    rating
}

pub fn flashlight_rating(flashlight_difficulty_value: f64, mods: &GameMods) -> f64 {
    if !mods.fl() {
        return 0.0;
    }

    let mut rating = flashlight_difficulty_value;

    if mods.rx() {
        rating *= 0.7;
    }

    if mods.ap() {
        rating *= 0.4;
    }

    if mods.td() {
        rating = rating.powf(0.8);
    }

    rating
}

/// `star = (1.14)^(1/3) * 0.0265 * ((100000 / 2^(1/1.1) * base)^(1/3) + 4)`,
/// or `0` if `base <= 1e-5`.
pub fn star_rating(aim_rating: f64, speed_rating: f64, flashlight_rating: f64, mods: &GameMods) -> f64 {
    let p_aim = difficulty_to_performance(aim_rating);
    let p_speed = difficulty_to_performance(speed_rating);
    let p_fl = if mods.fl() {
        crate::difficulty::skills::Flashlight::difficulty_to_performance(flashlight_rating)
    } else {
        0.0
    };

    let base = (p_aim.powf(1.1) + p_speed.powf(1.1) + p_fl.powf(1.1)).powf(1.0 / 1.1);

    if base <= 1e-5 {
        return 0.0;
    }

    1.14_f64.powf(1.0 / 3.0)
        * 0.0265
        * ((100_000.0 / 2_f64.powf(1.0 / 1.1) * base).powf(1.0 / 3.0) + 4.0)
}

#[cfg(test)]
mod tests {
    use super::calculate_difficulty_rating;

    #[test]
    fn difficulty_rating_of_100() {
        assert!((calculate_difficulty_rating(100.0) - 0.675).abs() < 1e-9);
    }
}
