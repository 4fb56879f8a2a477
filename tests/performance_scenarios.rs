//! §8 S5 — performance at defaults, checked against the formula directly.

use aimed::difficulty::DifficultyAttributes;
use aimed::mods::GameMods;
use aimed::performance::calculate_performance;

fn attrs_with(aim: f64, speed: f64, star: f64, max_combo: u32) -> DifficultyAttributes {
    DifficultyAttributes {
        star_rating: star,
        aim_difficulty_value: aim,
        speed_difficulty_value: speed,
        flashlight_difficulty_value: 0.0,
        slider_factor: 1.0,
        aim_difficult_slider_count: 0.0,
        speed_note_count: 0.0,
        aim_difficult_strain_count: 0.0,
        speed_difficult_strain_count: 0.0,
        approach_rate: 9.0,
        overall_difficulty: 8.0,
        circle_size: 4.0,
        drain_rate: 5.0,
        clock_rate: 1.0,
        max_combo,
        hit_circle_count: max_combo,
        slider_count: 0,
        spinner_count: 0,
        mods: GameMods::default(),
        aim_strains: Vec::new(),
    }
}

/// The `Performance` builder reproduces a plain `calculate_performance`
/// call, including its `1.0`/full-combo/zero-miss defaults.
#[test]
fn performance_builder_matches_plain_call() {
    let attrs = attrs_with(4.0, 3.5, 6.0, 1000);

    let plain = calculate_performance(&attrs, 1.0, None, 0);
    let built = aimed::Performance::new().calculate(&attrs);
    assert_eq!(plain, built);

    let plain_partial = calculate_performance(&attrs, 0.95, Some(500), 2);
    let built_partial = aimed::Performance::new().accuracy(0.95).combo(500).misses(2).calculate(&attrs);
    assert_eq!(plain_partial, built_partial);
}

#[test]
fn s5_performance_at_defaults() {
    let attrs = attrs_with(4.0, 3.5, 6.0, 1000);
    let perf = calculate_performance(&attrs, 1.0, Some(1000), 0);

    let diff_to_perf = |d: f64| (5.0 * (d / 0.0675_f64).max(1.0) - 4.0).powi(3) / 100_000.0;

    let expected_pp_aim = diff_to_perf(4.0) * 1.0_f64.powf(5.5) * (0.98 + 1000.0 / 1500.0);
    let expected_pp_speed = diff_to_perf(3.5) * 1.0_f64.powf(4.0);
    let expected_pp_acc = 1.0_f64.powf(5.5) * (25.0 + 6.0 * 5.0);
    let expected_pp = (expected_pp_aim.powf(1.1) + expected_pp_speed.powf(1.1) + expected_pp_acc.powf(1.1))
        .powf(1.0 / 1.1);

    assert!((perf.pp_aim - expected_pp_aim).abs() < 1e-6);
    assert!((perf.pp_speed - expected_pp_speed).abs() < 1e-6);
    assert!((perf.pp_acc - expected_pp_acc).abs() < 1e-6);
    assert!((perf.pp - expected_pp).abs() < 1e-6);
    assert_eq!(expected_pp_acc, 55.0);
}

/// Misses beyond the floor (`total_hits/200`) drive `effective_miss_count`
/// directly, and the `0.97^n` penalty only touches aim/speed, not accuracy.
#[test]
fn miss_penalty_applies_only_to_aim_and_speed() {
    let attrs = attrs_with(4.0, 3.5, 6.0, 1000);
    let clean = calculate_performance(&attrs, 1.0, Some(1000), 0);
    let missed = calculate_performance(&attrs, 1.0, Some(1000), 5);

    assert_eq!(missed.effective_miss_count, 5.0);
    assert!(missed.pp_aim < clean.pp_aim);
    assert!(missed.pp_speed < clean.pp_speed);
    assert_eq!(missed.pp_acc, clean.pp_acc);
}

/// Dropping combo below `max_combo` scales aim/speed by
/// `(combo/max_combo)^0.8`, leaving accuracy pp untouched.
#[test]
fn combo_scale_applies_only_to_aim_and_speed() {
    let attrs = attrs_with(4.0, 3.5, 6.0, 1000);
    let full_combo = calculate_performance(&attrs, 1.0, Some(1000), 0);
    let half_combo = calculate_performance(&attrs, 1.0, Some(500), 0);

    let scale = 0.5_f64.powf(0.8);

    assert!((half_combo.pp_aim - full_combo.pp_aim * scale).abs() < 1e-6);
    assert!((half_combo.pp_speed - full_combo.pp_speed * scale).abs() < 1e-6);
    assert_eq!(half_combo.pp_acc, full_combo.pp_acc);
}
