//! Concrete scenarios and invariants from §8 "Testable Properties".

use aimed::difficulty::{calculate_difficulty, CalculationError};
use aimed::difficulty::hit_windows::HitWindows;
use aimed::difficulty::preprocess::preprocess;
use aimed::mods::{GameMods, Mod};
use aimed::model::{Beatmap, Circle, Difficulty, General, HitObject, HitObjectKind, HitSample};
use aimed::performance::calculate_performance;

fn circle(x: f64, y: f64, time: f64) -> HitObject {
    HitObject {
        kind: HitObjectKind::Circle(Circle {
            pos: (x, y),
            time,
            hit_sound: 0,
            new_combo: false,
            combo_colour_skip: 0,
            hit_sample: HitSample::default(),
        }),
    }
}

/// S6 — five coincident circles stack, offset by `-6.4 * radius/64` per
/// height.
#[test]
fn stacking_produces_monotonic_offsets() {
    let map = Beatmap {
        general: General::default(),
        difficulty: Difficulty { circle_size: 0.0, approach_rate: 9.0, ..Difficulty::default() },
        timing_points: Vec::new(),
        hit_objects: (0..5).map(|i| circle(100.0, 100.0, f64::from(i) * 10.0)).collect(),
    };

    let hit_windows = HitWindows::from_od(5.0);
    let (objects, scaling_factor) = preprocess(&map, 0.0, 9.0, 0.7, hit_windows);

    assert!((scaling_factor.radius - 54.422).abs() < 1e-2);

    // Stack height accrues on the earliest object of each chain (§4.F step 2:
    // the outer loop scans forward from `i`, folding later neighbours into
    // `i`'s height), so the earliest circle carries the largest (most
    // negative) offset and the latest keeps its unstacked position.
    let expected = [78.24, 83.68, 89.12, 94.56, 100.0];

    for (object, expected_coord) in objects.iter().zip(expected) {
        assert!(
            (object.stacked_position.0 - expected_coord).abs() < 0.02,
            "got {}, expected {expected_coord}",
            object.stacked_position.0
        );
        assert_eq!(object.stacked_position.0, object.stacked_position.1);
    }
}

/// A beatmap with 0 or 1 hit objects yields a zero-filled but well-formed
/// record (§8 "Boundary cases").
#[test]
fn single_object_beatmap_is_zero_filled() {
    let map = Beatmap {
        general: General::default(),
        difficulty: Difficulty::default(),
        timing_points: Vec::new(),
        hit_objects: vec![circle(100.0, 100.0, 0.0)],
    };

    let attrs = calculate_difficulty(&map, &GameMods::default()).unwrap();

    assert_eq!(attrs.star_rating, 0.0);
    assert_eq!(attrs.aim_difficulty_value, 0.0);
    assert_eq!(attrs.speed_difficulty_value, 0.0);
    assert_eq!(attrs.slider_factor, 1.0);
    assert_eq!(attrs.max_combo, 1);
}

/// A spinner-only beatmap has zero aim/speed difficulty but a finite,
/// well-formed record.
#[test]
fn spinner_only_beatmap_has_zero_aim_and_speed() {
    use aimed::model::Spinner;

    let spinner = |time: f64, end_time: f64| Spinner {
        pos: (256.0, 192.0),
        time,
        hit_sound: 0,
        new_combo: false,
        combo_colour_skip: 0,
        end_time,
        hit_sample: HitSample::default(),
    };

    let hit_objects = vec![
        HitObject { kind: HitObjectKind::Spinner(spinner(0.0, 500.0)) },
        HitObject { kind: HitObjectKind::Spinner(spinner(1000.0, 1500.0)) },
    ];

    let map = Beatmap {
        general: General::default(),
        difficulty: Difficulty::default(),
        timing_points: Vec::new(),
        hit_objects,
    };

    let attrs = calculate_difficulty(&map, &GameMods::default()).unwrap();

    assert_eq!(attrs.aim_difficulty_value, 0.0);
    assert_eq!(attrs.speed_difficulty_value, 0.0);
    assert!(attrs.star_rating.is_finite());
    assert!(attrs.star_rating >= 0.0);
}

/// Every strain-derived attribute is finite and non-negative, and
/// `slider_factor` lies in `(0, 1]`, for an ordinary mixed beatmap (§8
/// invariants 1 and 2).
#[test]
fn ordinary_beatmap_satisfies_core_invariants() {
    let map = sample_map();
    let attrs = calculate_difficulty(&map, &GameMods::default()).unwrap();

    for value in [
        attrs.star_rating,
        attrs.aim_difficulty_value,
        attrs.speed_difficulty_value,
        attrs.flashlight_difficulty_value,
    ] {
        assert!(value.is_finite());
        assert!(value >= 0.0);
    }

    assert!(attrs.slider_factor > 0.0 && attrs.slider_factor <= 1.0);

    let perf = calculate_performance(&attrs, 1.0, None, 0);
    for value in [perf.pp, perf.pp_aim, perf.pp_speed, perf.pp_acc] {
        assert!(value.is_finite());
        assert!(value >= 0.0);
    }
}

/// §8 invariant 3: on an identical map, DoubleTime star rating is at least
/// NoMod star rating.
#[test]
fn doubletime_does_not_lower_star_rating() {
    let map = sample_map();

    let nomod = calculate_difficulty(&map, &GameMods::default()).unwrap();
    let doubletime = calculate_difficulty(&map, &GameMods::new([Mod::DoubleTime])).unwrap();

    assert!(doubletime.star_rating >= nomod.star_rating - 1e-9);
}

/// §8 invariant 9: at accuracy 1.0, full combo, zero misses, performance
/// reproduces the plain formula with no hidden penalty term.
#[test]
fn baseline_performance_has_no_hidden_penalty() {
    let map = sample_map();
    let attrs = calculate_difficulty(&map, &GameMods::default()).unwrap();
    let perf = calculate_performance(&attrs, 1.0, Some(attrs.max_combo), 0);

    let expected_pp_aim = aimed::difficulty::rating::difficulty_to_performance(attrs.aim_difficulty_value)
        * (0.98 + f64::from(attrs.max_combo) / 1500.0);
    let expected_pp_speed =
        aimed::difficulty::rating::difficulty_to_performance(attrs.speed_difficulty_value);

    assert!((perf.pp_aim - expected_pp_aim).abs() < 1e-6);
    assert!((perf.pp_speed - expected_pp_speed).abs() < 1e-6);
    assert_eq!(perf.effective_miss_count, 0.0);
}

/// A non-zero `general.mode` is rejected at the facade entry even when a
/// `Beatmap` is assembled directly (bypassing `parse`'s own mode check).
#[test]
fn unsupported_mode_is_rejected_at_the_facade() {
    let mut map = sample_map();
    map.general.mode = 1;

    let result = calculate_difficulty(&map, &GameMods::default());

    assert!(matches!(result, Err(CalculationError::UnsupportedMode(1))));
}

/// The `Difficulty` builder reproduces a plain `calculate_difficulty` call
/// at default parameters, and `passed_objects` truncates the map the same
/// way a manual slice of `hit_objects` would.
#[test]
fn difficulty_builder_matches_plain_call_and_truncates() {
    let map = sample_map();

    let plain = calculate_difficulty(&map, &GameMods::default()).unwrap();
    let built = aimed::Difficulty::new().calculate(&map).unwrap();
    assert_eq!(plain, built);

    let mut truncated_map = map.clone();
    truncated_map.hit_objects.truncate(2);
    let truncated_plain = calculate_difficulty(&truncated_map, &GameMods::default()).unwrap();
    let truncated_built = aimed::Difficulty::new().passed_objects(2).calculate(&map).unwrap();
    assert_eq!(truncated_plain, truncated_built);
}

fn sample_map() -> Beatmap {
    let hit_objects = (0..12)
        .map(|i| circle(100.0 + f64::from(i % 4) * 40.0, 100.0 + f64::from(i / 4) * 40.0, f64::from(i) * 250.0))
        .collect::<Vec<_>>();

    Beatmap {
        general: General::default(),
        difficulty: Difficulty { approach_rate: 9.0, overall_difficulty: 8.0, ..Difficulty::default() },
        timing_points: vec![aimed::model::TimingPoint::default()],
        hit_objects,
    }
}
