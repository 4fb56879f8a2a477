//! Parser round-trip properties (§8 "Round-trip / idempotence laws").

use aimed::model::{Circle, CurveKind, HitObject, HitObjectKind, HitSample, Slider, SliderCurve, Spinner, TimingPoint};
use aimed::parse;
use proptest::prelude::*;

const MINIMAL: &str = "\
osu file format v14

[General]
AudioFilename: audio.mp3
Mode: 0

[Difficulty]
HPDrainRate: 5
CircleSize: 4
OverallDifficulty: 8
ApproachRate: 9
SliderMultiplier: 1.4
SliderTickRate: 1

[TimingPoints]
0,500,4,1,0,100,1,0

[HitObjects]
100,100,1000,1,0
150,150,2000,2,0,B|200:200|250:150,1,100
200,200,5000,8,0,6000
";

#[test]
fn full_beatmap_is_idempotent_under_parse_render_parse() {
    let once = parse::parse(MINIMAL).unwrap();
    let rendered = once.to_string();
    let twice = parse::parse(&rendered).unwrap();

    assert_eq!(once, twice);
}

fn coord() -> impl Strategy<Value = f64> {
    (-512..1024_i32).prop_map(f64::from)
}

fn hit_sample() -> impl Strategy<Value = HitSample> {
    (0..4_i32, 0..4_i32, 0..8_i32, 0..100_i32, "[a-z]{0,8}").prop_map(
        |(normal_set, addition_set, index, volume, filename)| HitSample {
            normal_set,
            addition_set,
            index,
            volume,
            filename,
        },
    )
}

fn timing_point() -> impl Strategy<Value = TimingPoint> {
    (
        (-10_000..50_000_i32).prop_map(f64::from),
        (-2_000..2_000_i32).prop_map(f64::from),
        1..16_i32,
        0..4_i32,
        0..8_i32,
        0..100_i32,
        any::<bool>(),
        0..8_i32,
    )
        .prop_map(
            |(time, beat_len, meter, sample_set, sample_index, volume, uninherited, effects)| TimingPoint {
                time,
                beat_len: if beat_len == 0.0 { 1.0 } else { beat_len },
                meter,
                sample_set,
                sample_index,
                volume,
                uninherited,
                effects,
            },
        )
}

fn hit_object() -> impl Strategy<Value = HitObject> {
    let circle = (
        coord(),
        coord(),
        (0..100_000_i32).prop_map(f64::from),
        0..4_i32,
        any::<bool>(),
        0..8_u8,
        hit_sample(),
    )
        .prop_map(|(x, y, time, hit_sound, new_combo, combo_colour_skip, hit_sample)| HitObject {
            kind: HitObjectKind::Circle(Circle {
                pos: (x, y),
                time,
                hit_sound,
                new_combo,
                combo_colour_skip,
                hit_sample,
            }),
        });

    let slider = (
        coord(),
        coord(),
        (0..100_000_i32).prop_map(f64::from),
        0..4_i32,
        any::<bool>(),
        0..8_u8,
        1..4_u32,
        (1..2_000_i32).prop_map(f64::from),
        prop::collection::vec((coord(), coord()), 1..4),
        hit_sample(),
    )
        .prop_map(
            |(x, y, time, hit_sound, new_combo, combo_colour_skip, slides, pixel_length, points, hit_sample)| {
                HitObject {
                    kind: HitObjectKind::Slider(Slider {
                        pos: (x, y),
                        time,
                        hit_sound,
                        new_combo,
                        combo_colour_skip,
                        curves: vec![SliderCurve { kind: CurveKind::Bezier, points }],
                        slides,
                        pixel_length,
                        edge_sounds: Vec::new(),
                        edge_sets: Vec::new(),
                        hit_sample,
                        duration_ms: 0.0,
                    }),
                }
            },
        );

    let spinner = (
        coord(),
        coord(),
        (0..100_000_i32).prop_map(f64::from),
        0..4_i32,
        any::<bool>(),
        0..8_u8,
        (0..100_000_i32).prop_map(f64::from),
        hit_sample(),
    )
        .prop_map(
            |(x, y, time, hit_sound, new_combo, combo_colour_skip, end_time, hit_sample)| HitObject {
                kind: HitObjectKind::Spinner(Spinner {
                    pos: (x, y),
                    time,
                    hit_sound,
                    new_combo,
                    combo_colour_skip,
                    end_time: time + end_time.abs(),
                    hit_sample,
                }),
            },
        );

    prop_oneof![circle, slider, spinner]
}

proptest! {
    #[test]
    fn timing_point_round_trips(point in timing_point()) {
        let rendered = point.to_string();
        let line = format!(
            "osu file format v14\n\n[General]\nAudioFilename: a.mp3\nMode: 0\n\n[Difficulty]\nCircleSize: 4\n\n[TimingPoints]\n{rendered}\n\n[HitObjects]\n100,100,0,1,0\n"
        );

        let map = parse::parse(&line).unwrap();
        prop_assert_eq!(map.timing_points.len(), 1);

        let parsed = map.timing_points[0];
        prop_assert!((parsed.time - point.time).abs() < 1e-6);
        prop_assert!((parsed.beat_len - point.beat_len).abs() < 1e-6);
        prop_assert_eq!(parsed.meter, point.meter);
        prop_assert_eq!(parsed.uninherited, point.uninherited);
    }

    /// Slider `duration_ms` is resolved from timing points during `parse`,
    /// so it's compared separately rather than via full struct equality.
    #[test]
    fn hit_object_round_trips(object in hit_object()) {
        let rendered = object.to_string();
        let line = format!(
            "osu file format v14\n\n[General]\nAudioFilename: a.mp3\nMode: 0\n\n[Difficulty]\nCircleSize: 4\nSliderMultiplier: 1.4\n\n[TimingPoints]\n0,500,4,1,0,100,1,0\n\n[HitObjects]\n{rendered}\n"
        );

        let map = parse::parse(&line).unwrap();
        prop_assert_eq!(map.hit_objects.len(), 1);

        let parsed = &map.hit_objects[0].kind;

        match (parsed, &object.kind) {
            (HitObjectKind::Circle(p), HitObjectKind::Circle(o)) => {
                prop_assert_eq!(p, o);
            }
            (HitObjectKind::Slider(p), HitObjectKind::Slider(o)) => {
                prop_assert_eq!(&p.pos, &o.pos);
                prop_assert_eq!(p.time, o.time);
                prop_assert_eq!(p.hit_sound, o.hit_sound);
                prop_assert_eq!(p.new_combo, o.new_combo);
                prop_assert_eq!(p.combo_colour_skip, o.combo_colour_skip);
                prop_assert_eq!(&p.curves, &o.curves);
                prop_assert_eq!(p.slides, o.slides);
                prop_assert!((p.pixel_length - o.pixel_length).abs() < 1e-6);
                prop_assert_eq!(&p.hit_sample, &o.hit_sample);
            }
            (HitObjectKind::Spinner(p), HitObjectKind::Spinner(o)) => {
                prop_assert_eq!(p, o);
            }
            _ => prop_assert!(false, "hit object kind changed across round-trip"),
        }
    }
}
