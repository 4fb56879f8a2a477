//! The beatmap text parser (§4.C): a linear scan over `[Section]`-delimited
//! `.osu` text into the typed model in [`crate::model`].

pub mod error;

use std::{fs, path::Path};

use crate::model::{
    beatmap::Beatmap,
    control_point::TimingPoint,
    difficulty::Difficulty,
    general::General,
    hit_object::{Circle, CurveKind, HitObject, HitObjectKind, HitSample, Slider, SliderCurve, Spinner},
};

pub use error::{ParseError, ParseResult};

#[derive(Debug, PartialEq, Eq)]
enum Section {
    General,
    Difficulty,
    TimingPoints,
    HitObjects,
    Other,
}

/// Parses a `.osu` file's contents into a [`Beatmap`] (§4.C).
pub fn parse(text: &str) -> ParseResult<Beatmap> {
    let mut general = None;
    let mut difficulty = None;
    let mut timing_points = Vec::new();
    let mut hit_objects = Vec::new();

    let mut section = Section::Other;

    for raw_line in text.lines() {
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        if let Some(name) = section_header(line) {
            #[cfg(feature = "tracing")]
            tracing::debug!(section = name, "entering section");

            section = match name {
                "General" => Section::General,
                "Difficulty" => Section::Difficulty,
                "TimingPoints" => Section::TimingPoints,
                "HitObjects" => Section::HitObjects,
                other => return Err(ParseError::UnknownSection(other.to_owned())),
            };
            continue;
        }

        match section {
            Section::General => {
                parse_key_value(line, "General", general.get_or_insert_with(General::default))?;
            }
            Section::Difficulty => {
                parse_key_value(
                    line,
                    "Difficulty",
                    difficulty.get_or_insert_with(Difficulty::default),
                )?;
            }
            Section::TimingPoints => {
                timing_points.push(parse_timing_point(line)?);
            }
            Section::HitObjects => {
                hit_objects.push(parse_hit_object(line)?);
            }
            Section::Other => {}
        }
    }

    let general = general.ok_or(ParseError::MissingSection("General"))?;
    let difficulty = difficulty.ok_or(ParseError::MissingSection("Difficulty"))?;

    if timing_points.is_empty() {
        return Err(ParseError::MissingSection("TimingPoints"));
    }

    if hit_objects.is_empty() {
        return Err(ParseError::MissingSection("HitObjects"));
    }

    if general.mode != 0 {
        return Err(ParseError::UnsupportedMode(general.mode));
    }

    let mut beatmap = Beatmap {
        general,
        difficulty,
        timing_points,
        hit_objects,
    };

    beatmap.sort_hit_objects();
    beatmap.resolve_slider_durations();

    Ok(beatmap)
}

/// Parses a `.osu` file from disk and hands it to [`parse`].
pub fn parse_path(path: impl AsRef<Path>) -> ParseResult<Beatmap> {
    let text = fs::read_to_string(path)?;

    parse(&text)
}

fn section_header(line: &str) -> Option<&str> {
    line.strip_prefix('[')?.strip_suffix(']')
}

/// Splits a `Key: Value` line on the first `:` and normalizes the key to
/// snake_case before matching it against the target's known fields.
/// Unknown keys are ignored; malformed lines (no `:`) are fatal.
trait KeyValueTarget {
    fn set(&mut self, snake_key: &str, value: &str) -> ParseResult<()>;
}

fn parse_key_value(
    line: &str,
    section: &'static str,
    target: &mut impl KeyValueTarget,
) -> ParseResult<()> {
    let (key, value) = line
        .split_once(':')
        .ok_or_else(|| ParseError::MalformedLine {
            section,
            line: line.to_owned(),
        })?;

    target.set(&to_snake_case(key.trim()), value.trim())
}

fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);

    for (i, c) in key.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            out.push('_');
        }

        out.extend(c.to_lowercase());
    }

    out
}

impl KeyValueTarget for General {
    fn set(&mut self, snake_key: &str, value: &str) -> ParseResult<()> {
        match snake_key {
            "audio_filename" => self.audio_filename = value.to_owned(),
            "preview_time" => self.preview_time = value.parse().map_err(|_| ParseError::BadNumeric)?,
            "stack_leniency" => self.stack_leniency = parse_f64(value)?,
            "mode" => self.mode = value.parse().map_err(|_| ParseError::BadNumeric)?,
            _ => {}
        }

        Ok(())
    }
}

impl KeyValueTarget for Difficulty {
    fn set(&mut self, snake_key: &str, value: &str) -> ParseResult<()> {
        match snake_key {
            "h_p_drain_rate" | "hp_drain_rate" => self.hp_drain_rate = parse_f64(value)?,
            "circle_size" => self.circle_size = parse_f64(value)?,
            "overall_difficulty" => self.overall_difficulty = parse_f64(value)?,
            "approach_rate" => self.approach_rate = parse_f64(value)?,
            "slider_multiplier" => self.slider_multiplier = parse_f64(value)?,
            "slider_tick_rate" => self.slider_tick_rate = parse_f64(value)?,
            _ => {}
        }

        Ok(())
    }
}

fn parse_f64(value: &str) -> ParseResult<f64> {
    value.parse().map_err(|_| ParseError::BadNumeric)
}

fn parse_timing_point(line: &str) -> ParseResult<TimingPoint> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();

    let fail = || ParseError::MalformedLine {
        section: "TimingPoints",
        line: line.to_owned(),
    };

    if fields.len() < 2 {
        return Err(fail());
    }

    let time = parse_f64(fields[0])?;
    let beat_len = parse_f64(fields[1])?;
    let meter = fields.get(2).map_or(Ok(TimingPoint::DEFAULT_METER), |s| {
        s.parse().map_err(|_| ParseError::BadNumeric)
    })?;
    let sample_set = fields
        .get(3)
        .map_or(Ok(TimingPoint::DEFAULT_SAMPLE_SET), |s| {
            s.parse().map_err(|_| ParseError::BadNumeric)
        })?;
    let sample_index = fields
        .get(4)
        .map_or(Ok(TimingPoint::DEFAULT_SAMPLE_INDEX), |s| {
            s.parse().map_err(|_| ParseError::BadNumeric)
        })?;
    let volume = fields.get(5).map_or(Ok(TimingPoint::DEFAULT_VOLUME), |s| {
        s.parse().map_err(|_| ParseError::BadNumeric)
    })?;
    let uninherited = fields.get(6).map_or(true, |s| *s != "0");
    let effects = fields
        .get(7)
        .map_or(Ok(TimingPoint::DEFAULT_EFFECTS), |s| {
            s.parse().map_err(|_| ParseError::BadNumeric)
        })?;

    Ok(TimingPoint {
        time,
        beat_len,
        meter,
        sample_set,
        sample_index,
        volume,
        uninherited,
        effects,
    })
}

const TYPE_CIRCLE_BIT: u32 = 1 << 0;
const TYPE_SLIDER_BIT: u32 = 1 << 1;
const TYPE_SPINNER_BIT: u32 = 1 << 3;

fn parse_hit_sample(fields: &[&str], index: usize, fail: impl Fn() -> ParseError) -> ParseResult<HitSample> {
    fields
        .get(index)
        .map_or_else(|| Ok(HitSample::default()), |s| HitSample::parse(s).ok_or_else(fail))
}

fn parse_hit_object(line: &str) -> ParseResult<HitObject> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();

    let fail = || ParseError::MalformedLine {
        section: "HitObjects",
        line: line.to_owned(),
    };

    if fields.len() < 5 {
        return Err(fail());
    }

    let x = parse_f64(fields[0])?;
    let y = parse_f64(fields[1])?;
    let time = parse_f64(fields[2])?;
    let type_byte: u32 = fields[3].parse().map_err(|_| ParseError::BadNumeric)?;
    let hit_sound: i32 = fields[4].parse().map_err(|_| ParseError::BadNumeric)?;
    let (new_combo, combo_colour_skip) =
        crate::model::hit_object::decode_type_flags(type_byte as u8);

    let pos = (x, y);

    let kind = if type_byte & TYPE_SLIDER_BIT != 0 {
        HitObjectKind::Slider(parse_slider(pos, time, hit_sound, new_combo, combo_colour_skip, &fields, fail)?)
    } else if type_byte & TYPE_SPINNER_BIT != 0 {
        let end_time = fields.get(5).map_or(Err(fail()), |s| parse_f64(s))?;
        let hit_sample = parse_hit_sample(&fields, 6, fail)?;

        HitObjectKind::Spinner(Spinner {
            pos,
            time,
            hit_sound,
            new_combo,
            combo_colour_skip,
            end_time,
            hit_sample,
        })
    } else if type_byte & TYPE_CIRCLE_BIT != 0 {
        let hit_sample = parse_hit_sample(&fields, 5, fail)?;

        HitObjectKind::Circle(Circle {
            pos,
            time,
            hit_sound,
            new_combo,
            combo_colour_skip,
            hit_sample,
        })
    } else {
        return Err(fail());
    };

    Ok(HitObject { kind })
}

fn parse_slider(
    pos: (f64, f64),
    time: f64,
    hit_sound: i32,
    new_combo: bool,
    combo_colour_skip: u8,
    fields: &[&str],
    fail: impl Fn() -> ParseError,
) -> ParseResult<Slider> {
    let curve_field = fields.get(5).ok_or_else(&fail)?;
    let slides: u32 = fields.get(6).ok_or_else(&fail)?.parse().map_err(|_| ParseError::BadNumeric)?;
    let pixel_length = parse_f64(fields.get(7).ok_or_else(&fail)?)?;

    let edge_sounds = fields
        .get(8)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.split('|')
                .map(|v| v.parse().map_err(|_| ParseError::BadNumeric))
                .collect::<ParseResult<Vec<i32>>>()
        })
        .transpose()?
        .unwrap_or_default();

    let edge_sets = fields
        .get(9)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.split('|')
                .map(|pair| {
                    let (a, b) = pair.split_once(':').ok_or_else(&fail)?;
                    let a: i32 = a.parse().map_err(|_| ParseError::BadNumeric)?;
                    let b: i32 = b.parse().map_err(|_| ParseError::BadNumeric)?;
                    Ok((a, b))
                })
                .collect::<ParseResult<Vec<(i32, i32)>>>()
        })
        .transpose()?
        .unwrap_or_default();

    let hit_sample = parse_hit_sample(fields, 10, &fail)?;

    Ok(Slider {
        pos,
        time,
        hit_sound,
        new_combo,
        combo_colour_skip,
        curves: parse_curves(curve_field, &fail)?,
        slides,
        pixel_length,
        edge_sounds,
        edge_sets,
        hit_sample,
        duration_ms: 0.0,
    })
}

/// Parses `T|x:y|x:y|T2|x:y|...`: a run of curves, each introduced by a
/// type letter and followed by its control points, concatenated with `|`.
fn parse_curves(field: &str, fail: impl Fn() -> ParseError) -> ParseResult<Vec<SliderCurve>> {
    let mut curves: Vec<SliderCurve> = Vec::new();

    for token in field.split('|') {
        if let Some(kind) = token.chars().next().filter(|c| c.is_ascii_alphabetic()) {
            let kind = CurveKind::from_letter(kind).ok_or_else(&fail)?;
            curves.push(SliderCurve { kind, points: Vec::new() });
            continue;
        }

        let (x, y) = token.split_once(':').ok_or_else(&fail)?;
        let point = (
            x.parse().map_err(|_| ParseError::BadNumeric)?,
            y.parse().map_err(|_| ParseError::BadNumeric)?,
        );

        curves.last_mut().ok_or_else(&fail)?.points.push(point);
    }

    if curves.is_empty() {
        return Err(fail());
    }

    Ok(curves)
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn parses_minimal_beatmap() {
        let map = parse(MINIMAL).unwrap();

        assert_eq!(map.hit_objects.len(), 3);
        assert_eq!(map.difficulty.circle_size, 4.0);
        assert!(map.hit_objects[1].is_slider());
        assert!(map.hit_objects[2].is_spinner());
    }

    #[test]
    fn rejects_missing_section() {
        let text = "[General]\nAudioFilename: a.mp3\nMode: 0\n";
        assert!(matches!(parse(text), Err(ParseError::MissingSection(_))));
    }

    #[test]
    fn rejects_unsupported_mode() {
        let text = MINIMAL.replace("Mode: 0", "Mode: 1");
        assert!(matches!(parse(&text), Err(ParseError::UnsupportedMode(1))));
    }

    #[test]
    fn rejects_unknown_section() {
        let text = MINIMAL.replace("[General]", "[Metadata]\nTitle:x\n\n[General]");
        assert!(matches!(parse(&text), Err(ParseError::UnknownSection(name)) if name == "Metadata"));
    }
}
