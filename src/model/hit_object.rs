use std::fmt;

/// Sample metadata trailing a hit object line. Parsed but otherwise inert
/// for difficulty/performance purposes — carried only so hit objects
/// round-trip faithfully.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HitSample {
    pub normal_set: i32,
    pub addition_set: i32,
    pub index: i32,
    pub volume: i32,
    pub filename: String,
}

impl HitSample {
    /// Parses `normalSet:additionSet:index:volume:filename`; any trailing
    /// piece may be omitted, defaulting to `0` (or empty, for `filename`).
    pub fn parse(field: &str) -> Option<Self> {
        let mut parts = field.split(':');
        let next_i32 = |parts: &mut std::str::Split<'_, char>| {
            parts.next().map_or(Some(0), |s| s.parse().ok())
        };

        let normal_set = next_i32(&mut parts)?;
        let addition_set = next_i32(&mut parts)?;
        let index = next_i32(&mut parts)?;
        let volume = next_i32(&mut parts)?;
        let filename = parts.next().unwrap_or("").to_owned();

        Some(Self { normal_set, addition_set, index, volume, filename })
    }
}

impl fmt::Display for HitSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}",
            self.normal_set, self.addition_set, self.index, self.volume, self.filename
        )
    }
}

/// One control-point run within a slider's path: `T|x:y|x:y|...`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveKind {
    Bezier,
    Linear,
    Catmull,
    PerfectCircle,
}

impl CurveKind {
    pub const fn letter(self) -> char {
        match self {
            Self::Bezier => 'B',
            Self::Linear => 'L',
            Self::Catmull => 'C',
            Self::PerfectCircle => 'P',
        }
    }

    pub const fn from_letter(c: char) -> Option<Self> {
        match c {
            'B' => Some(Self::Bezier),
            'L' => Some(Self::Linear),
            'C' => Some(Self::Catmull),
            'P' => Some(Self::PerfectCircle),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SliderCurve {
    pub kind: CurveKind,
    pub points: Vec<(f64, f64)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    pub pos: (f64, f64),
    pub time: f64,
    pub hit_sound: i32,
    pub new_combo: bool,
    pub combo_colour_skip: u8,
    pub hit_sample: HitSample,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Slider {
    pub pos: (f64, f64),
    pub time: f64,
    pub hit_sound: i32,
    pub new_combo: bool,
    pub combo_colour_skip: u8,
    pub curves: Vec<SliderCurve>,
    pub slides: u32,
    pub pixel_length: f64,
    pub edge_sounds: Vec<i32>,
    pub edge_sets: Vec<(i32, i32)>,
    pub hit_sample: HitSample,
    /// Resolved by [`crate::model::beatmap::Beatmap::resolve_slider_durations`]
    /// from the timing points in effect at `time` (§4.C).
    pub duration_ms: f64,
}

impl Slider {
    /// The tail of the path: the last point of the last curve.
    pub fn path_end(&self) -> (f64, f64) {
        self.curves
            .last()
            .and_then(|c| c.points.last())
            .copied()
            .unwrap_or(self.pos)
    }

    pub fn end_time(&self) -> f64 {
        self.time + self.duration_ms
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Spinner {
    pub pos: (f64, f64),
    pub time: f64,
    pub hit_sound: i32,
    pub new_combo: bool,
    pub combo_colour_skip: u8,
    pub end_time: f64,
    pub hit_sample: HitSample,
}

#[derive(Clone, Debug, PartialEq)]
pub enum HitObjectKind {
    Circle(Circle),
    Slider(Slider),
    Spinner(Spinner),
}

#[derive(Clone, Debug, PartialEq)]
pub struct HitObject {
    pub kind: HitObjectKind,
}

impl HitObject {
    pub const fn pos(&self) -> (f64, f64) {
        match &self.kind {
            HitObjectKind::Circle(c) => c.pos,
            HitObjectKind::Slider(s) => s.pos,
            HitObjectKind::Spinner(s) => s.pos,
        }
    }

    pub const fn start_time(&self) -> f64 {
        match &self.kind {
            HitObjectKind::Circle(c) => c.time,
            HitObjectKind::Slider(s) => s.time,
            HitObjectKind::Spinner(s) => s.time,
        }
    }

    pub fn end_time(&self) -> f64 {
        match &self.kind {
            HitObjectKind::Circle(c) => c.time,
            HitObjectKind::Slider(s) => s.end_time(),
            HitObjectKind::Spinner(s) => s.end_time,
        }
    }

    pub const fn is_circle(&self) -> bool {
        matches!(self.kind, HitObjectKind::Circle(_))
    }

    pub const fn is_slider(&self) -> bool {
        matches!(self.kind, HitObjectKind::Slider(_))
    }

    pub const fn is_spinner(&self) -> bool {
        matches!(self.kind, HitObjectKind::Spinner(_))
    }
}

/// Low-3-bit variant dispatch tags (§4.C); the remaining bits carry
/// new-combo (bit 2) and combo-colour-skip (bits 4-6), which survive
/// parse/render purely for round-trip fidelity.
const TYPE_CIRCLE_BIT: u8 = 1 << 0;
const TYPE_SLIDER_BIT: u8 = 1 << 1;
const TYPE_NEW_COMBO_BIT: u8 = 1 << 2;
const TYPE_SPINNER_BIT: u8 = 1 << 3;
const TYPE_COLOUR_SKIP_SHIFT: u8 = 4;

/// Rebuilds the full `type` byte from a variant's dispatch bit and its
/// new-combo/colour-skip bits.
pub const fn encode_type_byte(variant_bit: u8, new_combo: bool, combo_colour_skip: u8) -> u8 {
    variant_bit
        | ((new_combo as u8) * TYPE_NEW_COMBO_BIT)
        | ((combo_colour_skip & 0x7) << TYPE_COLOUR_SKIP_SHIFT)
}

/// Splits a raw `type` byte into `(new_combo, combo_colour_skip)`.
pub const fn decode_type_flags(type_byte: u8) -> (bool, u8) {
    (
        type_byte & TYPE_NEW_COMBO_BIT != 0,
        (type_byte >> TYPE_COLOUR_SKIP_SHIFT) & 0x7,
    )
}

impl fmt::Display for HitObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::util::format_compact as fc;

        match &self.kind {
            HitObjectKind::Circle(c) => write!(
                f,
                "{},{},{},{},{},{}",
                fc(c.pos.0),
                fc(c.pos.1),
                fc(c.time),
                encode_type_byte(TYPE_CIRCLE_BIT, c.new_combo, c.combo_colour_skip),
                c.hit_sound,
                c.hit_sample,
            ),
            HitObjectKind::Slider(s) => {
                let curves = s
                    .curves
                    .iter()
                    .map(render_curve)
                    .collect::<Vec<_>>()
                    .join("");

                write!(
                    f,
                    "{},{},{},{},{},{},{},{},{}",
                    fc(s.pos.0),
                    fc(s.pos.1),
                    fc(s.time),
                    encode_type_byte(TYPE_SLIDER_BIT, s.new_combo, s.combo_colour_skip),
                    s.hit_sound,
                    curves,
                    s.slides,
                    fc(s.pixel_length),
                    s.hit_sample,
                )
            }
            HitObjectKind::Spinner(s) => write!(
                f,
                "{},{},{},{},{},{},{}",
                fc(s.pos.0),
                fc(s.pos.1),
                fc(s.time),
                encode_type_byte(TYPE_SPINNER_BIT, s.new_combo, s.combo_colour_skip),
                s.hit_sound,
                fc(s.end_time),
                s.hit_sample,
            ),
        }
    }
}

fn render_curve(curve: &SliderCurve) -> String {
    let mut out = String::new();
    out.push(curve.kind.letter());

    for (x, y) in &curve.points {
        out.push('|');
        out.push_str(&crate::util::format_compact(*x));
        out.push(':');
        out.push_str(&crate::util::format_compact(*y));
    }

    out
}
