use std::fmt;

/// The `[General]` section: metadata that doesn't influence difficulty but
/// is required to round-trip a beatmap faithfully.
#[derive(Clone, Debug, PartialEq)]
pub struct General {
    pub audio_filename: String,
    pub preview_time: i32,
    pub stack_leniency: f64,
    pub mode: u8,
}

impl General {
    pub const DEFAULT_STACK_LENIENCY: f64 = 0.7;
}

impl Default for General {
    fn default() -> Self {
        Self {
            audio_filename: String::new(),
            preview_time: -1,
            stack_leniency: Self::DEFAULT_STACK_LENIENCY,
            mode: 0,
        }
    }
}

impl fmt::Display for General {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[General]")?;
        writeln!(f, "AudioFilename: {}", self.audio_filename)?;
        writeln!(f, "PreviewTime: {}", self.preview_time)?;
        writeln!(f, "StackLeniency: {}", crate::util::format_compact(self.stack_leniency))?;
        writeln!(f, "Mode: {}", self.mode)
    }
}
