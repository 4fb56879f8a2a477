use std::{error::Error as StdError, fmt, io};

/// `Result<_, ParseError>`.
pub type ParseResult<T> = Result<T, ParseError>;

/// Anything that can go wrong while parsing a beatmap (§4.C).
#[derive(Debug)]
pub enum ParseError {
    /// A `[Name]` header outside General/Difficulty/TimingPoints/HitObjects.
    UnknownSection(String),
    /// A line inside a known section didn't match that section's grammar.
    MalformedLine { section: &'static str, line: String },
    /// One of General/Difficulty/TimingPoints/HitObjects never appeared.
    MissingSection(&'static str),
    /// `Mode` was present and non-zero.
    UnsupportedMode(u8),
    /// A numeric field failed to parse.
    BadNumeric,
    /// Reading the input (e.g. from a path) failed.
    Io(io::Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSection(name) => write!(f, "unknown section `[{name}]`"),
            Self::MalformedLine { section, line } => {
                write!(f, "malformed line in [{section}]: `{line}`")
            }
            Self::MissingSection(name) => write!(f, "missing required section `[{name}]`"),
            Self::UnsupportedMode(mode) => write!(f, "unsupported game mode `{mode}`"),
            Self::BadNumeric => f.write_str("invalid numeric field"),
            Self::Io(_) => f.write_str("IO error"),
        }
    }
}

impl StdError for ParseError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(other: io::Error) -> Self {
        Self::Io(other)
    }
}
