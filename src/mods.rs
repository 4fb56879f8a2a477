use std::str::FromStr;

/// A single gameplay modifier (§4.D).
///
/// Stored canonical-cased; input is accepted case-insensitively via
/// [`Mod::from_str`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mod {
    NoMod,
    Easy,
    HardRock,
    SuddenDeath,
    DoubleTime,
    NightCore,
    HalfTime,
    Hidden,
    Flashlight,
    Relax,
    AutoPlay,
    SpunOut,
    AutoPilot,
    TouchDevice,
}

impl Mod {
    pub const fn acronym(self) -> &'static str {
        match self {
            Self::NoMod => "NM",
            Self::Easy => "EZ",
            Self::HardRock => "HR",
            Self::SuddenDeath => "SD",
            Self::DoubleTime => "DT",
            Self::NightCore => "NC",
            Self::HalfTime => "HT",
            Self::Hidden => "HD",
            Self::Flashlight => "FL",
            Self::Relax => "RX",
            Self::AutoPlay => "AT",
            Self::SpunOut => "SO",
            Self::AutoPilot => "AP",
            Self::TouchDevice => "TD",
        }
    }
}

/// Error returned by [`Mod::from_str`] for an unrecognized name or acronym.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownMod(pub String);

impl std::fmt::Display for UnknownMod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown mod: {}", self.0)
    }
}

impl std::error::Error for UnknownMod {}

impl FromStr for Mod {
    type Err = UnknownMod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NM" | "NOMOD" => Ok(Self::NoMod),
            "EZ" | "EASY" => Ok(Self::Easy),
            "HR" | "HARDROCK" => Ok(Self::HardRock),
            "SD" | "SUDDENDEATH" => Ok(Self::SuddenDeath),
            "DT" | "DOUBLETIME" => Ok(Self::DoubleTime),
            "NC" | "NIGHTCORE" => Ok(Self::NightCore),
            "HT" | "HALFTIME" => Ok(Self::HalfTime),
            "HD" | "HIDDEN" => Ok(Self::Hidden),
            "FL" | "FLASHLIGHT" => Ok(Self::Flashlight),
            "RX" | "RELAX" => Ok(Self::Relax),
            "AT" | "AUTOPLAY" => Ok(Self::AutoPlay),
            "SO" | "SPUNOUT" => Ok(Self::SpunOut),
            "AP" | "AUTOPILOT" => Ok(Self::AutoPilot),
            "TD" | "TOUCHDEVICE" => Ok(Self::TouchDevice),
            other => Err(UnknownMod(other.to_owned())),
        }
    }
}

/// A normalized set of [`Mod`]s, grounded on the teacher's `GameMods`
/// (query helpers named after the mod, e.g. `hd()`, `dt()`) but reduced to
/// the fixed mod list this crate supports.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameMods {
    mods: Vec<Mod>,
}

impl GameMods {
    pub fn new(mods: impl IntoIterator<Item = Mod>) -> Self {
        let mut mods: Vec<Mod> = mods.into_iter().filter(|m| *m != Mod::NoMod).collect();
        mods.sort_by_key(|m| m.acronym());
        mods.dedup();

        Self { mods }
    }

    pub fn parse(s: &str) -> Result<Self, UnknownMod> {
        let mods = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(Mod::from_str)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(mods))
    }

    pub fn contains(&self, m: Mod) -> bool {
        self.mods.contains(&m)
    }

    pub fn iter(&self) -> impl Iterator<Item = Mod> + '_ {
        self.mods.iter().copied()
    }

    pub fn ez(&self) -> bool {
        self.contains(Mod::Easy)
    }

    pub fn hr(&self) -> bool {
        self.contains(Mod::HardRock)
    }

    pub fn dt(&self) -> bool {
        self.contains(Mod::DoubleTime) || self.contains(Mod::NightCore)
    }

    pub fn ht(&self) -> bool {
        self.contains(Mod::HalfTime)
    }

    pub fn hd(&self) -> bool {
        self.contains(Mod::Hidden)
    }

    pub fn fl(&self) -> bool {
        self.contains(Mod::Flashlight)
    }

    pub fn rx(&self) -> bool {
        self.contains(Mod::Relax)
    }

    pub fn ap(&self) -> bool {
        self.contains(Mod::AutoPilot)
    }

    pub fn td(&self) -> bool {
        self.contains(Mod::TouchDevice)
    }

    /// Combined clock-rate multiplier (§4.D).
    pub fn clock_rate(&self) -> f64 {
        let mut rate = 1.0;

        if self.dt() {
            rate *= 1.5;
        }

        if self.ht() {
            rate *= 0.75;
        }

        rate
    }

    /// Applies `HardRock`/`Easy` stat adjustments to a single difficulty
    /// stat, capped at `10.0` (§4.D).
    pub fn adjust_stat(&self, value: f64, hr_factor: f64) -> f64 {
        if self.hr() {
            (value * hr_factor).min(10.0)
        } else if self.ez() {
            value * 0.5
        } else {
            value
        }
    }
}
