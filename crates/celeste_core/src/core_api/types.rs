use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::label::display_label;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterField {
    Name,
    Time,
    TotalDeaths,
    TotalStrawberries,
    TotalGoldenStrawberries,
    TotalJumps,
    TotalWallJumps,
    TotalDashes,
}

impl CharacterField {
    pub const ALL: [CharacterField; 8] = [
        Self::Name,
        Self::Time,
        Self::TotalDeaths,
        Self::TotalStrawberries,
        Self::TotalGoldenStrawberries,
        Self::TotalJumps,
        Self::TotalWallJumps,
        Self::TotalDashes,
    ];

    /// Element name in the save document.
    pub fn tag(&self) -> &'static str {
        match *self {
            Self::Name => "Name",
            Self::Time => "Time",
            Self::TotalDeaths => "TotalDeaths",
            Self::TotalStrawberries => "TotalStrawberries",
            Self::TotalGoldenStrawberries => "TotalGoldenStrawberries",
            Self::TotalJumps => "TotalJumps",
            Self::TotalWallJumps => "TotalWallJumps",
            Self::TotalDashes => "TotalDashes",
        }
    }

    /// Machine-friendly key used by `key=value` and selected JSON output.
    pub fn key(&self) -> &'static str {
        match *self {
            Self::Name => "name",
            Self::Time => "time",
            Self::TotalDeaths => "total_deaths",
            Self::TotalStrawberries => "total_strawberries",
            Self::TotalGoldenStrawberries => "total_golden_strawberries",
            Self::TotalJumps => "total_jumps",
            Self::TotalWallJumps => "total_wall_jumps",
            Self::TotalDashes => "total_dashes",
        }
    }

    pub fn label(&self) -> String {
        display_label(self.tag())
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// The save's global counters, keyed by display label.
///
/// Values are display text. Only `Time` has been reformatted; every other
/// counter is the raw element text even when it looks numeric.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>")]
pub struct CharacterStats {
    values: [String; 8],
}

impl CharacterStats {
    pub fn value(&self, field: CharacterField) -> &str {
        &self.values[field.index()]
    }

    /// Look up a value by its display label, e.g. `"Total Deaths"`.
    pub fn get(&self, label: &str) -> Option<&str> {
        CharacterField::ALL
            .iter()
            .find(|field| field.label() == label)
            .map(|field| self.value(*field))
    }

    /// Label/value pairs in canonical order.
    pub fn entries(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        CharacterField::ALL
            .iter()
            .map(|field| (field.label(), self.value(*field)))
    }

    pub(crate) fn set(&mut self, field: CharacterField, value: String) {
        self.values[field.index()] = value;
    }
}

impl Serialize for CharacterStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CharacterField::ALL.len()))?;
        for (label, value) in self.entries() {
            map.serialize_entry(&label, value)?;
        }
        map.end()
    }
}

impl TryFrom<BTreeMap<String, String>> for CharacterStats {
    type Error = String;

    fn try_from(mut raw: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        let mut stats = Self::default();
        for field in CharacterField::ALL {
            if let Some(value) = raw.remove(&field.label()) {
                stats.set(field, value);
            }
        }
        match raw.keys().next() {
            Some(unknown) => Err(format!("unknown character stat label '{unknown}'")),
            None => Ok(stats),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
    C,
}

impl Side {
    pub const ALL: [Side; 3] = [Self::A, Self::B, Self::C];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }

    pub fn title(&self) -> &'static str {
        match *self {
            Self::A => "A Side",
            Self::B => "B Side",
            Self::C => "C Side",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side's completion attributes. Missing attributes are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SideStats {
    pub strawberries: String,
    pub completed: String,
    pub deaths: String,
    pub time: String,
    pub best_time: String,
    pub best_dashes: String,
    pub best_deaths: String,
    pub heart_gem: String,
}

impl SideStats {
    pub fn is_completed(&self) -> bool {
        self.completed == "true"
    }

    pub fn has_heart_gem(&self) -> bool {
        self.heart_gem == "true"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChapterStats {
    pub id: i32,
    pub display_name: String,
    pub cassette: String,
    pub a: SideStats,
    pub b: SideStats,
    pub c: SideStats,
}

impl ChapterStats {
    pub fn side(&self, side: Side) -> &SideStats {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
            Side::C => &self.c,
        }
    }

    pub fn sides(&self) -> [(Side, &SideStats); 3] {
        [(Side::A, &self.a), (Side::B, &self.b), (Side::C, &self.c)]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatsSnapshot {
    pub character: CharacterStats,
    pub chapters: Vec<ChapterStats>,
}

impl StatsSnapshot {
    /// First chapter carrying `id`, in document order.
    pub fn chapter(&self, id: i32) -> Option<&ChapterStats> {
        self.chapters.iter().find(|chapter| chapter.id == id)
    }
}
