use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::Error;
use crate::Result;

/// A named severity threshold.
///
/// Levels compare, order and hash by their numeric value only, so `Level::ERROR == Level::SEVERE`.
#[derive(Debug, Clone, Copy)]
pub struct Level {
    name: &'static str,
    value: i32,
}

impl Level {
    pub const OFF: Level = Level::custom("OFF", i32::MAX);
    pub const FATAL: Level = Level::custom("FATAL", 1100);
    pub const SEVERE: Level = Level::custom("SEVERE", 1000);
    pub const ERROR: Level = Level::custom("ERROR", 1000);
    pub const WARNING: Level = Level::custom("WARNING", 900);
    pub const WARN: Level = Level::custom("WARN", 900);
    pub const INFO: Level = Level::custom("INFO", 800);
    pub const CONFIG: Level = Level::custom("CONFIG", 700);
    pub const DEBUG: Level = Level::custom("DEBUG", 500);
    pub const FINE: Level = Level::custom("FINE", 500);
    pub const FINER: Level = Level::custom("FINER", 400);
    pub const TRACE: Level = Level::custom("TRACE", 400);
    pub const FINEST: Level = Level::custom("FINEST", 300);
    pub const ALL: Level = Level::custom("ALL", i32::MIN);

    const KNOWN: [Level; 14] = [
        Level::OFF,
        Level::FATAL,
        Level::SEVERE,
        Level::ERROR,
        Level::WARNING,
        Level::WARN,
        Level::INFO,
        Level::CONFIG,
        Level::DEBUG,
        Level::FINE,
        Level::FINER,
        Level::TRACE,
        Level::FINEST,
        Level::ALL,
    ];

    pub const fn custom(
        name: &'static str,
        value: i32,
    ) -> Self {
        Self { name, value }
    }

    /// Resolve a numeric value to the first well-known level carrying it.
    pub fn from_value(value: i32) -> Self {
        Self::KNOWN
            .iter()
            .copied()
            .find(|l| l.value == value)
            .unwrap_or(Level::custom("CUSTOM", value))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value(&self) -> i32 {
        self.value
    }
}

impl PartialEq for Level {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.value == other.value
    }
}

impl Eq for Level {}

impl Hash for Level {
    fn hash<H: Hasher>(
        &self,
        state: &mut H,
    ) {
        self.value.hash(state);
    }
}

impl PartialOrd for Level {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl fmt::Display for Level {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Some(level) = Self::KNOWN
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(trimmed))
        {
            return Ok(*level);
        }
        trimmed
            .parse::<i32>()
            .map(Level::from_value)
            .map_err(|_| Error::InvalidArgument(format!("unknown level name: {s:?}")))
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Value(i32),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Value(v) => Ok(Level::from_value(v)),
            Raw::Name(n) => n.parse().map_err(serde::de::Error::custom),
        }
    }
}

impl Serialize for Level {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let well_known = Self::KNOWN
            .iter()
            .any(|l| l.name == self.name && l.value == self.value);
        if well_known {
            serializer.serialize_str(self.name)
        } else {
            serializer.serialize_i32(self.value)
        }
    }
}
