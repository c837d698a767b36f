//! Band (competition category) vocabulary and the eligibility rule.
//!
//! Sex and color are stored as TEXT in Postgres (guarded by CHECK
//! constraints); the enums here are the typed view of those columns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Band sex value that admits every member.
pub const BAND_SEX_ALL: &str = "ALL";

/// First and last day of the tournament.
pub const FIRST_DAY: i16 = 1;
pub const LAST_DAY: i16 = 2;

// ---------------------------------------------------------------------------
// Sex
// ---------------------------------------------------------------------------

/// A member's sex as recorded in the player registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }
}

impl FromStr for Sex {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Sex::Male),
            "F" => Ok(Sex::Female),
            other => Err(CoreError::Validation(format!(
                "sex must be M or F, got '{other}'"
            ))),
        }
    }
}

/// Which members a band admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BandSex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "ALL")]
    All,
}

impl BandSex {
    pub fn as_str(self) -> &'static str {
        match self {
            BandSex::Male => "M",
            BandSex::Female => "F",
            BandSex::All => BAND_SEX_ALL,
        }
    }

    /// Whether a member of the given sex may enter a band with this setting.
    pub fn admits(self, sex: Sex) -> bool {
        match self {
            BandSex::All => true,
            BandSex::Male => sex == Sex::Male,
            BandSex::Female => sex == Sex::Female,
        }
    }
}

impl FromStr for BandSex {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(BandSex::Male),
            "F" => Ok(BandSex::Female),
            BAND_SEX_ALL => Ok(BandSex::All),
            other => Err(CoreError::Validation(format!(
                "band sex must be M, F or ALL, got '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// Band color. A member may hold at most one band per color on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandColor {
    Pink,
    Blue,
    Green,
    Brown,
}

impl BandColor {
    pub fn as_str(self) -> &'static str {
        match self {
            BandColor::Pink => "pink",
            BandColor::Blue => "blue",
            BandColor::Green => "green",
            BandColor::Brown => "brown",
        }
    }
}

impl fmt::Display for BandColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BandColor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pink" => Ok(BandColor::Pink),
            "blue" => Ok(BandColor::Blue),
            "green" => Ok(BandColor::Green),
            "brown" => Ok(BandColor::Brown),
            other => Err(CoreError::Validation(format!(
                "band color must be pink, blue, green or brown, got '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Scheduling slot
// ---------------------------------------------------------------------------

/// The (day, color) pair the entry limits are evaluated over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BandSlot {
    pub day: i16,
    pub color: BandColor,
}

/// Validate that a band day falls inside the tournament.
pub fn validate_day(day: i16) -> Result<(), CoreError> {
    if !(FIRST_DAY..=LAST_DAY).contains(&day) {
        return Err(CoreError::Validation(format!(
            "day must be between {FIRST_DAY} and {LAST_DAY}, got {day}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Eligibility
// ---------------------------------------------------------------------------

/// Whether a member may enter a band.
///
/// `max_points` is the band's skill ceiling: a member qualifies when their
/// rating is at or below it and the band admits their sex.
pub fn is_eligible(band_sex: BandSex, band_max_points: f64, sex: Sex, points: f64) -> bool {
    band_sex.admits(sex) && band_max_points >= points
}
