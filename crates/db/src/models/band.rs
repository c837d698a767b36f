//! Band (competition category) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tournoi_core::bands::{is_eligible, BandColor, BandSex, BandSlot, Sex};
use tournoi_core::error::CoreError;
use tournoi_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `bands` table.
///
/// `sex` and `color` hold the stored spelling (`"ALL"`, `"pink"`, ...);
/// use [`Band::band_sex`] and [`Band::slot`] for the typed view.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Band {
    pub id: DbId,
    pub name: String,
    pub day: i16,
    pub color: String,
    pub sex: String,
    pub max_points: f64,
    pub max_entries: i32,
    pub price: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Band {
    pub fn band_sex(&self) -> Result<BandSex, CoreError> {
        self.sex.parse()
    }

    /// Whether a member of `sex` rated `points` may enter this band.
    pub fn admits(&self, sex: Sex, points: f64) -> Result<bool, CoreError> {
        Ok(is_eligible(self.band_sex()?, self.max_points, sex, points))
    }

    /// The (day, color) pair used by the entry limits.
    pub fn slot(&self) -> Result<BandSlot, CoreError> {
        Ok(BandSlot {
            day: self.day,
            color: self.color.parse::<BandColor>()?,
        })
    }
}

/// DTO for creating a new band.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBand {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 1, max = 2))]
    pub day: i16,
    pub color: BandColor,
    pub sex: BandSex,
    #[validate(range(exclusive_min = 0.0))]
    pub max_points: f64,
    #[validate(range(min = 0))]
    pub max_entries: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub price: i32,
}
