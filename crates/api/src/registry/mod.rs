//! Player registry lookups.
//!
//! A member's sex, points, category and club are never typed in by the
//! account owner; they come from the federation registry keyed by permit
//! id. Handlers reach the registry through [`PlayerRegistry`] so tests can
//! swap in a canned implementation.

pub mod fftt;

use async_trait::async_trait;
use serde::Serialize;
use tournoi_core::bands::Sex;
use tournoi_db::models::member::CreateMember;

pub use fftt::FfttRegistry;

/// A player as known to the registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub permit_id: String,
    pub first_name: String,
    pub last_name: String,
    pub sex: Sex,
    pub points: f64,
    pub category: Option<String>,
    pub club_name: Option<String>,
    pub permit_type: Option<String>,
}

impl Player {
    /// Whether the player currently belongs to a club.
    pub fn has_club(&self) -> bool {
        self.club_name.as_deref().is_some_and(|c| !c.trim().is_empty())
    }
}

impl From<Player> for CreateMember {
    fn from(player: Player) -> Self {
        CreateMember {
            permit_id: player.permit_id,
            first_name: player.first_name,
            last_name: player.last_name,
            sex: player.sex,
            points: player.points,
            category: player.category,
            club_name: player.club_name,
            permit_type: player.permit_type,
        }
    }
}

/// Errors from a registry lookup.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No player carries this permit id.
    #[error("Player {0} not found in the registry")]
    NotFound(String),

    /// The HTTP request itself failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The registry answered with a non-2xx status code.
    #[error("Registry returned HTTP {0}")]
    HttpStatus(u16),

    /// The registry answered with a body that could not be read.
    #[error("Unreadable registry response: {0}")]
    Decode(String),
}

/// Source of player records.
#[async_trait]
pub trait PlayerRegistry: Send + Sync {
    /// Fetch the player holding `permit_id`.
    async fn find_player(&self, permit_id: &str) -> Result<Player, RegistryError>;

    /// Search players by name. Either name may be empty. Results are in
    /// registry order, unfiltered.
    async fn search_players(
        &self,
        last_name: &str,
        first_name: &str,
    ) -> Result<Vec<Player>, RegistryError>;
}
