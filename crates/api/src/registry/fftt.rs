//! HTTP client for the FFTT player registry.
//!
//! Single-player lookups answer JSON. Name searches go through the
//! federation's XML listing proxy, which answers ISO-8859-1.

use std::borrow::Cow;
use std::time::Duration;

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;
use tournoi_core::bands::Sex;
use tournoi_core::players::normalize_name;

use super::{Player, PlayerRegistry, RegistryError};

/// HTTP request timeout for a single registry call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Registry client bound to one base URL, e.g. `https://fftt.dafunker.com/v1`.
pub struct FfttRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl FfttRegistry {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PlayerRegistry for FfttRegistry {
    async fn find_player(&self, permit_id: &str) -> Result<Player, RegistryError> {
        let response = self
            .client
            .get(format!("{}/joueur/{permit_id}", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(permit_id.to_string()));
        }
        if !status.is_success() {
            return Err(RegistryError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        parse_player(&body, permit_id)
    }

    async fn search_players(
        &self,
        last_name: &str,
        first_name: &str,
    ) -> Result<Vec<Player>, RegistryError> {
        let response = self
            .client
            .get(format!("{}/proxy/xml_liste_joueur_o.php", self.base_url))
            .query(&[("nom", last_name), ("prenom", first_name)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        parse_listing(&decode_text(&body))
    }
}

// ---------------------------------------------------------------------------
// Single player (JSON)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct PlayerRecord {
    #[serde(rename = "nom", default)]
    last_name: String,
    #[serde(rename = "prenom", default)]
    first_name: String,
    #[serde(rename = "licence", default)]
    permit_id: String,
    #[serde(rename = "sexe", default)]
    sex: String,
    #[serde(rename = "point", default)]
    points: Option<f64>,
    #[serde(rename = "cat", default)]
    category: String,
    #[serde(rename = "nomclub", default)]
    club_name: String,
    #[serde(rename = "type", default)]
    permit_type: String,
}

/// Read a lookup response. The registry answers unknown permits with an
/// empty record rather than a 404.
fn parse_player(body: &[u8], permit_id: &str) -> Result<Player, RegistryError> {
    let record: PlayerRecord =
        serde_json::from_slice(body).map_err(|e| RegistryError::Decode(e.to_string()))?;

    if record.last_name.trim().is_empty() && record.first_name.trim().is_empty() {
        return Err(RegistryError::NotFound(permit_id.to_string()));
    }

    let sex: Sex = record
        .sex
        .trim()
        .parse()
        .map_err(|e| RegistryError::Decode(format!("player {permit_id}: {e}")))?;

    let permit_id = match record.permit_id.trim() {
        "" => permit_id.to_string(),
        listed => listed.to_string(),
    };

    Ok(Player {
        permit_id,
        first_name: normalize_name(&record.first_name),
        last_name: normalize_name(&record.last_name),
        sex,
        points: record.points.unwrap_or(0.0),
        category: non_empty(record.category),
        club_name: non_empty(record.club_name),
        permit_type: non_empty(record.permit_type),
    })
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Name search (XML)
// ---------------------------------------------------------------------------

/// Decode a response body as UTF-8, falling back to ISO-8859-1 whose bytes
/// map one-to-one onto the first 256 code points.
fn decode_text(body: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(body) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(body.iter().map(|&b| char::from(b)).collect()),
    }
}

#[derive(Debug, Default)]
struct ListingRow {
    last_name: String,
    first_name: String,
    club_name: String,
    points: String,
    permit_id: String,
    sex: String,
}

impl ListingRow {
    fn set(&mut self, field: &[u8], value: &str) {
        let slot = match field {
            b"nom" => &mut self.last_name,
            b"prenom" => &mut self.first_name,
            b"nclub" => &mut self.club_name,
            b"points" => &mut self.points,
            b"licence" => &mut self.permit_id,
            b"sexe" => &mut self.sex,
            _ => return,
        };
        slot.push_str(value);
    }

    /// Rows with an unreadable sex or points value are dropped.
    fn into_player(self) -> Option<Player> {
        let sex: Sex = match self.sex.trim().parse() {
            Ok(sex) => sex,
            Err(_) => {
                tracing::debug!(permit_id = %self.permit_id, sex = %self.sex, "Skipping listing row");
                return None;
            }
        };
        let points = match self.points.trim() {
            "" => 0.0,
            raw => match raw.parse::<f64>() {
                Ok(points) => points,
                Err(_) => {
                    tracing::debug!(permit_id = %self.permit_id, points = raw, "Skipping listing row");
                    return None;
                }
            },
        };
        Some(Player {
            permit_id: self.permit_id.trim().to_string(),
            first_name: normalize_name(&self.first_name),
            last_name: normalize_name(&self.last_name),
            sex,
            points,
            category: None,
            club_name: non_empty(self.club_name),
            permit_type: None,
        })
    }
}

/// Read a `<liste><joueur>...</joueur></liste>` document.
fn parse_listing(xml: &str) -> Result<Vec<Player>, RegistryError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut players = Vec::new();
    let mut row: Option<ListingRow> = None;
    let mut field: Option<Vec<u8>> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| RegistryError::Decode(e.to_string()))?;
        match event {
            Event::Start(tag) => match tag.name().as_ref() {
                b"joueur" => row = Some(ListingRow::default()),
                name => field = Some(name.to_vec()),
            },
            Event::Text(text) => {
                if let (Some(row), Some(name)) = (row.as_mut(), field.as_deref()) {
                    let value = text
                        .unescape()
                        .map_err(|e| RegistryError::Decode(e.to_string()))?;
                    row.set(name, &value);
                }
            }
            Event::End(tag) => {
                if tag.name().as_ref() == b"joueur" {
                    if let Some(player) = row.take().and_then(ListingRow::into_player) {
                        players.push(player);
                    }
                }
                field = None;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(players)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
