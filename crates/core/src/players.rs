//! Rules for player-registry lookups.
//!
//! A permit id ends up in the registry URL path, so it is restricted to
//! ASCII letters and digits before any request is made.

use crate::error::CoreError;

/// Shortest permit id accepted.
pub const MIN_PERMIT_LEN: usize = 2;

/// Longest permit id accepted.
pub const MAX_PERMIT_LEN: usize = 32;

/// Most players a name search returns.
pub const MAX_SEARCH_RESULTS: usize = 10;

/// Trim a permit id and check its length and alphabet.
pub fn normalize_permit_id(raw: &str) -> Result<String, CoreError> {
    let permit_id = raw.trim();
    let len = permit_id.chars().count();
    if !(MIN_PERMIT_LEN..=MAX_PERMIT_LEN).contains(&len) {
        return Err(CoreError::Validation(format!(
            "permit_id must be {MIN_PERMIT_LEN} to {MAX_PERMIT_LEN} characters"
        )));
    }
    if !permit_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CoreError::Validation(
            "permit_id must contain only letters and digits".to_string(),
        ));
    }
    Ok(permit_id.to_string())
}

/// Tidy a name coming from, or going to, the registry: surrounding blanks
/// are dropped and typographic apostrophes become plain ones.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().replace('\u{2019}', "'")
}

/// Keep the first [`MAX_SEARCH_RESULTS`] players that are `listed`.
///
/// The registry returns retired players without a club; callers pass a
/// predicate rejecting them.
pub fn shortlist<T>(players: impl IntoIterator<Item = T>, listed: impl Fn(&T) -> bool) -> Vec<T> {
    players
        .into_iter()
        .filter(|p| listed(p))
        .take(MAX_SEARCH_RESULTS)
        .collect()
}
