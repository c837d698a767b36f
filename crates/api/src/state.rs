use std::sync::Arc;

use crate::config::ServerConfig;
use crate::notifications::email::Mailer;
use crate::registry::PlayerRegistry;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and the rest sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: tournoi_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// SMTP mailer; `None` when `SMTP_HOST` is unset.
    pub mailer: Option<Arc<Mailer>>,
    /// Player registry that member creation and player search consult.
    pub registry: Arc<dyn PlayerRegistry>,
}
