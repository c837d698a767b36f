//! Email side effects of the login and confirmation flows.
//!
//! Nothing here runs inside a reservation transaction. Login codes are sent
//! inline because the caller cannot proceed without one; the confirmation
//! notice is spawned after commit and its failures are only logged.

pub mod email;

use tournoi_db::models::member::Member;
use tournoi_db::repositories::MemberRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Mail a one-time login code.
///
/// Without SMTP configuration the code is not delivered and a warning is
/// logged; the stored code stays valid until it expires.
pub async fn send_login_code(state: &AppState, to_email: &str, code: &str) -> AppResult<()> {
    let Some(mailer) = &state.mailer else {
        tracing::warn!(to = to_email, "SMTP not configured, login code not delivered");
        return Ok(());
    };

    let (subject, html) = email::otp_message(code, state.config.otp_expiry_mins);
    mailer.send(to_email, &subject, html).await.map_err(|e| {
        tracing::error!(to = to_email, error = %e, "Failed to send login code");
        AppError::InternalError(format!("Failed to send login code: {e}"))
    })
}

/// Notify the owning account after a member's first confirmation.
///
/// `notified_at` is claimed with a conditional update before sending, so
/// at most one mail goes out even under concurrent confirmations.
pub fn spawn_first_confirmation_notice(state: &AppState, member: Member) {
    let Some(mailer) = state.mailer.clone() else {
        tracing::debug!(member_id = member.id, "SMTP not configured, skipping confirmation notice");
        return;
    };
    if member.notified_at.is_some() {
        return;
    }

    let pool = state.pool.clone();
    let external_url = state.config.external_url.clone();

    tokio::spawn(async move {
        let claimed = match MemberRepo::mark_notified(&pool, member.id).await {
            Ok(claimed) => claimed,
            Err(e) => {
                tracing::warn!(member_id = member.id, error = %e, "Failed to mark member notified");
                return;
            }
        };
        if !claimed {
            return;
        }

        let to_email = match MemberRepo::owner_email(&pool, member.id).await {
            Ok(Some(email)) => email,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(member_id = member.id, error = %e, "Failed to load owner email");
                return;
            }
        };

        let (subject, html) =
            email::confirmation_message(&member.first_name, &member.last_name, &external_url);
        if let Err(e) = mailer.send(&to_email, &subject, html).await {
            tracing::warn!(member_id = member.id, error = %e, "Failed to send confirmation notice");
        }
    });
}
