//! Outgoing email over SMTP.
//!
//! [`Mailer`] wraps the `lettre` async SMTP transport. If `SMTP_HOST` is not
//! set, [`EmailConfig::from_env`] returns `None` and no mailer is built; the
//! callers then log and skip.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(#[from] lettre::error::Error),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "inscriptions@tournoi.local";

/// Configuration for the SMTP mailer.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set.
    ///
    /// | Variable        | Required | Default                       |
    /// |-----------------|----------|-------------------------------|
    /// | `SMTP_HOST`     | yes      | --                            |
    /// | `SMTP_PORT`     | no       | `587`                         |
    /// | `SMTP_FROM`     | no       | `inscriptions@tournoi.local`  |
    /// | `SMTP_USER`     | no       | --                            |
    /// | `SMTP_PASSWORD` | no       | --                            |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// Message bodies
// ---------------------------------------------------------------------------

/// Subject and HTML body of the one-time code mail.
pub fn otp_message(code: &str, expiry_mins: i64) -> (String, String) {
    let subject = format!("Votre code de connexion : {code}");
    let body = format!(
        "<p>Bonjour,</p>\
         <p>Votre code de connexion est <strong>{code}</strong>.</p>\
         <p>Il expire dans {expiry_mins} minutes.</p>"
    );
    (subject, body)
}

/// Subject and HTML body of the first-confirmation mail.
pub fn confirmation_message(first_name: &str, last_name: &str, external_url: &str) -> (String, String) {
    let subject = "Inscription au tournoi confirmée".to_string();
    let body = format!(
        "<p>Bonjour,</p>\
         <p>L'inscription de <strong>{first_name} {last_name}</strong> est enregistrée.</p>\
         <p>Vous pouvez consulter et modifier ses tableaux sur \
         <a href=\"{external_url}\">{external_url}</a>.</p>"
    );
    (subject, body)
}

// ---------------------------------------------------------------------------
// Mailer
// ---------------------------------------------------------------------------

/// Sends HTML emails through one pooled SMTP transport.
pub struct Mailer {
    from_address: String,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl Mailer {
    /// Build the transport. Does not connect until the first send.
    pub fn new(config: &EmailConfig) -> Result<Self, EmailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            from_address: config.from_address.clone(),
            transport: builder.build(),
        })
    }

    /// Send one HTML email.
    pub async fn send(&self, to_email: &str, subject: &str, html: String) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(self.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html)?;

        self.transport.send(email).await?;

        tracing::info!(to = to_email, subject, "Email sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
