use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, Tokio1Executor};

use crate::config::MailerConfig;
use crate::domain::errors::{DomainError, DomainResult};

/// SMTP transport for outbound email
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl Mailer {
    /// Builds the SMTP transport from config
    ///
    /// Returns `Ok(None)` when no mailer host is configured. The connection
    /// upgrades with STARTTLS and authenticates when a username is set.
    pub fn from_config(config: &MailerConfig) -> DomainResult<Option<Self>> {
        let Some(host) = config.host.as_deref() else {
            tracing::info!("MAILER_HOST not set, outbound email disabled");
            return Ok(None);
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| DomainError::Internal(format!("Failed to build mailer: {}", e)))?
            .port(config.port);

        if let Some(username) = &config.username {
            builder = builder.credentials(Credentials::new(
                username.clone(),
                config.password.clone().unwrap_or_default(),
            ));
        }

        let from = config
            .from
            .clone()
            .or_else(|| config.username.clone())
            .ok_or_else(|| {
                DomainError::Internal("MAILER_FROM or MAILER_USERNAME must be set".to_string())
            })?;

        Ok(Some(Self {
            transport: builder.build(),
            from,
        }))
    }

    /// Sender address used for every message
    pub fn from_address(&self) -> &str {
        &self.from
    }

    /// Opens a connection to the SMTP server and closes it again
    pub async fn verify(&self) -> DomainResult<()> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(DomainError::Internal(
                "SMTP server did not accept the connection".to_string(),
            )),
            Err(e) => Err(DomainError::Internal(format!(
                "Failed to reach SMTP server: {}",
                e
            ))),
        }
    }
}
