// ==================== MAIL (CONVITES) ====================
// Adaptador de notificação por email via SMTP (SMTPS :465, como a conta
// Gmail usada originalmente). Sem credenciais configuradas o mailer fica
// desabilitado e os envios são apenas logados - ambiente de dev funciona
// sem SMTP.

use crate::utils::error::AppError;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::env;

#[derive(Clone)]
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Option<Mailbox>,
}

impl Mailer {
    pub fn from_env() -> Self {
        let server = env::var("MAIL_SERVER").unwrap_or_else(|_| "smtp.gmail.com".to_string());
        let username = env::var("MAIL_USERNAME").ok();
        let password = env::var("MAIL_PASSWORD").ok();

        let (transport, from) = match (username, password) {
            (Some(username), Some(password)) => {
                let from = username.parse::<Mailbox>().ok();
                let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&server)
                    .ok()
                    .map(|builder| {
                        builder
                            .credentials(Credentials::new(username, password))
                            .build()
                    });

                if transport.is_some() && from.is_some() {
                    log::info!("📧 Mailer configured for {}", server);
                } else {
                    log::warn!("⚠️  Invalid mail configuration, mailer disabled");
                }

                (transport, from)
            }
            _ => {
                log::warn!("⚠️  MAIL_USERNAME/MAIL_PASSWORD not set, mailer disabled");
                (None, None)
            }
        };

        Self { transport, from }
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some() && self.from.is_some()
    }

    /// Envia um email. Falha de entrega vira Err(AppError::Mail) - cabe ao
    /// chamador decidir se isso é fatal (para convites, nunca é).
    pub async fn send(&self, to: &str, subject: &str, body: &str) -> Result<bool, AppError> {
        let (transport, from) = match (&self.transport, &self.from) {
            (Some(transport), Some(from)) => (transport, from),
            _ => {
                log::info!("📧 Mailer disabled, skipping email to {}", to);
                return Ok(false);
            }
        };

        let recipient = to
            .parse::<Mailbox>()
            .map_err(|e| AppError::Mail(format!("Invalid recipient '{}': {}", to, e)))?;

        let message = Message::builder()
            .from(from.clone())
            .to(recipient)
            .subject(subject)
            .body(body.to_string())
            .map_err(|e| AppError::Mail(format!("Failed to build message: {}", e)))?;

        transport
            .send(message)
            .await
            .map_err(|e| AppError::Mail(format!("SMTP delivery failed: {}", e)))?;

        log::info!("📧 Email sent to {}", to);

        Ok(true)
    }
}
