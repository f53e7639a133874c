use async_trait::async_trait;
use lettre::{
    message::{header::ContentType as ContentTypeHeader, Mailbox},
    transport::smtp::{
        authentication::{Credentials, Mechanism},
        Error as SmtpError,
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use secrecy::ExposeSecret;

use crate::domain::email::EmailAddress;
use crate::domain::relay::{
    errors::SendError,
    models::message::{ContentType, OutboundMessage},
    ports::{MailTransport, SmtpAuth},
};

const OFFICE365_HOST: &str = "smtp.office365.com";
const SUBMISSION_PORT: u16 = 587;

/// Reply codes Exchange Online uses to refuse a login.
const AUTH_REJECTION_CODES: [&str; 4] = ["530", "534", "535", "538"];

/// Reply to STARTTLS when the server cannot start TLS (RFC 3207).
const TLS_UNAVAILABLE_CODE: &str = "454";

/// STARTTLS submission to Exchange Online, one session per message.
#[derive(Debug, Clone)]
pub struct Office365Transport {
    host: String,
    port: u16,
    timeout: std::time::Duration,
}

impl Office365Transport {
    pub fn new(timeout: std::time::Duration) -> Self {
        Self::with_endpoint(OFFICE365_HOST, SUBMISSION_PORT, timeout)
    }

    pub fn with_endpoint(host: impl Into<String>, port: u16, timeout: std::time::Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }

    fn transport(&self, auth: &SmtpAuth) -> Result<AsyncSmtpTransport<Tokio1Executor>, SendError> {
        let (credentials, mechanisms) = match auth {
            SmtpAuth::XOAuth2 { user, token } => (
                Credentials::new(user.clone(), token.value().expose_secret().clone()),
                vec![Mechanism::Xoauth2],
            ),
            SmtpAuth::Password { username, password } => (
                Credentials::new(username.clone(), password.expose_secret().clone()),
                vec![Mechanism::Plain, Mechanism::Login],
            ),
        };

        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
                .map_err(|e| {
                    SendError::Configuration(format!("Invalid SMTP host {}: {e}", self.host))
                })?
                .port(self.port)
                .credentials(credentials)
                .authentication(mechanisms)
                .timeout(Some(self.timeout))
                .build(),
        )
    }
}

fn mailbox(address: &EmailAddress) -> Result<Mailbox, SendError> {
    address
        .as_str()
        .parse()
        .map_err(|e| SendError::Configuration(format!("Invalid mailbox {address}: {e}")))
}

fn build_message(message: &OutboundMessage) -> Result<Message, SendError> {
    let mut builder = Message::builder()
        .from(mailbox(message.from())?)
        .subject(message.subject());
    for recipient in message.to() {
        builder = builder.to(mailbox(recipient)?);
    }
    if let Some(reply_to) = message.reply_to() {
        builder = builder.reply_to(mailbox(reply_to)?);
    }

    let content_type = match message.content_type() {
        ContentType::PlainText => ContentTypeHeader::TEXT_PLAIN,
        ContentType::Html => ContentTypeHeader::TEXT_HTML,
    };
    builder
        .header(content_type)
        .body(message.body().to_string())
        .map_err(|e| SendError::Configuration(format!("Failed to build the message: {e}")))
}

/// Maps a failed SMTP exchange onto the relay's error taxonomy.
fn classify(error: SmtpError, auth: &SmtpAuth) -> SendError {
    let code = error.status().map(|code| code.to_string());
    match code.as_deref() {
        Some(TLS_UNAVAILABLE_CODE) => {
            SendError::Connection(format!("Server refused to start TLS: {error}"))
        }
        Some(code) if AUTH_REJECTION_CODES.contains(&code) => {
            let description = match auth {
                SmtpAuth::XOAuth2 { .. } => format!(
                    "Server refused XOAUTH2 ({error}). Check that SMTP.SendAsApp is granted \
                    and the service principal can send as the mailbox."
                ),
                SmtpAuth::Password { .. } => format!(
                    "Server refused the password ({error}). Check the app password and that \
                    SMTP AUTH is enabled for the mailbox."
                ),
            };
            SendError::auth(code, description)
        }
        Some(_) => SendError::Transmission(error.to_string()),
        None => SendError::Connection(error.to_string()),
    }
}

#[async_trait]
impl MailTransport for Office365Transport {
    #[tracing::instrument(
        name = "Deliver email over SMTP",
        skip(self, message, auth),
        fields(host = %self.host, port = self.port)
    )]
    async fn deliver(&self, message: &OutboundMessage, auth: &SmtpAuth) -> Result<(), SendError> {
        let email = build_message(message)?;
        let transport = self.transport(auth)?;

        let response = transport
            .send(email)
            .await
            .map_err(|e| classify(e, auth))?;
        tracing::info!(code = %response.code(), "Message accepted by the mail server");
        Ok(())
    }
}
