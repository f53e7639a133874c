use anyhow::Context;
use std::sync::Arc;

use crate::configuration::RelaySettings;
use crate::domain::relay::{errors::SendError, models::token::TokenCache, service::Relay};
use crate::outbound::identity::microsoft::MicrosoftIdentityClient;
use crate::outbound::notifier::contact_alert::ContactAlert;
use crate::outbound::smtp::office365::Office365Transport;

pub type OutlookRelay = Relay<MicrosoftIdentityClient, Office365Transport>;
pub type OutlookContactAlert = ContactAlert<MicrosoftIdentityClient, Office365Transport>;

/// Relay against Microsoft identity and Exchange Online, sharing `token_cache`.
pub fn build_relay(
    settings: &RelaySettings,
    token_cache: Arc<TokenCache>,
) -> Result<OutlookRelay, SendError> {
    let timeout = settings.timeout();
    Ok(Relay::new(
        settings.credentials(),
        settings.smtp_user(),
        MicrosoftIdentityClient::new(timeout)?,
        Office365Transport::new(timeout),
        token_cache,
    ))
}

pub fn build_contact_alert(
    settings: &RelaySettings,
    relay: Arc<OutlookRelay>,
) -> Result<OutlookContactAlert, anyhow::Error> {
    let sender = settings
        .sender()
        .context("Invalid relay sender email address")?;
    let recipients = settings
        .recipients()
        .context("Invalid relay recipient email address")?;
    if recipients.is_empty() {
        tracing::warn!("No admin recipients configured, contact notifications will fail");
    }
    Ok(ContactAlert::new(relay, sender, recipients))
}
