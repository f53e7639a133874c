use anyhow::Context;
use std::sync::Arc;

use contact_relay::configuration::get_configuration;
use contact_relay::domain::contact::service::ContactInbox;
use contact_relay::domain::relay::models::token::TokenCache;
use contact_relay::inbound::http::Application;
use contact_relay::outbound::db::postgres_db::PostgresDb;
use contact_relay::outbound::telemetry::init_logger;
use contact_relay::startup::{build_contact_alert, build_relay};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration().context("Failed to read configuration")?;
    init_logger("contact_relay", &configuration.log_level(), std::io::stdout);

    let contact_repo = PostgresDb::new(&configuration.database);
    contact_repo
        .migrate()
        .await
        .context("Failed to run database migrations")?;

    let relay = build_relay(&configuration.relay, Arc::new(TokenCache::new()))?;
    let contact_alert = build_contact_alert(&configuration.relay, Arc::new(relay))?;
    let contact_service = ContactInbox::new(Arc::new(contact_repo), Arc::new(contact_alert));
    let application = Application::build(contact_service, configuration.application).await?;

    application.run_until_stopped().await?;
    Ok(())
}
