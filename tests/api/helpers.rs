use async_trait::async_trait;
use contact_relay::configuration::get_configuration;
use contact_relay::domain::contact::{
    models::contact::{ContactId, ContactRecord, NewContact},
    ports::{ContactRepository, ContactRepositoryError},
    service::ContactInbox,
};
use contact_relay::domain::relay::models::credentials::{
    OAuth2Credentials, PasswordCredentials, RelayCredentials,
};
use contact_relay::domain::relay::{models::token::TokenCache, service::Relay};
use contact_relay::inbound::http::{auth::password::compute_password_hash, Application};
use contact_relay::outbound::identity::microsoft::MicrosoftIdentityClient;
use contact_relay::outbound::notifier::contact_alert::ContactAlert;
use contact_relay::outbound::smtp::office365::Office365Transport;
use contact_relay::outbound::telemetry::init_logger;
use once_cell::sync::Lazy;
use secrecy::Secret;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::MockServer;

pub const TENANT_ID: &str = "contoso-tenant";
const ADMIN_PASSWORD: &str = "correct horse battery staple";

/// Contact repository kept in memory so API tests need no database.
#[derive(Default)]
pub struct InMemoryContacts {
    records: Mutex<Vec<ContactRecord>>,
}

impl InMemoryContacts {
    pub fn stored(&self) -> Vec<ContactRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContactRepository for InMemoryContacts {
    async fn insert(&self, contact: NewContact) -> Result<ContactRecord, ContactRepositoryError> {
        let record = ContactRecord::new(contact);
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn recent(
        &self,
        limit: i64,
        read: Option<bool>,
    ) -> Result<Vec<ContactRecord>, ContactRepositoryError> {
        let mut records = self.stored();
        records.retain(|r| read.map_or(true, |read| r.read == read));
        records.reverse();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit as usize);
        Ok(records)
    }

    async fn set_read(&self, id: ContactId, read: bool) -> Result<(), ContactRepositoryError> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ContactRepositoryError::NotFound(id))?;
        record.read = read;
        Ok(())
    }

    async fn set_notes(&self, id: ContactId, notes: String) -> Result<(), ContactRepositoryError> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ContactRepositoryError::NotFound(id))?;
        record.notes = notes;
        Ok(())
    }
}

/// Which credentials the spawned application relays with.
pub enum RelayMode {
    OAuth2,
    Password,
    Unconfigured,
}

pub struct TestApp {
    pub address: String,
    pub contacts: Arc<InMemoryContacts>,
    pub identity_server: MockServer,
    pub token_cache: Arc<TokenCache>,
    pub admin_username: String,
    pub admin_password: String,
}

impl TestApp {
    pub async fn post_contact(&self, body: String) -> reqwest::Response {
        reqwest::Client::new()
            .post(&format!("{}/contact", &self.address))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_admin_contacts(&self, query: &str) -> reqwest::Response {
        reqwest::Client::new()
            .get(&format!("{}/admin/contacts{}", &self.address, query))
            .basic_auth(&self.admin_username, Some(&self.admin_password))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_admin_flag(&self, id: &str, flag: &str) -> reqwest::Response {
        reqwest::Client::new()
            .post(&format!("{}/admin/contacts/{}/{}", &self.address, id, flag))
            .basic_auth(&self.admin_username, Some(&self.admin_password))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_admin_notes(&self, id: &str, notes: &str) -> reqwest::Response {
        reqwest::Client::new()
            .post(&format!("{}/admin/contacts/{}/notes", &self.address, id))
            .basic_auth(&self.admin_username, Some(&self.admin_password))
            .form(&[("notes", notes)])
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub fn valid_contact_body() -> String {
    "name=Ursula%20Le%20Guin&email=ursula_le_guin%40gmail.com&phone=555-0100\
    &subject=Beach%20house&message=Is%20the%20beach%20house%20free%20in%20May%3F"
        .to_string()
}

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        init_logger(&subscriber_name, &default_filter_level, std::io::stdout);
    } else {
        init_logger(&subscriber_name, &default_filter_level, std::io::sink);
    }
});

/// A local port nothing listens on.
fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind a random port");
    listener.local_addr().unwrap().port()
}

pub async fn spawn_app(mode: RelayMode) -> TestApp {
    Lazy::force(&TRACING);
    let identity_server = MockServer::start().await;
    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration");
        c.application.port = 0;
        c.application.admin_username = "admin".into();
        c.application.admin_password_hash =
            compute_password_hash(Secret::new(ADMIN_PASSWORD.into()))
                .expect("Failed to hash the admin password");
        c
    };

    let credentials = match mode {
        RelayMode::OAuth2 => Some(RelayCredentials::OAuth2(OAuth2Credentials {
            client_id: "11111111-2222-3333-4444-555555555555".into(),
            client_secret: Secret::new("client-secret".into()),
            tenant_id: TENANT_ID.into(),
        })),
        RelayMode::Password => Some(RelayCredentials::Password(PasswordCredentials {
            username: "info@example.com".into(),
            password: Secret::new("app-password".into()),
        })),
        RelayMode::Unconfigured => None,
    };

    let timeout = Duration::from_secs(2);
    let token_cache = Arc::new(TokenCache::new());
    let relay = Relay::new(
        credentials,
        "info@example.com".into(),
        MicrosoftIdentityClient::with_authority(identity_server.uri(), timeout)
            .expect("Failed to build the identity client"),
        Office365Transport::with_endpoint("127.0.0.1", closed_port(), timeout),
        Arc::clone(&token_cache),
    );
    let alert = ContactAlert::new(
        Arc::new(relay),
        "info@example.com".try_into().unwrap(),
        vec!["admin@example.com".try_into().unwrap()],
    );

    let contacts = Arc::new(InMemoryContacts::default());
    let contact_service = ContactInbox::new(Arc::clone(&contacts), Arc::new(alert));

    let application = Application::build(contact_service, configuration.application.clone())
        .await
        .expect("Failed to build application");
    let application_port = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address: format!("http://localhost:{}", application_port),
        contacts,
        identity_server,
        token_cache,
        admin_username: "admin".into(),
        admin_password: ADMIN_PASSWORD.into(),
    }
}
