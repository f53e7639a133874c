use crate::helpers::{spawn_app, valid_contact_body, RelayMode, TENANT_ID};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

fn token_endpoint() -> String {
    format!("/{}/oauth2/v2.0/token", TENANT_ID)
}

#[tokio::test]
async fn contact_returns_200_and_stores_a_valid_submission() {
    let app = spawn_app(RelayMode::Unconfigured).await;

    let response = app.post_contact(valid_contact_body()).await;

    assert_eq!(200, response.status().as_u16());
    let stored = app.contacts.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].contact.name.as_ref(), "Ursula Le Guin");
    assert_eq!(stored[0].contact.email.as_ref(), "ursula_le_guin@gmail.com");
    assert_eq!(stored[0].contact.phone.as_ref(), "555-0100");
    assert!(!stored[0].read);
}

#[tokio::test]
async fn contact_returns_400_when_data_is_missing_or_invalid() {
    let app = spawn_app(RelayMode::Unconfigured).await;
    let test_cases = vec![
        (
            "email=ursula_le_guin%40gmail.com&subject=Beach%20house&message=Is%20it%20free%20in%20May",
            "missing the name",
        ),
        (
            "name=U&email=ursula_le_guin%40gmail.com&subject=Beach%20house&message=Is%20it%20free%20in%20May",
            "a one letter name",
        ),
        (
            "name=Ursula&email=not-an-email&subject=Beach%20house&message=Is%20it%20free%20in%20May",
            "an invalid email",
        ),
        (
            "name=Ursula&email=ursula_le_guin%40gmail.com&subject=Hi&message=Is%20it%20free%20in%20May",
            "a short subject",
        ),
        (
            "name=Ursula&email=ursula_le_guin%40gmail.com&subject=Beach%20house&message=Free%3F",
            "a short message",
        ),
        (
            "name=Ursula&email=ursula_le_guin%40gmail.com&phone=123456789012345678901\
            &subject=Beach%20house&message=Is%20it%20free%20in%20May",
            "an overly long phone number",
        ),
    ];

    for (invalid_body, description) in test_cases {
        let response = app.post_contact(invalid_body.into()).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            description
        );
    }
    assert!(app.contacts.stored().is_empty());
}

#[tokio::test]
async fn contact_requests_a_token_before_relaying_the_alert() {
    let app = spawn_app(RelayMode::OAuth2).await;

    Mock::given(method("POST"))
        .and(path(token_endpoint()))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token_type": "Bearer",
            "expires_in": 3599,
            "access_token": "eyJ0eXAi"
        })))
        .expect(1)
        .mount(&app.identity_server)
        .await;

    let response = app.post_contact(valid_contact_body()).await;

    // The SMTP endpoint is unreachable in tests; the submission must still succeed.
    assert_eq!(200, response.status().as_u16());
    assert_eq!(app.contacts.stored().len(), 1);
}

#[tokio::test]
async fn cached_token_is_reused_across_submissions() {
    let app = spawn_app(RelayMode::OAuth2).await;

    Mock::given(method("POST"))
        .and(path(token_endpoint()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "expires_in": 3599,
            "access_token": "eyJ0eXAi"
        })))
        .expect(1)
        .mount(&app.identity_server)
        .await;

    for _ in 0..2 {
        let response = app.post_contact(valid_contact_body()).await;
        assert_eq!(200, response.status().as_u16());
    }

    assert_eq!(app.contacts.stored().len(), 2);
    assert_eq!(app.token_cache.len().await, 1);
}

#[tokio::test]
async fn contact_is_saved_when_the_identity_provider_rejects_the_client() {
    let app = spawn_app(RelayMode::OAuth2).await;

    Mock::given(method("POST"))
        .and(path(token_endpoint()))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": "invalid_client",
            "error_description": "AADSTS7000215: Invalid client secret provided."
        })))
        .expect(1)
        .mount(&app.identity_server)
        .await;

    let response = app.post_contact(valid_contact_body()).await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(app.contacts.stored().len(), 1);
    assert!(app.token_cache.is_empty().await);
}

#[tokio::test]
async fn password_relay_never_contacts_the_identity_provider() {
    let app = spawn_app(RelayMode::Password).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.identity_server)
        .await;

    let response = app.post_contact(valid_contact_body()).await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(app.contacts.stored().len(), 1);
}

#[tokio::test]
async fn unconfigured_relay_does_not_block_submissions() {
    let app = spawn_app(RelayMode::Unconfigured).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.identity_server)
        .await;

    let response = app.post_contact(valid_contact_body()).await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(app.contacts.stored().len(), 1);
}
