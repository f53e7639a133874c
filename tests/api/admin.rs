use crate::helpers::{spawn_app, valid_contact_body, RelayMode};

#[tokio::test]
async fn admin_routes_reject_requests_without_credentials() {
    let app = spawn_app(RelayMode::Unconfigured).await;

    let response = reqwest::Client::new()
        .get(&format!("{}/admin/contacts", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(401, response.status().as_u16());
    assert_eq!(
        r#"Basic realm="admin""#,
        response.headers()["WWW-Authenticate"]
    );
}

#[tokio::test]
async fn admin_routes_reject_a_wrong_password() {
    let app = spawn_app(RelayMode::Unconfigured).await;

    let response = reqwest::Client::new()
        .get(&format!("{}/admin/contacts", &app.address))
        .basic_auth(&app.admin_username, Some("wrong password"))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(401, response.status().as_u16());
}

#[tokio::test]
async fn admin_lists_contacts_newest_first() {
    let app = spawn_app(RelayMode::Unconfigured).await;
    app.post_contact(valid_contact_body()).await;
    app.post_contact(
        "name=Octavia%20Butler&email=octavia%40example.com\
        &subject=Long-term%20lease&message=Do%20you%20offer%20yearly%20leases%3F"
            .into(),
    )
    .await;

    let response = app.get_admin_contacts("").await;

    assert_eq!(200, response.status().as_u16());
    let contacts: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0]["name"], "Octavia Butler");
    assert_eq!(contacts[1]["name"], "Ursula Le Guin");
    assert_eq!(contacts[1]["phone"], "555-0100");
    assert_eq!(contacts[0]["read"], false);
}

#[tokio::test]
async fn admin_list_honours_the_limit() {
    let app = spawn_app(RelayMode::Unconfigured).await;
    for _ in 0..3 {
        app.post_contact(valid_contact_body()).await;
    }

    let response = app.get_admin_contacts("?limit=2").await;

    let contacts: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(contacts.len(), 2);
}

#[tokio::test]
async fn admin_can_mark_a_contact_read_and_unread() {
    let app = spawn_app(RelayMode::Unconfigured).await;
    app.post_contact(valid_contact_body()).await;
    let id = app.contacts.stored()[0].id.to_string();

    let response = app.post_admin_flag(&id, "read").await;
    assert_eq!(200, response.status().as_u16());
    assert!(app.contacts.stored()[0].read);

    let response = app.post_admin_flag(&id, "unread").await;
    assert_eq!(200, response.status().as_u16());
    assert!(!app.contacts.stored()[0].read);
}

#[tokio::test]
async fn marking_an_unknown_contact_returns_404() {
    let app = spawn_app(RelayMode::Unconfigured).await;

    let response = app
        .post_admin_flag(&uuid::Uuid::new_v4().to_string(), "read")
        .await;

    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn admin_can_filter_contacts_by_read_flag() {
    let app = spawn_app(RelayMode::Unconfigured).await;
    app.post_contact(valid_contact_body()).await;
    app.post_contact(valid_contact_body()).await;
    let id = app.contacts.stored()[0].id.to_string();
    app.post_admin_flag(&id, "read").await;

    let read: Vec<serde_json::Value> = app
        .get_admin_contacts("?read=true")
        .await
        .json()
        .await
        .unwrap();
    let unread: Vec<serde_json::Value> = app
        .get_admin_contacts("?read=false")
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(read.len(), 1);
    assert_eq!(read[0]["id"], id.as_str());
    assert_eq!(unread.len(), 1);
    assert_ne!(unread[0]["id"], id.as_str());
}

#[tokio::test]
async fn admin_can_record_notes_on_a_contact() {
    let app = spawn_app(RelayMode::Unconfigured).await;
    app.post_contact(valid_contact_body()).await;
    let id = app.contacts.stored()[0].id.to_string();

    let response = app
        .post_admin_notes(&id, "Called back, viewing booked for Friday.")
        .await;

    assert_eq!(200, response.status().as_u16());
    let contacts: Vec<serde_json::Value> = app.get_admin_contacts("").await.json().await.unwrap();
    assert_eq!(contacts[0]["notes"], "Called back, viewing booked for Friday.");
}

#[tokio::test]
async fn notes_for_an_unknown_contact_return_404() {
    let app = spawn_app(RelayMode::Unconfigured).await;

    let response = app
        .post_admin_notes(&uuid::Uuid::new_v4().to_string(), "orphan")
        .await;

    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn notes_require_admin_credentials() {
    let app = spawn_app(RelayMode::Unconfigured).await;
    app.post_contact(valid_contact_body()).await;
    let id = app.contacts.stored()[0].id;

    let response = reqwest::Client::new()
        .post(&format!("{}/admin/contacts/{}/notes", &app.address, id))
        .form(&[("notes", "sneaky")])
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(401, response.status().as_u16());
    assert!(app.contacts.stored()[0].notes.is_empty());
}

#[tokio::test]
async fn unknown_admin_username_is_rejected() {
    let app = spawn_app(RelayMode::Unconfigured).await;

    let response = reqwest::Client::new()
        .get(&format!("{}/admin/contacts", &app.address))
        .basic_auth("root", Some(&app.admin_password))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(401, response.status().as_u16());
}
