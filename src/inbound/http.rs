use crate::configuration::ApplicationSettings;
use crate::domain::contact::ports::ContactService;
use crate::inbound::http::auth::AdminCredentials;
use crate::inbound::http::handlers::{
    health_check, list_contacts, mark_contact_read, mark_contact_unread, submit_contact,
    update_contact_notes,
};
use crate::inbound::http::state::SharedContactState;
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub mod auth;
mod errors;
mod handlers;
pub mod state;

pub struct Application {
    port: u16,
    server: Server,
}

fn run<CS: ContactService>(
    listener: TcpListener,
    contact_state: SharedContactState<CS>,
) -> Result<Server, std::io::Error> {
    let contact_state = web::Data::new(contact_state);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .app_data(contact_state.clone())
            .route("/contact", web::post().to(submit_contact::<CS>))
            .service(
                web::scope("/admin/contacts")
                    .route("", web::get().to(list_contacts::<CS>))
                    .route("/{id}/read", web::post().to(mark_contact_read::<CS>))
                    .route("/{id}/unread", web::post().to(mark_contact_unread::<CS>))
                    .route("/{id}/notes", web::post().to(update_contact_notes::<CS>)),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}

impl Application {
    pub async fn build<CS: ContactService>(
        contact_service: CS,
        configuration: ApplicationSettings,
    ) -> Result<Self, std::io::Error> {
        let address = format!("{}:{}", configuration.host, configuration.port);
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let admin = AdminCredentials::new(
            configuration.admin_username,
            configuration.admin_password_hash,
        );
        let contact_state = SharedContactState::new(contact_service, admin);

        let server = run(listener, contact_state)?;
        tracing::info!(port, "HTTP server listening");

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
