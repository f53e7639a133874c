use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use contact_relay::configuration::get_configuration;
use contact_relay::domain::email::EmailAddress;
use contact_relay::domain::relay::models::message::{ContentType, OutboundMessage};
use contact_relay::domain::relay::models::token::TokenCache;
use contact_relay::inbound::cli::{troubleshooting_tips, ConfigurationReport};
use contact_relay::outbound::telemetry::init_logger;
use contact_relay::startup::build_relay;

/// Sends one test message through the configured Microsoft 365 relay.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Recipient address; defaults to the first configured admin recipient.
    recipient: Option<String>,
}

const RULE: &str = "============================================================";

fn test_message_body(auth: &str) -> String {
    format!(
        "<html><body style=\"font-family: Arial, sans-serif;\">\
        <h2>Email Configuration Test</h2>\
        <p>This message verifies that the contact form relay is working.</p>\
        <ul><li>SMTP Host: smtp.office365.com</li><li>Port: 587 (STARTTLS)</li>\
        <li>Authentication: {auth}</li></ul>\
        </body></html>"
    )
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let configuration = match get_configuration() {
        Ok(configuration) => configuration,
        Err(e) => {
            eprintln!("Failed to read configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_logger("test_email", "warn", std::io::stderr);

    let settings = configuration.relay;
    let recipient = args
        .recipient
        .or_else(|| settings.recipients.iter().find(|r| !r.trim().is_empty()).cloned());
    let report = ConfigurationReport::new(&settings, recipient.clone());

    println!("{RULE}");
    println!("Testing Email Configuration");
    println!("{RULE}");
    println!();
    println!("{report}");

    let Some(mode) = report.auth_mode else {
        println!("ERROR: relay credentials are not configured!");
        println!("Set either all of the OAuth2 variables or the app password:");
        for status in report.missing() {
            println!("  export {}=\"your_value_here\"", status.variable);
        }
        return ExitCode::FAILURE;
    };

    let outcome = async {
        let recipient = recipient
            .ok_or_else(|| "no recipient given and none configured".to_string())?;
        let to = EmailAddress::parse(recipient).map_err(|e| e.to_string())?;
        let from = settings.sender().map_err(|e| e.to_string())?;
        let relay =
            build_relay(&settings, Arc::new(TokenCache::new())).map_err(|e| e.to_string())?;
        let message = OutboundMessage::new(
            from,
            vec![to],
            "Test Email from the contact relay",
            test_message_body(&mode.to_string()),
            ContentType::Html,
        )
        .map_err(|e| e.to_string())?;

        println!("Sending test email ({mode})...");
        relay.send(message).await.map_err(|e| e.to_string())
    }
    .await;

    println!();
    match outcome {
        Ok(()) => {
            println!("{RULE}");
            println!("✓ SUCCESS: Test email sent successfully!");
            println!("{RULE}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            println!("{RULE}");
            println!("✗ FAILED: Could not send test email");
            println!("{RULE}");
            println!();
            println!("Error: {error}");
            println!();
            println!("Troubleshooting Tips:");
            for tip in troubleshooting_tips(mode) {
                println!("{tip}");
            }
            ExitCode::FAILURE
        }
    }
}
