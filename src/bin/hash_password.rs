use std::io::BufRead;

use anyhow::Context;
use clap::Parser;
use contact_relay::inbound::http::auth::password::compute_password_hash;
use secrecy::{ExposeSecret, Secret};

/// Reads an admin password from stdin and prints its argon2id hash, ready for
/// `APP_APPLICATION__ADMIN_PASSWORD_HASH`.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {}

fn main() -> anyhow::Result<()> {
    Args::parse();

    let mut password = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut password)
        .context("Failed to read the password from stdin")?;
    let password = password.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        anyhow::bail!("The password must not be empty");
    }

    let password_hash = compute_password_hash(Secret::new(password.to_string()))?;
    println!("{}", password_hash.expose_secret());
    Ok(())
}
