//! Login, logout, and whoami.

use anyhow::Result;
use clap::Args;
use std::io::Write;
use tessera_client::AuthService;

use super::Services;
use crate::output::{print_json, wants_json};
use crate::Cli;

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Username or email address.
    #[arg(long, short)]
    pub user: String,

    /// Password; prompted for when omitted.
    #[arg(long, short)]
    pub password: Option<String>,
}

/// Runs the login command.
pub async fn login(args: &LoginArgs, cli: &Cli) -> Result<()> {
    let services = Services::init().await?;
    let auth = AuthService::new(services.api);

    let password = match &args.password {
        Some(password) => password.clone(),
        None => prompt_password()?,
    };

    let user = auth.login(&args.user, &password).await?;

    if wants_json(cli) {
        print_json(&user, cli)?;
    } else if !cli.quiet {
        println!("Logged in as {}", user.visible_name());
    }
    Ok(())
}

/// Runs the logout command.
pub async fn logout(cli: &Cli) -> Result<()> {
    let services = Services::init().await?;
    let auth = AuthService::new(services.api);

    auth.logout().await?;

    if !cli.quiet && !wants_json(cli) {
        println!("Logged out");
    }
    Ok(())
}

/// Runs the whoami command via silent session verification.
pub async fn whoami(cli: &Cli) -> Result<()> {
    let services = Services::init().await?;
    let auth = AuthService::new(services.api);

    match auth.verify_session().await? {
        Some(user) => {
            if wants_json(cli) {
                print_json(&user, cli)?;
            } else {
                println!("{} (@{})", user.visible_name(), user.username);
            }
        }
        None => {
            if wants_json(cli) {
                println!("null");
            } else {
                println!("Not logged in");
            }
        }
    }
    Ok(())
}

/// Reads a password from stdin.
fn prompt_password() -> Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
