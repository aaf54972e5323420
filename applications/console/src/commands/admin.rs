use super::{guarded, require_session};
use crate::cli::{AdminCommand, Credentials};
use crate::error::{ConsoleError, Result};
use crate::output;
use kft_client::AdminClient;
use std::io::Write;
use tracing::info;

pub(super) async fn run(client: &AdminClient, cmd: AdminCommand, out: &mut impl Write) -> Result<()> {
    match cmd {
        AdminCommand::Login(credentials) => login(client, &credentials, out).await,
        AdminCommand::Logout => {
            client.logout();
            writeln!(out, "Logged out.")?;
            Ok(())
        }
        AdminCommand::Whoami => {
            require_session(client)?;
            if let Some(user) = client.user() {
                output::render_admin(out, &user)?;
            }
            Ok(())
        }
        AdminCommand::Users => guarded(client, list_users(client, out)).await,
        AdminCommand::DeleteUser { id } => guarded(client, delete_user(client, id, out)).await,
    }
}

async fn login(client: &AdminClient, credentials: &Credentials, out: &mut impl Write) -> Result<()> {
    let response = client
        .login(&credentials.username, &credentials.password)
        .await?;

    match response.session() {
        Some((_, _, user)) => writeln!(out, "Logged in as {}.", user.username)?,
        None => {
            let note = response
                .message
                .or(response.detail)
                .unwrap_or_else(|| "Login response carried no session.".to_string());
            writeln!(out, "{note}")?;
        }
    }
    Ok(())
}

async fn list_users(client: &AdminClient, out: &mut impl Write) -> Result<()> {
    let users = client.list_users().await?;
    let current = client.user().map(|u| u.id);
    output::render_users(out, &users, current)?;
    Ok(())
}

async fn delete_user(client: &AdminClient, id: i64, out: &mut impl Write) -> Result<()> {
    if client.user().is_some_and(|u| u.id == id) {
        return Err(ConsoleError::SelfDelete);
    }

    client.delete_user(id).await?;
    info!(user_id = id, "User deleted from console");
    writeln!(out, "User deleted successfully.")?;
    Ok(())
}
