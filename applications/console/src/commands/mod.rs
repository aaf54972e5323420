//! Command handlers.
//!
//! Handlers own the page-level decisions the client library leaves to its
//! callers: refusing protected commands without a session, dropping the
//! session when the server rejects it, and the admin self-delete guard.

mod admin;
mod merchant;
mod password;

use crate::cli::{Command, Portal};
use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, Result};
use kft_client::{
    AdminClient, ClientConfig, FileStore, MerchantClient, SessionClient, SessionStore, Variant,
};
use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use tracing::{info, warn};

/// Both portal clients over one session store.
#[derive(Debug)]
pub struct Console {
    admin: AdminClient,
    merchant: MerchantClient,
}

impl Console {
    /// Build a console that keeps its session in the configured directory.
    pub fn from_config(config: &ConsoleConfig) -> Result<Self> {
        let store = Arc::new(FileStore::new(config.session_file()));
        info!(path = %store.path().display(), "Using session file");
        Self::new(config.client_config(), store)
    }

    pub fn new(client_config: ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self> {
        Ok(Self {
            admin: AdminClient::new(client_config.clone(), Arc::clone(&store))?,
            merchant: MerchantClient::new(client_config, store)?,
        })
    }

    pub fn admin(&self) -> &AdminClient {
        &self.admin
    }

    pub fn merchant(&self) -> &MerchantClient {
        &self.merchant
    }

    /// Run one command, writing its output to `out`.
    pub async fn run(&self, command: Command, out: &mut impl Write) -> Result<()> {
        match command {
            Command::Admin(cmd) => admin::run(&self.admin, cmd, out).await,
            Command::Merchant(cmd) => merchant::run(&self.merchant, cmd, out).await,
            Command::Password(cmd) => match cmd.portal() {
                Portal::Admin => password::run(&self.admin, cmd, out).await,
                Portal::Merchant => password::run(&self.merchant, cmd, out).await,
            },
        }
    }
}

/// Fail with [`ConsoleError::NotLoggedIn`] unless a session is stored.
fn require_session<V: Variant>(client: &SessionClient<V>) -> Result<()> {
    if client.is_authenticated() {
        Ok(())
    } else {
        Err(ConsoleError::NotLoggedIn)
    }
}

/// Run a protected command: check the session first, then drop it if the
/// server rejects it. The command future does nothing until awaited, so no
/// request goes out without a session.
async fn guarded<V: Variant>(
    client: &SessionClient<V>,
    command: impl Future<Output = Result<()>>,
) -> Result<()> {
    require_session(client)?;
    let result = command.await;
    end_session_on_rejection(client, result)
}

/// Drop the session when the error says it is no longer valid.
fn end_session_on_rejection<V: Variant, T>(
    client: &SessionClient<V>,
    result: Result<T>,
) -> Result<T> {
    if let Err(e) = &result {
        if e.requires_login() {
            warn!(portal = V::NAME, error = %e, "Session rejected, logging out");
            client.logout();
        }
    }
    result
}
