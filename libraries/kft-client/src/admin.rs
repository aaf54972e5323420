//! Admin portal operations.
//!
//! These calls do not check for a stored token first; a missing or rejected
//! token comes back as the server's 401.

use crate::client::SessionClient;
use crate::endpoints;
use crate::error::Result;
use crate::request::ApiRequest;
use crate::types::AdminUser;
use crate::variant::Admin;
use tracing::{debug, info};

/// Session client for the admin portal.
pub type AdminClient = SessionClient<Admin>;

impl SessionClient<Admin> {
    /// List every user account.
    pub async fn list_users(&self) -> Result<Vec<AdminUser>> {
        let users: Vec<AdminUser> = self.send(ApiRequest::get(endpoints::USERS)).await?;
        debug!(count = users.len(), "Fetched users");
        Ok(users)
    }

    /// Delete a user account.
    ///
    /// Nothing here stops an admin from deleting their own account; callers
    /// must check against [`SessionClient::user`] first.
    pub async fn delete_user(&self, user_id: i64) -> Result<()> {
        self.send_discarding_body(ApiRequest::delete(endpoints::admin_delete_user(user_id)))
            .await?;
        info!(user_id = user_id, "User deleted");
        Ok(())
    }
}
