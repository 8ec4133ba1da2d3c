//! Users (agents) API endpoints.

use crate::client::DeskClient;
use crate::error::DeskResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ListQuery, Page};

/// Users API.
pub struct UsersApi<'a> {
    client: &'a DeskClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a DeskClient) -> Self {
        Self { client }
    }

    /// List users.
    pub async fn list(&self, query: &ListQuery) -> DeskResult<Page<User>> {
        self.client.http.get_with_query("users", query).await
    }

    /// Get a specific user.
    pub async fn get(&self, user_id: u64) -> DeskResult<User> {
        self.client.http.get(&format!("users/{user_id}")).await
    }
}

/// An agent or administrator of the Desk account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
