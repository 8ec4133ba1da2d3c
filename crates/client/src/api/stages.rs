//! Stages API endpoints.

use crate::client::DeskClient;
use crate::error::DeskResult;
use serde::{Deserialize, Serialize};

use super::Page;

/// Stages API.
pub struct StagesApi<'a> {
    client: &'a DeskClient,
}

impl<'a> StagesApi<'a> {
    pub(crate) fn new(client: &'a DeskClient) -> Self {
        Self { client }
    }

    /// List the workflow stages tickets move through.
    pub async fn list(&self) -> DeskResult<Page<Stage>> {
        self.client.http.get("stages").await
    }
}

/// A ticket workflow stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    pub id: u64,
    pub name: String,
    pub position: Option<u32>,
    #[serde(default)]
    pub closed: bool,
}
