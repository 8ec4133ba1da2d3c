//! Catalog items API endpoints.

use crate::client::DeskClient;
use crate::error::DeskResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ListQuery, Page};

/// Catalog items API.
pub struct CatalogApi<'a> {
    client: &'a DeskClient,
}

impl<'a> CatalogApi<'a> {
    pub(crate) fn new(client: &'a DeskClient) -> Self {
        Self { client }
    }

    /// List service catalog items.
    pub async fn list(&self, query: &ListQuery) -> DeskResult<Page<CatalogItem>> {
        self.client.http.get_with_query("catalog-items", query).await
    }

    /// Get a specific catalog item.
    pub async fn get(&self, item_id: u64) -> DeskResult<CatalogItem> {
        self.client.http.get(&format!("catalog-items/{item_id}")).await
    }
}

/// A service catalog entry a ticket can be filed against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
