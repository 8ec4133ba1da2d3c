//! Desk API endpoint groups.

pub mod catalog;
pub mod clients;
pub mod communications;
pub mod stages;
pub mod tickets;
pub mod users;

pub use catalog::CatalogApi;
pub use clients::ClientsApi;
pub use communications::CommunicationsApi;
pub use stages::StagesApi;
pub use tickets::TicketsApi;
pub use users::UsersApi;

use serde::{Deserialize, Serialize};

/// One page of a list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

/// Paging metadata returned alongside list results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageMeta {
    pub total: Option<u64>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Common query parameters for list endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}
