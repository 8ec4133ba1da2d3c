//! # Deskgate client
//!
//! Rust client for the Desk ticketing REST API, built to be constructed once
//! per request for a single tenant.
//!
//! ```rust,no_run
//! use deskgate_client::{Credential, DeskClient, DeskResult};
//! use deskgate_client::api::tickets::TicketFilter;
//!
//! # async fn example() -> DeskResult<()> {
//! let client = DeskClient::builder()
//!     .base_url("https://desk.example.com/api/v1")
//!     .credential(Credential::new("dk_live_..."))
//!     .build()?;
//!
//! let open = client.tickets().list(&TicketFilter::default()).await?;
//! println!("{} tickets", open.data.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod transport;

pub use client::{DeskClient, DeskClientBuilder};
pub use config::{ClientConfig, RetryConfig};
pub use credential::{redact, Credential};
pub use error::{DeskError, DeskResult};
