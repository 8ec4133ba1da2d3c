//! Transport layer for the Desk client.

pub mod http;

pub use http::HttpTransport;
