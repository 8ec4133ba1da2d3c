//! Multi-tenant tool-protocol gateway for the Desk ticketing API.
//!
//! The [`gateway::Gateway`] turns one raw HTTP event into one
//! [`gateway::HttpResponse`]. [`api`] hosts it behind axum; [`invoke`] runs
//! it once against an event read from a file or stdin.

pub mod api;
pub mod config;
pub mod gateway;
pub mod invoke;

pub use config::ServerConfig;
pub use gateway::{Gateway, HttpResponse};
