//! One-shot mode: read a raw event, run it through the gateway, print the
//! response. Mirrors how a serverless runtime drives the handler.

use crate::config::ServerConfig;
use crate::gateway::{Gateway, HttpResponse};
use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// `event` of `None` or `-` reads stdin.
pub async fn run(config: &ServerConfig, event: Option<&Path>) -> Result<HttpResponse> {
    let raw = match event {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file {}", path.display()))?,
        _ => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read event from stdin")?;
            raw
        }
    };

    let event: Value = serde_json::from_str(&raw).context("Event is not valid JSON")?;
    let gateway = Gateway::new(config)?;
    Ok(gateway.handle(&event).await)
}
