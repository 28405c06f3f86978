//! Reads trigger payloads handed to the CLI.

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use tokio::io::AsyncReadExt;

/// Reads and parses a JSON event from `path`, or from stdin when `path` is `-`.
pub(crate) async fn read_event<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("failed to read event from stdin")?;
        buf
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read event file {}", path.display()))?
    };

    parse_event(&raw).with_context(|| format!("invalid event payload in {}", path.display()))
}

fn parse_event<T: DeserializeOwned>(raw: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(raw)
}
