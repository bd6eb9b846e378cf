use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// How raw json text is cleaned up before it is written to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sanitize {
    /// Parse and pretty print. Key order and number text are kept as sent
    Reserialize,
    /// Strip backslashes, quote, strip again, unquote. Loses genuine
    /// backslashes and turns escaped control characters into letters.
    Legacy,
}

impl Default for Sanitize {
    fn default() -> Self {
        Sanitize::Reserialize
    }
}

impl Sanitize {
    pub fn apply(self, raw: &str) -> Result<String> {
        match self {
            Sanitize::Reserialize => reserialize(raw),
            Sanitize::Legacy => legacy(raw),
        }
    }
}

fn reserialize(raw: &str) -> Result<String> {
    let value: Value = serde_json::from_str(raw)?;
    let mut buf = Vec::with_capacity(raw.len());
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| Error::Json(serde::ser::Error::custom(e)))
}

fn legacy(raw: &str) -> Result<String> {
    let stripped = raw.replace('\\', "");
    let quoted = serde_json::to_string_pretty(&stripped)?.replace('\\', "");
    let mut chars = quoted.chars();
    chars.next();
    chars.next_back();
    Ok(chars.as_str().to_owned())
}

/// Sanitize `raw` and write it to `<stem>.json`, returning the written path
pub async fn write_snapshot(raw: &str, stem: &Path, mode: Sanitize) -> Result<PathBuf> {
    let content = mode.apply(raw)?;
    let mut path = stem.as_os_str().to_owned();
    path.push(".json");
    let path = PathBuf::from(path);
    tokio::fs::write(&path, content)
        .await
        .map_err(Error::io(&path))?;
    info!("saved {}", path.display());
    Ok(path)
}
