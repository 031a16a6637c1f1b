//! Per-network fetchers.
//!
//! Each submodule knows one endpoint's response shape: `parse` turns a raw
//! body into a record, `fetch` renders the endpoint, performs the GET and
//! parses. Helpers shared by all four live here.
pub mod facebook;
pub mod linkedin;
pub mod pinterest;
pub mod stumbleupon;

use crate::network::Network;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use sharecount_common::{Result, ShareCountError};
use sharecount_http::Transport;

const URL_PLACEHOLDER: &str = "{url}";

/// Substitute the form-encoded target into an endpoint template.
pub fn render_endpoint(template: &str, target: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
    template.replace(URL_PLACEHOLDER, &encoded)
}

pub(crate) fn has_placeholder(template: &str) -> bool {
    template.contains(URL_PLACEHOLDER)
}

/// One GET through the transport, with the per-network log line.
pub(crate) async fn get_body(
    transport: &dyn Transport,
    network: Network,
    template: &str,
    target: &str,
) -> Result<String> {
    let endpoint = render_endpoint(template, target);
    tracing::debug!(%network, target, endpoint=%endpoint, "stats.request");
    Ok(transport.get_text(&endpoint).await?)
}

/// Parse a body as JSON and reject empty payloads.
pub(crate) fn decode_body(network: Network, body: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(body).map_err(|e| decode_error(network, e))?;
    if is_falsy(&value) {
        return Err(ShareCountError::NoData {
            network: network_label(network),
        });
    }
    Ok(value)
}

pub(crate) fn from_value<T: DeserializeOwned>(network: Network, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| decode_error(network, e))
}

pub(crate) fn decode_error(network: Network, err: impl std::fmt::Display) -> ShareCountError {
    ShareCountError::Decode {
        network: network_label(network),
        message: err.to_string(),
    }
}

fn network_label(network: Network) -> &'static str {
    match network {
        Network::Facebook => "Facebook",
        Network::Pinterest => "Pinterest",
        Network::LinkedIn => "LinkedIn",
        Network::StumbleUpon => "StumbleUpon",
    }
}

/// JSON values that count as "nothing came back".
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Counts arrive as numbers or numeric strings depending on the network.
pub(crate) fn count<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Unsigned(n) => Ok(n),
        Raw::Signed(n) => Err(de::Error::custom(format!("negative count {n}"))),
        Raw::Float(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => Ok(f as u64),
        Raw::Float(f) => Err(de::Error::custom(format!("count {f} is not a whole number"))),
        Raw::Text(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| de::Error::custom(format!("count {s:?} is not a non-negative integer"))),
    }
}
